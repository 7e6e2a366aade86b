//! Integration tests for ConfigManager and configuration file handling
//!
//! These tests verify:
//! - Defaults when no file exists
//! - Partial files merged over defaults
//! - Environment overrides winning over the file
//! - Loaded settings reaching the widgets

use camino::Utf8PathBuf;
use sitewidgets::config::CONFIG_FILE_NAME;
use sitewidgets::headless::{DemoOptions, HeadlessBrowser, demo_markup};
use sitewidgets::{ConfigManager, Page, WidgetConfig};
use std::fs;
use std::time::Duration;
use tempfile::TempDir;

fn create_test_config_dir() -> (TempDir, Utf8PathBuf) {
    let temp_dir = TempDir::new().unwrap();
    let config_path = Utf8PathBuf::try_from(temp_dir.path().to_path_buf()).unwrap();
    (temp_dir, config_path)
}

#[test]
fn test_create_config_manager() {
    let (_temp_dir, config_path) = create_test_config_dir();
    let manager = ConfigManager::new(&config_path).unwrap();

    assert_eq!(manager.config_dir(), &config_path);
    assert_eq!(manager.config_path(), config_path.join(CONFIG_FILE_NAME));
}

#[test]
fn test_creates_missing_directory() {
    let (_temp_dir, config_path) = create_test_config_dir();
    let nested = config_path.join("nested").join("dir");

    ConfigManager::new(&nested).unwrap();

    assert!(nested.exists());
}

#[test]
fn test_load_defaults_without_file() {
    let (_temp_dir, config_path) = create_test_config_dir();
    let manager = ConfigManager::new(&config_path).unwrap();

    let config = manager.load_with_env_prefix("SITEWIDGETS_IT_DEFAULTS").unwrap();

    assert_eq!(config, WidgetConfig::default());
    assert_eq!(config.nav_menu.close_above_width, 768);
    assert_eq!(config.carousel.breakpoints.single_max_width, 768);
    assert_eq!(config.carousel.breakpoints.double_max_width, 992);
    assert_eq!(config.carousel.drag_threshold_percent, 20.0);
    assert_eq!(config.carousel.autoplay_interval_ms, 5000);
    assert_eq!(config.carousel.resize_debounce_ms, 100);
}

#[test]
fn test_partial_file_merges_with_defaults() {
    let (_temp_dir, config_path) = create_test_config_dir();
    let manager = ConfigManager::new(&config_path).unwrap();

    fs::write(
        manager.config_path(),
        r#"
carousel:
  autoplay_interval_ms: 3000
  breakpoints:
    single_max_width: 600
nav_menu:
  open_class: open
"#,
    )
    .unwrap();

    let config = manager.load_with_env_prefix("SITEWIDGETS_IT_PARTIAL").unwrap();

    assert_eq!(config.carousel.autoplay_interval_ms, 3000);
    assert_eq!(config.carousel.breakpoints.single_max_width, 600);
    assert_eq!(config.carousel.breakpoints.double_max_width, 992);
    assert_eq!(config.carousel.track_selector, ".services-slider");
    assert_eq!(config.nav_menu.open_class, "open");
    assert_eq!(config.nav_menu.toggle_selector, ".nav-toggle");
    assert_eq!(config.logging.log_prefix, "sitewidgets");
}

#[test]
fn test_environment_overrides_file() {
    let (_temp_dir, config_path) = create_test_config_dir();
    let manager = ConfigManager::new(&config_path).unwrap();

    fs::write(
        manager.config_path(),
        "carousel:\n  autoplay_interval_ms: 3000\n  resize_debounce_ms: 250\n",
    )
    .unwrap();

    // Unique prefix so parallel tests never see each other's variables
    unsafe {
        std::env::set_var("SITEWIDGETS_IT_ENV__CAROUSEL__AUTOPLAY_INTERVAL_MS", "1500");
        std::env::set_var("SITEWIDGETS_IT_ENV__NAV_MENU__CLOSE_ABOVE_WIDTH", "1024");
    }

    let config = manager.load_with_env_prefix("SITEWIDGETS_IT_ENV").unwrap();

    unsafe {
        std::env::remove_var("SITEWIDGETS_IT_ENV__CAROUSEL__AUTOPLAY_INTERVAL_MS");
        std::env::remove_var("SITEWIDGETS_IT_ENV__NAV_MENU__CLOSE_ABOVE_WIDTH");
    }

    assert_eq!(config.carousel.autoplay_interval_ms, 1500);
    assert_eq!(config.carousel.resize_debounce_ms, 250);
    assert_eq!(config.nav_menu.close_above_width, 1024);
}

#[test]
fn test_invalid_yaml_is_an_error() {
    let (_temp_dir, config_path) = create_test_config_dir();
    let manager = ConfigManager::new(&config_path).unwrap();

    fs::write(manager.config_path(), "carousel:\n  autoplay_interval_ms: soon\n").unwrap();

    assert!(manager.load_with_env_prefix("SITEWIDGETS_IT_INVALID").is_err());
}

#[test]
fn test_save_and_reload() {
    let (_temp_dir, config_path) = create_test_config_dir();
    let manager = ConfigManager::new(&config_path).unwrap();

    let mut config = WidgetConfig::default();
    config.carousel.drag_threshold_percent = 35.0;
    config.carousel.dot_active_class = "current".to_string();
    config.logging.debug = true;
    manager.save(&config).unwrap();

    let loaded = manager.load_with_env_prefix("SITEWIDGETS_IT_SAVE").unwrap();
    assert_eq!(loaded, config);
}

#[test]
fn test_loaded_interval_drives_autoplay() {
    let (_temp_dir, config_path) = create_test_config_dir();
    let manager = ConfigManager::new(&config_path).unwrap();
    fs::write(
        manager.config_path(),
        "carousel:\n  autoplay_interval_ms: 1000\n",
    )
    .unwrap();
    let config = manager.load_with_env_prefix("SITEWIDGETS_IT_DRIVE").unwrap();

    let mut browser = HeadlessBrowser::new(1280);
    demo_markup(&mut browser.document, DemoOptions::default());
    let mut page = Page::on_content_loaded(&mut browser, &config);

    browser.advance(&mut page, Duration::from_millis(2000));

    assert_eq!(page.snapshot().slide_index, 3);
}
