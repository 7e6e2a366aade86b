use crate::models::WidgetConfig;
use anyhow::{Context, Result};
use camino::{Utf8Path, Utf8PathBuf};
use std::fs;

/// File name of the widget configuration inside the config directory
pub const CONFIG_FILE_NAME: &str = "sitewidgets.yaml";

/// Prefix of environment variables that override file settings,
/// e.g. `SITEWIDGETS__CAROUSEL__AUTOPLAY_INTERVAL_MS=3000`
pub const ENV_PREFIX: &str = "SITEWIDGETS";

/// Configuration manager for loading and saving `sitewidgets.yaml`.
///
/// Loading layers three sources, later ones winning:
/// 1. Built-in defaults (`WidgetConfig::default()`)
/// 2. `sitewidgets.yaml` in the config directory, if present
/// 3. `SITEWIDGETS__SECTION__FIELD` environment variables
#[derive(Debug, Clone)]
pub struct ConfigManager {
    config_dir: Utf8PathBuf,
    config_path: Utf8PathBuf,
}

impl ConfigManager {
    /// Create a new ConfigManager for `config_dir`, creating the directory if needed.
    pub fn new<P: AsRef<Utf8Path>>(config_dir: P) -> Result<Self> {
        let config_dir = config_dir.as_ref().to_path_buf();

        if !config_dir.exists() {
            fs::create_dir_all(&config_dir)
                .with_context(|| format!("Failed to create config directory: {}", config_dir))?;
        }

        Ok(Self {
            config_path: config_dir.join(CONFIG_FILE_NAME),
            config_dir,
        })
    }

    /// Load the widget configuration.
    ///
    /// # Returns
    /// The merged configuration; defaults when neither file nor environment set anything
    pub fn load(&self) -> Result<WidgetConfig> {
        self.load_with_env_prefix(ENV_PREFIX)
    }

    /// Load with a custom environment prefix (lets tests avoid the real one)
    pub fn load_with_env_prefix(&self, env_prefix: &str) -> Result<WidgetConfig> {
        if self.config_path.exists() {
            tracing::info!("Loading widget config from {}", self.config_path);
        } else {
            tracing::warn!(
                "Widget config file not found at {}, using defaults",
                self.config_path
            );
        }

        let settings = config::Config::builder()
            .add_source(
                config::File::new(self.config_path.as_str(), config::FileFormat::Yaml)
                    .required(false),
            )
            .add_source(
                config::Environment::with_prefix(env_prefix)
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()
            .with_context(|| format!("Failed to read widget config: {}", self.config_path))?;

        let config: WidgetConfig = settings
            .try_deserialize()
            .with_context(|| format!("Failed to parse widget config: {}", self.config_path))?;

        tracing::debug!(?config, "Widget config resolved");
        Ok(config)
    }

    /// Save the widget configuration.
    pub fn save(&self, config: &WidgetConfig) -> Result<()> {
        let yaml_string =
            serde_yaml_ng::to_string(config).context("Failed to serialize widget config to YAML")?;

        fs::write(&self.config_path, yaml_string)
            .with_context(|| format!("Failed to write widget config: {}", self.config_path))?;

        tracing::info!("Saved widget config to {}", self.config_path);
        Ok(())
    }

    /// Write the defaults unless a config file already exists.
    ///
    /// # Returns
    /// `true` if a new file was written
    pub fn write_defaults_if_missing(&self) -> Result<bool> {
        if self.config_path.exists() {
            return Ok(false);
        }
        self.save(&WidgetConfig::default())?;
        Ok(true)
    }

    /// Get the configuration directory path.
    pub fn config_dir(&self) -> &Utf8Path {
        &self.config_dir
    }

    /// Get the configuration file path.
    pub fn config_path(&self) -> &Utf8Path {
        &self.config_path
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn create_test_config_manager() -> (ConfigManager, TempDir) {
        let temp_dir = TempDir::new().unwrap();
        let config_path = Utf8PathBuf::try_from(temp_dir.path().to_path_buf()).unwrap();
        let manager = ConfigManager::new(&config_path).unwrap();
        (manager, temp_dir)
    }

    #[test]
    fn test_create_config_manager() {
        let (manager, _temp_dir) = create_test_config_manager();
        assert!(manager.config_path().ends_with(CONFIG_FILE_NAME));
    }

    #[test]
    fn test_missing_file_gives_defaults() {
        let (manager, _temp_dir) = create_test_config_manager();
        let config = manager
            .load_with_env_prefix("SITEWIDGETS_UNIT_MISSING")
            .unwrap();
        assert_eq!(config, WidgetConfig::default());
    }

    #[test]
    fn test_load_save_round_trip() {
        let (manager, _temp_dir) = create_test_config_manager();

        let mut config = WidgetConfig::default();
        config.carousel.autoplay_interval_ms = 2500;
        config.nav_menu.open_class = "is-open".to_string();
        manager.save(&config).unwrap();

        let loaded = manager
            .load_with_env_prefix("SITEWIDGETS_UNIT_ROUNDTRIP")
            .unwrap();
        assert_eq!(loaded, config);
    }

    #[test]
    fn test_write_defaults_if_missing() {
        let (manager, _temp_dir) = create_test_config_manager();

        assert!(manager.write_defaults_if_missing().unwrap());
        assert!(manager.config_path().exists());
        assert!(!manager.write_defaults_if_missing().unwrap());
    }
}
