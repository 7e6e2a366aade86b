use serde::{Deserialize, Serialize};

/// Complete widget configuration from `sitewidgets.yaml`
///
/// Every field has a default matching the stock page markup and stylesheet, so
/// an empty or missing file yields a working setup.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct WidgetConfig {
    pub nav_menu: NavMenuConfig,
    pub carousel: CarouselConfig,
    pub logging: LoggingConfig,
}

/// Selectors, classes and breakpoint for the collapsible navigation menu
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NavMenuConfig {
    pub toggle_selector: String,
    pub panel_selector: String,
    /// Icon element looked up inside the toggle button
    pub icon_selector: String,
    pub open_class: String,
    pub closed_icon_class: String,
    pub open_icon_class: String,
    /// Resizing the viewport wider than this closes an open menu
    pub close_above_width: u32,
}

impl Default for NavMenuConfig {
    fn default() -> Self {
        Self {
            toggle_selector: ".nav-toggle".to_string(),
            panel_selector: ".nav-links".to_string(),
            icon_selector: "i".to_string(),
            open_class: "active".to_string(),
            closed_icon_class: "fa-bars".to_string(),
            open_icon_class: "fa-times".to_string(),
            close_above_width: 768,
        }
    }
}

/// Viewport widths at which the carousel changes its visible-slide count
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Breakpoints {
    /// Widths up to and including this show one slide
    pub single_max_width: u32,
    /// Widths up to and including this show two slides; wider shows three
    pub double_max_width: u32,
}

impl Default for Breakpoints {
    fn default() -> Self {
        Self {
            single_max_width: 768,
            double_max_width: 992,
        }
    }
}

/// Selectors, classes and timings for the services carousel
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CarouselConfig {
    pub container_selector: String,
    pub track_selector: String,
    pub card_selector: String,
    pub prev_selector: String,
    pub next_selector: String,
    pub dots_selector: String,
    pub dot_class: String,
    pub dot_active_class: String,
    pub breakpoints: Breakpoints,
    /// Net drag distance, in percent of the container width, that commits a slide change
    pub drag_threshold_percent: f64,
    pub autoplay_interval_ms: u64,
    pub resize_debounce_ms: u64,
    /// CSS transition used for animated repositioning
    pub transition: String,
    pub disabled_opacity: String,
}

impl Default for CarouselConfig {
    fn default() -> Self {
        Self {
            container_selector: ".services-slider-container".to_string(),
            track_selector: ".services-slider".to_string(),
            card_selector: ".service-card".to_string(),
            prev_selector: ".prev".to_string(),
            next_selector: ".next".to_string(),
            dots_selector: ".slider-dots".to_string(),
            dot_class: "slider-dot".to_string(),
            dot_active_class: "active".to_string(),
            breakpoints: Breakpoints::default(),
            drag_threshold_percent: 20.0,
            autoplay_interval_ms: 5000,
            resize_debounce_ms: 100,
            transition: "transform 0.5s ease".to_string(),
            disabled_opacity: "0.5".to_string(),
        }
    }
}

/// Log output settings for the scenario runner
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub log_dir: String,
    pub log_prefix: String,
    pub debug: bool,
    pub console: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            log_dir: "logs".to_string(),
            log_prefix: "sitewidgets".to_string(),
            debug: false,
            console: true,
        }
    }
}
