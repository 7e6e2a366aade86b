// Site widgets - navigation menu and services carousel
//
// This is the library crate containing the widget logic, the platform traits it runs
// against, and a headless host. The binary crate (main.rs) replays scenarios on it.

pub mod config;
pub mod headless;
pub mod logging;
pub mod metrics;
pub mod models;
pub mod scenario;
pub mod state;
pub mod surface;
pub mod ui;
pub mod widgets;

// Re-export commonly used types for convenience
pub use crate::config::ConfigManager;
pub use headless::{DemoOptions, HeadlessBrowser, demo_markup};
pub use metrics::Metrics;
pub use models::{CarouselConfig, NavMenuConfig, PageState, WidgetConfig};
pub use scenario::{Scenario, ScenarioError, ScenarioReport, ScenarioRunner};
pub use state::{StateChange, StateManager};
pub use surface::{EventResponse, Platform, PointerKind, Scheduler, UiSurface, WidgetEvent};
pub use ui::Page;
pub use widgets::{Carousel, NavMenu};

/// Application version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Application name
pub const APP_NAME: &str = env!("CARGO_PKG_NAME");
