//! Data models for sitewidgets.
//!
//! - [`PageState`]: Observable snapshot of the navigation menu and carousel
//! - [`WidgetConfig`]: Selectors, CSS classes, breakpoints and timings loaded from `sitewidgets.yaml`
//!
//! # Architecture Note
//!
//! The models are designed to be:
//! - **Serializable**: All config structs derive `Serialize`/`Deserialize` with field defaults
//! - **Cloneable**: PageState is wrapped in `Arc<RwLock<>>` by [`StateManager`](crate::state::StateManager)
//! - **Passive**: Widgets own live state; PageState only mirrors it for observers

pub mod config;
pub mod page_state;

pub use self::config::{Breakpoints, CarouselConfig, LoggingConfig, NavMenuConfig, WidgetConfig};
pub use page_state::PageState;
