//! Widgets - the interactive behaviors of the page.
//!
//! - [`NavMenu`]: Collapsible navigation with an icon that follows its state
//! - [`Carousel`]: Services slider with drag, autoplay, dots and responsive layout
//!
//! Widgets are plain structs driven by [`crate::surface::WidgetEvent`]s. They
//! hold element handles and transient state, and reach the page only through
//! the [`crate::surface`] traits, so they run the same against a browser
//! binding or the [`crate::headless`] document.

pub mod carousel;
pub mod nav_menu;

pub use carousel::{Carousel, DragOutcome, DragState};
pub use nav_menu::NavMenu;
