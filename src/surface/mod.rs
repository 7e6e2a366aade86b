//! UI surface abstraction - the only way widgets touch the page.
//!
//! Widgets never talk to a browser directly. Everything they need is expressed
//! through two small traits:
//! - [`UiSurface`]: element lookup, class membership, inline styles, attributes
//! - [`Scheduler`]: interval/timeout timers and animation frames
//!
//! Timers and frames are not callbacks. A scheduler hands back a [`TimerId`] or
//! [`FrameId`] and the host later delivers [`WidgetEvent::TimerFired`] or
//! [`WidgetEvent::AnimationFrame`] with that id, so every widget stays a plain
//! state machine driven by [`WidgetEvent`]s.
//!
//! The in-memory implementation used by tests and the scenario runner lives in
//! [`crate::headless`].

pub mod event;

pub use event::{EventResponse, PointerKind, WidgetEvent};

use std::time::Duration;

/// Opaque handle to an element owned by a [`UiSurface`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ElementId(pub usize);

/// Handle to a pending interval or timeout
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TimerId(pub u64);

/// Handle to a pending animation frame request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FrameId(pub u64);

/// Document access needed by the widgets.
///
/// Selectors are deliberately tiny: a tag name, one or more `.class` parts, or
/// both (`button.slider-dot`). Lookups return elements in document order.
pub trait UiSurface {
    /// First element in the document matching `selector`
    fn query(&self, selector: &str) -> Option<ElementId>;

    /// First descendant of `root` matching `selector`
    fn query_within(&self, root: ElementId, selector: &str) -> Option<ElementId>;

    /// All descendants of `root` matching `selector`
    fn query_all_within(&self, root: ElementId, selector: &str) -> Vec<ElementId>;

    /// True if `node` is `ancestor` or one of its descendants
    fn contains(&self, ancestor: ElementId, node: ElementId) -> bool;

    fn has_class(&self, element: ElementId, class: &str) -> bool;

    fn add_class(&mut self, element: ElementId, class: &str);

    fn remove_class(&mut self, element: ElementId, class: &str);

    /// Flip `class` on `element`, returning whether it is now present
    fn toggle_class(&mut self, element: ElementId, class: &str) -> bool {
        let present = !self.has_class(element, class);
        self.set_class(element, class, present);
        present
    }

    /// Force `class` on or off
    fn set_class(&mut self, element: ElementId, class: &str, present: bool) {
        if present {
            self.add_class(element, class);
        } else {
            self.remove_class(element, class);
        }
    }

    /// Set an inline style property (`transform`, `transition`, `opacity`, `cursor`)
    fn set_style(&mut self, element: ElementId, property: &str, value: &str);

    fn set_attribute(&mut self, element: ElementId, name: &str, value: &str);

    fn set_disabled(&mut self, element: ElementId, disabled: bool);

    /// Create a detached element
    fn create_element(&mut self, tag: &str) -> ElementId;

    fn append_child(&mut self, parent: ElementId, child: ElementId);

    /// Viewport width in CSS pixels
    fn viewport_width(&self) -> u32;

    /// Rendered width of `element` in CSS pixels
    fn offset_width(&self, element: ElementId) -> f64;
}

/// Timer and animation-frame services.
pub trait Scheduler {
    /// Fire repeatedly every `period` until cleared
    fn set_interval(&mut self, period: Duration) -> TimerId;

    /// Fire once after `delay`
    fn set_timeout(&mut self, delay: Duration) -> TimerId;

    /// Clear an interval or timeout. Unknown ids are ignored.
    fn clear_timer(&mut self, id: TimerId);

    fn request_animation_frame(&mut self) -> FrameId;

    fn cancel_animation_frame(&mut self, id: FrameId);
}

/// Everything a widget needs from its host
pub trait Platform: UiSurface + Scheduler {}

impl<T: UiSurface + Scheduler> Platform for T {}
