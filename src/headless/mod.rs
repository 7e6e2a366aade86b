//! Headless host - an in-memory page and virtual clock.
//!
//! [`HeadlessBrowser`] implements both [`UiSurface`] and [`Scheduler`], so it
//! can stand in for a real browser anywhere a [`crate::surface::Platform`] is
//! expected. Tests and the scenario runner drive it by dispatching
//! [`WidgetEvent`]s into a [`Page`] and advancing virtual time with
//! [`HeadlessBrowser::advance`].

pub mod document;
pub mod markup;
pub mod scheduler;

pub use document::MemoryDocument;
pub use markup::{DemoOptions, DemoPage, demo_markup};
pub use scheduler::ManualScheduler;

use crate::state::StateChange;
use crate::surface::{ElementId, FrameId, Scheduler, TimerId, UiSurface, WidgetEvent};
use crate::ui::Page;
use std::time::Duration;

/// In-memory document plus virtual clock
#[derive(Debug, Clone)]
pub struct HeadlessBrowser {
    pub document: MemoryDocument,
    pub scheduler: ManualScheduler,
}

impl HeadlessBrowser {
    pub fn new(viewport_width: u32) -> Self {
        Self {
            document: MemoryDocument::new(viewport_width),
            scheduler: ManualScheduler::new(),
        }
    }

    /// Current virtual time
    pub fn now(&self) -> Duration {
        self.scheduler.now()
    }

    /// Deliver every pending animation frame to `page`.
    ///
    /// Frames requested while flushing are delivered in the same call.
    /// Returns the number of frames delivered.
    pub fn flush_frames(&mut self, page: &mut Page) -> usize {
        self.flush_frames_recording(page, &mut Vec::new())
    }

    /// [`HeadlessBrowser::flush_frames`], appending every state change to `changes`
    pub fn flush_frames_recording(
        &mut self,
        page: &mut Page,
        changes: &mut Vec<StateChange>,
    ) -> usize {
        let mut delivered = 0;
        loop {
            let frames = self.scheduler.take_frames();
            if frames.is_empty() {
                return delivered;
            }
            for frame in frames {
                let event = WidgetEvent::AnimationFrame(frame);
                changes.extend(page.dispatch_with_changes(self, event).1);
                delivered += 1;
            }
        }
    }

    /// Run virtual time forward by `duration`, firing timers in order.
    ///
    /// Pending frames are flushed first. Returns the number of timer events
    /// delivered.
    pub fn advance(&mut self, page: &mut Page, duration: Duration) -> usize {
        self.advance_recording(page, duration, &mut Vec::new())
    }

    /// [`HeadlessBrowser::advance`], appending every state change to `changes`
    pub fn advance_recording(
        &mut self,
        page: &mut Page,
        duration: Duration,
        changes: &mut Vec<StateChange>,
    ) -> usize {
        self.flush_frames_recording(page, changes);

        let deadline = self.scheduler.now() + duration;
        let mut fired = 0;
        while let Some(timer) = self.scheduler.pop_due(deadline) {
            let event = WidgetEvent::TimerFired(timer);
            changes.extend(page.dispatch_with_changes(self, event).1);
            self.flush_frames_recording(page, changes);
            fired += 1;
        }
        self.scheduler.advance_to(deadline);

        fired
    }

    /// Change the viewport width and deliver the resize event
    pub fn resize(&mut self, page: &mut Page, width: u32) {
        self.document.set_viewport_width(width);
        page.dispatch(self, WidgetEvent::Resize);
    }
}

impl UiSurface for HeadlessBrowser {
    fn query(&self, selector: &str) -> Option<ElementId> {
        self.document.query(selector)
    }

    fn query_within(&self, root: ElementId, selector: &str) -> Option<ElementId> {
        self.document.query_within(root, selector)
    }

    fn query_all_within(&self, root: ElementId, selector: &str) -> Vec<ElementId> {
        self.document.query_all_within(root, selector)
    }

    fn contains(&self, ancestor: ElementId, node: ElementId) -> bool {
        self.document.contains(ancestor, node)
    }

    fn has_class(&self, element: ElementId, class: &str) -> bool {
        self.document.has_class(element, class)
    }

    fn add_class(&mut self, element: ElementId, class: &str) {
        self.document.add_class(element, class);
    }

    fn remove_class(&mut self, element: ElementId, class: &str) {
        self.document.remove_class(element, class);
    }

    fn set_style(&mut self, element: ElementId, property: &str, value: &str) {
        self.document.set_style(element, property, value);
    }

    fn set_attribute(&mut self, element: ElementId, name: &str, value: &str) {
        self.document.set_attribute(element, name, value);
    }

    fn set_disabled(&mut self, element: ElementId, disabled: bool) {
        self.document.set_disabled(element, disabled);
    }

    fn create_element(&mut self, tag: &str) -> ElementId {
        self.document.create_element(tag)
    }

    fn append_child(&mut self, parent: ElementId, child: ElementId) {
        self.document.append_child(parent, child);
    }

    fn viewport_width(&self) -> u32 {
        self.document.viewport_width()
    }

    fn offset_width(&self, element: ElementId) -> f64 {
        self.document.offset_width(element)
    }
}

impl Scheduler for HeadlessBrowser {
    fn set_interval(&mut self, period: Duration) -> TimerId {
        self.scheduler.set_interval(period)
    }

    fn set_timeout(&mut self, delay: Duration) -> TimerId {
        self.scheduler.set_timeout(delay)
    }

    fn clear_timer(&mut self, id: TimerId) {
        self.scheduler.clear_timer(id);
    }

    fn request_animation_frame(&mut self) -> FrameId {
        self.scheduler.request_animation_frame()
    }

    fn cancel_animation_frame(&mut self, id: FrameId) {
        self.scheduler.cancel_animation_frame(id);
    }
}
