use crate::surface::PointerKind;

/// Which way a finished drag moves the carousel
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DragOutcome {
    /// Dragged right past the threshold: show the previous slide
    Previous,
    /// Dragged left past the threshold: show the next slide
    Next,
    /// Under the threshold: snap back to the current slide
    SnapBack,
}

/// Live state of one pointer gesture on the track
#[derive(Debug, Clone, PartialEq)]
pub struct DragState {
    pub pointer: PointerKind,
    /// `clientX` where the gesture started
    pub start_x: f64,
    /// Track translation (percent) when the gesture started
    pub start_translate: f64,
    /// Track translation (percent) following the pointer
    pub current_translate: f64,
}

impl DragState {
    pub fn begin(pointer: PointerKind, start_x: f64, start_translate: f64) -> Self {
        Self {
            pointer,
            start_x,
            start_translate,
            current_translate: start_translate,
        }
    }

    /// Follow the pointer to `x` over a container `container_width` pixels wide.
    ///
    /// Returns the new translation. A zero-width container leaves it unchanged.
    pub fn follow(&mut self, x: f64, container_width: f64) -> f64 {
        if container_width > 0.0 {
            let moved_percent = (x - self.start_x) * 100.0 / container_width;
            self.current_translate = self.start_translate + moved_percent;
        }
        self.current_translate
    }

    /// Net movement since the gesture started, in percent of the container
    pub fn delta_percent(&self) -> f64 {
        self.current_translate - self.start_translate
    }

    /// Decide the gesture against `threshold_percent` (strictly greater wins)
    pub fn outcome(&self, threshold_percent: f64) -> DragOutcome {
        let delta = self.delta_percent();
        if delta.abs() <= threshold_percent {
            DragOutcome::SnapBack
        } else if delta > 0.0 {
            DragOutcome::Previous
        } else {
            DragOutcome::Next
        }
    }
}
