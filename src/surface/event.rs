use super::{ElementId, FrameId, TimerId};

/// Input source of a pointer gesture
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerKind {
    Mouse,
    Touch,
}

/// Events delivered by the host to mounted widgets.
///
/// Mouse and touch variants share `PointerDown`/`PointerMove`/`PointerUp`; the
/// `pointer` field tells them apart. Coordinates are viewport `clientX` values.
#[derive(Debug, Clone, PartialEq)]
pub enum WidgetEvent {
    /// A click whose innermost target is `target`
    Click { target: ElementId },

    /// `mousedown` / `touchstart`
    PointerDown {
        pointer: PointerKind,
        x: f64,
        target: ElementId,
    },

    /// `mousemove` / `touchmove` anywhere in the window
    PointerMove { pointer: PointerKind, x: f64 },

    /// `mouseup` / `touchend`
    PointerUp { pointer: PointerKind },

    /// The mouse left the window entirely
    WindowMouseLeave,

    /// `mouseenter`: the pointer entered `target`'s box. Like the DOM event it
    /// does not bubble, so moving between children of an element does not
    /// re-enter the element itself.
    MouseEnter { target: ElementId },

    /// `mouseleave`: the pointer left `target`'s box (non-bubbling)
    MouseLeave { target: ElementId },

    /// Context menu requested over `target`
    ContextMenu { target: ElementId },

    /// The viewport was resized; widgets re-read [`super::UiSurface::viewport_width`]
    Resize,

    TimerFired(TimerId),

    AnimationFrame(FrameId),
}

/// What a handler did with an event
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EventResponse {
    #[default]
    Ignored,
    Handled,
    /// Handled, and the browser default action must be suppressed
    DefaultPrevented,
}

impl EventResponse {
    /// Combine responses from several listeners of the same event
    pub fn merge(self, other: EventResponse) -> EventResponse {
        use EventResponse::*;
        match (self, other) {
            (DefaultPrevented, _) | (_, DefaultPrevented) => DefaultPrevented,
            (Handled, _) | (_, Handled) => Handled,
            _ => Ignored,
        }
    }

    pub fn is_handled(self) -> bool {
        self != EventResponse::Ignored
    }
}
