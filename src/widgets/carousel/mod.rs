//! Draggable services carousel with autoplay, dot indicators and responsive layout.
//!
//! The track holds `cards` with one clone at each end, so usable indices run
//! from 1 to [`layout::max_index`]. Manual navigation stops at either end;
//! autoplay wraps from the last index back to 1 without animating.
//!
//! # Timers
//!
//! The carousel owns at most one of each:
//! - autoplay interval (cleared before every restart, paused while hovered or touched)
//! - resize debounce timeout (cleared on every resize)
//! - animation frame carrying the latest drag position (cancelled by any newer position)

pub mod drag;
pub mod layout;

pub use drag::{DragOutcome, DragState};

use crate::metrics::Metrics;
use crate::models::CarouselConfig;
use crate::surface::{
    ElementId, EventResponse, FrameId, Platform, PointerKind, TimerId, UiSurface, WidgetEvent,
};
use std::sync::Arc;
use std::time::Duration;

pub struct Carousel {
    config: CarouselConfig,
    metrics: Arc<Metrics>,

    // Elements
    container: ElementId,
    track: ElementId,
    cards: Vec<ElementId>,
    prev: Option<ElementId>,
    next: Option<ElementId>,
    dots: Vec<ElementId>,

    // Position
    index: usize,
    last_translate: f64,
    drag: Option<DragState>,

    // Scheduled work
    pending_frame: Option<FrameId>,
    autoplay: Option<TimerId>,
    resize_timer: Option<TimerId>,

    // Autoplay pauses
    hovered: bool,
    touched: bool,

    started: bool,
}

impl Carousel {
    /// Wire the carousel to the page and build its dot indicators.
    ///
    /// Returns `None` when the container or track is missing. Buttons and the
    /// dots container are optional. Nothing moves until [`Carousel::start`].
    pub fn mount<P: Platform>(
        platform: &mut P,
        config: &CarouselConfig,
        metrics: Arc<Metrics>,
    ) -> Option<Self> {
        let container = platform.query(&config.container_selector)?;
        let Some(track) = platform.query(&config.track_selector) else {
            tracing::debug!("No {} element, carousel disabled", config.track_selector);
            return None;
        };

        let cards = platform.query_all_within(track, &config.card_selector);
        let prev = platform.query_within(container, &config.prev_selector);
        let next = platform.query_within(container, &config.next_selector);

        let mut carousel = Self {
            config: config.clone(),
            metrics,
            container,
            track,
            cards,
            prev,
            next,
            dots: Vec::new(),
            index: 1,
            last_translate: 0.0,
            drag: None,
            pending_frame: None,
            autoplay: None,
            resize_timer: None,
            hovered: false,
            touched: false,
            started: false,
        };

        if let Some(dots_root) = platform.query(&config.dots_selector) {
            carousel.build_dots(platform, dots_root);
        }

        tracing::debug!(
            cards = carousel.cards.len(),
            dots = carousel.dots.len(),
            has_prev = prev.is_some(),
            has_next = next.is_some(),
            "Carousel mounted"
        );

        Some(carousel)
    }

    /// One dot per index in `1..max_index`, sized for the viewport at mount time
    fn build_dots<P: Platform>(&mut self, platform: &mut P, dots_root: ElementId) {
        let total = self.max_index(platform).saturating_sub(1);

        for n in 1..=total {
            let dot = platform.create_element("button");
            platform.add_class(dot, &self.config.dot_class);
            platform.set_attribute(dot, "aria-label", &format!("Slide {n}"));
            platform.append_child(dots_root, dot);
            self.dots.push(dot);
        }
    }

    /// Position the track at the first slide and start autoplay
    pub fn start<P: Platform>(&mut self, platform: &mut P) {
        self.started = true;
        self.index = layout::clamp_index(self.index, self.max_index(platform));
        self.update_slider(platform, false);
        self.start_autoplay(platform);
        tracing::info!(
            index = self.index,
            max_index = self.max_index(platform),
            "Carousel started"
        );
    }

    /// Cancel every timer and frame; events are ignored until restarted
    pub fn stop<P: Platform>(&mut self, platform: &mut P) {
        self.stop_autoplay(platform);
        if let Some(timer) = self.resize_timer.take() {
            platform.clear_timer(timer);
        }
        self.cancel_pending_frame(platform);
        self.drag = None;
        self.started = false;
        tracing::info!("Carousel stopped");
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn visible_slides<S: UiSurface>(&self, surface: &S) -> usize {
        layout::visible_slides(surface.viewport_width(), &self.config.breakpoints)
    }

    pub fn max_index<S: UiSurface>(&self, surface: &S) -> usize {
        layout::max_index(self.cards.len(), self.visible_slides(surface))
    }

    pub fn is_dragging(&self) -> bool {
        self.drag.is_some()
    }

    pub fn autoplay_running(&self) -> bool {
        self.autoplay.is_some()
    }

    pub fn dots(&self) -> &[ElementId] {
        &self.dots
    }

    /// Step forward one slide; a no-op at the last index
    pub fn next<P: Platform>(&mut self, platform: &mut P) -> bool {
        if self.index >= self.max_index(platform) {
            return false;
        }
        self.index += 1;
        self.metrics.record_slide_change();
        self.update_slider(platform, true);
        self.reset_autoplay(platform);
        true
    }

    /// Step back one slide; a no-op at index 1
    pub fn prev<P: Platform>(&mut self, platform: &mut P) -> bool {
        if self.index <= 1 {
            return false;
        }
        self.index -= 1;
        self.metrics.record_slide_change();
        self.update_slider(platform, true);
        self.reset_autoplay(platform);
        true
    }

    /// Jump to `index` (clamped) and restart autoplay
    pub fn go_to_slide<P: Platform>(&mut self, platform: &mut P, index: usize, animate: bool) {
        let target = layout::clamp_index(index, self.max_index(platform));
        if target != self.index {
            self.metrics.record_slide_change();
        }
        self.index = target;
        self.update_slider(platform, animate);
        self.reset_autoplay(platform);
    }

    pub fn handle<P: Platform>(&mut self, platform: &mut P, event: &WidgetEvent) -> EventResponse {
        if !self.started {
            return EventResponse::Ignored;
        }

        match event {
            WidgetEvent::Click { target } => self.on_click(platform, *target),
            WidgetEvent::PointerDown { pointer, x, target } => {
                self.on_pointer_down(platform, *pointer, *x, *target)
            }
            WidgetEvent::PointerMove { x, .. } => self.on_pointer_move(platform, *x),
            WidgetEvent::PointerUp { pointer } => {
                let resume = *pointer == PointerKind::Touch && self.touched;
                if resume {
                    self.touched = false;
                }
                let response = self.end_drag(platform);
                if resume {
                    self.start_autoplay(platform);
                    return EventResponse::Handled;
                }
                response
            }
            WidgetEvent::WindowMouseLeave => self.end_drag(platform),
            WidgetEvent::MouseEnter { target } if *target == self.track => {
                self.hovered = true;
                self.stop_autoplay(platform);
                EventResponse::Handled
            }
            WidgetEvent::MouseLeave { target } if *target == self.track => {
                self.hovered = false;
                self.start_autoplay(platform);
                EventResponse::Handled
            }
            WidgetEvent::ContextMenu { target } if platform.contains(self.track, *target) => {
                EventResponse::DefaultPrevented
            }
            WidgetEvent::Resize => {
                if let Some(timer) = self.resize_timer.take() {
                    platform.clear_timer(timer);
                }
                let delay = Duration::from_millis(self.config.resize_debounce_ms);
                self.resize_timer = Some(platform.set_timeout(delay));
                EventResponse::Handled
            }
            WidgetEvent::TimerFired(id) if Some(*id) == self.resize_timer => {
                self.resize_timer = None;
                self.reflow(platform);
                EventResponse::Handled
            }
            WidgetEvent::TimerFired(id) if Some(*id) == self.autoplay => {
                self.autoplay_tick(platform);
                EventResponse::Handled
            }
            WidgetEvent::AnimationFrame(id) if Some(*id) == self.pending_frame => {
                self.pending_frame = None;
                if let Some(translate) = self.drag.as_ref().map(|d| d.current_translate) {
                    self.set_slider_position(platform, translate, false);
                }
                EventResponse::Handled
            }
            _ => EventResponse::Ignored,
        }
    }

    fn on_click<P: Platform>(&mut self, platform: &mut P, target: ElementId) -> EventResponse {
        if self.prev.is_some_and(|b| platform.contains(b, target)) {
            self.prev(platform);
            return EventResponse::Handled;
        }
        if self.next.is_some_and(|b| platform.contains(b, target)) {
            self.next(platform);
            return EventResponse::Handled;
        }
        if let Some(position) = self.dots.iter().position(|d| platform.contains(*d, target)) {
            self.go_to_slide(platform, position + 1, true);
            return EventResponse::Handled;
        }
        EventResponse::Ignored
    }

    fn on_pointer_down<P: Platform>(
        &mut self,
        platform: &mut P,
        pointer: PointerKind,
        x: f64,
        target: ElementId,
    ) -> EventResponse {
        if !platform.contains(self.track, target) {
            return EventResponse::Ignored;
        }

        self.cancel_pending_frame(platform);
        platform.set_style(self.track, "transition", "none");
        platform.set_style(self.track, "cursor", "grabbing");
        self.drag = Some(DragState::begin(pointer, x, self.last_translate));

        tracing::debug!(?pointer, x, index = self.index, "Drag started");

        match pointer {
            PointerKind::Touch => {
                self.touched = true;
                self.stop_autoplay(platform);
                EventResponse::Handled
            }
            // Keeps the browser from starting a native image/text drag
            PointerKind::Mouse => EventResponse::DefaultPrevented,
        }
    }

    fn on_pointer_move<P: Platform>(&mut self, platform: &mut P, x: f64) -> EventResponse {
        let width = platform.offset_width(self.container);
        let Some(drag) = self.drag.as_mut() else {
            return EventResponse::Ignored;
        };
        drag.follow(x, width);

        // Only the newest position needs painting
        self.cancel_pending_frame(platform);
        self.pending_frame = Some(platform.request_animation_frame());

        EventResponse::DefaultPrevented
    }

    fn end_drag<P: Platform>(&mut self, platform: &mut P) -> EventResponse {
        let Some(drag) = self.drag.take() else {
            return EventResponse::Ignored;
        };

        platform.set_style(self.track, "cursor", "grab");

        let outcome = drag.outcome(self.config.drag_threshold_percent);
        let moved = match outcome {
            DragOutcome::Previous if self.index > 1 => {
                self.index -= 1;
                true
            }
            DragOutcome::Next if self.index < self.max_index(platform) => {
                self.index += 1;
                true
            }
            _ => false,
        };

        if moved {
            self.metrics.record_slide_change();
        }
        self.metrics.record_drag(moved);
        tracing::debug!(
            ?outcome,
            delta = drag.delta_percent(),
            index = self.index,
            "Drag ended"
        );

        self.update_slider(platform, true);
        self.reset_autoplay(platform);
        EventResponse::Handled
    }

    /// Debounced resize: re-clamp against the new layout and reposition
    fn reflow<P: Platform>(&mut self, platform: &mut P) {
        let max = self.max_index(platform);
        let clamped = layout::clamp_index(self.index, max);
        if clamped != self.index {
            tracing::debug!(from = self.index, to = clamped, max, "Index clamped after resize");
            self.metrics.record_slide_change();
            self.index = clamped;
        }
        self.metrics.record_layout_reflow();
        self.update_slider(platform, true);
    }

    fn autoplay_tick<P: Platform>(&mut self, platform: &mut P) {
        self.metrics.record_autoplay_tick();

        let previous = self.index;
        if self.index < self.max_index(platform) {
            self.index += 1;
            self.update_slider(platform, true);
        } else {
            // Past the end: jump back without animating
            self.index = 1;
            self.update_slider(platform, false);
        }
        if self.index != previous {
            self.metrics.record_slide_change();
        }
    }

    fn start_autoplay<P: Platform>(&mut self, platform: &mut P) {
        if self.hovered || self.touched {
            return;
        }
        self.stop_autoplay(platform);
        let period = Duration::from_millis(self.config.autoplay_interval_ms);
        self.autoplay = Some(platform.set_interval(period));
    }

    fn stop_autoplay<P: Platform>(&mut self, platform: &mut P) {
        if let Some(timer) = self.autoplay.take() {
            platform.clear_timer(timer);
        }
    }

    fn reset_autoplay<P: Platform>(&mut self, platform: &mut P) {
        self.start_autoplay(platform);
    }

    fn cancel_pending_frame<P: Platform>(&mut self, platform: &mut P) {
        if let Some(frame) = self.pending_frame.take() {
            platform.cancel_animation_frame(frame);
            self.metrics.record_frame_cancelled();
        }
    }

    fn set_slider_position<P: Platform>(&mut self, platform: &mut P, position: f64, animate: bool) {
        self.cancel_pending_frame(platform);

        let transition = if animate {
            self.config.transition.as_str()
        } else {
            "none"
        };
        platform.set_style(self.track, "transition", transition);
        platform.set_style(self.track, "transform", &layout::format_translate(position));
        self.last_translate = position;
    }

    /// Move the track to the current index and sync dots and buttons
    fn update_slider<P: Platform>(&mut self, platform: &mut P, animate: bool) {
        let visible = self.visible_slides(platform);
        let max = layout::max_index(self.cards.len(), visible);
        let position = layout::position_percent(self.index, visible);
        self.set_slider_position(platform, position, animate);

        for (i, dot) in self.dots.iter().enumerate() {
            platform.set_class(*dot, &self.config.dot_active_class, i + 1 == self.index);
        }

        let at_start = self.index <= 1;
        let at_end = self.index >= max;
        if let Some(prev) = self.prev {
            self.set_button_enabled(platform, prev, !at_start);
        }
        if let Some(next) = self.next {
            self.set_button_enabled(platform, next, !at_end);
        }
    }

    fn set_button_enabled<P: Platform>(&self, platform: &mut P, button: ElementId, enabled: bool) {
        platform.set_disabled(button, !enabled);
        let opacity = if enabled {
            "1"
        } else {
            self.config.disabled_opacity.as_str()
        };
        platform.set_style(button, "opacity", opacity);
    }
}
