// Widget activity metrics
//
// Provides lightweight counters for what the widgets did during a page's lifetime

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{Duration, Instant};

/// Page-wide activity counters
///
/// Uses atomic operations so one instance can be shared (`Arc<Metrics>`)
/// between the page, the carousel and observers without locks.
#[derive(Debug)]
pub struct Metrics {
    /// Events delivered through `Page::dispatch`
    pub events_dispatched: AtomicU64,

    /// Events at least one widget handled
    pub events_handled: AtomicU64,

    /// Carousel slide changes, whatever caused them
    pub slide_changes: AtomicU64,

    /// Navigation menu open/close transitions
    pub menu_toggles: AtomicU64,

    /// Autoplay interval ticks
    pub autoplay_ticks: AtomicU64,

    /// Drags that moved the carousel by one slide
    pub drags_committed: AtomicU64,

    /// Drags that stayed under the threshold and snapped back
    pub drags_snapped_back: AtomicU64,

    /// Debounced resize reflows
    pub layout_reflows: AtomicU64,

    /// Animation frames cancelled before they ran
    pub frames_cancelled: AtomicU64,

    /// State change events broadcast to subscribers
    pub state_broadcasts: AtomicU64,

    start_time: Instant,
}

impl Metrics {
    pub fn new() -> Self {
        Self {
            events_dispatched: AtomicU64::new(0),
            events_handled: AtomicU64::new(0),
            slide_changes: AtomicU64::new(0),
            menu_toggles: AtomicU64::new(0),
            autoplay_ticks: AtomicU64::new(0),
            drags_committed: AtomicU64::new(0),
            drags_snapped_back: AtomicU64::new(0),
            layout_reflows: AtomicU64::new(0),
            frames_cancelled: AtomicU64::new(0),
            state_broadcasts: AtomicU64::new(0),
            start_time: Instant::now(),
        }
    }

    pub fn record_event(&self, handled: bool) {
        self.events_dispatched.fetch_add(1, Ordering::Relaxed);
        if handled {
            self.events_handled.fetch_add(1, Ordering::Relaxed);
        }
    }

    pub fn record_slide_change(&self) {
        self.slide_changes.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_menu_toggle(&self) {
        self.menu_toggles.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_autoplay_tick(&self) {
        self.autoplay_ticks.fetch_add(1, Ordering::Relaxed);
    }

    /// Record how a drag ended
    pub fn record_drag(&self, committed: bool) {
        if committed {
            self.drags_committed.fetch_add(1, Ordering::Relaxed);
        } else {
            self.drags_snapped_back.fetch_add(1, Ordering::Relaxed);
        }
    }

    pub fn record_layout_reflow(&self) {
        self.layout_reflows.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_frame_cancelled(&self) {
        self.frames_cancelled.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_state_broadcasts(&self, count: usize) {
        self.state_broadcasts
            .fetch_add(count as u64, Ordering::Relaxed);
    }

    /// Wall-clock time since creation
    pub fn uptime(&self) -> Duration {
        self.start_time.elapsed()
    }

    /// Share of dispatched events some widget handled, in percent
    pub fn handled_ratio(&self) -> f64 {
        let total = self.events_dispatched.load(Ordering::Relaxed);
        if total > 0 {
            self.events_handled.load(Ordering::Relaxed) as f64 * 100.0 / total as f64
        } else {
            0.0
        }
    }

    /// Log metrics summary
    pub fn log_summary(&self) {
        tracing::info!("=== Widget Metrics Summary ===");
        tracing::info!("Uptime: {:.2}s", self.uptime().as_secs_f64());
        tracing::info!(
            "Events: {} dispatched, {} handled ({:.1}%)",
            self.events_dispatched.load(Ordering::Relaxed),
            self.events_handled.load(Ordering::Relaxed),
            self.handled_ratio()
        );
        tracing::info!(
            "Carousel: {} slide changes, {} autoplay ticks, {} reflows",
            self.slide_changes.load(Ordering::Relaxed),
            self.autoplay_ticks.load(Ordering::Relaxed),
            self.layout_reflows.load(Ordering::Relaxed)
        );
        tracing::info!(
            "Drags: {} committed, {} snapped back, {} frames cancelled",
            self.drags_committed.load(Ordering::Relaxed),
            self.drags_snapped_back.load(Ordering::Relaxed),
            self.frames_cancelled.load(Ordering::Relaxed)
        );
        tracing::info!(
            "Menu toggles: {}, state broadcasts: {}",
            self.menu_toggles.load(Ordering::Relaxed),
            self.state_broadcasts.load(Ordering::Relaxed)
        );
    }
}

impl Default for Metrics {
    fn default() -> Self {
        Self::new()
    }
}
