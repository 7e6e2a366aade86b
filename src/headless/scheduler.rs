use crate::surface::{FrameId, Scheduler, TimerId};
use std::collections::BTreeMap;
use std::time::Duration;

/// Smallest interval period; keeps a zero-period interval from spinning forever
const MIN_INTERVAL: Duration = Duration::from_millis(1);

#[derive(Debug, Clone)]
struct PendingTimer {
    due: Duration,
    period: Option<Duration>,
}

/// Virtual clock implementing [`Scheduler`].
///
/// Nothing fires on its own. The host pulls due timers with
/// [`ManualScheduler::pop_due`] (which also moves the clock forward to each
/// timer's due time) and pending frames with [`ManualScheduler::take_frames`].
#[derive(Debug, Clone, Default)]
pub struct ManualScheduler {
    now: Duration,
    next_id: u64,
    timers: BTreeMap<TimerId, PendingTimer>,
    frames: Vec<FrameId>,
}

impl ManualScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current virtual time since creation
    pub fn now(&self) -> Duration {
        self.now
    }

    pub fn pending_timers(&self) -> usize {
        self.timers.len()
    }

    pub fn pending_intervals(&self) -> usize {
        self.timers.values().filter(|t| t.period.is_some()).count()
    }

    pub fn pending_frames(&self) -> usize {
        self.frames.len()
    }

    /// Drain all requested animation frames in request order
    pub fn take_frames(&mut self) -> Vec<FrameId> {
        std::mem::take(&mut self.frames)
    }

    /// Next timer due at or before `deadline`.
    ///
    /// Timers fire in due-time order, ties broken by creation order. The clock
    /// jumps to the fired timer's due time; intervals are re-armed one period
    /// later and timeouts are removed.
    pub fn pop_due(&mut self, deadline: Duration) -> Option<TimerId> {
        let (id, due) = self
            .timers
            .iter()
            .filter(|(_, t)| t.due <= deadline)
            .min_by_key(|(id, t)| (t.due, **id))
            .map(|(id, t)| (*id, t.due))?;

        self.now = self.now.max(due);

        let rearm = self.timers.get(&id).and_then(|t| t.period);
        match rearm {
            Some(period) => {
                if let Some(timer) = self.timers.get_mut(&id) {
                    timer.due = due + period.max(MIN_INTERVAL);
                }
            }
            None => {
                self.timers.remove(&id);
            }
        }

        Some(id)
    }

    /// Move the clock forward without firing anything
    pub fn advance_to(&mut self, deadline: Duration) {
        self.now = self.now.max(deadline);
    }

    fn allocate(&mut self) -> u64 {
        self.next_id += 1;
        self.next_id
    }

    fn schedule(&mut self, delay: Duration, period: Option<Duration>) -> TimerId {
        let id = TimerId(self.allocate());
        self.timers.insert(
            id,
            PendingTimer {
                due: self.now + delay,
                period,
            },
        );
        id
    }
}

impl Scheduler for ManualScheduler {
    fn set_interval(&mut self, period: Duration) -> TimerId {
        let period = period.max(MIN_INTERVAL);
        self.schedule(period, Some(period))
    }

    fn set_timeout(&mut self, delay: Duration) -> TimerId {
        self.schedule(delay, None)
    }

    fn clear_timer(&mut self, id: TimerId) {
        self.timers.remove(&id);
    }

    fn request_animation_frame(&mut self) -> FrameId {
        let id = FrameId(self.allocate());
        self.frames.push(id);
        id
    }

    fn cancel_animation_frame(&mut self, id: FrameId) {
        self.frames.retain(|f| *f != id);
    }
}
