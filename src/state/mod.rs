// State management module
//
// This module provides the StateManager which wraps PageState with thread-safe access
// using Arc<RwLock<T>> and emits change events for observers.

use crate::models::PageState;
use std::sync::{Arc, PoisonError, RwLock};
use tokio::sync::broadcast;

/// Change events emitted when page state is modified
///
/// These events let observers (the scenario transcript, tests, a future
/// renderer) follow the widgets without polling.
#[derive(Clone, Debug, PartialEq)]
pub enum StateChange {
    /// Widgets were mounted or unmounted
    WidgetsMounted { menu: bool, carousel: bool },

    /// The navigation menu opened or closed
    MenuToggled { open: bool },

    /// The carousel moved to a different slide
    SlideChanged { from: usize, to: usize },

    /// The visible-slide count (and therefore the index bounds) changed
    LayoutChanged {
        visible_slides: usize,
        max_index: usize,
    },

    /// Autoplay started or paused
    AutoplayChanged { running: bool },

    /// A drag gesture started or ended
    DragChanged { dragging: bool },

    /// State has been reset
    StateReset,
}

/// Thread-safe state manager with event emission
///
/// - Provides shared access to [`PageState`] via `Arc<RwLock<T>>`
/// - Detects state changes and emits [`StateChange`] events
/// - Supports subscribing to state changes via tokio broadcast channels
///
/// # Related Types
///
/// - [`crate::models::PageState`]: The underlying state structure
/// - [`crate::ui::Page`]: Syncs widget state into the manager after every event
pub struct StateManager {
    state: Arc<RwLock<PageState>>,

    /// Multiple subscribers can listen for state changes
    state_tx: broadcast::Sender<StateChange>,
}

impl StateManager {
    /// Create a new StateManager with default state
    ///
    /// The broadcast channel buffers 100 events per subscriber.
    pub fn new() -> Self {
        let (state_tx, _) = broadcast::channel(100);
        Self {
            state: Arc::new(RwLock::new(PageState::default())),
            state_tx,
        }
    }

    /// Get a copy of the current state
    pub fn snapshot(&self) -> PageState {
        self.state
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Execute a function with read access to the state
    ///
    /// # Example
    /// ```ignore
    /// let open = state_manager.read(|state| state.menu_open);
    /// ```
    pub fn read<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&PageState) -> R,
    {
        let state = self.state.read().unwrap_or_else(PoisonError::into_inner);
        f(&state)
    }

    /// Update the state and emit change events
    ///
    /// 1. Captures the old state
    /// 2. Applies the update function
    /// 3. Detects what changed
    /// 4. Broadcasts the resulting events
    ///
    /// Returns the events that were emitted.
    pub fn update<F>(&self, update_fn: F) -> Vec<StateChange>
    where
        F: FnOnce(&mut PageState),
    {
        let mut state = self.state.write().unwrap_or_else(PoisonError::into_inner);
        let old_state = state.clone();

        update_fn(&mut state);

        let changes = Self::diff(&old_state, &state);

        for change in &changes {
            // No subscribers is fine
            let _ = self.state_tx.send(change.clone());
        }

        changes
    }

    /// Subscribe to state change events
    ///
    /// Returns a receiver that will get all future state changes.
    pub fn subscribe(&self) -> broadcast::Receiver<StateChange> {
        self.state_tx.subscribe()
    }

    /// Number of live subscribers
    pub fn subscriber_count(&self) -> usize {
        self.state_tx.receiver_count()
    }

    /// Events describing the move from `old` to `new`, in a fixed order:
    /// mount, menu, layout, slide, drag, autoplay
    pub fn diff(old: &PageState, new: &PageState) -> Vec<StateChange> {
        let mut changes = Vec::new();

        if old.menu_mounted != new.menu_mounted || old.carousel_mounted != new.carousel_mounted {
            changes.push(StateChange::WidgetsMounted {
                menu: new.menu_mounted,
                carousel: new.carousel_mounted,
            });
        }

        if old.menu_open != new.menu_open {
            changes.push(StateChange::MenuToggled {
                open: new.menu_open,
            });
        }

        if old.visible_slides != new.visible_slides || old.max_index != new.max_index {
            changes.push(StateChange::LayoutChanged {
                visible_slides: new.visible_slides,
                max_index: new.max_index,
            });
        }

        if old.slide_index != new.slide_index {
            changes.push(StateChange::SlideChanged {
                from: old.slide_index,
                to: new.slide_index,
            });
        }

        if old.dragging != new.dragging {
            changes.push(StateChange::DragChanged {
                dragging: new.dragging,
            });
        }

        if old.autoplay_running != new.autoplay_running {
            changes.push(StateChange::AutoplayChanged {
                running: new.autoplay_running,
            });
        }

        changes
    }

    /// Reset everything back to the unmounted default
    pub fn reset(&self) -> Vec<StateChange> {
        let mut changes = self.update(|state| *state = PageState::default());

        let reset_event = StateChange::StateReset;
        let _ = self.state_tx.send(reset_event.clone());
        changes.push(reset_event);

        changes
    }
}

impl Default for StateManager {
    fn default() -> Self {
        Self::new()
    }
}

// Clones share the same state and channel
impl Clone for StateManager {
    fn clone(&self) -> Self {
        Self {
            state: Arc::clone(&self.state),
            state_tx: self.state_tx.clone(),
        }
    }
}
