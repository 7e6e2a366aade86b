// Page controller - mounts the widgets and fans events out to them
//
// This module contains the Page which coordinates between:
// - The host platform (UiSurface + Scheduler)
// - NavMenu and Carousel (widget logic)
// - StateManager (observable state and change events)
// - Metrics (activity counters)

use crate::metrics::Metrics;
use crate::models::{PageState, WidgetConfig};
use crate::state::{StateChange, StateManager};
use crate::surface::{EventResponse, Platform, UiSurface, WidgetEvent};
use crate::widgets::{Carousel, NavMenu};
use std::sync::Arc;

/// The page-load script: both widgets plus their observers.
///
/// Each widget is optional; a page without the matching markup simply lacks
/// that behavior. After every dispatched event the widget state is mirrored
/// into the [`StateManager`], which broadcasts the resulting
/// [`StateChange`] events.
///
/// # Example
/// ```ignore
/// let mut browser = HeadlessBrowser::new(1280);
/// demo_markup(&mut browser.document, DemoOptions::default());
///
/// let mut page = Page::on_content_loaded(&mut browser, &WidgetConfig::default());
/// page.dispatch(&mut browser, WidgetEvent::Click { target });
/// browser.advance(&mut page, Duration::from_secs(5));
/// ```
pub struct Page {
    nav_menu: Option<NavMenu>,
    carousel: Option<Carousel>,
    state_manager: StateManager,
    metrics: Arc<Metrics>,
}

impl Page {
    /// Mount everything with a fresh state manager and metrics
    pub fn on_content_loaded<P: Platform>(platform: &mut P, config: &WidgetConfig) -> Self {
        Self::on_content_loaded_with(
            platform,
            config,
            StateManager::new(),
            Arc::new(Metrics::new()),
        )
    }

    /// Mount everything, reporting into an existing state manager and metrics.
    ///
    /// Subscribe to `state_manager` before calling this to also see the
    /// initial [`StateChange::WidgetsMounted`] event.
    pub fn on_content_loaded_with<P: Platform>(
        platform: &mut P,
        config: &WidgetConfig,
        state_manager: StateManager,
        metrics: Arc<Metrics>,
    ) -> Self {
        let nav_menu = NavMenu::mount(platform, &config.nav_menu);

        let mut carousel = Carousel::mount(platform, &config.carousel, Arc::clone(&metrics));
        if let Some(carousel) = carousel.as_mut() {
            carousel.start(platform);
        }

        tracing::info!(
            nav_menu = nav_menu.is_some(),
            carousel = carousel.is_some(),
            viewport = platform.viewport_width(),
            "Page widgets initialized"
        );

        let page = Self {
            nav_menu,
            carousel,
            state_manager,
            metrics,
        };
        page.sync_state(platform);
        page
    }

    /// Deliver one event to every mounted widget
    pub fn dispatch<P: Platform>(&mut self, platform: &mut P, event: WidgetEvent) -> EventResponse {
        self.dispatch_with_changes(platform, event).0
    }

    /// Like [`Page::dispatch`], also returning the state changes the event caused
    pub fn dispatch_with_changes<P: Platform>(
        &mut self,
        platform: &mut P,
        event: WidgetEvent,
    ) -> (EventResponse, Vec<StateChange>) {
        tracing::trace!(?event, "Dispatching event");

        let mut response = EventResponse::Ignored;

        if let Some(menu) = self.nav_menu.as_ref() {
            response = response.merge(menu.handle(platform, &event));
        }
        if let Some(carousel) = self.carousel.as_mut() {
            response = response.merge(carousel.handle(platform, &event));
        }

        self.metrics.record_event(response.is_handled());
        let changes = self.sync_state(platform);

        (response, changes)
    }

    /// Stop all timers and return to the unmounted state
    pub fn unload<P: Platform>(&mut self, platform: &mut P) {
        if let Some(carousel) = self.carousel.as_mut() {
            carousel.stop(platform);
        }
        self.nav_menu = None;
        self.carousel = None;

        let changes = self.state_manager.reset();
        self.metrics.record_state_broadcasts(changes.len());
        tracing::info!(
            state = %self.state_manager.read(PageState::summary),
            "Page unloaded"
        );
    }

    /// Mirror widget state into the state manager after direct widget calls
    pub fn sync_state<S: UiSurface>(&self, surface: &S) -> Vec<StateChange> {
        let menu_open = self
            .nav_menu
            .as_ref()
            .is_some_and(|menu| menu.is_open(surface));

        let changes = self.state_manager.update(|state| {
            state.menu_mounted = self.nav_menu.is_some();
            state.menu_open = menu_open;

            state.carousel_mounted = self.carousel.is_some();
            if let Some(carousel) = self.carousel.as_ref() {
                state.slide_index = carousel.index();
                state.max_index = carousel.max_index(surface);
                state.visible_slides = carousel.visible_slides(surface);
                state.autoplay_running = carousel.autoplay_running();
                state.dragging = carousel.is_dragging();
            }
        });

        for change in &changes {
            tracing::debug!(?change, "State changed");
            if matches!(change, StateChange::MenuToggled { .. }) {
                self.metrics.record_menu_toggle();
            }
        }
        self.metrics.record_state_broadcasts(changes.len());

        changes
    }

    pub fn nav_menu(&self) -> Option<&NavMenu> {
        self.nav_menu.as_ref()
    }

    pub fn carousel(&self) -> Option<&Carousel> {
        self.carousel.as_ref()
    }

    /// Direct access for programmatic navigation; call [`Page::sync_state`] afterwards
    pub fn carousel_mut(&mut self) -> Option<&mut Carousel> {
        self.carousel.as_mut()
    }

    pub fn state_manager(&self) -> &StateManager {
        &self.state_manager
    }

    pub fn metrics(&self) -> &Arc<Metrics> {
        &self.metrics
    }

    pub fn snapshot(&self) -> PageState {
        self.state_manager.snapshot()
    }
}
