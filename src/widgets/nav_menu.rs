use crate::models::NavMenuConfig;
use crate::surface::{ElementId, EventResponse, UiSurface, WidgetEvent};

/// Collapsible navigation menu.
///
/// Open/closed lives in the DOM as the presence of the open class on the
/// panel; the icon inside the toggle swaps between the closed and open icon
/// classes in step with it.
#[derive(Debug, Clone)]
pub struct NavMenu {
    config: NavMenuConfig,
    toggle: ElementId,
    panel: ElementId,
    icon: Option<ElementId>,
}

impl NavMenu {
    /// Wire the menu to the page, or `None` if the toggle or panel is missing
    pub fn mount<S: UiSurface>(surface: &S, config: &NavMenuConfig) -> Option<Self> {
        let Some(toggle) = surface.query(&config.toggle_selector) else {
            tracing::debug!("No {} element, navigation menu disabled", config.toggle_selector);
            return None;
        };
        let Some(panel) = surface.query(&config.panel_selector) else {
            tracing::debug!("No {} element, navigation menu disabled", config.panel_selector);
            return None;
        };
        let icon = surface.query_within(toggle, &config.icon_selector);

        tracing::debug!(?toggle, ?panel, has_icon = icon.is_some(), "Navigation menu mounted");

        Some(Self {
            config: config.clone(),
            toggle,
            panel,
            icon,
        })
    }

    pub fn is_open<S: UiSurface>(&self, surface: &S) -> bool {
        surface.has_class(self.panel, &self.config.open_class)
    }

    pub fn toggle_button(&self) -> ElementId {
        self.toggle
    }

    pub fn panel(&self) -> ElementId {
        self.panel
    }

    /// Flip the menu, returning whether it is now open
    pub fn toggle<S: UiSurface>(&self, surface: &mut S) -> bool {
        let open = surface.toggle_class(self.panel, &self.config.open_class);
        if let Some(icon) = self.icon {
            surface.toggle_class(icon, &self.config.closed_icon_class);
            surface.toggle_class(icon, &self.config.open_icon_class);
        }
        tracing::debug!(open, "Navigation menu toggled");
        open
    }

    /// Close the menu and restore the closed icon
    pub fn close<S: UiSurface>(&self, surface: &mut S) {
        surface.remove_class(self.panel, &self.config.open_class);
        if let Some(icon) = self.icon {
            surface.add_class(icon, &self.config.closed_icon_class);
            surface.remove_class(icon, &self.config.open_icon_class);
        }
        tracing::debug!("Navigation menu closed");
    }

    pub fn handle<S: UiSurface>(&self, surface: &mut S, event: &WidgetEvent) -> EventResponse {
        match event {
            WidgetEvent::Click { target } => {
                if surface.contains(self.toggle, *target) {
                    self.toggle(surface);
                    EventResponse::Handled
                } else if self.is_open(surface) && !surface.contains(self.panel, *target) {
                    self.close(surface);
                    EventResponse::Handled
                } else {
                    EventResponse::Ignored
                }
            }
            WidgetEvent::Resize => {
                if surface.viewport_width() > self.config.close_above_width && self.is_open(surface) {
                    self.close(surface);
                    EventResponse::Handled
                } else {
                    EventResponse::Ignored
                }
            }
            _ => EventResponse::Ignored,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::headless::{DemoOptions, DemoPage, MemoryDocument, demo_markup};

    fn setup(width: u32) -> (MemoryDocument, DemoPage, NavMenu) {
        let mut doc = MemoryDocument::new(width);
        let page = demo_markup(&mut doc, DemoOptions::default());
        let menu = NavMenu::mount(&doc, &NavMenuConfig::default()).unwrap();
        (doc, page, menu)
    }

    #[test]
    fn test_mount_finds_elements() {
        let (_doc, page, menu) = setup(600);
        assert_eq!(menu.toggle_button(), page.nav_toggle);
        assert_eq!(menu.panel(), page.nav_panel);
    }

    #[test]
    fn test_mount_without_toggle() {
        let mut doc = MemoryDocument::new(600);
        demo_markup(
            &mut doc,
            DemoOptions {
                include_nav: false,
                ..DemoOptions::default()
            },
        );
        assert!(NavMenu::mount(&doc, &NavMenuConfig::default()).is_none());
    }

    #[test]
    fn test_mount_without_panel() {
        let mut doc = MemoryDocument::new(600);
        let body = doc.body();
        doc.element(body, "button", &["nav-toggle"]);
        assert!(NavMenu::mount(&doc, &NavMenuConfig::default()).is_none());
    }

    #[test]
    fn test_toggle_swaps_icon() {
        let (mut doc, page, menu) = setup(600);

        assert!(menu.toggle(&mut doc));
        assert!(doc.has_class(page.nav_panel, "active"));
        assert!(doc.has_class(page.nav_icon, "fa-times"));
        assert!(!doc.has_class(page.nav_icon, "fa-bars"));

        assert!(!menu.toggle(&mut doc));
        assert!(!doc.has_class(page.nav_panel, "active"));
        assert!(doc.has_class(page.nav_icon, "fa-bars"));
        assert!(!doc.has_class(page.nav_icon, "fa-times"));
    }

    #[test]
    fn test_click_on_icon_counts_as_toggle() {
        let (mut doc, page, menu) = setup(600);

        let response = menu.handle(&mut doc, &WidgetEvent::Click { target: page.nav_icon });

        assert_eq!(response, EventResponse::Handled);
        assert!(menu.is_open(&doc));
    }

    #[test]
    fn test_click_inside_panel_keeps_open() {
        let (mut doc, page, menu) = setup(600);
        menu.toggle(&mut doc);

        let response = menu.handle(
            &mut doc,
            &WidgetEvent::Click {
                target: page.nav_links[1],
            },
        );

        assert_eq!(response, EventResponse::Ignored);
        assert!(menu.is_open(&doc));
    }

    #[test]
    fn test_click_outside_closes() {
        let (mut doc, page, menu) = setup(600);
        menu.toggle(&mut doc);

        menu.handle(&mut doc, &WidgetEvent::Click { target: page.content });

        assert!(!menu.is_open(&doc));
        assert!(doc.has_class(page.nav_icon, "fa-bars"));
    }

    #[test]
    fn test_click_outside_when_closed_is_ignored() {
        let (mut doc, page, menu) = setup(600);
        let response = menu.handle(&mut doc, &WidgetEvent::Click { target: page.content });
        assert_eq!(response, EventResponse::Ignored);
    }

    #[test]
    fn test_resize_above_breakpoint_closes() {
        let (mut doc, _page, menu) = setup(600);
        menu.toggle(&mut doc);

        doc.set_viewport_width(768);
        menu.handle(&mut doc, &WidgetEvent::Resize);
        assert!(menu.is_open(&doc));

        doc.set_viewport_width(769);
        let response = menu.handle(&mut doc, &WidgetEvent::Resize);
        assert_eq!(response, EventResponse::Handled);
        assert!(!menu.is_open(&doc));
    }

    #[test]
    fn test_toggle_without_icon() {
        let mut doc = MemoryDocument::new(600);
        let body = doc.body();
        doc.element(body, "button", &["nav-toggle"]);
        let panel = doc.element(body, "ul", &["nav-links"]);
        let menu = NavMenu::mount(&doc, &NavMenuConfig::default()).unwrap();

        assert!(menu.toggle(&mut doc));
        assert!(doc.has_class(panel, "active"));
    }
}
