use super::MemoryDocument;
use crate::surface::{ElementId, UiSurface};

/// Handles to the elements of the stock demo page
#[derive(Debug, Clone)]
pub struct DemoPage {
    pub header: ElementId,
    pub nav_toggle: ElementId,
    pub nav_icon: ElementId,
    pub nav_panel: ElementId,
    pub nav_links: Vec<ElementId>,
    /// Plain content area outside both widgets
    pub content: ElementId,
    pub slider_container: ElementId,
    pub slider_track: ElementId,
    /// All cards including the leading and trailing clones
    pub cards: Vec<ElementId>,
    pub prev: ElementId,
    pub next: ElementId,
    pub dots: ElementId,
}

/// Options for [`demo_markup`]
#[derive(Debug, Clone, Copy)]
pub struct DemoOptions {
    /// Number of real service cards; a clone is added at each end
    pub services: usize,
    pub include_nav: bool,
    pub include_slider: bool,
    pub include_dots: bool,
    /// Rendered width of the slider container; `None` follows the viewport
    pub container_width: Option<f64>,
}

impl Default for DemoOptions {
    fn default() -> Self {
        Self {
            services: 6,
            include_nav: true,
            include_slider: true,
            include_dots: true,
            container_width: None,
        }
    }
}

/// Build the page structure the default [`crate::models::WidgetConfig`] expects.
///
/// ```text
/// body
/// ├── header > nav
/// │   ├── button.nav-toggle > i.fas.fa-bars
/// │   └── ul.nav-links > li > a   (x4)
/// ├── main.content
/// └── section.services-slider-container
///     ├── button.slider-btn.prev
///     ├── div.services-slider > div.service-card   (clone + services + clone)
///     ├── button.slider-btn.next
///     └── div.slider-dots
/// ```
///
/// Elements switched off in `options` are left out entirely; their handles
/// then point at detached placeholder elements so the struct stays total.
pub fn demo_markup(doc: &mut MemoryDocument, options: DemoOptions) -> DemoPage {
    let body = doc.body();

    let header = doc.element(body, "header", &["site-header"]);
    let (nav_toggle, nav_icon, nav_panel, nav_links) = if options.include_nav {
        let nav = doc.element(header, "nav", &["navbar"]);
        let toggle = doc.element(nav, "button", &["nav-toggle"]);
        doc.set_attribute(toggle, "aria-label", "Toggle navigation");
        let icon = doc.element(toggle, "i", &["fas", "fa-bars"]);
        let panel = doc.element(nav, "ul", &["nav-links"]);

        let links = ["Home", "Services", "About", "Contact"]
            .iter()
            .map(|label| {
                let item = doc.element(panel, "li", &[]);
                let link = doc.element(item, "a", &[]);
                doc.set_attribute(link, "href", &format!("#{}", label.to_ascii_lowercase()));
                link
            })
            .collect();

        (toggle, icon, panel, links)
    } else {
        let toggle = doc.create_element("button");
        let icon = doc.create_element("i");
        let panel = doc.create_element("ul");
        (toggle, icon, panel, Vec::new())
    };

    let content = doc.element(body, "main", &["content"]);

    let (slider_container, slider_track, cards, prev, next, dots) = if options.include_slider {
        let container = doc.element(body, "section", &["services-slider-container"]);
        if let Some(width) = options.container_width {
            doc.set_offset_width(container, width);
        }

        let prev = doc.element(container, "button", &["slider-btn", "prev"]);
        let track = doc.element(container, "div", &["services-slider"]);

        let mut cards = Vec::with_capacity(options.services + 2);
        cards.push(doc.element(track, "div", &["service-card", "clone"]));
        for n in 1..=options.services {
            let card = doc.element(track, "div", &["service-card"]);
            doc.set_attribute(card, "data-service", &n.to_string());
            cards.push(card);
        }
        cards.push(doc.element(track, "div", &["service-card", "clone"]));

        let next = doc.element(container, "button", &["slider-btn", "next"]);
        let dots = if options.include_dots {
            doc.element(container, "div", &["slider-dots"])
        } else {
            doc.create_element("div")
        };

        (container, track, cards, prev, next, dots)
    } else {
        (
            doc.create_element("section"),
            doc.create_element("div"),
            Vec::new(),
            doc.create_element("button"),
            doc.create_element("button"),
            doc.create_element("div"),
        )
    };

    DemoPage {
        header,
        nav_toggle,
        nav_icon,
        nav_panel,
        nav_links,
        content,
        slider_container,
        slider_track,
        cards,
        prev,
        next,
        dots,
    }
}
