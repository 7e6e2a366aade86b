/// Observable snapshot of both widgets on a page.
///
/// The widgets own their live state; after every dispatched event the
/// [`crate::ui::Page`] copies it here through
/// [`StateManager::update`](crate::state::StateManager::update) so subscribers
/// see a consistent picture and get [`crate::state::StateChange`] events.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PageState {
    // Mount status
    pub menu_mounted: bool,
    pub carousel_mounted: bool,

    // Navigation menu
    pub menu_open: bool,

    // Carousel position
    pub slide_index: usize,
    pub max_index: usize,
    pub visible_slides: usize,

    // Carousel activity
    pub autoplay_running: bool,
    pub dragging: bool,
}

impl Default for PageState {
    fn default() -> Self {
        Self {
            menu_mounted: false,
            carousel_mounted: false,
            menu_open: false,
            // Index 0 is the leading clone slide, so the first real slide is 1
            slide_index: 1,
            max_index: 1,
            visible_slides: 1,
            autoplay_running: false,
            dragging: false,
        }
    }
}

impl PageState {
    /// True when the carousel cannot move any further right by manual navigation
    pub fn at_last_slide(&self) -> bool {
        self.slide_index >= self.max_index
    }

    /// True when the carousel cannot move any further left
    pub fn at_first_slide(&self) -> bool {
        self.slide_index <= 1
    }

    /// One-line description used in scenario transcripts and logs
    pub fn summary(&self) -> String {
        let menu = if !self.menu_mounted {
            "absent"
        } else if self.menu_open {
            "open"
        } else {
            "closed"
        };

        if !self.carousel_mounted {
            return format!("menu={menu} carousel=absent");
        }

        format!(
            "menu={menu} slide={}/{} visible={} autoplay={}{}",
            self.slide_index,
            self.max_index,
            self.visible_slides,
            if self.autoplay_running { "on" } else { "paused" },
            if self.dragging { " dragging" } else { "" }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_state() {
        let state = PageState::default();
        assert!(!state.menu_open);
        assert_eq!(state.slide_index, 1);
        assert!(state.at_first_slide());
        assert!(state.at_last_slide());
    }

    #[test]
    fn test_slide_bounds() {
        let state = PageState {
            carousel_mounted: true,
            slide_index: 2,
            max_index: 4,
            ..PageState::default()
        };

        assert!(!state.at_first_slide());
        assert!(!state.at_last_slide());
    }

    #[test]
    fn test_summary() {
        let state = PageState {
            menu_mounted: true,
            menu_open: true,
            carousel_mounted: true,
            slide_index: 3,
            max_index: 4,
            visible_slides: 2,
            autoplay_running: true,
            dragging: false,
        };

        assert_eq!(state.summary(), "menu=open slide=3/4 visible=2 autoplay=on");
        assert_eq!(
            PageState::default().summary(),
            "menu=absent carousel=absent"
        );
    }
}
