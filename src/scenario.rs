//! Scenario replay - scripted interaction against the headless demo page.
//!
//! A scenario is a YAML document describing the page to build and a list of
//! steps to perform on it:
//!
//! ```yaml
//! name: drag then wait
//! viewport_width: 1280
//! services: 6
//! steps:
//!   - click: next
//!   - drag: { from: 600, to: 200 }
//!   - hover: track
//!   - unhover: track
//!   - resize: 600
//!   - wait_ms: 5000
//! ```
//!
//! Running it produces a [`ScenarioReport`]: every step with the
//! [`StateChange`] events it caused.
//!
//! Step targets name elements of the demo page: `body`, `header`,
//! `nav_toggle`, `nav_icon`, `nav_panel`, `nav_link:N` (1-based), `content`,
//! `container`, `track`, `prev`, `next`, `dots`, `dot:N` (1-based) and
//! `card:N` (position in the track, 0 is the leading clone).

use crate::headless::{DemoOptions, DemoPage, HeadlessBrowser, demo_markup};
use crate::metrics::Metrics;
use crate::models::{PageState, WidgetConfig};
use crate::state::{StateChange, StateManager};
use crate::surface::{ElementId, EventResponse, PointerKind, WidgetEvent};
use crate::ui::Page;
use camino::Utf8Path;
use serde::Deserialize;
use std::fmt::Write as _;
use std::fs;
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;

/// Errors that can occur while loading or replaying a scenario
#[derive(Error, Debug)]
pub enum ScenarioError {
    #[error("Failed to read scenario {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid scenario: {0}")]
    Parse(#[from] serde_yaml_ng::Error),

    #[error("Unknown target '{0}'")]
    UnknownTarget(String),
}

/// A scripted session on the demo page
#[derive(Debug, Clone, Deserialize)]
pub struct Scenario {
    #[serde(default)]
    pub name: Option<String>,

    #[serde(default = "default_viewport_width")]
    pub viewport_width: u32,

    /// Number of real service cards (clones are added automatically)
    #[serde(default = "default_services")]
    pub services: usize,

    /// Rendered slider width in pixels; defaults to the viewport width
    #[serde(default)]
    pub container_width: Option<f64>,

    #[serde(default = "default_true")]
    pub include_nav: bool,

    #[serde(default = "default_true")]
    pub include_slider: bool,

    #[serde(default = "default_true")]
    pub include_dots: bool,

    /// Steps are single-key maps (`- click: next`) or bare names (`- leave_window`)
    #[serde(
        default,
        deserialize_with = "serde_yaml_ng::with::singleton_map_recursive::deserialize"
    )]
    pub steps: Vec<Step>,
}

fn default_viewport_width() -> u32 {
    1280
}

fn default_services() -> usize {
    6
}

fn default_true() -> bool {
    true
}

/// One interaction
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Step {
    Click(String),
    ContextMenu(String),
    /// Pointer enters the target (`mouseenter`)
    Hover(String),
    /// Pointer leaves the target (`mouseleave`)
    Unhover(String),
    Drag(DragStep),
    /// Mouse leaves the browser window
    LeaveWindow,
    /// New viewport width in pixels
    Resize(u32),
    /// Advance the clock, firing any timers that fall due
    WaitMs(u64),
}

/// A press-move-release gesture
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct DragStep {
    pub from: f64,
    pub to: f64,

    #[serde(default)]
    pub pointer: Pointer,

    /// Element pressed; the track when omitted
    #[serde(default)]
    pub target: Option<String>,

    /// Number of move events between press and release
    #[serde(default = "default_moves")]
    pub moves: u32,

    /// End by leaving the window instead of releasing the button
    #[serde(default)]
    pub leave_window: bool,
}

fn default_moves() -> u32 {
    4
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Pointer {
    #[default]
    Mouse,
    Touch,
}

impl From<Pointer> for PointerKind {
    fn from(pointer: Pointer) -> Self {
        match pointer {
            Pointer::Mouse => PointerKind::Mouse,
            Pointer::Touch => PointerKind::Touch,
        }
    }
}

impl DragStep {
    /// Intermediate move positions, ending exactly at `to`
    fn path(&self) -> Vec<f64> {
        let moves = self.moves.max(1);
        let span = self.to - self.from;
        (1..moves)
            .map(|i| self.from + span * f64::from(i) / f64::from(moves))
            .chain(std::iter::once(self.to))
            .collect()
    }
}

impl Step {
    /// Short human-readable form for transcripts
    pub fn describe(&self) -> String {
        match self {
            Step::Click(target) => format!("click {target}"),
            Step::ContextMenu(target) => format!("context menu on {target}"),
            Step::Hover(target) => format!("hover {target}"),
            Step::Unhover(target) => format!("unhover {target}"),
            Step::Drag(drag) => {
                let pointer = match drag.pointer {
                    Pointer::Mouse => "mouse",
                    Pointer::Touch => "touch",
                };
                let end = if drag.leave_window {
                    " (left window)"
                } else {
                    ""
                };
                format!("{pointer} drag {} -> {}{end}", drag.from, drag.to)
            }
            Step::LeaveWindow => "leave window".to_string(),
            Step::Resize(width) => format!("resize to {width}px"),
            Step::WaitMs(ms) => format!("wait {ms}ms"),
        }
    }
}

impl Scenario {
    /// Parse a scenario from YAML text
    pub fn from_yaml(text: &str) -> Result<Self, ScenarioError> {
        Ok(serde_yaml_ng::from_str(text)?)
    }

    /// Read and parse a scenario file
    pub fn load(path: &Utf8Path) -> Result<Self, ScenarioError> {
        let text = fs::read_to_string(path).map_err(|source| ScenarioError::Io {
            path: path.to_string(),
            source,
        })?;
        Self::from_yaml(&text)
    }

    fn demo_options(&self) -> DemoOptions {
        DemoOptions {
            services: self.services,
            include_nav: self.include_nav,
            include_slider: self.include_slider,
            include_dots: self.include_dots,
            container_width: self.container_width,
        }
    }
}

/// What one step did
#[derive(Debug, Clone, PartialEq)]
pub struct StepRecord {
    /// Virtual time after the step
    pub at: Duration,
    pub description: String,
    pub response: EventResponse,
    pub changes: Vec<StateChange>,
}

/// Outcome of a scenario run
pub struct ScenarioReport {
    pub name: Option<String>,
    /// Page load first, then one record per step
    pub steps: Vec<StepRecord>,
    pub final_state: PageState,
    pub metrics: Arc<Metrics>,
}

impl ScenarioReport {
    /// Every change across the run, in order
    pub fn all_changes(&self) -> impl Iterator<Item = &StateChange> {
        self.steps.iter().flat_map(|record| record.changes.iter())
    }

    /// Plain-text transcript
    pub fn render(&self) -> String {
        let mut out = String::new();
        if let Some(name) = &self.name {
            let _ = writeln!(out, "scenario: {name}");
        }
        for record in &self.steps {
            let _ = writeln!(
                out,
                "[{:>7}ms] {} ({:?})",
                record.at.as_millis(),
                record.description,
                record.response
            );
            for change in &record.changes {
                let _ = writeln!(out, "             {change:?}");
            }
        }
        let _ = writeln!(out, "final: {}", self.final_state.summary());
        out
    }
}

/// Replays scenarios against a fresh headless page
#[derive(Debug, Clone, Default)]
pub struct ScenarioRunner {
    config: WidgetConfig,
    realtime: bool,
}

impl ScenarioRunner {
    pub fn new(config: WidgetConfig) -> Self {
        Self {
            config,
            realtime: false,
        }
    }

    /// Also sleep on the runtime for `wait_ms` steps
    pub fn realtime(mut self, realtime: bool) -> Self {
        self.realtime = realtime;
        self
    }

    pub async fn run(&self, scenario: &Scenario) -> Result<ScenarioReport, ScenarioError> {
        let mut browser = HeadlessBrowser::new(scenario.viewport_width);
        let demo = demo_markup(&mut browser.document, scenario.demo_options());

        let state_manager = StateManager::new();
        let metrics = Arc::new(Metrics::new());

        tracing::info!(
            name = scenario.name.as_deref().unwrap_or("unnamed"),
            viewport = scenario.viewport_width,
            steps = scenario.steps.len(),
            "Running scenario"
        );

        let mut page = Page::on_content_loaded_with(
            &mut browser,
            &self.config,
            state_manager,
            Arc::clone(&metrics),
        );

        let mut records = vec![StepRecord {
            at: browser.now(),
            description: "page load".to_string(),
            response: EventResponse::Handled,
            changes: StateManager::diff(&PageState::default(), &page.snapshot()),
        }];

        for step in &scenario.steps {
            let (response, changes) = self.perform(&mut browser, &mut page, &demo, step).await?;
            let record = StepRecord {
                at: browser.now(),
                description: step.describe(),
                response,
                changes,
            };
            tracing::debug!(
                step = %record.description,
                changes = record.changes.len(),
                "Step complete"
            );
            records.push(record);
        }

        let final_state = page.snapshot();
        page.unload(&mut browser);

        Ok(ScenarioReport {
            name: scenario.name.clone(),
            steps: records,
            final_state,
            metrics,
        })
    }

    async fn perform(
        &self,
        browser: &mut HeadlessBrowser,
        page: &mut Page,
        demo: &DemoPage,
        step: &Step,
    ) -> Result<(EventResponse, Vec<StateChange>), ScenarioError> {
        let outcome = match step {
            Step::Click(name) => {
                let target = resolve(browser, page, demo, name)?;
                page.dispatch_with_changes(browser, WidgetEvent::Click { target })
            }
            Step::ContextMenu(name) => {
                let target = resolve(browser, page, demo, name)?;
                page.dispatch_with_changes(browser, WidgetEvent::ContextMenu { target })
            }
            Step::Hover(name) => {
                let target = resolve(browser, page, demo, name)?;
                page.dispatch_with_changes(browser, WidgetEvent::MouseEnter { target })
            }
            Step::Unhover(name) => {
                let target = resolve(browser, page, demo, name)?;
                page.dispatch_with_changes(browser, WidgetEvent::MouseLeave { target })
            }
            Step::Drag(drag) => {
                let name = drag.target.as_deref().unwrap_or("track");
                let target = resolve(browser, page, demo, name)?;
                let pointer = PointerKind::from(drag.pointer);

                let (mut response, mut changes) = page.dispatch_with_changes(
                    browser,
                    WidgetEvent::PointerDown {
                        pointer,
                        x: drag.from,
                        target,
                    },
                );
                for x in drag.path() {
                    let (moved, caused) = page
                        .dispatch_with_changes(browser, WidgetEvent::PointerMove { pointer, x });
                    response = response.merge(moved);
                    changes.extend(caused);
                }
                browser.flush_frames_recording(page, &mut changes);

                let end = if drag.leave_window {
                    WidgetEvent::WindowMouseLeave
                } else {
                    WidgetEvent::PointerUp { pointer }
                };
                let (ended, caused) = page.dispatch_with_changes(browser, end);
                changes.extend(caused);
                (response.merge(ended), changes)
            }
            Step::LeaveWindow => page.dispatch_with_changes(browser, WidgetEvent::WindowMouseLeave),
            Step::Resize(width) => {
                browser.document.set_viewport_width(*width);
                page.dispatch_with_changes(browser, WidgetEvent::Resize)
            }
            Step::WaitMs(ms) => {
                let duration = Duration::from_millis(*ms);
                if self.realtime {
                    tokio::time::sleep(duration).await;
                }
                let mut changes = Vec::new();
                let response = if browser.advance_recording(page, duration, &mut changes) > 0 {
                    EventResponse::Handled
                } else {
                    EventResponse::Ignored
                };
                (response, changes)
            }
        };

        Ok(outcome)
    }
}

/// Look up a named demo-page element
fn resolve(
    browser: &HeadlessBrowser,
    page: &Page,
    demo: &DemoPage,
    name: &str,
) -> Result<ElementId, ScenarioError> {
    let unknown = || ScenarioError::UnknownTarget(name.to_string());

    let (kind, position) = match name.split_once(':') {
        Some((kind, n)) => {
            let n = n.trim().parse::<usize>().map_err(|_| unknown())?;
            (kind, Some(n))
        }
        None => (name, None),
    };

    let found = match (kind, position) {
        ("body", None) => Some(browser.document.body()),
        ("header", None) => Some(demo.header),
        ("nav_toggle", None) => Some(demo.nav_toggle),
        ("nav_icon", None) => Some(demo.nav_icon),
        ("nav_panel", None) => Some(demo.nav_panel),
        ("nav_link", Some(n)) => n.checked_sub(1).and_then(|i| demo.nav_links.get(i)).copied(),
        ("content", None) => Some(demo.content),
        ("container", None) => Some(demo.slider_container),
        ("track", None) => Some(demo.slider_track),
        ("prev", None) => Some(demo.prev),
        ("next", None) => Some(demo.next),
        ("dots", None) => Some(demo.dots),
        ("dot", Some(n)) => page
            .carousel()
            .and_then(|carousel| n.checked_sub(1).and_then(|i| carousel.dots().get(i)))
            .copied(),
        ("card", Some(n)) => demo.cards.get(n).copied(),
        _ => None,
    };

    found.ok_or_else(unknown)
}
