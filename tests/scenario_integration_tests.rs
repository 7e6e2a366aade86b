//! Integration tests for scenario replay
//!
//! These tests load scenario files from disk and replay them, verifying
//! the transcript and final state.

use camino::Utf8PathBuf;
use sitewidgets::{Scenario, ScenarioError, ScenarioRunner, StateChange, WidgetConfig};
use std::fs;
use std::sync::atomic::Ordering;
use tempfile::TempDir;

fn write_scenario(contents: &str) -> (TempDir, Utf8PathBuf) {
    let temp_dir = TempDir::new().unwrap();
    let dir = Utf8PathBuf::try_from(temp_dir.path().to_path_buf()).unwrap();
    let path = dir.join("scenario.yaml");
    fs::write(&path, contents).unwrap();
    (temp_dir, path)
}

#[tokio::test]
async fn test_autoplay_tour() {
    let (_temp_dir, path) = write_scenario(
        r#"
name: autoplay tour
viewport_width: 1280
steps:
  - wait_ms: 5000
  - wait_ms: 5000
  - wait_ms: 5000
  - wait_ms: 5000
  - wait_ms: 5000
"#,
    );
    let scenario = Scenario::load(&path).unwrap();

    let report = ScenarioRunner::default().run(&scenario).await.unwrap();

    let slides: Vec<usize> = report
        .all_changes()
        .filter_map(|change| match change {
            StateChange::SlideChanged { to, .. } => Some(*to),
            _ => None,
        })
        .collect();
    assert_eq!(slides, vec![2, 3, 4, 1, 2]);
    assert_eq!(report.steps.last().unwrap().at.as_millis(), 25_000);
    assert_eq!(report.metrics.autoplay_ticks.load(Ordering::Relaxed), 5);
}

#[tokio::test]
async fn test_long_wait_keeps_every_change() {
    let (_temp_dir, path) = write_scenario("steps:\n  - wait_ms: 3000000\n");
    let scenario = Scenario::load(&path).unwrap();

    let report = ScenarioRunner::default().run(&scenario).await.unwrap();

    // 600 ticks in one step, far more than the broadcast channel buffers
    let slide_changes = report
        .all_changes()
        .filter(|change| matches!(change, StateChange::SlideChanged { .. }))
        .count();
    assert_eq!(report.metrics.autoplay_ticks.load(Ordering::Relaxed), 600);
    assert_eq!(slide_changes, 600);
    assert_eq!(report.steps[1].changes.len(), 600);
    assert_eq!(report.final_state.slide_index, 1);
}

#[tokio::test]
async fn test_menu_and_drag_session() {
    let (_temp_dir, path) = write_scenario(
        r#"
viewport_width: 600
container_width: 1000
steps:
  - click: nav_toggle
  - click: nav_link:2
  - click: content
  - drag: { from: 700, to: 400 }
  - drag: { from: 400, to: 350, pointer: touch }
  - resize: 1280
  - wait_ms: 100
"#,
    );
    let scenario = Scenario::load(&path).unwrap();

    let report = ScenarioRunner::default().run(&scenario).await.unwrap();
    let steps = &report.steps;

    assert_eq!(steps[1].changes, vec![StateChange::MenuToggled { open: true }]);
    assert!(steps[2].changes.is_empty());
    assert_eq!(steps[3].changes, vec![StateChange::MenuToggled { open: false }]);
    assert_eq!(
        steps[4].changes,
        vec![
            StateChange::DragChanged { dragging: true },
            StateChange::SlideChanged { from: 1, to: 2 },
            StateChange::DragChanged { dragging: false },
        ]
    );
    // Touch drag under the threshold: paused and resumed, no slide change
    assert!(
        !steps[5]
            .changes
            .iter()
            .any(|c| matches!(c, StateChange::SlideChanged { .. }))
    );
    assert_eq!(
        steps[6].changes,
        vec![StateChange::LayoutChanged {
            visible_slides: 3,
            max_index: 4
        }]
    );

    assert_eq!(report.final_state.slide_index, 2);
    assert!(!report.final_state.menu_open);
    assert!(report.final_state.autoplay_running);
}

#[tokio::test]
async fn test_custom_config_is_used() {
    let (_temp_dir, path) = write_scenario("steps:\n  - wait_ms: 2000\n");
    let scenario = Scenario::load(&path).unwrap();

    let mut config = WidgetConfig::default();
    config.carousel.autoplay_interval_ms = 1000;

    let report = ScenarioRunner::new(config).run(&scenario).await.unwrap();

    assert_eq!(report.final_state.slide_index, 3);
}

#[tokio::test]
async fn test_realtime_wait() {
    let (_temp_dir, path) = write_scenario("steps:\n  - wait_ms: 20\n");
    let scenario = Scenario::load(&path).unwrap();

    let started = std::time::Instant::now();
    let report = ScenarioRunner::default()
        .realtime(true)
        .run(&scenario)
        .await
        .unwrap();

    assert!(started.elapsed().as_millis() >= 20);
    assert_eq!(report.final_state.slide_index, 1);
}

#[tokio::test]
async fn test_transcript_rendering() {
    let (_temp_dir, path) = write_scenario(
        "name: render\nsteps:\n  - click: next\n  - context_menu: card:2\n",
    );
    let scenario = Scenario::load(&path).unwrap();

    let report = ScenarioRunner::default().run(&scenario).await.unwrap();
    let transcript = report.render();

    assert!(transcript.starts_with("scenario: render\n"));
    assert!(transcript.contains("page load (Handled)"));
    assert!(transcript.contains("click next (Handled)"));
    assert!(transcript.contains("SlideChanged { from: 1, to: 2 }"));
    assert!(transcript.contains("context menu on card:2 (DefaultPrevented)"));
    assert!(transcript.ends_with("final: menu=closed slide=2/4 visible=3 autoplay=on\n"));
}

#[tokio::test]
async fn test_missing_file() {
    let path = Utf8PathBuf::from("/nonexistent/sitewidgets/scenario.yaml");

    let result = Scenario::load(&path);

    assert!(matches!(result, Err(ScenarioError::Io { .. })));
}

#[tokio::test]
async fn test_unknown_target_aborts_run() {
    let (_temp_dir, path) = write_scenario("steps:\n  - hover: sidebar\n");
    let scenario = Scenario::load(&path).unwrap();

    let result = ScenarioRunner::default().run(&scenario).await;

    match result {
        Err(ScenarioError::UnknownTarget(name)) => assert_eq!(name, "sidebar"),
        Err(other) => panic!("unexpected error: {other}"),
        Ok(_) => panic!("expected an unknown target error"),
    }
}
