//! Integration tests for StateManager with state change events
//!
//! These tests verify that the StateManager correctly:
//! - Emits state change events on mutations
//! - Supports multiple subscribers
//! - Handles concurrent access from multiple threads
//! - Mirrors the widgets on a live page

use sitewidgets::headless::{DemoOptions, HeadlessBrowser, demo_markup};
use sitewidgets::{Metrics, Page, StateChange, StateManager, WidgetConfig, WidgetEvent};
use std::sync::Arc;
use tokio::time::{Duration, timeout};

#[tokio::test]
async fn test_state_change_events_emitted() {
    let state = StateManager::new();
    let mut rx = state.subscribe();

    state.update(|s| s.menu_open = true);

    let event = timeout(Duration::from_millis(100), rx.recv())
        .await
        .expect("Timeout waiting for event")
        .expect("Channel closed");

    assert_eq!(event, StateChange::MenuToggled { open: true });
}

#[tokio::test]
async fn test_multiple_subscribers_receive_events() {
    let state = StateManager::new();
    let mut rx1 = state.subscribe();
    let mut rx2 = state.subscribe();
    let mut rx3 = state.subscribe();
    assert_eq!(state.subscriber_count(), 3);

    state.update(|s| {
        s.carousel_mounted = true;
        s.slide_index = 2;
    });

    for rx in [&mut rx1, &mut rx2, &mut rx3] {
        let first = timeout(Duration::from_millis(100), rx.recv())
            .await
            .expect("Timeout waiting for event")
            .expect("Channel closed");
        let second = timeout(Duration::from_millis(100), rx.recv())
            .await
            .expect("Timeout waiting for event")
            .expect("Channel closed");

        assert_eq!(
            first,
            StateChange::WidgetsMounted {
                menu: false,
                carousel: true
            }
        );
        assert_eq!(second, StateChange::SlideChanged { from: 1, to: 2 });
    }
}

#[tokio::test]
async fn test_no_event_without_change() {
    let state = StateManager::new();
    let mut rx = state.subscribe();

    let changes = state.update(|s| s.slide_index = 1);

    assert!(changes.is_empty());
    assert!(
        timeout(Duration::from_millis(20), rx.recv()).await.is_err(),
        "No event expected for an unchanged state"
    );
}

#[tokio::test]
async fn test_concurrent_updates() {
    let state = Arc::new(StateManager::new());
    let mut handles = Vec::new();

    for i in 0..8 {
        let state = Arc::clone(&state);
        handles.push(tokio::spawn(async move {
            for _ in 0..50 {
                state.update(|s| {
                    s.slide_index += 1;
                    s.menu_open = i % 2 == 0;
                });
            }
        }));
    }

    for handle in handles {
        handle.await.expect("Task panicked");
    }

    // Every increment applied exactly once
    assert_eq!(state.read(|s| s.slide_index), 1 + 8 * 50);
}

#[tokio::test]
async fn test_page_broadcasts_mount_and_interaction() {
    let mut browser = HeadlessBrowser::new(1280);
    let demo = demo_markup(&mut browser.document, DemoOptions::default());

    let state_manager = StateManager::new();
    let mut rx = state_manager.subscribe();
    let mut page = Page::on_content_loaded_with(
        &mut browser,
        &WidgetConfig::default(),
        state_manager,
        Arc::new(Metrics::new()),
    );

    let mut mount_events = Vec::new();
    while let Ok(event) = rx.try_recv() {
        mount_events.push(event);
    }
    assert_eq!(
        mount_events,
        vec![
            StateChange::WidgetsMounted {
                menu: true,
                carousel: true
            },
            StateChange::LayoutChanged {
                visible_slides: 3,
                max_index: 4
            },
            StateChange::AutoplayChanged { running: true },
        ]
    );

    page.dispatch(&mut browser, WidgetEvent::Click { target: demo.nav_toggle });
    page.dispatch(&mut browser, WidgetEvent::MouseEnter { target: demo.slider_track });

    let event = timeout(Duration::from_millis(100), rx.recv())
        .await
        .expect("Timeout waiting for event")
        .expect("Channel closed");
    assert_eq!(event, StateChange::MenuToggled { open: true });

    let event = timeout(Duration::from_millis(100), rx.recv())
        .await
        .expect("Timeout waiting for event")
        .expect("Channel closed");
    assert_eq!(event, StateChange::AutoplayChanged { running: false });
}

#[tokio::test]
async fn test_autoplay_ticks_broadcast_slide_changes() {
    let mut browser = HeadlessBrowser::new(1280);
    demo_markup(&mut browser.document, DemoOptions::default());
    let mut page = Page::on_content_loaded(&mut browser, &WidgetConfig::default());
    let mut rx = page.state_manager().subscribe();

    browser.advance(&mut page, Duration::from_millis(5000 * 4));

    let mut slides = Vec::new();
    while let Ok(event) = rx.try_recv() {
        if let StateChange::SlideChanged { to, .. } = event {
            slides.push(to);
        }
    }
    assert_eq!(slides, vec![2, 3, 4, 1]);
}

#[tokio::test]
async fn test_unload_resets_state() {
    let mut browser = HeadlessBrowser::new(1280);
    demo_markup(&mut browser.document, DemoOptions::default());
    let mut page = Page::on_content_loaded(&mut browser, &WidgetConfig::default());
    let mut rx = page.state_manager().subscribe();

    page.unload(&mut browser);

    let mut events = Vec::new();
    while let Ok(event) = rx.try_recv() {
        events.push(event);
    }
    assert_eq!(events.last(), Some(&StateChange::StateReset));
    assert!(events.contains(&StateChange::WidgetsMounted {
        menu: false,
        carousel: false
    }));
    assert!(!page.snapshot().carousel_mounted);
}
