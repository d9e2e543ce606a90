// SPDX-License-Identifier: MPL-2.0
//! End-to-end scenarios for the toast engine, run against a paused tokio
//! clock so every timing assertion is deterministic.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use tokio::time::{advance, Instant};

use toastline::config::EngineConfig;
use toastline::diagnostics::{DiagnosticsHandle, DismissReason, EngineEventKind};
use toastline::engine::{Payload, ToastEngine};

/// Lets the engine task drain its command channel without advancing time.
async fn settle() {
    for _ in 0..16 {
        tokio::task::yield_now().await;
    }
}

fn fast_config() -> EngineConfig {
    EngineConfig {
        base_interval_ms: 100,
        backlog_scaling_ms: 100,
        max_interval_ms: 1000,
        default_duration_ms: 10_000,
        ..EngineConfig::default()
    }
}

#[tokio::test(start_paused = true)]
async fn end_to_end_three_toast_scenario() {
    // Default geometry: base 20, height 80, spacing 16.
    let engine = ToastEngine::spawn(EngineConfig::default());

    let a = engine.submit(Payload::new("A")).expect("engine running");
    let b = engine.submit(Payload::new("B")).expect("engine running");
    let c = engine.submit(Payload::new("C")).expect("engine running");
    let (id_a, id_b, id_c) = (a.id(), b.id(), c.id());

    // Strict FIFO, with strictly increasing materialization times.
    assert_eq!(a.await.expect("A materializes"), id_a);
    let t_a = Instant::now();
    assert_eq!(b.await.expect("B materializes"), id_b);
    let t_b = Instant::now();
    assert_eq!(c.await.expect("C materializes"), id_c);
    let t_c = Instant::now();
    assert!(t_a < t_b && t_b < t_c);

    settle().await;
    let stack = engine.active();
    assert_eq!(
        stack.iter().map(|t| t.id).collect::<Vec<_>>(),
        vec![id_a, id_b, id_c]
    );
    assert_eq!(
        stack.iter().map(|t| t.vertical_offset).collect::<Vec<_>>(),
        vec![20.0, 116.0, 212.0]
    );

    // Manually dismiss the middle toast: C slides up, A stays put.
    engine.dismiss(id_b).expect("engine running");
    settle().await;
    let stack = engine.active();
    assert_eq!(
        stack.iter().map(|t| t.id).collect::<Vec<_>>(),
        vec![id_a, id_c]
    );
    assert_eq!(
        stack.iter().map(|t| t.vertical_offset).collect::<Vec<_>>(),
        vec![20.0, 116.0]
    );
}

#[tokio::test(start_paused = true)]
async fn adaptive_spacing_follows_backlog_depth() {
    let engine = ToastEngine::spawn(fast_config());

    let pending: Vec<_> = (0..4)
        .map(|i| {
            engine
                .submit(Payload::new(format!("burst {i}")))
                .expect("engine running")
        })
        .collect();

    let mut instants = Vec::new();
    for p in pending {
        p.await.expect("materializes in order");
        instants.push(Instant::now());
    }

    // Backlog depth after each pop was 3, 2, 1, so the inter-arrival
    // waits are 100 + depth * 100.
    let gaps: Vec<Duration> = instants.windows(2).map(|w| w[1] - w[0]).collect();
    assert_eq!(
        gaps,
        vec![
            Duration::from_millis(400),
            Duration::from_millis(300),
            Duration::from_millis(200),
        ]
    );

    // Non-decreasing as a function of backlog depth at dispatch time.
    let by_backlog: Vec<(usize, Duration)> = vec![(1, gaps[2]), (2, gaps[1]), (3, gaps[0])];
    assert!(by_backlog.windows(2).all(|w| w[0].1 <= w[1].1));
}

#[tokio::test(start_paused = true)]
async fn pause_resume_preserves_remaining_time() {
    let engine = ToastEngine::spawn(fast_config());
    let id = engine
        .submit(Payload::new("hover me").duration(Duration::from_millis(2000)))
        .expect("engine running")
        .await
        .expect("materializes");
    settle().await;

    advance(Duration::from_millis(500)).await;
    engine.pause(id).expect("engine running");
    settle().await;

    // An arbitrary real-time gap while hovered.
    advance(Duration::from_millis(30_000)).await;
    settle().await;
    assert_eq!(engine.active().len(), 1, "paused toast must stay visible");

    engine.resume(id).expect("engine running");
    settle().await;

    advance(Duration::from_millis(1499)).await;
    settle().await;
    assert_eq!(engine.active().len(), 1, "must serve the full remainder");

    advance(Duration::from_millis(1)).await;
    settle().await;
    assert!(
        engine.active().is_empty(),
        "must dismiss 1500ms after resume, not 2000ms"
    );
}

#[tokio::test(start_paused = true)]
async fn dismissal_is_idempotent_across_triggers() {
    let engine = ToastEngine::spawn(fast_config());
    let id = engine
        .submit(Payload::new("close me").duration(Duration::from_millis(500)))
        .expect("engine running")
        .await
        .expect("materializes");
    settle().await;

    engine.dismiss(id).expect("engine running");
    engine.dismiss(id).expect("engine running");
    settle().await;
    assert!(engine.active().is_empty());

    // Dismissing after a natural timeout is equally a no-op.
    let id = engine
        .submit(Payload::new("expire me").duration(Duration::from_millis(500)))
        .expect("engine running")
        .await
        .expect("materializes");
    settle().await;
    advance(Duration::from_millis(500)).await;
    settle().await;
    assert!(engine.active().is_empty());

    engine.dismiss(id).expect("engine running");
    settle().await;
    assert!(engine.active().is_empty());
}

#[tokio::test(start_paused = true)]
async fn action_runs_handler_then_dismisses() {
    let engine = ToastEngine::spawn(fast_config());
    let pressed = Arc::new(AtomicBool::new(false));
    let flag = Arc::clone(&pressed);

    let id = engine
        .submit(Payload::new("update ready").action("Restart", Arc::new(move || {
            flag.store(true, Ordering::SeqCst);
        })))
        .expect("engine running")
        .await
        .expect("materializes");
    settle().await;

    engine.action(id).expect("engine running");
    settle().await;

    assert!(pressed.load(Ordering::SeqCst), "handler must run");
    assert!(engine.active().is_empty(), "action also closes the toast");

    // A second action on the dismissed id does nothing further.
    pressed.store(false, Ordering::SeqCst);
    engine.action(id).expect("engine running");
    settle().await;
    assert!(!pressed.load(Ordering::SeqCst));
}

#[tokio::test(start_paused = true)]
async fn subscribers_observe_each_stack_revision() {
    let engine = ToastEngine::spawn(fast_config());
    let mut view = engine.subscribe();

    let a = engine.submit(Payload::new("first")).expect("engine running");
    let b = engine.submit(Payload::new("second")).expect("engine running");
    let (id_a, id_b) = (a.id(), b.id());

    view.changed().await.expect("engine alive");
    {
        let stack = view.borrow_and_update();
        assert_eq!(stack.iter().map(|t| t.id).collect::<Vec<_>>(), vec![id_a]);
    }

    view.changed().await.expect("engine alive");
    {
        let stack = view.borrow_and_update();
        assert_eq!(
            stack.iter().map(|t| t.id).collect::<Vec<_>>(),
            vec![id_a, id_b]
        );
        // Offsets are final at publication time; no stale positions.
        let config = engine.config();
        for (index, toast) in stack.iter().enumerate() {
            let expected =
                config.base_offset + index as f32 * (config.toast_height + config.toast_spacing);
            assert_eq!(toast.vertical_offset, expected);
        }
    }

    drop((a, b));
}

#[tokio::test(start_paused = true)]
async fn diagnostics_reports_the_full_lifecycle() {
    let (diagnostics, mut events) = DiagnosticsHandle::channel();
    let engine = ToastEngine::spawn_with_diagnostics(fast_config(), diagnostics);

    let id = engine
        .submit(Payload::new("observed").duration(Duration::from_millis(300)))
        .expect("engine running")
        .await
        .expect("materializes");
    settle().await;
    advance(Duration::from_millis(300)).await;
    settle().await;

    let mut kinds = Vec::new();
    while let Ok(event) = events.try_recv() {
        kinds.push(event.kind);
    }
    assert_eq!(
        kinds,
        vec![
            EngineEventKind::Submitted { id, backlog: 1 },
            EngineEventKind::Materialized { id },
            EngineEventKind::Dismissed {
                id,
                reason: DismissReason::Expired
            },
        ]
    );
}
