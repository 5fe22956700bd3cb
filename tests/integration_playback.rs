//! Integration tests for the playback controller
//!
//! These tests drive complete runs through the public API on a paused tokio
//! clock and check the observable outcome: the published sequence, run state
//! transitions and the event stream.

use std::sync::Arc;
use std::time::Duration;

use parking_lot::Mutex;
use sortviz::{
    Algorithm, PlaybackController, PlaybackEvent, RunState, SortVizError, StepEvent, StepObserver,
    Value, VisualizerConfig,
};
use tokio::sync::mpsc::UnboundedReceiver;

/// Helper to create a full-speed controller over a fixed sequence
fn create_controller(values: &[Value]) -> PlaybackController {
    let config = VisualizerConfig::default().with_seed(2024);
    let controller = PlaybackController::with_sequence(config, values.to_vec())
        .expect("default config should be valid");
    controller.set_speed(100);
    controller
}

fn drain(rx: &mut UnboundedReceiver<PlaybackEvent>) -> Vec<PlaybackEvent> {
    let mut events = Vec::new();
    while let Ok(event) = rx.try_recv() {
        events.push(event);
    }
    events
}

fn steps(events: &[PlaybackEvent]) -> Vec<StepEvent> {
    events
        .iter()
        .filter_map(|e| match e {
            PlaybackEvent::Step(step) => Some(*step),
            _ => None,
        })
        .collect()
}

#[tokio::test(start_paused = true)]
async fn test_bubble_scenario() {
    let controller = create_controller(&[5, 3, 8, 1]);
    let mut rx = controller.subscribe();

    controller.run(Algorithm::Exchange).await.unwrap();

    let events = drain(&mut rx);
    assert!(steps(&events).iter().any(|s| matches!(s, StepEvent::Swap(..))));
    assert_eq!(controller.sequence(), vec![1, 3, 5, 8]);
}

#[tokio::test(start_paused = true)]
async fn test_sorted_input_has_no_swaps() {
    for algorithm in Algorithm::ALL {
        let controller = create_controller(&[1, 2, 3]);
        let report = controller.run(algorithm).await.unwrap();
        assert_eq!(report.swaps, 0, "{algorithm} swapped sorted input");
        assert_eq!(controller.sequence(), vec![1, 2, 3]);
    }
}

#[tokio::test(start_paused = true)]
async fn test_empty_sequence_completes_without_events() {
    for algorithm in Algorithm::ALL {
        let controller = create_controller(&[]);
        let mut rx = controller.subscribe();

        let report = controller.run(algorithm).await.unwrap();

        let events = drain(&mut rx);
        assert!(steps(&events).is_empty());
        assert!(!events.iter().any(|e| matches!(e, PlaybackEvent::Snapshot(_))));
        assert_eq!(report.finalized, 0);
        assert_eq!(controller.run_state(), RunState::Idle);
    }
}

#[tokio::test(start_paused = true)]
async fn test_all_equal_values() {
    let controller = create_controller(&[9, 9, 9]);
    let mut rx = controller.subscribe();

    let report = controller.run(Algorithm::Exchange).await.unwrap();

    let steps = steps(&drain(&mut rx));
    assert_eq!(report.swaps, 0);
    assert!(!steps.iter().any(|s| matches!(s, StepEvent::Swap(..))));
    let mut finalized: Vec<usize> = steps
        .iter()
        .filter_map(|s| match s {
            StepEvent::Finalize(i) => Some(*i),
            _ => None,
        })
        .collect();
    finalized.sort_unstable();
    assert_eq!(finalized, vec![0, 1, 2]);
}

#[test]
fn test_reset_twice_while_idle() {
    let controller = create_controller(&[1]);
    let mut rx = controller.subscribe();

    controller.reset().unwrap();
    let first = controller.sequence();
    controller.reset().unwrap();
    let second = controller.sequence();

    for sequence in [&first, &second] {
        assert_eq!(sequence.len(), 50);
        assert!(sequence.iter().all(|v| (10..=500).contains(v)));
    }
    let resets = drain(&mut rx)
        .into_iter()
        .filter(|e| matches!(e, PlaybackEvent::Reset(_)))
        .count();
    assert_eq!(resets, 2);
}

#[tokio::test(start_paused = true)]
async fn test_concurrent_run_is_dropped() {
    let controller = create_controller(&[6, 5, 4, 3, 2, 1]);
    let mut rx = controller.subscribe();

    let (first, second) = tokio::join!(
        controller.run(Algorithm::Partition),
        controller.run(Algorithm::Merge)
    );

    assert!(first.is_ok());
    assert!(matches!(second, Err(SortVizError::RunInProgress)));

    let events = drain(&mut rx);
    let started: Vec<_> = events
        .iter()
        .filter(|e| matches!(e, PlaybackEvent::Started(_)))
        .collect();
    let finished = events
        .iter()
        .filter(|e| matches!(e, PlaybackEvent::Finished(_)))
        .count();
    assert_eq!(started, vec![&PlaybackEvent::Started(Algorithm::Partition)]);
    assert_eq!(finished, 1);
    assert_eq!(controller.sequence(), vec![1, 2, 3, 4, 5, 6]);
}

#[tokio::test(start_paused = true)]
async fn test_reset_and_load_rejected_while_running() {
    let controller = create_controller(&[3, 2, 1]);
    let runner = controller.clone();
    let task = tokio::spawn(async move { runner.run(Algorithm::Exchange).await });

    // Let the run reach its first suspension point.
    tokio::task::yield_now().await;
    assert!(controller.is_running());
    assert!(matches!(controller.reset(), Err(SortVizError::RunInProgress)));
    assert!(matches!(
        controller.load_sequence(vec![1]),
        Err(SortVizError::RunInProgress)
    ));

    task.await.unwrap().unwrap();
    assert_eq!(controller.sequence(), vec![1, 2, 3]);
    assert!(!controller.is_running());
    controller.reset().unwrap();
}

#[tokio::test(start_paused = true)]
async fn test_speed_change_mid_run() {
    let controller = create_controller(&[4, 3, 2, 1]);
    controller.set_speed(1);

    let runner = controller.clone();
    let start = tokio::time::Instant::now();
    let task = tokio::spawn(async move { runner.run(Algorithm::Exchange).await });

    tokio::task::yield_now().await;
    assert!(controller.is_running());
    // First step is already waiting at 198 ms; everything after runs at 1 ms.
    controller.set_speed(100);

    let report = task.await.unwrap().unwrap();
    let steps = report.compares + report.swaps + report.finalized;
    let elapsed = start.elapsed();
    assert!(elapsed >= Duration::from_millis(198));
    assert!(elapsed < Duration::from_millis(198 + 2 * steps as u64 + 2));
}

#[tokio::test(start_paused = true)]
async fn test_snapshots_are_full_sequences() {
    let controller = create_controller(&[50, 40, 30, 20, 10]);
    let mut rx = controller.subscribe();

    controller.run(Algorithm::Merge).await.unwrap();

    for event in drain(&mut rx) {
        if let PlaybackEvent::Snapshot(snapshot) = event {
            assert_eq!(snapshot.len(), 5);
        }
    }
}

#[tokio::test(start_paused = true)]
async fn test_custom_observer_sees_ordered_steps() {
    #[derive(Default)]
    struct Log(Mutex<Vec<String>>);

    impl StepObserver for Log {
        fn on_step(&self, event: StepEvent) {
            self.0.lock().push(format!("{event:?}"));
        }

        fn on_run_started(&self, algorithm: Algorithm) {
            self.0.lock().push(format!("start {}", algorithm.as_str()));
        }
    }

    let controller = create_controller(&[2, 1]);
    let log = Arc::new(Log::default());
    controller.add_observer(log.clone());

    controller.run(Algorithm::Exchange).await.unwrap();

    assert_eq!(
        *log.0.lock(),
        vec![
            "start bubble",
            "Compare(0, 1)",
            "Swap(0, 1)",
            "Finalize(1)",
            "Finalize(0)",
        ]
    );
}

#[tokio::test(start_paused = true)]
async fn test_subscribe_from_observer_callback() {
    struct Resubscriber {
        controller: PlaybackController,
        received: Mutex<Option<UnboundedReceiver<PlaybackEvent>>>,
    }

    impl StepObserver for Resubscriber {
        fn on_step(&self, _event: StepEvent) {}

        fn on_run_started(&self, _algorithm: Algorithm) {
            *self.received.lock() = Some(self.controller.subscribe());
        }
    }

    let controller = create_controller(&[3, 1, 2]);
    let observer = Arc::new(Resubscriber {
        controller: controller.clone(),
        received: Mutex::new(None),
    });
    controller.add_observer(observer.clone());

    let report = tokio::time::timeout(Duration::from_secs(5), controller.run(Algorithm::Exchange))
        .await
        .expect("run should not block on a nested subscribe")
        .unwrap();

    let mut rx = observer.received.lock().take().expect("subscribed during run");
    let events = drain(&mut rx);
    assert_eq!(steps(&events).len(), report.compares + report.swaps + report.finalized);
    assert!(matches!(events.last(), Some(PlaybackEvent::Finished(_))));
    assert_eq!(controller.sequence(), vec![1, 2, 3]);
}

#[tokio::test(start_paused = true)]
async fn test_selected_algorithm_survives_reset() {
    let controller = create_controller(&[2, 1]);
    controller.run(Algorithm::Merge).await.unwrap();
    controller.reset().unwrap();
    assert_eq!(controller.selected_algorithm(), Some(Algorithm::Merge));
    assert_eq!(controller.markers().sorted_count(), 0);
}
