use std::sync::Arc;
use std::thread;

use chrono::{DateTime, TimeDelta, TimeZone, Utc};

use podstart_domain::{
    Condition, ConditionKind, ConditionStatus, InstanceSnapshot, LifecycleEvent, ReadinessError,
};
use podstart_ports::InMemoryRecordSink;

use crate::tracker::LifecycleTracker;

fn at(hour: u32, min: u32, sec: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 5, 1, hour, min, sec).unwrap()
}

fn tracker() -> (LifecycleTracker, InMemoryRecordSink) {
    let sink = InMemoryRecordSink::default();
    (LifecycleTracker::new(at(10, 0, 0), Arc::new(sink.clone())), sink)
}

fn not_ready(uid: &str, name: &str, created: DateTime<Utc>) -> InstanceSnapshot {
    InstanceSnapshot::new(uid, name, created)
        .with_namespace("default")
        .with_condition(Condition::new(
            ConditionKind::PodScheduled,
            ConditionStatus::True,
            Some(created),
        ))
        .with_condition(Condition::new(
            ConditionKind::Ready,
            ConditionStatus::False,
            Some(created),
        ))
}

fn ready_at(snapshot: &InstanceSnapshot, ready_at: DateTime<Utc>) -> InstanceSnapshot {
    with_ready(snapshot, ConditionStatus::True, Some(ready_at))
}

fn with_ready(
    snapshot: &InstanceSnapshot,
    status: ConditionStatus,
    time: Option<DateTime<Utc>>,
) -> InstanceSnapshot {
    let mut snapshot = snapshot.clone();
    for condition in &mut snapshot.conditions {
        if condition.kind == ConditionKind::Ready {
            condition.status = status;
            condition.last_transition_time = time;
        }
    }
    snapshot
}

#[test]
fn pending_pod_emits_once_on_ready_update() {
    let (tracker, sink) = tracker();
    let pod = not_ready("uid-a", "a", at(10, 0, 5));

    assert_eq!(tracker.on_observed(&pod), Ok(None));
    assert!(tracker.is_pending(&pod.id));

    tracker.on_updated(&pod).unwrap();
    let record = tracker
        .on_updated(&ready_at(&pod, at(10, 0, 8)))
        .unwrap()
        .expect("record on first ready update");

    assert_eq!(record.name, "a");
    assert_eq!(record.duration, TimeDelta::seconds(3));
    assert!(!tracker.is_pending(&pod.id));
    assert_eq!(sink.len(), 1);
}

#[test]
fn later_updates_do_not_emit_again() {
    let (tracker, sink) = tracker();
    let pod = not_ready("uid-a", "a", at(10, 0, 5));

    tracker.on_observed(&pod).unwrap();
    tracker.on_updated(&ready_at(&pod, at(10, 0, 8))).unwrap();
    // Readiness flaps and returns.
    tracker.on_updated(&pod).unwrap();
    assert_eq!(tracker.on_updated(&ready_at(&pod, at(10, 0, 20))), Ok(None));
    assert_eq!(tracker.on_updated(&ready_at(&pod, at(10, 0, 20))), Ok(None));

    assert_eq!(sink.len(), 1);
    assert_eq!(sink.records()[0].duration, TimeDelta::seconds(3));
}

#[test]
fn pods_created_before_start_are_ignored() {
    let (tracker, sink) = tracker();
    let before = not_ready("uid-b", "b", at(9, 59, 0));
    let exactly_at_start = not_ready("uid-s", "s", at(10, 0, 0));

    for pod in [&before, &exactly_at_start] {
        assert_eq!(tracker.on_observed(&ready_at(pod, at(10, 0, 1))), Ok(None));
        assert_eq!(tracker.on_observed(pod), Ok(None));
        assert!(!tracker.is_pending(&pod.id));
        assert_eq!(tracker.on_updated(&ready_at(pod, at(10, 0, 30))), Ok(None));
    }

    assert!(sink.is_empty());
    assert_eq!(tracker.pending_len(), 0);
}

#[test]
fn already_ready_pod_emits_without_pending() {
    let (tracker, sink) = tracker();
    let pod = ready_at(&not_ready("uid-r", "r", at(10, 0, 2)), at(10, 0, 4));

    let record = tracker.on_observed(&pod).unwrap().expect("record on first sight");

    assert_eq!(record.duration, TimeDelta::seconds(2));
    assert_eq!(tracker.pending_len(), 0);
    // The pod was never pending, so a following ready update is a no-op.
    assert_eq!(tracker.on_updated(&pod), Ok(None));
    assert_eq!(sink.len(), 1);
}

#[test]
fn removal_before_ready_suppresses_record() {
    let (tracker, sink) = tracker();
    let pod = not_ready("uid-c", "c", at(10, 1, 0));

    tracker.on_observed(&pod).unwrap();
    assert_eq!(tracker.on_removed(&pod), Ok(None));

    assert!(!tracker.is_pending(&pod.id));
    assert_eq!(tracker.on_updated(&ready_at(&pod, at(10, 1, 30))), Ok(None));
    assert!(sink.is_empty());
}

#[test]
fn removing_unknown_pod_is_noop() {
    let (tracker, sink) = tracker();
    let tracked = not_ready("uid-t", "t", at(10, 0, 1));
    tracker.on_observed(&tracked).unwrap();

    tracker
        .on_removed(&not_ready("uid-x", "x", at(10, 0, 3)))
        .unwrap();

    assert!(tracker.is_pending(&tracked.id));
    assert!(sink.is_empty());
}

#[test]
fn duplicate_observation_inserts_once() {
    let (tracker, sink) = tracker();
    let pod = not_ready("uid-d", "d", at(10, 0, 5));

    tracker.on_observed(&pod).unwrap();
    tracker.on_observed(&pod).unwrap();
    assert_eq!(tracker.pending_len(), 1);

    tracker.on_updated(&ready_at(&pod, at(10, 0, 9))).unwrap();
    tracker.on_updated(&ready_at(&pod, at(10, 0, 9))).unwrap();

    assert_eq!(tracker.pending_len(), 0);
    assert_eq!(sink.len(), 1);
}

#[test]
fn redelivered_ready_observation_clears_pending() {
    let (tracker, sink) = tracker();
    let pod = not_ready("uid-o", "o", at(10, 0, 5));
    let ready = ready_at(&pod, at(10, 0, 7));

    tracker.on_observed(&pod).unwrap();
    assert!(tracker.is_pending(&pod.id));

    let record = tracker.on_observed(&ready).unwrap();
    assert_eq!(record.map(|record| record.duration), Some(TimeDelta::seconds(2)));
    assert!(!tracker.is_pending(&pod.id));

    assert_eq!(tracker.on_updated(&ready), Ok(None));
    assert_eq!(sink.len(), 1);
    assert_eq!(tracker.pending_len(), 0);
}

#[test]
fn malformed_ready_update_keeps_pod_pending() {
    let (tracker, sink) = tracker();
    let pod = not_ready("uid-m", "m", at(10, 0, 5));
    tracker.on_observed(&pod).unwrap();

    let err = tracker
        .on_updated(&with_ready(&pod, ConditionStatus::True, None))
        .unwrap_err();
    assert_eq!(
        err,
        ReadinessError::MissingTransitionTime {
            pod: "default/m".to_string()
        }
    );
    assert!(tracker.is_pending(&pod.id));
    assert!(sink.is_empty());

    let record = tracker.on_updated(&ready_at(&pod, at(10, 0, 6))).unwrap();
    assert_eq!(record.map(|record| record.duration), Some(TimeDelta::seconds(1)));
}

#[test]
fn malformed_first_observation_is_abandoned() {
    let (tracker, sink) = tracker();
    let pod = with_ready(
        &not_ready("uid-n", "n", at(10, 0, 5)),
        ConditionStatus::True,
        Some(at(10, 0, 1)),
    );

    assert!(matches!(
        tracker.on_observed(&pod),
        Err(ReadinessError::TransitionBeforeCreation { .. })
    ));
    assert_eq!(tracker.pending_len(), 0);
    assert!(sink.is_empty());
}

#[test]
fn handle_dispatches_by_event_kind() {
    let (tracker, sink) = tracker();
    let a = not_ready("uid-a", "a", at(10, 0, 5));
    let b = not_ready("uid-b", "b", at(9, 59, 0));
    let c = not_ready("uid-c", "c", at(10, 1, 0));

    let events = [
        LifecycleEvent::Observed(a.clone()),
        LifecycleEvent::Observed(ready_at(&b, at(9, 59, 10))),
        LifecycleEvent::Observed(c.clone()),
        LifecycleEvent::Updated(ready_at(&a, at(10, 0, 8))),
        LifecycleEvent::Removed(c.clone()),
    ];
    for event in &events {
        tracker.handle(event).unwrap();
    }

    let records = sink.records();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].name, "a");
    assert_eq!(records[0].duration, TimeDelta::seconds(3));
    assert!(!tracker.is_pending(&c.id));
    assert_eq!(tracker.pending_len(), 0);
}

#[test]
fn concurrent_ready_updates_emit_once() {
    let (tracker, sink) = tracker();
    let tracker = Arc::new(tracker);
    let pods: Vec<_> = (0..16)
        .map(|i| not_ready(&format!("uid-{i}"), &format!("pod-{i}"), at(10, 0, 1)))
        .collect();
    for pod in &pods {
        tracker.on_observed(pod).unwrap();
    }

    let handles: Vec<_> = (0..8)
        .map(|_| {
            let tracker = Arc::clone(&tracker);
            let pods = pods.clone();
            thread::spawn(move || {
                for pod in &pods {
                    tracker.on_updated(&ready_at(pod, at(10, 0, 4))).unwrap();
                }
            })
        })
        .collect();
    for handle in handles {
        handle.join().unwrap();
    }

    assert_eq!(sink.len(), pods.len());
    assert_eq!(tracker.pending_len(), 0);
}
