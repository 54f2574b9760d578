use std::collections::HashSet;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use chrono::{DateTime, Utc};
use tracing::debug;

use podstart_domain::{
    InstanceId, InstanceSnapshot, LifecycleEvent, ReadinessError, StartupRecord,
};
use podstart_ports::RecordSink;

use crate::readiness;

/// Outcome of handling one lifecycle event: the record emitted, if any.
pub type TrackResult = Result<Option<StartupRecord>, ReadinessError>;

/// Turns pod lifecycle events into at most one startup record per pod created
/// after `start_time`.
pub struct LifecycleTracker {
    start_time: DateTime<Utc>,
    pending: Mutex<HashSet<InstanceId>>,
    sink: Arc<dyn RecordSink>,
}

impl LifecycleTracker {
    pub fn new(start_time: DateTime<Utc>, sink: Arc<dyn RecordSink>) -> Self {
        Self {
            start_time,
            pending: Mutex::new(HashSet::new()),
            sink,
        }
    }

    pub fn starting_now(sink: Arc<dyn RecordSink>) -> Self {
        Self::new(Utc::now(), sink)
    }

    pub fn start_time(&self) -> DateTime<Utc> {
        self.start_time
    }

    pub fn handle(&self, event: &LifecycleEvent) -> TrackResult {
        match event {
            LifecycleEvent::Observed(snapshot) => self.on_observed(snapshot),
            LifecycleEvent::Updated(snapshot) => self.on_updated(snapshot),
            LifecycleEvent::Removed(snapshot) => self.on_removed(snapshot),
        }
    }

    pub fn on_observed(&self, snapshot: &InstanceSnapshot) -> TrackResult {
        if snapshot.created_at <= self.start_time {
            return Ok(None);
        }

        if readiness::is_ready(snapshot) {
            // Became ready before we first saw it. A redelivered observation of a
            // pod already pending must clear it so a later update cannot emit again.
            let record = StartupRecord::new(snapshot, readiness::startup_duration(snapshot)?);
            self.pending().remove(&snapshot.id);
            self.emit(&record);
            return Ok(Some(record));
        }

        if self.pending().insert(snapshot.id.clone()) {
            debug!(pod = %snapshot.display_name(), uid = %snapshot.id, "tracking pod until ready");
        }
        Ok(None)
    }

    pub fn on_updated(&self, snapshot: &InstanceSnapshot) -> TrackResult {
        if !readiness::is_ready(snapshot) {
            return Ok(None);
        }

        let record = {
            let mut pending = self.pending();
            if !pending.contains(&snapshot.id) {
                return Ok(None);
            }
            // A malformed snapshot leaves the pod pending for a later update.
            let record = StartupRecord::new(snapshot, readiness::startup_duration(snapshot)?);
            pending.remove(&snapshot.id);
            record
        };

        self.emit(&record);
        Ok(Some(record))
    }

    pub fn on_removed(&self, snapshot: &InstanceSnapshot) -> TrackResult {
        if self.pending().remove(&snapshot.id) {
            debug!(
                pod = %snapshot.display_name(),
                uid = %snapshot.id,
                "pod removed before becoming ready"
            );
        }
        Ok(None)
    }

    pub fn is_pending(&self, id: &InstanceId) -> bool {
        self.pending().contains(id)
    }

    pub fn pending_len(&self) -> usize {
        self.pending().len()
    }

    fn pending(&self) -> MutexGuard<'_, HashSet<InstanceId>> {
        // Every critical section leaves the set consistent, so a poisoned guard is still usable.
        self.pending.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn emit(&self, record: &StartupRecord) {
        self.sink.emit(record);
    }
}
