//! Boundaries between the tracking core and the outside world.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex, PoisonError};

use anyhow::Result;
use async_trait::async_trait;

use podstart_domain::{LifecycleEvent, StartupRecord};

/// Destination for startup-duration records.
pub trait RecordSink: Send + Sync {
    fn emit(&self, record: &StartupRecord);
}

/// Source of pod lifecycle events, delivered one at a time.
#[async_trait]
pub trait LifecyclePort: Send {
    /// `Ok(None)` means the feed has ended.
    async fn next_event(&mut self) -> Result<Option<LifecycleEvent>>;
}

#[derive(Clone, Copy, Default)]
pub struct NullRecordSink;

impl RecordSink for NullRecordSink {
    fn emit(&self, _record: &StartupRecord) {}
}

#[derive(Clone, Default)]
pub struct InMemoryRecordSink {
    records: Arc<Mutex<Vec<StartupRecord>>>,
}

impl InMemoryRecordSink {
    pub fn records(&self) -> Vec<StartupRecord> {
        self.records
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn len(&self) -> usize {
        self.records
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl RecordSink for InMemoryRecordSink {
    fn emit(&self, record: &StartupRecord) {
        self.records
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(record.clone());
    }
}

/// Replays a fixed sequence of events, then reports the end of the feed.
#[derive(Debug, Default)]
pub struct ScriptedLifecyclePort {
    events: VecDeque<LifecycleEvent>,
}

impl ScriptedLifecyclePort {
    pub fn new(events: impl IntoIterator<Item = LifecycleEvent>) -> Self {
        Self {
            events: events.into_iter().collect(),
        }
    }

    pub fn push(&mut self, event: LifecycleEvent) {
        self.events.push_back(event);
    }

    pub fn remaining(&self) -> usize {
        self.events.len()
    }
}

#[async_trait]
impl LifecyclePort for ScriptedLifecyclePort {
    async fn next_event(&mut self) -> Result<Option<LifecycleEvent>> {
        Ok(self.events.pop_front())
    }
}
