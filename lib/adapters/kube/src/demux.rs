use std::collections::{HashMap, HashSet};

use k8s_openapi::api::core::v1::Pod;
use kube::runtime::watcher;
use tracing::{debug, warn};

use podstart_domain::{InstanceId, InstanceSnapshot, LifecycleEvent};

use crate::mapping::decode_pod;

/// Splits a raw pod watch stream into observed/updated/removed events,
/// keeping the last snapshot of every live pod.
#[derive(Debug, Default)]
pub struct PodEventDemux {
    known: HashMap<InstanceId, InstanceSnapshot>,
    relist: Option<HashSet<InstanceId>>,
}

impl PodEventDemux {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn known_len(&self) -> usize {
        self.known.len()
    }

    pub fn ingest(&mut self, event: watcher::Event<Pod>) -> Vec<LifecycleEvent> {
        match event {
            watcher::Event::Init => {
                debug!(known = self.known.len(), "pod watch (re)list started");
                self.relist = Some(HashSet::new());
                Vec::new()
            }
            watcher::Event::InitApply(pod) => {
                let Some(snapshot) = decode_or_warn(&pod) else {
                    return Vec::new();
                };
                if let Some(seen) = self.relist.as_mut() {
                    seen.insert(snapshot.id.clone());
                }
                vec![self.apply(snapshot)]
            }
            watcher::Event::InitDone => self.finish_relist(),
            watcher::Event::Apply(pod) => decode_or_warn(&pod)
                .map(|snapshot| self.apply(snapshot))
                .into_iter()
                .collect(),
            watcher::Event::Delete(pod) => {
                let Some(snapshot) = decode_or_warn(&pod) else {
                    return Vec::new();
                };
                self.known.remove(&snapshot.id);
                vec![LifecycleEvent::Removed(snapshot)]
            }
        }
    }

    fn apply(&mut self, snapshot: InstanceSnapshot) -> LifecycleEvent {
        match self.known.insert(snapshot.id.clone(), snapshot.clone()) {
            Some(_) => LifecycleEvent::Updated(snapshot),
            None => LifecycleEvent::Observed(snapshot),
        }
    }

    /// Pods that vanished while the watch was down are reported as removed.
    fn finish_relist(&mut self) -> Vec<LifecycleEvent> {
        let Some(seen) = self.relist.take() else {
            return Vec::new();
        };
        let gone: Vec<InstanceId> = self
            .known
            .keys()
            .filter(|id| !seen.contains(*id))
            .cloned()
            .collect();
        if !gone.is_empty() {
            debug!(count = gone.len(), "pods disappeared during relist");
        }
        gone.into_iter()
            .filter_map(|id| self.known.remove(&id))
            .map(LifecycleEvent::Removed)
            .collect()
    }
}

fn decode_or_warn(pod: &Pod) -> Option<InstanceSnapshot> {
    match decode_pod(pod) {
        Ok(snapshot) => Some(snapshot),
        Err(err) => {
            warn!("ignoring pod event: {err}");
            None
        }
    }
}
