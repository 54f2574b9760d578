use crate::snapshot::InstanceSnapshot;

/// One notification from the lifecycle feed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LifecycleEvent {
    /// First sighting of a pod, including pods that already existed when the watch started.
    Observed(InstanceSnapshot),
    Updated(InstanceSnapshot),
    Removed(InstanceSnapshot),
}

impl LifecycleEvent {
    pub fn snapshot(&self) -> &InstanceSnapshot {
        match self {
            Self::Observed(snapshot) | Self::Updated(snapshot) | Self::Removed(snapshot) => {
                snapshot
            }
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            Self::Observed(_) => "observed",
            Self::Updated(_) => "updated",
            Self::Removed(_) => "removed",
        }
    }
}
