use chrono::{DateTime, Utc};
use thiserror::Error;

/// A snapshot that cannot yield a trustworthy startup duration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ReadinessError {
    #[error("pod {pod} has no Ready=True condition")]
    NotReady { pod: String },

    #[error("pod {pod} is Ready but its condition has no lastTransitionTime")]
    MissingTransitionTime { pod: String },

    #[error("pod {pod} became Ready at {ready_at} before its creation at {created_at}")]
    TransitionBeforeCreation {
        pod: String,
        created_at: DateTime<Utc>,
        ready_at: DateTime<Utc>,
    },
}

impl ReadinessError {
    pub fn pod(&self) -> &str {
        match self {
            Self::NotReady { pod }
            | Self::MissingTransitionTime { pod }
            | Self::TransitionBeforeCreation { pod, .. } => pod,
        }
    }
}
