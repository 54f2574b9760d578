//! Domain models for pod startup tracking.

pub mod config;
pub mod duration;
pub mod error;
pub mod events;
pub mod record;
pub mod snapshot;

pub use config::{LogConfig, LogFormat, OutputFormat, PodstartConfig};
pub use duration::format_duration;
pub use error::ReadinessError;
pub use events::LifecycleEvent;
pub use record::StartupRecord;
pub use snapshot::{Condition, ConditionKind, ConditionStatus, InstanceId, InstanceSnapshot};
