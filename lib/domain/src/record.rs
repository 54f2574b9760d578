use std::fmt;

use chrono::TimeDelta;
use serde::{Serialize, Serializer};

use crate::duration::format_duration;
use crate::snapshot::{InstanceId, InstanceSnapshot};

/// Elapsed time from pod creation to its first observed Ready transition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StartupRecord {
    #[serde(rename = "uid")]
    pub id: InstanceId,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub namespace: Option<String>,
    pub name: String,
    #[serde(rename = "duration_ms", serialize_with = "serialize_millis")]
    pub duration: TimeDelta,
}

impl StartupRecord {
    pub fn new(snapshot: &InstanceSnapshot, duration: TimeDelta) -> Self {
        Self {
            id: snapshot.id.clone(),
            namespace: snapshot.namespace.clone(),
            name: snapshot.name.clone(),
            duration,
        }
    }

    pub fn duration_text(&self) -> String {
        format_duration(self.duration)
    }

    /// Duration in milliseconds, keeping microsecond precision.
    pub fn duration_millis(&self) -> f64 {
        millis(&self.duration)
    }
}

impl fmt::Display for StartupRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "startup duration of {}: {}", self.name, self.duration_text())
    }
}

fn serialize_millis<S: Serializer>(
    duration: &TimeDelta,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    serializer.serialize_f64(millis(duration))
}

fn millis(duration: &TimeDelta) -> f64 {
    match duration.num_microseconds() {
        Some(micros) => micros as f64 / 1_000.0,
        None => duration.num_milliseconds() as f64,
    }
}
