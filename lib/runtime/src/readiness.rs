//! Readiness of a single snapshot. Stateless.

use chrono::{DateTime, TimeDelta, Utc};

use podstart_domain::{
    Condition, ConditionKind, ConditionStatus, InstanceSnapshot, ReadinessError,
};

fn ready_condition(snapshot: &InstanceSnapshot) -> Option<&Condition> {
    snapshot.condition(&ConditionKind::Ready)
}

pub fn is_ready(snapshot: &InstanceSnapshot) -> bool {
    ready_condition(snapshot).is_some_and(|condition| condition.status == ConditionStatus::True)
}

/// When the pod last transitioned into Ready. Only meaningful once [`is_ready`] holds.
pub fn ready_transition_time(snapshot: &InstanceSnapshot) -> Result<DateTime<Utc>, ReadinessError> {
    let condition = ready_condition(snapshot)
        .filter(|condition| condition.status == ConditionStatus::True)
        .ok_or_else(|| ReadinessError::NotReady {
            pod: snapshot.display_name(),
        })?;
    condition
        .last_transition_time
        .ok_or_else(|| ReadinessError::MissingTransitionTime {
            pod: snapshot.display_name(),
        })
}

pub fn startup_duration(snapshot: &InstanceSnapshot) -> Result<TimeDelta, ReadinessError> {
    let ready_at = ready_transition_time(snapshot)?;
    if ready_at < snapshot.created_at {
        return Err(ReadinessError::TransitionBeforeCreation {
            pod: snapshot.display_name(),
            created_at: snapshot.created_at,
            ready_at,
        });
    }
    Ok(ready_at - snapshot.created_at)
}
