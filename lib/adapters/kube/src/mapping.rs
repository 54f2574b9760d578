use chrono::{DateTime, Utc};
use k8s_openapi::api::core::v1::{Pod, PodCondition};
use k8s_openapi::apimachinery::pkg::apis::meta::v1::Time;
use thiserror::Error;

use podstart_domain::{Condition, ConditionKind, ConditionStatus, InstanceId, InstanceSnapshot};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DecodeError {
    #[error("pod has no metadata.name")]
    MissingName,

    #[error("pod {pod} has no metadata.uid")]
    MissingUid { pod: String },

    #[error("pod {pod} has no usable metadata.creationTimestamp")]
    MissingCreationTimestamp { pod: String },
}

/// Validate a watched pod into a snapshot. Identity, name and creation time are required.
pub fn decode_pod(pod: &Pod) -> Result<InstanceSnapshot, DecodeError> {
    let meta = &pod.metadata;
    let name = meta.name.clone().ok_or(DecodeError::MissingName)?;
    let label = match &meta.namespace {
        Some(namespace) => format!("{namespace}/{name}"),
        None => name.clone(),
    };

    let uid = meta
        .uid
        .clone()
        .filter(|uid| !uid.is_empty())
        .ok_or_else(|| DecodeError::MissingUid { pod: label.clone() })?;
    let created_at = meta
        .creation_timestamp
        .as_ref()
        .and_then(to_utc)
        .ok_or(DecodeError::MissingCreationTimestamp { pod: label })?;

    let conditions = pod
        .status
        .as_ref()
        .and_then(|status| status.conditions.as_ref())
        .map(|conditions| conditions.iter().map(decode_condition).collect())
        .unwrap_or_default();

    Ok(InstanceSnapshot {
        id: InstanceId::new(uid),
        namespace: meta.namespace.clone(),
        name,
        created_at,
        conditions,
    })
}

fn decode_condition(condition: &PodCondition) -> Condition {
    Condition::new(
        ConditionKind::parse(&condition.type_),
        ConditionStatus::parse(&condition.status),
        condition.last_transition_time.as_ref().and_then(to_utc),
    )
}

fn to_utc(time: &Time) -> Option<DateTime<Utc>> {
    Some(time.0)
}
