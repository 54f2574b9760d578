use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Stable identity of a pod, assigned by the API server at creation.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct InstanceId(String);

impl InstanceId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for InstanceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<String> for InstanceId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl From<&str> for InstanceId {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ConditionKind {
    Ready,
    ContainersReady,
    Initialized,
    PodScheduled,
    Other(String),
}

impl ConditionKind {
    pub fn parse(raw: &str) -> Self {
        match raw {
            "Ready" => Self::Ready,
            "ContainersReady" => Self::ContainersReady,
            "Initialized" => Self::Initialized,
            "PodScheduled" => Self::PodScheduled,
            other => Self::Other(other.to_string()),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ConditionStatus {
    True,
    False,
    Unknown,
}

impl ConditionStatus {
    /// Anything other than the literal `True`/`False` is treated as `Unknown`.
    pub fn parse(raw: &str) -> Self {
        match raw {
            "True" => Self::True,
            "False" => Self::False,
            _ => Self::Unknown,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Condition {
    pub kind: ConditionKind,
    pub status: ConditionStatus,
    pub last_transition_time: Option<DateTime<Utc>>,
}

impl Condition {
    pub fn new(
        kind: ConditionKind,
        status: ConditionStatus,
        last_transition_time: Option<DateTime<Utc>>,
    ) -> Self {
        Self {
            kind,
            status,
            last_transition_time,
        }
    }
}

/// Point-in-time view of a pod, validated when decoded from the feed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InstanceSnapshot {
    pub id: InstanceId,
    pub namespace: Option<String>,
    pub name: String,
    pub created_at: DateTime<Utc>,
    pub conditions: Vec<Condition>,
}

impl InstanceSnapshot {
    pub fn new(
        id: impl Into<InstanceId>,
        name: impl Into<String>,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id: id.into(),
            namespace: None,
            name: name.into(),
            created_at,
            conditions: Vec::new(),
        }
    }

    pub fn with_namespace(mut self, namespace: impl Into<String>) -> Self {
        self.namespace = Some(namespace.into());
        self
    }

    pub fn with_condition(mut self, condition: Condition) -> Self {
        self.conditions.push(condition);
        self
    }

    pub fn condition(&self, kind: &ConditionKind) -> Option<&Condition> {
        self.conditions.iter().find(|condition| &condition.kind == kind)
    }

    /// `namespace/name`, or just the name for cluster-scoped views.
    pub fn display_name(&self) -> String {
        match &self.namespace {
            Some(namespace) => format!("{namespace}/{}", self.name),
            None => self.name.clone(),
        }
    }
}
