//! Task identifiers for interceptor lookups
//!
//! Interceptors written by older tooling identify a task with one string of the
//! form `"{flowName}-{activityId}"`. Both halves may themselves contain `-`, so
//! that string cannot be split on its own. [`TaskId`] keeps such ids as opaque
//! [`TaskId::Namespaced`] values and only resolves them against a flow name the
//! caller already knows. New definitions use the explicit
//! [`TaskId::Scoped`] form instead.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Separator used by the legacy namespaced form.
pub const NAMESPACE_SEPARATOR: char = '-';

/// Identifies one intercepted task.
///
/// Serializes as a plain string for the namespaced form and as
/// `{"flow": ..., "activity": ...}` for the scoped form. Either shape is
/// accepted when deserializing.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TaskId {
    Namespaced(String),
    Scoped { flow: String, activity: String },
}

impl TaskId {
    pub fn scoped(flow: impl Into<String>, activity: impl Into<String>) -> Self {
        Self::Scoped {
            flow: flow.into(),
            activity: activity.into(),
        }
    }

    pub fn namespaced(id: impl Into<String>) -> Self {
        Self::Namespaced(id.into())
    }

    /// Resolve this id to a bare activity id within `flow`.
    ///
    /// Returns `None` when the id belongs to another flow or, for the
    /// namespaced form, does not start with `"{flow}-"`. A miss is not an
    /// error; the task is simply not intercepted in that flow.
    pub fn activity_in(&self, flow: &str) -> Option<&str> {
        match self {
            Self::Scoped {
                flow: owner,
                activity,
            } => (owner == flow).then_some(activity.as_str()),
            Self::Namespaced(id) => id
                .strip_prefix(flow)
                .and_then(|rest| rest.strip_prefix(NAMESPACE_SEPARATOR)),
        }
    }

    /// Whether this id names `activity` inside `flow`.
    pub fn matches(&self, flow: &str, activity: &str) -> bool {
        self.activity_in(flow) == Some(activity)
    }

    /// Legacy single-string rendering, `"{flow}-{activity}"` for scoped ids.
    pub fn to_namespaced(&self) -> String {
        match self {
            Self::Scoped { flow, activity } => {
                format!("{flow}{NAMESPACE_SEPARATOR}{activity}")
            }
            Self::Namespaced(id) => id.clone(),
        }
    }
}

impl fmt::Display for TaskId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Scoped { flow, activity } => write!(f, "{flow}/{activity}"),
            Self::Namespaced(id) => f.write_str(id),
        }
    }
}

impl From<&str> for TaskId {
    fn from(id: &str) -> Self {
        Self::Namespaced(id.to_string())
    }
}

impl From<String> for TaskId {
    fn from(id: String) -> Self {
        Self::Namespaced(id)
    }
}
