//! Entity kinds (named collections)

use serde::Deserialize;
use serde::Serialize;

/// A named collection of records held by a record source.
///
/// Every source call is parameterized by the kind it targets, and user-facing
/// messages are built from the kind's labels.
///
/// # Examples
///
/// ```
/// use policydesk_lib::model::EntityKind;
///
/// let kind = EntityKind::Policy;
/// assert_eq!(kind.collection(), "policies");
/// assert_eq!(kind.label(), "Policy");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntityKind {
    Client,
    Policy,
    Lead,
    Task,
    Activity,
}

impl EntityKind {
    /// All kinds, in display order.
    pub const ALL: [EntityKind; 5] = [
        EntityKind::Client,
        EntityKind::Policy,
        EntityKind::Lead,
        EntityKind::Task,
        EntityKind::Activity,
    ];

    /// Collection name, as used by the backend and fixture files.
    pub fn collection(&self) -> &'static str {
        match self {
            Self::Client => "clients",
            Self::Policy => "policies",
            Self::Lead => "leads",
            Self::Task => "tasks",
            Self::Activity => "activities",
        }
    }

    /// Singular display label.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Client => "Client",
            Self::Policy => "Policy",
            Self::Lead => "Lead",
            Self::Task => "Task",
            Self::Activity => "Activity",
        }
    }

    /// Resolves a collection name back to its kind.
    pub fn from_collection(name: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.collection().eq_ignore_ascii_case(name))
    }
}

impl std::fmt::Display for EntityKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}
