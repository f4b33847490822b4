//! Plan model definition and related functionality.

use jiff::Timestamp;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::{DependencyNode, PlanStatus, PlanType, ResourceType};

/// Pending field-level edits for one resource.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResourceUpdate {
    #[serde(rename = "type")]
    pub resource_type: ResourceType,
    pub resource_id: String,
    #[serde(default)]
    pub properties: Map<String, Value>,
}

impl ResourceUpdate {
    /// Whether this entry belongs to `(resource_type, resource_id)`.
    pub fn is(&self, resource_type: &ResourceType, resource_id: &str) -> bool {
        self.resource_type == *resource_type && self.resource_id == resource_id
    }
}

/// "Replace resource `src_id` with existing resource `dest_id`".
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Substitution {
    #[serde(rename = "type")]
    pub resource_type: ResourceType,
    pub src_id: String,
    pub dest_id: String,
}

/// A plan's dependency graph plus the edits made before execution.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Plan {
    /// Backend identifier of the plan
    pub plan_id: String,

    /// Clone or migrate
    #[serde(default)]
    pub plan_type: PlanType,

    /// Display name
    #[serde(default)]
    pub plan_name: Option<String>,

    /// Backend lifecycle status
    #[serde(default)]
    pub plan_status: PlanStatus,

    /// Snapshot taken when the plan was loaded; never mutated
    pub original_dependencies: Vec<DependencyNode>,

    /// Working copy mutated by edits
    pub updated_dependencies: Vec<DependencyNode>,

    /// Field-level edits, at most one entry per resource
    #[serde(default)]
    pub property_updates: Vec<ResourceUpdate>,

    /// Resource substitutions, at most one per source resource
    #[serde(default)]
    pub substitutions: Vec<Substitution>,

    /// Timestamp when the plan was loaded (UTC)
    pub created_at: Timestamp,

    /// Timestamp when the plan was last edited (UTC)
    pub updated_at: Timestamp,
}

impl Plan {
    /// Creates a plan whose original and working snapshots are independent
    /// copies of `dependencies`.
    pub fn new(plan_id: impl Into<String>, dependencies: Vec<DependencyNode>) -> Self {
        let now = Timestamp::now();
        Self {
            plan_id: plan_id.into(),
            plan_type: PlanType::default(),
            plan_name: None,
            plan_status: PlanStatus::default(),
            original_dependencies: dependencies.clone(),
            updated_dependencies: dependencies,
            property_updates: Vec::new(),
            substitutions: Vec::new(),
            created_at: now,
            updated_at: now,
        }
    }

    /// Sets the plan type.
    pub fn with_type(mut self, plan_type: PlanType) -> Self {
        self.plan_type = plan_type;
        self
    }

    /// Sets the display name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.plan_name = Some(name.into());
        self
    }

    /// Sets the backend status.
    pub fn with_status(mut self, status: PlanStatus) -> Self {
        self.plan_status = status;
        self
    }

    pub(crate) fn touch(&mut self) {
        self.updated_at = Timestamp::now();
    }
}
