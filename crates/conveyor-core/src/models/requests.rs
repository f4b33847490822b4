//! Request and payload types exchanged with the UI layer and the backend.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::{DependencyNode, DependencyRef, PlanType, ResourceType, ResourceUpdate, Substitution};

/// Result of reading an edit form for one resource.
///
/// `data` holds only the fields whose value changed. When a substitution
/// field changed, `needs_submission` is set and the destination id is stored
/// under `data["id"]`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EditResult {
    #[serde(default)]
    pub data: Map<String, Value>,
    #[serde(default)]
    pub needs_submission: bool,
}

impl EditResult {
    /// A property edit that only touches local state.
    pub fn properties(data: Map<String, Value>) -> Self {
        Self {
            data,
            needs_submission: false,
        }
    }

    /// A substitution of the edited resource by `destination_id`.
    pub fn substitution(destination_id: impl Into<String>) -> Self {
        let mut data = Map::new();
        data.insert("id".to_string(), Value::String(destination_id.into()));
        Self {
            data,
            needs_submission: true,
        }
    }

    /// Destination id of a substitution edit.
    pub fn destination_id(&self) -> Option<&str> {
        self.data.get("id").and_then(Value::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}

/// What the detail panel shows for a resource before it is edited.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResourceShowInfo {
    #[serde(rename = "type")]
    pub resource_type: ResourceType,
    pub resource_id: String,
    /// Pending property edits merged over the identity
    #[serde(default)]
    pub updated: Map<String, Value>,
    /// A server transitively depends on this shared network resource
    #[serde(default)]
    pub has_server: bool,
}

/// One resource in a clone submission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CloneResource {
    #[serde(rename = "type")]
    pub resource_type: ResourceType,
    pub id: String,
}

impl From<&DependencyNode> for CloneResource {
    fn from(node: &DependencyNode) -> Self {
        Self {
            resource_type: node.resource_type.clone(),
            id: node.id.clone(),
        }
    }
}

/// Edge between a dependent resource and its dependency.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CloneLink {
    pub source: DependencyRef,
    pub target: DependencyRef,
}

/// Clone submission payload.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CloneInfo {
    pub clone_resources: Vec<CloneResource>,
    pub clone_links: Vec<CloneLink>,
    pub update_resources: Vec<ResourceUpdate>,
    pub replace_resources: Vec<Substitution>,
}

/// Source availability zone to destination availability zone.
pub type AzMap = BTreeMap<String, String>;

/// Full clone/migrate execution request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CloneRequest {
    pub plan_id: String,
    pub az_map: AzMap,
    #[serde(flatten)]
    pub info: CloneInfo,
    #[serde(default)]
    pub sys_clone: bool,
    #[serde(default = "default_copy_data")]
    pub copy_data: bool,
}

fn default_copy_data() -> bool {
    true
}

/// Parameters for creating a plan on the backend.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CreatePlan {
    pub plan_type: PlanType,
    /// Resources the plan starts from
    pub resources: Vec<CloneResource>,
    pub plan_name: Option<String>,
}

/// A resource edit as sent to the backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResourceEdit {
    #[serde(rename = "type")]
    pub resource_type: ResourceType,
    pub resource_id: String,
    pub data: Map<String, Value>,
}
