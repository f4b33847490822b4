//! Interface of the plan backend.
//!
//! The backend resolves plans, introspects resources and executes clones.
//! This crate only consumes it; [`PlanApi`] is the seam where an HTTP client
//! or a test double plugs in.

use async_trait::async_trait;
use log::error;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::{
    error::Result,
    models::{
        AzMap, CloneRequest, CreatePlan, DependencyNode, PlanFilter, PlanRecord, ResourceEdit,
        ResourceType, ResourceUpdate,
    },
    topology::GraphData,
};

/// A plan's topology as built by the backend for an availability-zone
/// mapping.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TopologyResponse {
    /// Plan metadata, when the backend sends it along
    #[serde(default)]
    pub plan: Option<PlanRecord>,
    pub dependencies: Vec<DependencyNode>,
    pub graph: GraphData,
}

/// Backend answer to a submitted resource edit.
///
/// The backend is the authority for cascades it resolved: when snapshots are
/// present they replace the local ones.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EditResponse {
    pub graph: GraphData,
    #[serde(default)]
    pub updated_dependencies: Option<Vec<DependencyNode>>,
    #[serde(default)]
    pub update_resources: Option<Vec<ResourceUpdate>>,
}

/// Operations of the plan backend.
#[async_trait]
pub trait PlanApi: Send + Sync {
    /// Plans matching `filter`.
    async fn list_plans(&self, filter: &PlanFilter) -> Result<Vec<PlanRecord>>;

    async fn create_plan(&self, request: &CreatePlan) -> Result<PlanRecord>;

    /// Existing resources of a kind, as opaque records.
    async fn list_resources(
        &self,
        resource_type: &ResourceType,
        filters: &Map<String, Value>,
    ) -> Result<Vec<Value>>;

    async fn build_topology(&self, plan_id: &str, az_map: &AzMap) -> Result<TopologyResponse>;

    /// Submits an edit the backend has to resolve, such as a substitution.
    async fn update_plan_resource(&self, plan_id: &str, edit: &ResourceEdit) -> Result<EditResponse>;

    /// Starts a clone or migration. Fire and forget.
    async fn clone_plan(&self, request: &CloneRequest) -> Result<()>;

    async fn cancel_plan(&self, plan_id: &str) -> Result<()>;
}

/// The single channel through which failures reach the user.
pub trait Notifier: Send + Sync {
    fn error(&self, message: &str);
}

/// Notifier writing to the log.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogNotifier;

impl Notifier for LogNotifier {
    fn error(&self, message: &str) {
        error!("{message}");
    }
}
