use conveyor_core::{
    models::{AzMap, CloneRequest, CreatePlan, PlanFilter, PlanRecord, ResourceEdit},
    ConveyorError, DependencyNode, EditResponse, GraphData, PlanApi, Repository,
    RepositoryBuilder, ResourceType, Result, TopologyResponse,
};
use serde_json::{Map, Value};
use tempfile::TempDir;

/// Helper function to create a test repository
pub async fn create_test_repository() -> (TempDir, Repository) {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let db_path = temp_dir.path().join("test.db");
    let repository = RepositoryBuilder::new()
        .with_database_path(Some(&db_path))
        .build()
        .await
        .expect("Failed to create repository");
    (temp_dir, repository)
}

/// Network, subnet, port and server chain with a detached volume.
pub fn sample_dependencies() -> Vec<DependencyNode> {
    serde_json::from_str(
        r#"[
            {"type": "OS::Neutron::Net", "id": "net1"},
            {"type": "OS::Neutron::Subnet", "id": "sub1",
             "dependencies": [{"type": "OS::Neutron::Net", "id": "net1"}]},
            {"type": "OS::Neutron::Port", "id": "port1",
             "dependencies": [{"type": "OS::Neutron::Subnet", "id": "sub1"},
                              {"type": "OS::Neutron::Net", "id": "net1"}],
             "fixed_ips": [{"subnet_id": "sub1", "ip_address": "10.0.0.5"}]},
            {"type": "OS::Nova::Server", "id": "vm1",
             "dependencies": [{"type": "OS::Neutron::Port", "id": "port1"}]},
            {"type": "OS::Cinder::Volume", "id": "vol1"}
        ]"#,
    )
    .expect("valid dependency graph")
}

/// Backend serving one canned topology and echoing edits back.
pub struct CannedBackend {
    pub record: PlanRecord,
}

#[async_trait::async_trait]
impl PlanApi for CannedBackend {
    async fn list_plans(&self, filter: &PlanFilter) -> Result<Vec<PlanRecord>> {
        Ok(std::iter::once(self.record.clone())
            .filter(|record| filter.matches(record))
            .collect())
    }

    async fn create_plan(&self, _request: &CreatePlan) -> Result<PlanRecord> {
        Ok(self.record.clone())
    }

    async fn list_resources(
        &self,
        _resource_type: &ResourceType,
        _filters: &Map<String, Value>,
    ) -> Result<Vec<Value>> {
        Ok(Vec::new())
    }

    async fn build_topology(&self, plan_id: &str, _az_map: &AzMap) -> Result<TopologyResponse> {
        if plan_id != self.record.plan_id {
            return Err(ConveyorError::backend(format!("plan {plan_id} does not exist")));
        }
        let dependencies = sample_dependencies();
        Ok(TopologyResponse {
            plan: Some(self.record.clone()),
            graph: GraphData::from_dependencies(&dependencies),
            dependencies,
        })
    }

    async fn update_plan_resource(&self, _plan_id: &str, _edit: &ResourceEdit) -> Result<EditResponse> {
        Ok(EditResponse::default())
    }

    async fn clone_plan(&self, _request: &CloneRequest) -> Result<()> {
        Ok(())
    }

    async fn cancel_plan(&self, _plan_id: &str) -> Result<()> {
        Ok(())
    }
}
