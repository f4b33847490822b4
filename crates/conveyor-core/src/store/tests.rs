//! Tests for the store module.

use serde_json::json;
use tempfile::TempDir;

use super::*;
use crate::{
    models::{DependencyNode, EditResult, PlanStatus, PlanType, ResourceType},
    plan::StaticCatalog,
};

/// Helper function to create a test repository
async fn create_test_repository() -> (TempDir, Repository) {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let db_path = temp_dir.path().join("plans").join("test.db");
    let repository = RepositoryBuilder::new()
        .with_database_path(Some(&db_path))
        .build()
        .await
        .expect("Failed to create repository");
    (temp_dir, repository)
}

fn network_plan(plan_id: &str) -> Plan {
    Plan::new(
        plan_id,
        vec![
            DependencyNode::new(ResourceType::Net, "net1"),
            DependencyNode::new(ResourceType::Subnet, "sub1").depends_on(ResourceType::Net, "net1"),
            DependencyNode::new(ResourceType::Server, "vm1").cloned(),
        ],
    )
}

#[tokio::test]
async fn test_build_creates_parent_directories() {
    let (temp_dir, repository) = create_test_repository().await;

    assert!(repository.database_path().exists());
    assert!(repository.database_path().starts_with(temp_dir.path()));
}

#[tokio::test]
async fn test_save_and_get_plan() {
    let (_temp_dir, repository) = create_test_repository().await;
    let plan = network_plan("plan-1")
        .with_name("web tier")
        .with_type(PlanType::Migrate);

    repository.save_plan(&plan).await.expect("Failed to save plan");

    let stored = repository
        .get_plan("plan-1")
        .await
        .expect("Failed to get plan")
        .expect("Plan should exist");
    assert_eq!(stored, plan);
    assert!(repository.get_plan("plan-2").await.expect("query").is_none());
}

#[tokio::test]
async fn test_resave_keeps_original_snapshot() {
    let (_temp_dir, repository) = create_test_repository().await;
    let plan = network_plan("plan-1");
    repository.save_plan(&plan).await.expect("Failed to save plan");

    let mut store = repository.open("plan-1").await.expect("Failed to open plan");
    let catalog = StaticCatalog::new().with_network("net2", ["sub2"]);
    assert!(store.update_plan_resource(
        "plan-1",
        &ResourceType::Net,
        "net1",
        &EditResult::substitution("net2"),
        &catalog,
    ));
    repository
        .commit(&store, "plan-1")
        .await
        .expect("Failed to commit plan");

    let stored = repository.require_plan("plan-1").await.expect("Plan should exist");
    assert_eq!(stored.original_dependencies, plan.original_dependencies);
    assert_eq!(stored.created_at, plan.created_at);
    let ids: Vec<&str> = stored.updated_dependencies.iter().map(|n| n.id.as_str()).collect();
    assert_eq!(ids, vec!["net2", "sub2", "vm1"]);
    assert_eq!(stored.substitutions.len(), 2);
}

#[tokio::test]
async fn test_list_plans_with_filter() {
    let (_temp_dir, repository) = create_test_repository().await;
    repository
        .save_plan(&network_plan("plan-a").with_name("Web tier"))
        .await
        .expect("Failed to save plan");
    repository
        .save_plan(
            &network_plan("plan-b")
                .with_name("Database")
                .with_type(PlanType::Migrate)
                .with_status(PlanStatus::Cloning),
        )
        .await
        .expect("Failed to save plan");

    let all = repository
        .list_plans(&PlanFilter::default())
        .await
        .expect("Failed to list plans");
    assert_eq!(all.len(), 2);

    let migrations = repository
        .list_plans(&PlanFilter::for_type(PlanType::Migrate))
        .await
        .expect("Failed to list plans");
    assert_eq!(migrations.len(), 1);
    assert_eq!(migrations[0].plan_id, "plan-b");
    assert_eq!(migrations[0].total_resources, 3);
    assert_eq!(migrations[0].cloned_resources, 1);

    let by_name = repository
        .list_plans(&PlanFilter {
            name_contains: Some("web".to_string()),
            ..Default::default()
        })
        .await
        .expect("Failed to list plans");
    assert_eq!(by_name.len(), 1);
    assert_eq!(by_name[0].plan_id, "plan-a");
}

#[tokio::test]
async fn test_property_updates_round_trip() {
    let (_temp_dir, repository) = create_test_repository().await;
    let mut plan = network_plan("plan-1");
    let properties = json!({"name": "frontend", "shared": true});
    plan.merge_property_update(
        &ResourceType::Net,
        "net1",
        properties.as_object().cloned().unwrap_or_default(),
    );
    repository.save_plan(&plan).await.expect("Failed to save plan");

    let store = repository.open("plan-1").await.expect("Failed to open plan");
    let info = store
        .extract_resource_show_info("plan-1", &ResourceType::Net, "net1")
        .expect("plan is loaded");
    assert_eq!(info.updated.get("name"), Some(&json!("frontend")));
    assert_eq!(info.updated.get("shared"), Some(&json!(true)));
}

#[tokio::test]
async fn test_delete_plan() {
    let (_temp_dir, repository) = create_test_repository().await;
    repository
        .save_plan(&network_plan("plan-1"))
        .await
        .expect("Failed to save plan");

    assert!(repository.delete_plan("plan-1").await.expect("Failed to delete"));
    assert!(!repository.delete_plan("plan-1").await.expect("Failed to delete"));

    let err = repository.open("plan-1").await.unwrap_err();
    assert!(matches!(err, ConveyorError::PlanNotFound { ref id } if id == "plan-1"));
}

mod handlers {
    use super::*;
    use crate::params::{
        CloneInfoRequest, LoadPlan, PlanSource, ReplaceResource, ResourceKey, ShowDependencies,
        UpdateResource,
    };

    fn key(resource_type: ResourceType, resource_id: &str) -> ResourceKey {
        ResourceKey {
            plan_id: "plan-1".to_string(),
            resource_type,
            resource_id: resource_id.to_string(),
        }
    }

    async fn loaded_repository() -> (TempDir, Repository) {
        let (temp_dir, repository) = create_test_repository().await;
        let source: PlanSource = serde_json::from_value(json!([
            {"type": "OS::Neutron::Net", "id": "net1", "name": "front"},
            {"type": "OS::Neutron::Subnet", "id": "sub1",
             "dependencies": [{"type": "OS::Neutron::Net", "id": "net1"}]},
            {"type": "OS::Neutron::Port", "id": "port1",
             "dependencies": [{"type": "OS::Neutron::Subnet", "id": "sub1"},
                              {"type": "OS::Neutron::Net", "id": "net1"}],
             "fixed_ips": [{"subnet_id": "sub1", "ip_address": "10.0.0.5"}]},
            {"type": "OS::Nova::Server", "id": "vm1",
             "dependencies": [{"type": "OS::Neutron::Port", "id": "port1"}]},
            {"type": "OS::Cinder::Volume", "id": "vol1"}
        ]))
        .expect("valid plan source");
        repository
            .load_plan(&LoadPlan {
                plan_id: "plan-1".to_string(),
                plan_name: Some("web tier".to_string()),
                plan_type: None,
                source,
            })
            .await
            .expect("Failed to load plan");
        (temp_dir, repository)
    }

    #[tokio::test]
    async fn test_load_plan_rejects_empty_id() {
        let (_temp_dir, repository) = create_test_repository().await;
        let err = repository
            .load_plan(&LoadPlan {
                plan_id: " ".to_string(),
                plan_name: None,
                plan_type: None,
                source: PlanSource::Nodes(Vec::new()),
            })
            .await
            .unwrap_err();
        assert!(matches!(err, ConveyorError::InvalidInput { .. }));
    }

    #[tokio::test]
    async fn test_show_dependencies_local_and_global() {
        let (_temp_dir, repository) = loaded_repository().await;

        let all = repository
            .show_dependencies(&ShowDependencies {
                plan_id: "plan-1".to_string(),
                focus: None,
            })
            .await
            .expect("Failed to show dependencies");
        assert_eq!(all.len(), 5);

        let local = repository
            .show_dependencies(&ShowDependencies {
                plan_id: "plan-1".to_string(),
                focus: Some((ResourceType::Port, "port1".to_string())),
            })
            .await
            .expect("Failed to show dependencies");
        let ids: Vec<&str> = local.iter().map(|n| n.id.as_str()).collect();
        assert_eq!(ids, vec!["net1", "sub1", "port1", "vm1"]);

        let err = repository
            .show_dependencies(&ShowDependencies {
                plan_id: "plan-1".to_string(),
                focus: Some((ResourceType::Port, "port9".to_string())),
            })
            .await
            .unwrap_err();
        assert!(matches!(err, ConveyorError::ResourceNotFound { .. }));
    }

    #[tokio::test]
    async fn test_update_resource_validates_and_persists() {
        let (_temp_dir, repository) = loaded_repository().await;

        let outcome = repository
            .update_resource(&UpdateResource {
                resource: key(ResourceType::Volume, "vol1"),
                assignments: vec![("size".to_string(), "20".to_string())],
            })
            .await
            .expect("Failed to update resource");
        assert!(outcome.applied);

        let info = repository
            .show_resource(&key(ResourceType::Volume, "vol1"))
            .await
            .expect("Failed to show resource");
        assert_eq!(info.updated.get("size"), Some(&json!("20")));

        let again = repository
            .update_resource(&UpdateResource {
                resource: key(ResourceType::Volume, "vol1"),
                assignments: vec![("size".to_string(), "20".to_string())],
            })
            .await
            .expect("Failed to update resource");
        assert!(!again.applied);

        let err = repository
            .update_resource(&UpdateResource {
                resource: key(ResourceType::Subnet, "sub1"),
                assignments: vec![("cidr".to_string(), "10.0.0.0/32".to_string())],
            })
            .await
            .unwrap_err();
        assert!(matches!(err, ConveyorError::InvalidInput { ref field, .. } if field == "cidr"));
    }

    #[tokio::test]
    async fn test_replace_network_cascades() {
        let (_temp_dir, repository) = loaded_repository().await;

        let outcome = repository
            .replace_resource(&ReplaceResource {
                resource: key(ResourceType::Net, "net1"),
                dest_id: "net2".to_string(),
                networks: vec![("net2".to_string(), vec!["sub2".to_string()])],
            })
            .await
            .expect("Failed to replace resource");
        assert!(outcome.applied);

        let plan = repository.require_plan("plan-1").await.expect("Plan should exist");
        let port = plan
            .updated_dependencies
            .iter()
            .find(|n| n.id == "port1")
            .expect("port is kept");
        assert!(port.depends_on_ref(&ResourceType::Subnet, "sub2"));
        assert!(port.depends_on_ref(&ResourceType::Net, "net2"));
        assert_eq!(port.fixed_ips[0].subnet_id, "sub2");

        let info = repository
            .clone_info(&CloneInfoRequest {
                plan_id: "plan-1".to_string(),
                incremental: false,
            })
            .await
            .expect("Failed to compute clone info");
        assert_eq!(info.replace_resources.len(), 2);
    }

    #[tokio::test]
    async fn test_topology_focus_reconciles() {
        let (_temp_dir, repository) = loaded_repository().await;

        let (view, diff) = repository
            .topology(&ShowDependencies {
                plan_id: "plan-1".to_string(),
                focus: Some((ResourceType::Volume, "vol1".to_string())),
            })
            .await
            .expect("Failed to build topology");

        assert_eq!(view.nodes().len(), 1);
        let diff = diff.expect("focused topology has a diff");
        assert_eq!(diff.removed.len(), 4);
        assert!(view.links().is_empty());
    }
}
