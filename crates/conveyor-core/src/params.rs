//! Parameter structures for plan editing operations.
//!
//! These are the inputs of the [`Repository`](crate::store::Repository)
//! handlers, free of any interface framework. The CLI converts its clap
//! arguments into them.
//!
//! ```text
//! ┌─────────────────┐    ┌─────────────────┐    ┌─────────────────┐
//! │   CLI Args      │    │  Core Params    │    │   Repository    │
//! │  (clap derives) │───▶│  (this module)  │───▶│    handlers     │
//! └─────────────────┘    └─────────────────┘    └─────────────────┘
//! ```

use serde::Deserialize;

use crate::{
    models::{DependencyNode, PlanRecord, PlanType, ResourceType},
    plan::StaticCatalog,
};

/// A dependency graph as exported by the backend: either a bare list of
/// nodes or a topology document carrying them.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum PlanSource {
    Topology {
        #[serde(default)]
        plan: Option<PlanRecord>,
        dependencies: Vec<DependencyNode>,
    },
    Nodes(Vec<DependencyNode>),
}

impl PlanSource {
    pub fn into_parts(self) -> (Option<PlanRecord>, Vec<DependencyNode>) {
        match self {
            PlanSource::Topology { plan, dependencies } => (plan, dependencies),
            PlanSource::Nodes(dependencies) => (None, dependencies),
        }
    }
}

/// Parameters for storing a newly loaded plan.
#[derive(Debug, Clone)]
pub struct LoadPlan {
    pub plan_id: String,
    pub plan_name: Option<String>,
    /// Overrides the type found in the source
    pub plan_type: Option<PlanType>,
    pub source: PlanSource,
}

/// One resource of a stored plan.
#[derive(Debug, Clone)]
pub struct ResourceKey {
    pub plan_id: String,
    pub resource_type: ResourceType,
    pub resource_id: String,
}

/// Parameters for showing a plan's dependencies, whole or around one
/// resource.
#[derive(Debug, Clone)]
pub struct ShowDependencies {
    pub plan_id: String,
    pub focus: Option<(ResourceType, String)>,
}

/// Parameters for editing resource properties with `name=value` assignments.
#[derive(Debug, Clone)]
pub struct UpdateResource {
    pub resource: ResourceKey,
    pub assignments: Vec<(String, String)>,
}

/// Parameters for replacing a resource with an existing one.
#[derive(Debug, Clone)]
pub struct ReplaceResource {
    pub resource: ResourceKey,
    pub dest_id: String,
    /// Existing networks and their subnets, used when replacing a network
    pub networks: Vec<(String, Vec<String>)>,
}

impl ReplaceResource {
    pub fn catalog(&self) -> StaticCatalog {
        self.networks
            .iter()
            .fold(StaticCatalog::new(), |catalog, (network, subnets)| {
                catalog.with_network(network.clone(), subnets.iter().cloned())
            })
    }
}

/// Parameters for computing the clone payload of a plan.
#[derive(Debug, Clone)]
pub struct CloneInfoRequest {
    pub plan_id: String,
    pub incremental: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plan_source_accepts_both_shapes() {
        let nodes: PlanSource =
            serde_json::from_str(r#"[{"type": "OS::Neutron::Net", "id": "net1"}]"#).unwrap();
        let (plan, deps) = nodes.into_parts();
        assert!(plan.is_none());
        assert_eq!(deps.len(), 1);

        let topology: PlanSource = serde_json::from_str(
            r#"{
                "plan": {"plan_id": "p1", "plan_type": "migrate", "plan_status": "available"},
                "dependencies": [{"type": "OS::Nova::Server", "id": "vm1"}]
            }"#,
        )
        .unwrap();
        let (plan, deps) = topology.into_parts();
        assert_eq!(plan.map(|p| p.plan_type), Some(PlanType::Migrate));
        assert_eq!(deps[0].resource_type, ResourceType::Server);
    }

    #[test]
    fn test_replace_catalog() {
        use crate::plan::ResourceCatalog;

        let params = ReplaceResource {
            resource: ResourceKey {
                plan_id: "p1".to_string(),
                resource_type: ResourceType::Net,
                resource_id: "net1".to_string(),
            },
            dest_id: "net2".to_string(),
            networks: vec![("net2".to_string(), vec!["a".to_string(), "b".to_string()])],
        };
        assert_eq!(params.catalog().subnets_of_network("net2"), vec!["a", "b"]);
        assert!(params.catalog().subnets_of_network("net3").is_empty());
    }
}
