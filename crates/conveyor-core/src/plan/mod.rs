//! Plan model: dependency snapshots, pending edits and substitutions.
//!
//! A [`PlanStore`] owns every plan loaded in an edit session, keyed by plan
//! id. The plan itself carries two snapshots of the dependency graph: the one
//! it was loaded with, which never changes, and a working copy mutated by
//! edits.
//!
//! ```text
//! ┌─────────────┐  init_plan   ┌──────────────────────────────┐
//! │ server graph│─────────────▶│ Plan                         │
//! └─────────────┘              │  original_dependencies (ro)  │
//!                              │  updated_dependencies  (rw)  │
//!   update_plan_resource ─────▶│  property_updates            │
//!                              │  substitutions               │
//!                              └──────────────────────────────┘
//! ```
//!
//! ## Submodules
//!
//! - [`snapshot`]: lookups and structural edits over one snapshot
//! - [`catalog`]: existing-resource lookups used by network substitutions
//! - `substitution`: the `change_*` cascades on [`Plan`]
//! - `updates`: property edits and the edit dispatcher
//! - `clone_info`: clone submission payload
//!
//! Lookups on unknown plans or resources return empty values. Absence is the
//! normal case for a resource that has not been edited yet.
//!
//! # Example
//!
//! ```rust
//! use conveyor_core::models::{DependencyNode, EditResult, ResourceType};
//! use conveyor_core::plan::{PlanStore, StaticCatalog};
//!
//! let mut store = PlanStore::new();
//! store.init_plan(
//!     "plan-1",
//!     vec![
//!         DependencyNode::new(ResourceType::Net, "net1"),
//!         DependencyNode::new(ResourceType::Subnet, "sub1").depends_on(ResourceType::Net, "net1"),
//!     ],
//! );
//!
//! let catalog = StaticCatalog::new().with_network("net2", ["sub2"]);
//! store.update_plan_resource(
//!     "plan-1",
//!     &ResourceType::Net,
//!     "net1",
//!     &EditResult::substitution("net2"),
//!     &catalog,
//! );
//!
//! let ids: Vec<_> = store
//!     .global_dependencies("plan-1")
//!     .into_iter()
//!     .map(|node| node.id)
//!     .collect();
//! assert_eq!(ids, vec!["net2", "sub2"]);
//! ```

use std::collections::HashMap;

use log::info;
use serde_json::{Map, Value};

use crate::{
    graph::DependencyIndex,
    models::{CloneInfo, DependencyNode, EditResult, Plan, ResourceShowInfo, ResourceType},
};

pub mod catalog;
mod clone_info;
pub mod snapshot;
mod substitution;
mod updates;


pub use catalog::{ResourceCatalog, StaticCatalog};
pub use snapshot::{
    check_dep_in, dependent_types, get_dependency, get_dependent_resources, remove_dependency,
    replace_resource_self, search_dependent_items,
};

/// Owner of the plans of one edit session.
#[derive(Debug, Clone, Default)]
pub struct PlanStore {
    plans: HashMap<String, Plan>,
}

impl PlanStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a plan loaded from `dependencies`, replacing any plan with
    /// the same id.
    pub fn init_plan(&mut self, plan_id: impl Into<String>, dependencies: Vec<DependencyNode>) -> &Plan {
        let plan = Plan::new(plan_id, dependencies);
        info!(
            "Loaded plan {} with {} resources",
            plan.plan_id,
            plan.updated_dependencies.len()
        );
        self.insert(plan)
    }

    /// Registers an already built plan, e.g. one restored from disk.
    pub fn insert(&mut self, plan: Plan) -> &Plan {
        let plan_id = plan.plan_id.clone();
        self.plans.insert(plan_id.clone(), plan);
        &self.plans[&plan_id]
    }

    pub fn get_plan(&self, plan_id: &str) -> Option<&Plan> {
        self.plans.get(plan_id)
    }

    pub fn get_plan_mut(&mut self, plan_id: &str) -> Option<&mut Plan> {
        self.plans.get_mut(plan_id)
    }

    /// Discards a plan, returning it if it was loaded.
    pub fn remove_plan(&mut self, plan_id: &str) -> Option<Plan> {
        self.plans.remove(plan_id)
    }

    /// Ids of the loaded plans, sorted.
    pub fn plan_ids(&self) -> Vec<String> {
        let mut ids: Vec<String> = self.plans.keys().cloned().collect();
        ids.sort();
        ids
    }

    /// The resource and every resource directly linked to it, in snapshot
    /// order.
    pub fn local_dependencies(
        &self,
        plan_id: &str,
        resource_type: &ResourceType,
        resource_id: &str,
    ) -> Vec<DependencyNode> {
        let Some(plan) = self.get_plan(plan_id) else {
            return Vec::new();
        };

        let index = DependencyIndex::build(&plan.updated_dependencies);
        let Some(position) = index.position(resource_type, resource_id) else {
            return Vec::new();
        };

        let mut members = index.neighbours(position);
        members.push(position);
        members.sort_unstable();
        members.into_iter().map(|idx| index.node(idx).clone()).collect()
    }

    /// Copy of the whole working snapshot.
    pub fn global_dependencies(&self, plan_id: &str) -> Vec<DependencyNode> {
        self.get_plan(plan_id)
            .map(|plan| plan.updated_dependencies.clone())
            .unwrap_or_default()
    }

    /// What the detail panel shows before a resource is edited.
    ///
    /// `has_server` is only computed for shared network resources, where an
    /// edit may affect running servers.
    pub fn extract_resource_show_info(
        &self,
        plan_id: &str,
        resource_type: &ResourceType,
        resource_id: &str,
    ) -> Option<ResourceShowInfo> {
        let plan = self.get_plan(plan_id)?;

        let mut updated = Map::new();
        updated.insert("id".to_string(), Value::String(resource_id.to_string()));
        updated.insert(
            "type".to_string(),
            Value::String(resource_type.as_str().to_string()),
        );
        if let Some(properties) = plan.get_update_resource(resource_type, resource_id) {
            updated.extend(properties.clone());
        }

        let has_server = resource_type.is_shared_network()
            && !search_dependent_items(
                &plan.updated_dependencies,
                resource_type,
                &[resource_id.to_string()],
                &ResourceType::Server,
                &[],
            )
            .is_empty();

        Some(ResourceShowInfo {
            resource_type: resource_type.clone(),
            resource_id: resource_id.to_string(),
            updated,
            has_server,
        })
    }

    /// Clone payload of a plan, empty when the plan is not loaded.
    pub fn extract_clone_info(&self, plan_id: &str, incremental: bool) -> CloneInfo {
        self.get_plan(plan_id)
            .map(|plan| plan.extract_clone_info(incremental))
            .unwrap_or_default()
    }

    /// Applies an edit to a resource of a loaded plan. Returns `false` when
    /// the plan is unknown or the edit was ignored.
    pub fn update_plan_resource(
        &mut self,
        plan_id: &str,
        resource_type: &ResourceType,
        resource_id: &str,
        edit: &EditResult,
        catalog: &dyn ResourceCatalog,
    ) -> bool {
        self.get_plan_mut(plan_id)
            .is_some_and(|plan| plan.apply_edit(resource_type, resource_id, edit, catalog))
    }

    pub fn get_update_resource(
        &self,
        plan_id: &str,
        resource_type: &ResourceType,
        resource_id: &str,
    ) -> Option<&Map<String, Value>> {
        self.get_plan(plan_id)?
            .get_update_resource(resource_type, resource_id)
    }
}
