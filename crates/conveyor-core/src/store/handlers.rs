//! Plan editing handlers returning display-ready values.
//!
//! Each handler loads the stored plan into a [`PlanStore`], runs one model
//! operation and writes the plan back when it changed.

use log::debug;

use super::Repository;
use crate::{
    display::{Dependencies, PlanSummaries},
    error::{ConveyorError, Result},
    fields::{form_from_assignments, process},
    models::{CloneInfo, EditResult, Plan, PlanFilter, ResourceShowInfo},
    params::{CloneInfoRequest, LoadPlan, ReplaceResource, ResourceKey, ShowDependencies, UpdateResource},
    plan::{snapshot::get_dependency, PlanStore, StaticCatalog},
    topology::{GraphData, GraphDiff, NullRenderer, TopologyView},
};

/// Outcome of an edit handler.
#[derive(Debug, Clone)]
pub struct AppliedEdit {
    pub edit: EditResult,
    pub applied: bool,
}

fn require_resource(store: &PlanStore, key: &ResourceKey) -> Result<()> {
    let plan = store
        .get_plan(&key.plan_id)
        .ok_or_else(|| ConveyorError::plan_not_found(&key.plan_id))?;
    match get_dependency(&plan.updated_dependencies, &key.resource_type, &key.resource_id) {
        Some(_) => Ok(()),
        None => Err(ConveyorError::resource_not_found(
            &key.resource_type,
            key.resource_id.clone(),
        )),
    }
}

impl Repository {
    /// Registers a plan from an exported dependency graph and stores it.
    pub async fn load_plan(&self, params: &LoadPlan) -> Result<Plan> {
        if params.plan_id.trim().is_empty() {
            return Err(ConveyorError::invalid_input("plan_id").with_reason("must not be empty"));
        }

        let (record, dependencies) = params.source.clone().into_parts();
        let mut store = PlanStore::new();
        store.init_plan(params.plan_id.clone(), dependencies);
        let plan = store
            .get_plan_mut(&params.plan_id)
            .ok_or_else(|| ConveyorError::plan_not_found(&params.plan_id))?;

        if let Some(record) = record {
            plan.plan_type = record.plan_type;
            plan.plan_status = record.plan_status;
            plan.plan_name = record.plan_name;
        }
        if let Some(plan_type) = params.plan_type {
            plan.plan_type = plan_type;
        }
        if params.plan_name.is_some() {
            plan.plan_name = params.plan_name.clone();
        }

        self.save_plan(plan).await?;
        Ok(plan.clone())
    }

    pub async fn list_plans_summary(&self, filter: &PlanFilter) -> Result<PlanSummaries> {
        Ok(PlanSummaries(self.list_plans(filter).await?))
    }

    /// The working snapshot, or the resource and its direct neighbours.
    pub async fn show_dependencies(&self, params: &ShowDependencies) -> Result<Dependencies> {
        let store = self.open(&params.plan_id).await?;
        let nodes = match &params.focus {
            Some((resource_type, resource_id)) => {
                let key = ResourceKey {
                    plan_id: params.plan_id.clone(),
                    resource_type: resource_type.clone(),
                    resource_id: resource_id.clone(),
                };
                require_resource(&store, &key)?;
                store.local_dependencies(&params.plan_id, resource_type, resource_id)
            }
            None => store.global_dependencies(&params.plan_id),
        };
        Ok(Dependencies(nodes))
    }

    pub async fn show_resource(&self, key: &ResourceKey) -> Result<ResourceShowInfo> {
        let store = self.open(&key.plan_id).await?;
        require_resource(&store, key)?;
        store
            .extract_resource_show_info(&key.plan_id, &key.resource_type, &key.resource_id)
            .ok_or_else(|| ConveyorError::plan_not_found(&key.plan_id))
    }

    /// Applies property assignments to a resource.
    pub async fn update_resource(&self, params: &UpdateResource) -> Result<AppliedEdit> {
        let key = &params.resource;
        let mut store = self.open(&key.plan_id).await?;
        require_resource(&store, key)?;

        let current = store
            .get_update_resource(&key.plan_id, &key.resource_type, &key.resource_id)
            .cloned()
            .unwrap_or_default();
        let form = form_from_assignments(&key.resource_type, &params.assignments, &current)?;
        let edit = process(&key.resource_type, &form)?;

        let applied = store.update_plan_resource(
            &key.plan_id,
            &key.resource_type,
            &key.resource_id,
            &edit,
            &StaticCatalog::new(),
        );
        if applied {
            self.commit(&store, &key.plan_id).await?;
        } else {
            debug!("Nothing to update on {} {}", key.resource_type, key.resource_id);
        }
        Ok(AppliedEdit { edit, applied })
    }

    /// Replaces a resource with an existing one and cascades the change.
    pub async fn replace_resource(&self, params: &ReplaceResource) -> Result<AppliedEdit> {
        let key = &params.resource;
        let mut store = self.open(&key.plan_id).await?;
        require_resource(&store, key)?;

        let edit = EditResult::substitution(params.dest_id.clone());
        let applied = store.update_plan_resource(
            &key.plan_id,
            &key.resource_type,
            &key.resource_id,
            &edit,
            &params.catalog(),
        );
        if applied {
            self.commit(&store, &key.plan_id).await?;
        }
        Ok(AppliedEdit { edit, applied })
    }

    pub async fn clone_info(&self, params: &CloneInfoRequest) -> Result<CloneInfo> {
        let store = self.open(&params.plan_id).await?;
        Ok(store.extract_clone_info(&params.plan_id, params.incremental))
    }

    /// Lays out the plan's topology. With a focus resource the view is then
    /// reconciled down to its neighbourhood and the applied diff returned.
    pub async fn topology(
        &self,
        params: &ShowDependencies,
    ) -> Result<(TopologyView<NullRenderer>, Option<GraphDiff>)> {
        let store = self.open(&params.plan_id).await?;
        let mut view = TopologyView::new(NullRenderer);
        view.load(GraphData::from_dependencies(
            &store.global_dependencies(&params.plan_id),
        ));

        let diff = match &params.focus {
            Some((resource_type, resource_id)) => {
                let key = ResourceKey {
                    plan_id: params.plan_id.clone(),
                    resource_type: resource_type.clone(),
                    resource_id: resource_id.clone(),
                };
                require_resource(&store, &key)?;
                let local = store.local_dependencies(&params.plan_id, resource_type, resource_id);
                Some(view.update_topo(GraphData::from_dependencies(&local)))
            }
            None => None,
        };
        Ok((view, diff))
    }
}
