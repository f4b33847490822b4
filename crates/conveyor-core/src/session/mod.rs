//! Edit session: plan model, topology view and backend round trips.
//!
//! A session owns the [`PlanStore`] and the [`TopologyView`] of one editing
//! page. Both sit behind a single mutex so a reconciliation never observes a
//! partially applied cascade. At most one save is in flight at a time; a save
//! requested while another one runs is skipped, not queued.

use std::sync::{
    atomic::{AtomicBool, Ordering},
    Arc,
};

use log::{debug, info};
use tokio::sync::Mutex;

use crate::{
    api::{LogNotifier, Notifier, PlanApi},
    error::{ConveyorError, Result},
    models::{AzMap, CloneRequest, EditResult, Plan, ResourceEdit, ResourceType},
    plan::{PlanStore, ResourceCatalog},
    topology::{GraphData, GraphDiff, NullRenderer, RenderNode, TopologyRenderer, TopologyView},
};

/// What happened to a save request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SaveOutcome {
    /// The edit was applied to the plan
    Applied,
    /// The form had no changes
    Unchanged,
    /// Another save was still in flight
    Skipped,
}

/// Flags of a clone submission.
#[derive(Debug, Clone, Default)]
pub struct CloneOptions {
    pub incremental: bool,
    pub az_map: AzMap,
    pub sys_clone: bool,
    pub copy_data: bool,
}

struct SessionState<R> {
    store: PlanStore,
    view: TopologyView<R>,
}

/// Clears the in-flight flag when the save ends, whichever way it ends.
struct InFlight<'a>(&'a AtomicBool);

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

pub struct EditSession<A, R = NullRenderer> {
    api: A,
    notifier: Arc<dyn Notifier>,
    state: Mutex<SessionState<R>>,
    updating: AtomicBool,
}

impl<A: PlanApi> EditSession<A, NullRenderer> {
    /// A session without a drawing surface.
    pub fn headless(api: A) -> Self {
        Self::new(api, NullRenderer)
    }
}

impl<A, R> EditSession<A, R>
where
    A: PlanApi,
    R: TopologyRenderer + Send,
{
    pub fn new(api: A, renderer: R) -> Self {
        Self {
            api,
            notifier: Arc::new(LogNotifier),
            state: Mutex::new(SessionState {
                store: PlanStore::new(),
                view: TopologyView::new(renderer),
            }),
            updating: AtomicBool::new(false),
        }
    }

    pub fn with_notifier(mut self, notifier: Arc<dyn Notifier>) -> Self {
        self.notifier = notifier;
        self
    }

    pub fn api(&self) -> &A {
        &self.api
    }

    /// Whether a save is waiting on the backend.
    pub fn is_updating(&self) -> bool {
        self.updating.load(Ordering::Acquire)
    }

    /// Reports a failure to the user and hands it back.
    fn report(&self, err: ConveyorError) -> ConveyorError {
        self.notifier.error(&err.to_string());
        err
    }

    /// Fetches the topology of a plan, registers the plan and draws it.
    pub async fn load_topology(&self, plan_id: &str, az_map: &AzMap) -> Result<()> {
        let response = self
            .api
            .build_topology(plan_id, az_map)
            .await
            .map_err(|e| self.report(e))?;

        let mut state = self.state.lock().await;
        let mut plan = Plan::new(plan_id, response.dependencies);
        if let Some(record) = response.plan {
            plan.plan_type = record.plan_type;
            plan.plan_name = record.plan_name;
            plan.plan_status = record.plan_status;
        }
        state.store.insert(plan);
        state.view.load(response.graph);
        info!("Loaded topology of plan {plan_id}");
        Ok(())
    }

    /// Saves an edit of one resource.
    ///
    /// Substitutions are resolved by the backend first; if it fails the plan
    /// is left untouched. The local cascade is then applied, the snapshots
    /// returned by the backend replace the local ones and the view is
    /// reconciled against the returned graph. Property edits stay local.
    pub async fn save_resource(
        &self,
        plan_id: &str,
        resource_type: &ResourceType,
        resource_id: &str,
        edit: &EditResult,
        catalog: &dyn ResourceCatalog,
    ) -> Result<SaveOutcome> {
        if self.updating.swap(true, Ordering::AcqRel) {
            debug!("Save of {resource_type} {resource_id} skipped, another save is in flight");
            return Ok(SaveOutcome::Skipped);
        }
        let _in_flight = InFlight(&self.updating);

        if edit.is_empty() {
            return Ok(SaveOutcome::Unchanged);
        }

        if self.state.lock().await.store.get_plan(plan_id).is_none() {
            return Err(self.report(ConveyorError::plan_not_found(plan_id)));
        }

        if !edit.needs_submission {
            let mut state = self.state.lock().await;
            state
                .store
                .update_plan_resource(plan_id, resource_type, resource_id, edit, catalog);
            return Ok(SaveOutcome::Applied);
        }

        let request = ResourceEdit {
            resource_type: resource_type.clone(),
            resource_id: resource_id.to_string(),
            data: edit.data.clone(),
        };
        let response = self
            .api
            .update_plan_resource(plan_id, &request)
            .await
            .map_err(|e| self.report(e))?;

        let mut state = self.state.lock().await;
        state
            .store
            .update_plan_resource(plan_id, resource_type, resource_id, edit, catalog);
        if let Some(plan) = state.store.get_plan_mut(plan_id) {
            if let Some(dependencies) = response.updated_dependencies {
                plan.updated_dependencies = dependencies;
            }
            for update in response.update_resources.unwrap_or_default() {
                plan.merge_property_update(&update.resource_type, &update.resource_id, update.properties);
            }
        }
        state.view.update_topo(response.graph);
        Ok(SaveOutcome::Applied)
    }

    /// Reconciles the view against the whole working snapshot.
    pub async fn show_global(&self, plan_id: &str) -> GraphDiff {
        let mut state = self.state.lock().await;
        let graph = GraphData::from_dependencies(&state.store.global_dependencies(plan_id));
        state.view.update_topo(graph)
    }

    /// Reconciles the view against one resource and its direct neighbours.
    pub async fn show_local(&self, plan_id: &str, resource_type: &ResourceType, resource_id: &str) -> GraphDiff {
        let mut state = self.state.lock().await;
        let local = state
            .store
            .local_dependencies(plan_id, resource_type, resource_id);
        state.view.update_topo(GraphData::from_dependencies(&local))
    }

    /// Submits the plan for cloning.
    pub async fn clone_plan(&self, plan_id: &str, options: CloneOptions) -> Result<()> {
        let info = {
            let state = self.state.lock().await;
            let plan = state
                .store
                .get_plan(plan_id)
                .ok_or_else(|| self.report(ConveyorError::plan_not_found(plan_id)))?;
            if !plan.plan_status.can_clone() {
                return Err(self.report(
                    ConveyorError::invalid_input("plan_status").with_reason(format!(
                        "plan {plan_id} is {} and cannot be cloned",
                        plan.plan_status.as_str()
                    )),
                ));
            }
            plan.extract_clone_info(options.incremental)
        };

        let request = CloneRequest {
            plan_id: plan_id.to_string(),
            az_map: options.az_map,
            info,
            sys_clone: options.sys_clone,
            copy_data: options.copy_data,
        };
        self.api
            .clone_plan(&request)
            .await
            .map_err(|e| self.report(e))?;
        info!(
            "Submitted clone of plan {plan_id} with {} resources",
            request.info.clone_resources.len()
        );
        Ok(())
    }

    /// Cancels the plan on the backend and discards it locally.
    pub async fn cancel(&self, plan_id: &str) -> Result<()> {
        self.api
            .cancel_plan(plan_id)
            .await
            .map_err(|e| self.report(e))?;
        self.state.lock().await.store.remove_plan(plan_id);
        Ok(())
    }

    /// Copy of a loaded plan.
    pub async fn plan(&self, plan_id: &str) -> Option<Plan> {
        self.state.lock().await.store.get_plan(plan_id).cloned()
    }

    /// Copy of the nodes currently drawn.
    pub async fn view_nodes(&self) -> Vec<RenderNode> {
        self.state.lock().await.view.nodes().to_vec()
    }

    /// Runs `f` with the store, the view and nothing else touching them.
    pub async fn inspect<T>(&self, f: impl FnOnce(&PlanStore, &TopologyView<R>) -> T) -> T {
        let state = self.state.lock().await;
        f(&state.store, &state.view)
    }
}
