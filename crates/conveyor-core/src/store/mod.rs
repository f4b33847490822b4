//! Async access to the plan database.
//!
//! Every call opens its own connection on the blocking pool, so a
//! [`Repository`] is cheap to clone and can be shared between tasks.

use std::path::{Path, PathBuf};

use log::{debug, info};
use tokio::task;

use crate::{
    db::Database,
    error::{ConveyorError, Result},
    models::{Plan, PlanFilter, PlanSummary},
    plan::PlanStore,
};

mod builder;
mod handlers;

#[cfg(test)]
mod tests;

pub use builder::RepositoryBuilder;
pub use handlers::AppliedEdit;

/// Persistent home of locally edited plans.
#[derive(Debug, Clone)]
pub struct Repository {
    db_path: PathBuf,
}

/// Runs a database call on the blocking pool.
async fn blocking<T, F>(db_path: &Path, f: F) -> Result<T>
where
    T: Send + 'static,
    F: FnOnce(&mut Database) -> Result<T> + Send + 'static,
{
    let db_path = db_path.to_path_buf();
    task::spawn_blocking(move || {
        let mut db = Database::new(&db_path)?;
        f(&mut db)
    })
    .await
    .map_err(ConveyorError::join)?
}

impl Repository {
    pub(crate) fn new(db_path: PathBuf) -> Self {
        Self { db_path }
    }

    pub fn database_path(&self) -> &Path {
        &self.db_path
    }

    /// Stores a plan, replacing the working state of an earlier save.
    pub async fn save_plan(&self, plan: &Plan) -> Result<()> {
        let plan = plan.clone();
        debug!("Saving plan {}", plan.plan_id);
        blocking(&self.db_path, move |db| db.save_plan(&plan)).await
    }

    pub async fn get_plan(&self, plan_id: &str) -> Result<Option<Plan>> {
        let plan_id = plan_id.to_string();
        blocking(&self.db_path, move |db| db.get_plan(&plan_id)).await
    }

    /// Like [`Repository::get_plan`], failing with `PlanNotFound` on a miss.
    pub async fn require_plan(&self, plan_id: &str) -> Result<Plan> {
        self.get_plan(plan_id)
            .await?
            .ok_or_else(|| ConveyorError::plan_not_found(plan_id))
    }

    /// Summaries of the stored plans matching `filter`.
    pub async fn list_plans(&self, filter: &PlanFilter) -> Result<Vec<PlanSummary>> {
        let filter = filter.clone();
        let plans = blocking(&self.db_path, move |db| db.list_plans(Some(&filter))).await?;
        Ok(plans.iter().map(PlanSummary::from).collect())
    }

    /// Deletes a plan. Returns `false` when it was not stored.
    pub async fn delete_plan(&self, plan_id: &str) -> Result<bool> {
        let plan_id = plan_id.to_string();
        let deleted = blocking(&self.db_path, {
            let plan_id = plan_id.clone();
            move |db| db.delete_plan(&plan_id)
        })
        .await?;
        if deleted {
            info!("Deleted plan {plan_id}");
        }
        Ok(deleted)
    }

    /// Loads a stored plan into an edit store.
    pub async fn open(&self, plan_id: &str) -> Result<PlanStore> {
        let plan = self.require_plan(plan_id).await?;
        let mut store = PlanStore::new();
        store.insert(plan);
        Ok(store)
    }

    /// Writes back a plan held by an edit store.
    pub async fn commit(&self, store: &PlanStore, plan_id: &str) -> Result<()> {
        let plan = store
            .get_plan(plan_id)
            .ok_or_else(|| ConveyorError::plan_not_found(plan_id))?;
        self.save_plan(plan).await
    }
}
