//! Plan CRUD operations and queries.

use rusqlite::{params, OptionalExtension, Row};

use super::utils::{json_column, parsed_column, timestamp_column, timestamp_text, to_json};
use crate::{
    error::{DatabaseResultExt, Result},
    models::{Plan, PlanFilter},
};

const PLAN_COLUMNS: &str = "plan_id, plan_type, plan_status, plan_name, original_dependencies, \
     updated_dependencies, property_updates, substitutions, created_at, updated_at";

const UPSERT_PLAN_SQL: &str = "INSERT INTO plans (plan_id, plan_type, plan_status, plan_name, \
     original_dependencies, updated_dependencies, property_updates, substitutions, created_at, \
     updated_at) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10) \
     ON CONFLICT(plan_id) DO UPDATE SET plan_type = excluded.plan_type, \
     plan_status = excluded.plan_status, plan_name = excluded.plan_name, \
     updated_dependencies = excluded.updated_dependencies, \
     property_updates = excluded.property_updates, substitutions = excluded.substitutions, \
     updated_at = excluded.updated_at";
const DELETE_PLAN_SQL: &str = "DELETE FROM plans WHERE plan_id = ?1";
const CHECK_PLAN_EXISTS_SQL: &str = "SELECT EXISTS(SELECT 1 FROM plans WHERE plan_id = ?1)";

fn plan_from_row(row: &Row<'_>) -> rusqlite::Result<Plan> {
    Ok(Plan {
        plan_id: row.get(0)?,
        plan_type: parsed_column(row, 1)?,
        plan_status: parsed_column(row, 2)?,
        plan_name: row.get(3)?,
        original_dependencies: json_column(row, 4)?,
        updated_dependencies: json_column(row, 5)?,
        property_updates: json_column(row, 6)?,
        substitutions: json_column(row, 7)?,
        created_at: timestamp_column(row, 8)?,
        updated_at: timestamp_column(row, 9)?,
    })
}

impl super::Database {
    /// Inserts a plan or overwrites the stored copy.
    ///
    /// The original snapshot and the creation time are written once; later
    /// saves only replace the working state.
    pub fn save_plan(&mut self, plan: &Plan) -> Result<()> {
        let tx = self
            .connection
            .transaction()
            .db_context("Failed to begin transaction")?;

        tx.execute(
            UPSERT_PLAN_SQL,
            params![
                plan.plan_id,
                plan.plan_type.as_str(),
                plan.plan_status.as_str(),
                plan.plan_name,
                to_json(&plan.original_dependencies)?,
                to_json(&plan.updated_dependencies)?,
                to_json(&plan.property_updates)?,
                to_json(&plan.substitutions)?,
                timestamp_text(&plan.created_at),
                timestamp_text(&plan.updated_at),
            ],
        )
        .db_context("Failed to save plan")?;

        tx.commit().db_context("Failed to commit transaction")
    }

    /// Retrieves a plan by its ID.
    pub fn get_plan(&self, plan_id: &str) -> Result<Option<Plan>> {
        let mut stmt = self
            .connection
            .prepare(&format!("SELECT {PLAN_COLUMNS} FROM plans WHERE plan_id = ?1"))
            .db_context("Failed to prepare query")?;

        stmt.query_row(params![plan_id], plan_from_row)
            .optional()
            .db_context("Failed to query plan")
    }

    pub fn plan_exists(&self, plan_id: &str) -> Result<bool> {
        self.connection
            .query_row(CHECK_PLAN_EXISTS_SQL, params![plan_id], |row| row.get(0))
            .db_context("Failed to check plan existence")
    }

    /// Lists stored plans, most recently edited first.
    pub fn list_plans(&self, filter: Option<&PlanFilter>) -> Result<Vec<Plan>> {
        let mut query = format!("SELECT {PLAN_COLUMNS} FROM plans");

        let mut conditions = Vec::new();
        let mut params_vec: Vec<Box<dyn rusqlite::ToSql>> = Vec::new();

        if let Some(f) = filter {
            if let Some(plan_type) = f.plan_type {
                conditions.push("plan_type = ?");
                params_vec.push(Box::new(plan_type.as_str()));
            }

            if let Some(ref status) = f.plan_status {
                conditions.push("plan_status = ?");
                params_vec.push(Box::new(status.as_str().to_string()));
            }

            if let Some(ref name) = f.name_contains {
                conditions.push("plan_name LIKE ?");
                params_vec.push(Box::new(format!("%{name}%")));
            }
        }

        if !conditions.is_empty() {
            query.push_str(" WHERE ");
            query.push_str(&conditions.join(" AND "));
        }

        query.push_str(" ORDER BY updated_at DESC, plan_id");

        let mut stmt = self
            .connection
            .prepare(&query)
            .db_context("Failed to prepare query")?;

        let params_refs: Vec<&dyn rusqlite::ToSql> = params_vec.iter().map(|b| &**b).collect();

        let plans = stmt
            .query_map(&params_refs[..], plan_from_row)
            .db_context("Failed to query plans")?
            .collect::<rusqlite::Result<Vec<_>>>()
            .db_context("Failed to read plan rows")?;
        Ok(plans)
    }

    /// Deletes a plan. Returns `false` when no plan had this ID.
    pub fn delete_plan(&mut self, plan_id: &str) -> Result<bool> {
        let deleted = self
            .connection
            .execute(DELETE_PLAN_SQL, params![plan_id])
            .db_context("Failed to delete plan")?;
        Ok(deleted > 0)
    }
}
