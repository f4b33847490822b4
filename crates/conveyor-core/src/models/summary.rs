//! Plan summary and backend record types.

use jiff::Timestamp;
use serde::{Deserialize, Serialize};

use super::{Plan, PlanStatus, PlanType};

/// Plan record as listed by the backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlanRecord {
    pub plan_id: String,
    pub plan_type: PlanType,
    pub plan_status: PlanStatus,
    #[serde(default)]
    pub plan_name: Option<String>,
}

impl From<&Plan> for PlanRecord {
    fn from(plan: &Plan) -> Self {
        Self {
            plan_id: plan.plan_id.clone(),
            plan_type: plan.plan_type,
            plan_status: plan.plan_status.clone(),
            plan_name: plan.plan_name.clone(),
        }
    }
}

/// Summary information about a locally edited plan.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlanSummary {
    /// Plan ID
    pub plan_id: String,
    /// Display name
    pub plan_name: Option<String>,
    /// Clone or migrate
    pub plan_type: PlanType,
    /// Backend status
    pub plan_status: PlanStatus,
    /// Last update timestamp
    pub updated_at: Timestamp,
    /// Resources in the working snapshot
    pub total_resources: u32,
    /// Resources already created by an earlier clone
    pub cloned_resources: u32,
    /// Resources with pending property edits
    pub pending_updates: u32,
    /// Recorded substitutions
    pub substitutions: u32,
}

impl From<&Plan> for PlanSummary {
    fn from(plan: &Plan) -> Self {
        let total_resources = plan.updated_dependencies.len() as u32;
        let cloned_resources = plan
            .updated_dependencies
            .iter()
            .filter(|node| node.is_cloned)
            .count() as u32;

        Self {
            plan_id: plan.plan_id.clone(),
            plan_name: plan.plan_name.clone(),
            plan_type: plan.plan_type,
            plan_status: plan.plan_status.clone(),
            updated_at: plan.updated_at,
            total_resources,
            cloned_resources,
            pending_updates: plan.property_updates.len() as u32,
            substitutions: plan.substitutions.len() as u32,
        }
    }
}
