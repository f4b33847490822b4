//! Filter types for querying plans.

use serde::{Deserialize, Serialize};

use super::{PlanRecord, PlanStatus, PlanType};

/// Filter options for querying plans, locally or on the backend.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PlanFilter {
    /// Filter by plan type
    pub plan_type: Option<PlanType>,

    /// Filter by backend status
    pub plan_status: Option<PlanStatus>,

    /// Filter by plan name (case-insensitive partial match)
    pub name_contains: Option<String>,
}

impl PlanFilter {
    /// Filter for plans of one type.
    pub fn for_type(plan_type: PlanType) -> Self {
        Self {
            plan_type: Some(plan_type),
            ..Default::default()
        }
    }

    /// Whether a record passes every set criterion.
    pub fn matches(&self, record: &PlanRecord) -> bool {
        if self.plan_type.is_some_and(|t| t != record.plan_type) {
            return false;
        }
        if let Some(ref status) = self.plan_status {
            if *status != record.plan_status {
                return false;
            }
        }
        if let Some(ref needle) = self.name_contains {
            let needle = needle.to_lowercase();
            let name = record.plan_name.as_deref().unwrap_or_default().to_lowercase();
            if !name.contains(&needle) {
                return false;
            }
        }
        true
    }
}
