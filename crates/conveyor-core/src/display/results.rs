//! Outcome messages of plan-changing operations.

use std::fmt;

use crate::models::{EditResult, ResourceType};

/// Outcome of applying an edit to a resource of a stored plan.
pub struct EditReport<'a> {
    pub plan_id: &'a str,
    pub resource_type: &'a ResourceType,
    pub resource_id: &'a str,
    pub edit: &'a EditResult,
    /// Whether the plan changed
    pub applied: bool,
}

impl fmt::Display for EditReport<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let target = format!("{} `{}`", self.resource_type, self.resource_id);
        if !self.applied {
            return writeln!(f, "No change to {target} in plan {}.", self.plan_id);
        }
        match self.edit.destination_id().filter(|_| self.edit.needs_submission) {
            Some(dest) => writeln!(f, "Replaced {target} with `{dest}` in plan {}.", self.plan_id),
            None => {
                let fields: Vec<&str> = self.edit.data.keys().map(String::as_str).collect();
                writeln!(
                    f,
                    "Updated {target} in plan {}: {}.",
                    self.plan_id,
                    fields.join(", ")
                )
            }
        }
    }
}

/// Outcome of deleting a stored plan.
pub struct DeleteResult<'a> {
    pub plan_id: &'a str,
    pub deleted: bool,
}

impl fmt::Display for DeleteResult<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.deleted {
            writeln!(f, "Deleted plan {}.", self.plan_id)
        } else {
            writeln!(f, "Plan {} was not stored.", self.plan_id)
        }
    }
}
