//! Display implementations for domain models.

use std::fmt;

use serde_json::Value;

use super::datetime::LocalDateTime;
use crate::{
    models::{
        CloneInfo, DependencyNode, Plan, PlanStatus, PlanSummary, PlanType, ResourceShowInfo,
    },
    topology::GraphDiff,
};

impl fmt::Display for PlanType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for PlanStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Compact JSON for inline display; strings are shown without quotes.
fn inline_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

impl fmt::Display for DependencyNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "- **{}** `{}`", self.resource_type, self.id)?;
        if !self.name.is_empty() {
            write!(f, " {}", self.name)?;
        }
        if self.is_cloned {
            write!(f, " (cloned)")?;
        }
        writeln!(f)?;
        for dep in &self.dependencies {
            writeln!(f, "  - → {} {}", dep.resource_type, dep.id)?;
        }
        for ip in &self.fixed_ips {
            if ip.ip_address.is_empty() {
                writeln!(f, "  - IP (unassigned) on {}", ip.subnet_id)?;
            } else {
                writeln!(f, "  - IP {} on {}", ip.ip_address, ip.subnet_id)?;
            }
        }
        Ok(())
    }
}

impl fmt::Display for Plan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.plan_name {
            Some(name) => writeln!(f, "# {name} ({})", self.plan_id)?,
            None => writeln!(f, "# {}", self.plan_id)?,
        }
        writeln!(f)?;
        writeln!(f, "- Type: {}", self.plan_type)?;
        writeln!(f, "- Status: {}", self.plan_status)?;
        writeln!(f, "- Loaded: {}", LocalDateTime(&self.created_at))?;
        writeln!(f, "- Updated: {}", LocalDateTime(&self.updated_at))?;

        writeln!(f, "\n## Resources")?;
        writeln!(f)?;
        if self.updated_dependencies.is_empty() {
            writeln!(f, "No resources in this plan.")?;
        }
        for node in &self.updated_dependencies {
            write!(f, "{node}")?;
        }

        if !self.substitutions.is_empty() {
            writeln!(f, "\n## Substitutions")?;
            writeln!(f)?;
            for sub in &self.substitutions {
                writeln!(
                    f,
                    "- {} `{}` → `{}`",
                    sub.resource_type, sub.src_id, sub.dest_id
                )?;
            }
        }

        if !self.property_updates.is_empty() {
            writeln!(f, "\n## Pending updates")?;
            writeln!(f)?;
            for update in &self.property_updates {
                writeln!(f, "- {} `{}`", update.resource_type, update.resource_id)?;
                for (key, value) in &update.properties {
                    writeln!(f, "  - {key}: {}", inline_value(value))?;
                }
            }
        }

        Ok(())
    }
}

impl fmt::Display for PlanSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let title = self.plan_name.as_deref().unwrap_or("Untitled plan");
        writeln!(f, "## {title} (ID: {})", self.plan_id)?;
        writeln!(f)?;
        writeln!(f, "- **Type**: {}", self.plan_type)?;
        writeln!(f, "- **Status**: {}", self.plan_status)?;
        writeln!(
            f,
            "- **Resources**: {} ({} cloned)",
            self.total_resources, self.cloned_resources
        )?;
        if self.pending_updates > 0 || self.substitutions > 0 {
            writeln!(
                f,
                "- **Edits**: {} updates, {} substitutions",
                self.pending_updates, self.substitutions
            )?;
        }
        writeln!(f, "- **Updated**: {}", LocalDateTime(&self.updated_at))?;
        writeln!(f)
    }
}

impl fmt::Display for ResourceShowInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "# {} {}", self.resource_type, self.resource_id)?;
        writeln!(f)?;
        for (key, value) in self.updated.iter().filter(|(k, _)| *k != "id" && *k != "type") {
            writeln!(f, "- {key}: {}", inline_value(value))?;
        }
        if self.has_server {
            writeln!(f)?;
            writeln!(f, "**Warning**: servers depend on this resource.")?;
        }
        Ok(())
    }
}

impl fmt::Display for CloneInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "## Resources to clone")?;
        writeln!(f)?;
        if self.clone_resources.is_empty() {
            writeln!(f, "Nothing to clone.")?;
        }
        for resource in &self.clone_resources {
            writeln!(f, "- {} `{}`", resource.resource_type, resource.id)?;
        }

        if !self.clone_links.is_empty() {
            writeln!(f, "\n## Links to existing resources")?;
            writeln!(f)?;
            for link in &self.clone_links {
                writeln!(
                    f,
                    "- {} `{}` → {} `{}`",
                    link.source.resource_type, link.source.id, link.target.resource_type, link.target.id
                )?;
            }
        }

        if !self.replace_resources.is_empty() {
            writeln!(f, "\n## Replacements")?;
            writeln!(f)?;
            for sub in &self.replace_resources {
                writeln!(f, "- {} `{}` → `{}`", sub.resource_type, sub.src_id, sub.dest_id)?;
            }
        }

        if !self.update_resources.is_empty() {
            writeln!(f, "\n## Updated resources")?;
            writeln!(f)?;
            for update in &self.update_resources {
                let keys: Vec<&str> = update.properties.keys().map(String::as_str).collect();
                writeln!(
                    f,
                    "- {} `{}`: {}",
                    update.resource_type,
                    update.resource_id,
                    keys.join(", ")
                )?;
            }
        }
        Ok(())
    }
}

impl fmt::Display for GraphDiff {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            return writeln!(f, "Topology unchanged.");
        }
        for node in &self.added {
            writeln!(f, "+ {} `{}`", node.resource_type.short_name(), node.id)?;
        }
        for id in &self.removed {
            writeln!(f, "- `{id}`")?;
        }
        for update in &self.updated {
            writeln!(f, "~ `{}`", update.id)?;
        }
        Ok(())
    }
}
