//! Pending property edits and the edit dispatcher.

use log::debug;
use serde_json::{Map, Value};

use super::catalog::ResourceCatalog;
use crate::models::{EditResult, Plan, ResourceType, ResourceUpdate};

impl Plan {
    /// Inserts a property edit for `(resource_type, resource_id)` or merges
    /// its fields over the pending entry, later values winning.
    pub fn merge_property_update(
        &mut self,
        resource_type: &ResourceType,
        resource_id: &str,
        properties: Map<String, Value>,
    ) {
        match self
            .property_updates
            .iter_mut()
            .find(|update| update.is(resource_type, resource_id))
        {
            Some(existing) => existing.properties.extend(properties),
            None => self.property_updates.push(ResourceUpdate {
                resource_type: resource_type.clone(),
                resource_id: resource_id.to_string(),
                properties,
            }),
        }
        self.touch();
    }

    /// Pending property edits of a resource.
    pub fn get_update_resource(
        &self,
        resource_type: &ResourceType,
        resource_id: &str,
    ) -> Option<&Map<String, Value>> {
        self.property_updates
            .iter()
            .find(|update| update.is(resource_type, resource_id))
            .map(|update| &update.properties)
    }

    /// Applies an edit read from a resource form.
    ///
    /// Substitutions run the cascade for the resource kind. Everything else
    /// is merged into the pending property edits. Returns `false` when the
    /// edit was ignored.
    pub fn apply_edit(
        &mut self,
        resource_type: &ResourceType,
        resource_id: &str,
        edit: &EditResult,
        catalog: &dyn ResourceCatalog,
    ) -> bool {
        if !edit.needs_submission {
            if edit.is_empty() {
                return false;
            }
            self.merge_property_update(resource_type, resource_id, edit.data.clone());
            return true;
        }

        let Some(dest_id) = edit.destination_id() else {
            debug!("Substitution of {resource_type} {resource_id} has no destination");
            return false;
        };
        let dest_id = dest_id.to_string();

        match resource_type {
            ResourceType::Net => self.change_net(resource_id, &dest_id, catalog),
            ResourceType::Subnet => self.change_subnet(resource_id, &dest_id),
            other => self.change_common_resource(other, resource_id, &dest_id),
        }
        true
    }
}
