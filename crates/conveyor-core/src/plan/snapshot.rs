//! Structural queries and edits over a single dependency snapshot.

use std::collections::HashSet;

use crate::{
    graph::DependencyIndex,
    models::{DependencyNode, DependencyRef, ResourceType},
};

/// Kinds affected when a resource of `resource_type` is substituted.
pub fn dependent_types(resource_type: &ResourceType) -> Vec<ResourceType> {
    match resource_type {
        ResourceType::Net => vec![ResourceType::Port, ResourceType::Subnet],
        ResourceType::Subnet => vec![ResourceType::Port],
        _ => Vec::new(),
    }
}

/// Finds `(resource_type, id)` in the snapshot.
pub fn get_dependency<'a>(
    snapshot: &'a [DependencyNode],
    resource_type: &ResourceType,
    id: &str,
) -> Option<&'a DependencyNode> {
    snapshot.iter().find(|node| node.is(resource_type, id))
}

pub(crate) fn get_dependency_mut<'a>(
    snapshot: &'a mut [DependencyNode],
    resource_type: &ResourceType,
    id: &str,
) -> Option<&'a mut DependencyNode> {
    snapshot.iter_mut().find(|node| node.is(resource_type, id))
}

/// Removes every node matching `(resource_type, id)`.
pub fn remove_dependency(snapshot: &mut Vec<DependencyNode>, resource_type: &ResourceType, id: &str) {
    snapshot.retain(|node| !node.is(resource_type, id));
}

/// Whether a node with the same type and id is in the snapshot.
pub fn check_dep_in(node: &DependencyNode, snapshot: &[DependencyNode]) -> bool {
    get_dependency(snapshot, &node.resource_type, &node.id).is_some()
}

/// Ids of `target_type` nodes transitively linked (either direction) to the
/// `(resource_type, ids)` seeds, minus `exclude_ids`.
///
/// The result has no duplicates and follows breadth-first discovery order.
pub fn search_dependent_items(
    snapshot: &[DependencyNode],
    resource_type: &ResourceType,
    ids: &[String],
    target_type: &ResourceType,
    exclude_ids: &[String],
) -> Vec<String> {
    let index = DependencyIndex::build(snapshot);
    let seeds: Vec<usize> = ids
        .iter()
        .filter_map(|id| index.position(resource_type, id))
        .collect();

    let mut seen = HashSet::new();
    index
        .reachable_of_type(&seeds, target_type)
        .into_iter()
        .map(|idx| index.node(idx).id.clone())
        .filter(|id| !exclude_ids.contains(id))
        .filter(|id| seen.insert(id.clone()))
        .collect()
}

/// Nodes linked to `(resource_type, id)` in either direction whose kind is
/// one of the dependent kinds.
///
/// `types_override` replaces the [`dependent_types`] table; an empty
/// override yields nothing.
pub fn get_dependent_resources(
    snapshot: &[DependencyNode],
    resource_type: &ResourceType,
    id: &str,
    types_override: Option<&[ResourceType]>,
    exclude_ids: &[String],
) -> Vec<DependencyNode> {
    let allowed = match types_override {
        Some(types) => types.to_vec(),
        None => dependent_types(resource_type),
    };
    if allowed.is_empty() {
        return Vec::new();
    }

    let index = DependencyIndex::build(snapshot);
    let Some(position) = index.position(resource_type, id) else {
        return Vec::new();
    };

    index
        .neighbours(position)
        .into_iter()
        .map(|idx| index.node(idx))
        .filter(|node| allowed.contains(&node.resource_type))
        .filter(|node| !exclude_ids.contains(&node.id))
        .cloned()
        .collect()
}

/// Merges the source node into an existing destination node, or renames it
/// when the destination is not in the snapshot yet.
pub fn replace_resource_self(
    snapshot: &mut Vec<DependencyNode>,
    resource_type: &ResourceType,
    src_id: &str,
    dest_id: &str,
) {
    if get_dependency(snapshot, resource_type, dest_id).is_some() {
        remove_dependency(snapshot, resource_type, src_id);
    } else if let Some(node) = get_dependency_mut(snapshot, resource_type, src_id) {
        node.id = dest_id.to_string();
    }
}

/// Points every edge at `(resource_type, src_id)` to `dest_id` instead.
pub(crate) fn rewrite_edges(
    snapshot: &mut [DependencyNode],
    resource_type: &ResourceType,
    src_id: &str,
    dest_id: &str,
) {
    for node in snapshot.iter_mut() {
        repoint_edges(&mut node.dependencies, resource_type, src_id, dest_id);
    }
}

/// Repoints matching edges of one node, dropping duplicates this creates.
pub(crate) fn repoint_edges(
    dependencies: &mut Vec<DependencyRef>,
    resource_type: &ResourceType,
    src_id: &str,
    dest_id: &str,
) {
    let mut changed = false;
    for dep in dependencies.iter_mut().filter(|dep| dep.is(resource_type, src_id)) {
        dep.id = dest_id.to_string();
        changed = true;
    }
    if changed {
        let mut seen = HashSet::new();
        dependencies.retain(|dep| seen.insert(dep.clone()));
    }
}
