//! Pure difference between two rendered graphs.

use std::collections::{HashMap, HashSet};

use serde::Serialize;

use super::node::RenderNode;

/// Changed mutable fields of a node present in both graphs.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct NodeUpdate {
    pub id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub info_box: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    /// New dependency ids, set when the node's edges were rewired
    #[serde(skip_serializing_if = "Option::is_none")]
    pub required_by: Option<Vec<String>>,
}

impl NodeUpdate {
    pub fn is_empty(&self) -> bool {
        self.status.is_none()
            && self.info_box.is_none()
            && self.image.is_none()
            && self.required_by.is_none()
    }
}

/// What reconciling `old` into `new` has to do.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct GraphDiff {
    /// Nodes only in the new graph, in its order
    pub added: Vec<RenderNode>,
    /// Ids only in the old graph, in its order
    pub removed: Vec<String>,
    pub updated: Vec<NodeUpdate>,
}

impl GraphDiff {
    pub fn is_empty(&self) -> bool {
        self.added.is_empty() && self.removed.is_empty() && self.updated.is_empty()
    }

    /// Whether nodes enter or leave the graph.
    pub fn changes_structure(&self) -> bool {
        !self.added.is_empty() || !self.removed.is_empty()
    }

    /// Whether a surviving node now depends on different nodes.
    pub fn changes_links(&self) -> bool {
        self.updated.iter().any(|update| update.required_by.is_some())
    }
}

fn changed(old: &str, new: &str) -> Option<String> {
    (old != new).then(|| new.to_string())
}

/// Nodes are matched by id. Layout fields never show up in the diff.
pub fn diff_graphs(old: &[RenderNode], new: &[RenderNode]) -> GraphDiff {
    let old_by_id: HashMap<&str, &RenderNode> =
        old.iter().map(|node| (node.id.as_str(), node)).collect();
    let new_ids: HashSet<&str> = new.iter().map(|node| node.id.as_str()).collect();

    let removed = old
        .iter()
        .filter(|node| !new_ids.contains(node.id.as_str()))
        .map(|node| node.id.clone())
        .collect();

    let mut added = Vec::new();
    let mut updated = Vec::new();
    for node in new {
        match old_by_id.get(node.id.as_str()) {
            Some(current) => {
                let update = NodeUpdate {
                    id: node.id.clone(),
                    status: changed(&current.status, &node.status),
                    info_box: changed(&current.info_box, &node.info_box),
                    image: changed(&current.image, &node.image),
                    required_by: (current.required_by != node.required_by)
                        .then(|| node.required_by.clone()),
                };
                if !update.is_empty() {
                    updated.push(update);
                }
            }
            None => added.push(node.clone()),
        }
    }

    GraphDiff {
        added,
        removed,
        updated,
    }
}
