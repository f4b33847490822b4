//! Render-side graph data.

use serde::{Deserialize, Serialize};

use crate::models::{DependencyNode, ResourceType};

const IMAGE_DIR: &str = "conveyordashboard/img/";
const NODE_STATUS: &str = "Node Topology";
const RELATION: &str = "relation";
const INFO_TYPE_WIDTH: usize = 45;

fn default_link_type() -> String {
    RELATION.to_string()
}

/// A node of the rendered topology.
///
/// `required_by` lists the ids this node depends on, which is how the graph
/// endpoint names the relation. `x` and `y` are owned by the layout and are
/// never overwritten by reconciliation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RenderNode {
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(rename = "type")]
    pub resource_type: ResourceType,
    #[serde(default)]
    pub cloned: bool,
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub image: String,
    /// Opaque detail fragment shown on hover
    #[serde(default)]
    pub info_box: String,
    #[serde(default)]
    pub required_by: Vec<String>,
    #[serde(default = "default_link_type")]
    pub link_type: String,
    #[serde(default)]
    pub x: f64,
    #[serde(default)]
    pub y: f64,
}

impl RenderNode {
    /// Builds the render node of a dependency node.
    pub fn from_dependency(node: &DependencyNode) -> Self {
        let image = resource_image(&node.resource_type, node.is_cloned);
        Self {
            id: node.id.clone(),
            name: node.name.clone(),
            resource_type: node.resource_type.clone(),
            cloned: node.is_cloned,
            status: NODE_STATUS.to_string(),
            info_box: info_box(node),
            image,
            required_by: node.dependencies.iter().map(|dep| dep.id.clone()).collect(),
            link_type: default_link_type(),
            x: 0.0,
            y: 0.0,
        }
    }
}

/// Directed edge between two rendered nodes, by index into the node list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Link {
    pub source: usize,
    pub target: usize,
    pub link_type: String,
}

/// Graph payload as delivered by the topology endpoint.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GraphData {
    pub nodes: Vec<RenderNode>,
}

impl GraphData {
    pub fn from_dependencies(dependencies: &[DependencyNode]) -> Self {
        Self {
            nodes: dependencies.iter().map(RenderNode::from_dependency).collect(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}

/// Image of a resource kind: green while pending, gray once cloned.
pub fn resource_image(resource_type: &ResourceType, cloned: bool) -> String {
    let stem = match resource_type {
        ResourceType::Other(_) => "unknown".to_string(),
        known => known.short_name().to_ascii_lowercase(),
    };
    let color = if cloned { "gray" } else { "green" };
    format!("{IMAGE_DIR}{stem}-{color}.svg")
}

/// Shortens a type tag to at most `width` characters, keeping whole
/// trailing `::` segments.
pub fn truncate_type(type_tag: &str, width: usize) -> String {
    if type_tag.len() < width {
        return type_tag.to_string();
    }

    let mut parts = type_tag.rsplit("::");
    let mut kept = parts.next().unwrap_or_default().to_string();
    for part in parts {
        if kept.len() + part.len() + 2 > width {
            return format!("...{kept}");
        }
        kept = format!("{part}::{kept}");
    }
    kept
}

fn info_box(node: &DependencyNode) -> String {
    let dependencies: Vec<&str> = node.dependencies.iter().map(|dep| dep.id.as_str()).collect();
    format!(
        "name: {}\ntype: {}\nid: {}\ncloned: {}\ndependencies: [{}]",
        node.name,
        truncate_type(node.resource_type.as_str(), INFO_TYPE_WIDTH),
        node.id,
        node.is_cloned,
        dependencies.join(", ")
    )
}
