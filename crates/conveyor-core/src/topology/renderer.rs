//! Rendering surface behind a [`TopologyView`](super::TopologyView).

use serde::{Deserialize, Serialize};

use super::node::{Link, RenderNode};

/// Force layout parameters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LayoutParams {
    pub width: f64,
    pub height: f64,
    pub gravity: f64,
    pub charge: f64,
    pub link_distance: f64,
}

impl Default for LayoutParams {
    fn default() -> Self {
        Self {
            width: 700.0,
            height: 500.0,
            gravity: 0.25,
            charge: -1200.0,
            link_distance: 90.0,
        }
    }
}

impl LayoutParams {
    /// Parameters of the small overview graph.
    pub fn thumbnail() -> Self {
        Self {
            width: 200.0,
            height: 200.0,
            gravity: 0.1,
            charge: -180.0,
            link_distance: 12.0,
        }
    }

    /// Same parameters on a surface of another size. A zero dimension keeps
    /// the current one.
    pub fn with_size(mut self, width: f64, height: f64) -> Self {
        if width > 0.0 {
            self.width = width;
        }
        if height > 0.0 {
            self.height = height;
        }
        self
    }
}

/// Overview of the whole graph drawn next to the main view.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Thumbnail {
    pub node_ids: Vec<String>,
    pub edges: Vec<(usize, usize)>,
    /// Nodes present in the latest reconciled graph
    pub highlighted: Vec<String>,
    pub params: Option<LayoutParams>,
}

/// Adapter to whatever draws the graph.
pub trait TopologyRenderer {
    /// Redraws the current node and link sets.
    fn render(&mut self, nodes: &[RenderNode], links: &[Link]);

    /// Plays the transient highlight of a node whose image is about to change.
    fn highlight_image(&mut self, node_id: &str, image: &str);

    /// Restarts the force layout.
    fn restart_layout(&mut self, params: &LayoutParams);

    fn render_thumbnail(&mut self, _thumbnail: &Thumbnail) {}
}

/// Renderer for headless use.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullRenderer;

impl TopologyRenderer for NullRenderer {
    fn render(&mut self, _nodes: &[RenderNode], _links: &[Link]) {}

    fn highlight_image(&mut self, _node_id: &str, _image: &str) {}

    fn restart_layout(&mut self, _params: &LayoutParams) {}
}
