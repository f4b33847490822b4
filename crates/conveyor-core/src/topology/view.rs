//! Incrementally reconciled topology view.

use std::collections::HashSet;

use log::{debug, warn};

use super::{
    diff::{diff_graphs, GraphDiff},
    node::{GraphData, Link, RenderNode},
    renderer::{LayoutParams, Thumbnail, TopologyRenderer},
};

/// Lifecycle of a view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewState {
    Uninitialized,
    Loaded,
    Reconciling,
}

/// Node and link sets of a rendered topology.
///
/// After [`load`](Self::load) the view is only ever patched: nodes that
/// survive a reconciliation keep their identity and layout position.
pub struct TopologyView<R> {
    renderer: R,
    state: ViewState,
    layout: LayoutParams,
    nodes: Vec<RenderNode>,
    links: Vec<Link>,
    thumbnail: Thumbnail,
    needs_update: bool,
    layout_generation: u64,
}

impl<R: TopologyRenderer> TopologyView<R> {
    pub fn new(renderer: R) -> Self {
        Self::with_layout(renderer, LayoutParams::default())
    }

    pub fn with_layout(renderer: R, layout: LayoutParams) -> Self {
        Self {
            renderer,
            state: ViewState::Uninitialized,
            layout,
            nodes: Vec::new(),
            links: Vec::new(),
            thumbnail: Thumbnail::default(),
            needs_update: false,
            layout_generation: 0,
        }
    }

    pub fn state(&self) -> ViewState {
        self.state
    }

    pub fn nodes(&self) -> &[RenderNode] {
        &self.nodes
    }

    pub fn links(&self) -> &[Link] {
        &self.links
    }

    pub fn thumbnail(&self) -> &Thumbnail {
        &self.thumbnail
    }

    pub fn layout(&self) -> &LayoutParams {
        &self.layout
    }

    /// Whether the node set changed since the last layout restart.
    pub fn needs_update(&self) -> bool {
        self.needs_update
    }

    /// Number of times the layout was (re)started.
    pub fn layout_generation(&self) -> u64 {
        self.layout_generation
    }

    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    pub fn renderer_mut(&mut self) -> &mut R {
        &mut self.renderer
    }

    /// Initial build of the view from a full graph.
    pub fn load(&mut self, graph: GraphData) {
        self.nodes = graph.nodes;
        self.build_links();
        self.refresh();

        self.thumbnail = Thumbnail {
            node_ids: self.nodes.iter().map(|node| node.id.clone()).collect(),
            edges: self
                .links
                .iter()
                .map(|link| (link.source, link.target))
                .collect(),
            highlighted: Vec::new(),
            params: Some(LayoutParams::thumbnail()),
        };
        self.renderer.render_thumbnail(&self.thumbnail);

        self.state = ViewState::Loaded;
        debug!(
            "Topology loaded with {} nodes and {} links",
            self.nodes.len(),
            self.links.len()
        );
    }

    /// Reconciles the view against `graph` and returns what was applied.
    ///
    /// A view that was never loaded is loaded instead.
    pub fn update_topo(&mut self, graph: GraphData) -> GraphDiff {
        if self.state == ViewState::Uninitialized {
            let diff = diff_graphs(&[], &graph.nodes);
            self.load(graph);
            return diff;
        }

        self.state = ViewState::Reconciling;
        self.needs_update = false;
        let diff = diff_graphs(&self.nodes, &graph.nodes);

        for id in &diff.removed {
            self.remove_node(id);
        }

        let present: HashSet<&str> = graph.nodes.iter().map(|node| node.id.as_str()).collect();
        self.thumbnail.highlighted = self
            .thumbnail
            .node_ids
            .iter()
            .filter(|id| present.contains(id.as_str()))
            .cloned()
            .collect();
        self.renderer.render_thumbnail(&self.thumbnail);

        for update in &diff.updated {
            let Some(index) = self.find_node_index(&update.id) else {
                continue;
            };
            if let Some(image) = &update.image {
                self.renderer.highlight_image(&update.id, image);
            }
            let node = &mut self.nodes[index];
            if let Some(status) = &update.status {
                node.status = status.clone();
            }
            if let Some(image) = &update.image {
                node.image = image.clone();
            }
            if let Some(info_box) = &update.info_box {
                node.info_box = info_box.clone();
            }
            if let Some(required_by) = &update.required_by {
                node.required_by = required_by.clone();
            }
        }

        for node in &diff.added {
            self.add_node(node.clone());
        }
        if !diff.added.is_empty() || diff.changes_links() {
            self.build_links();
        }

        if self.needs_update {
            self.refresh();
        } else if diff.changes_links() {
            self.renderer.render(&self.nodes, &self.links);
        }
        self.state = ViewState::Loaded;
        diff
    }

    pub fn find_node(&self, id: &str) -> Option<&RenderNode> {
        self.nodes.iter().find(|node| node.id == id)
    }

    pub fn find_node_index(&self, id: &str) -> Option<usize> {
        self.nodes.iter().position(|node| node.id == id)
    }

    /// Moves a node, as done by the layout engine or a drag.
    pub fn set_position(&mut self, id: &str, x: f64, y: f64) -> bool {
        match self.nodes.iter_mut().find(|node| node.id == id) {
            Some(node) => {
                node.x = x;
                node.y = y;
                true
            }
            None => false,
        }
    }

    /// Removes a node and every link touching it. Remaining links are
    /// re-indexed to the shifted node positions.
    pub fn remove_node(&mut self, id: &str) -> Option<RenderNode> {
        let index = self.find_node_index(id)?;

        self.links
            .retain(|link| link.source != index && link.target != index);
        let node = self.nodes.remove(index);
        for link in &mut self.links {
            if link.source > index {
                link.source -= 1;
            }
            if link.target > index {
                link.target -= 1;
            }
        }

        self.needs_update = true;
        Some(node)
    }

    /// Appends a node. Links to it appear on the next [`build_links`](Self::build_links).
    pub fn add_node(&mut self, node: RenderNode) {
        self.nodes.push(node);
        self.needs_update = true;
    }

    /// Rebuilds the link set from the nodes' `required_by` lists.
    ///
    /// Each node contributes its own edges and the edges of nodes that
    /// require it; duplicates are dropped. Edges to unknown ids are skipped.
    pub fn build_links(&mut self) {
        let mut links = Vec::new();
        let mut seen = HashSet::new();

        for (source, node) in self.nodes.iter().enumerate() {
            for required in &node.required_by {
                match self.find_node_index(required) {
                    Some(target) => {
                        if seen.insert((source, target)) {
                            links.push(Link {
                                source,
                                target,
                                link_type: node.link_type.clone(),
                            });
                        }
                    }
                    None => warn!("Skipping link {} -> {required}: no such node", node.id),
                }
            }

            for (dependent, other) in self.nodes.iter().enumerate() {
                if other.required_by.iter().any(|id| *id == node.id)
                    && seen.insert((dependent, source))
                {
                    links.push(Link {
                        source: dependent,
                        target: source,
                        link_type: other.link_type.clone(),
                    });
                }
            }
        }

        self.links = links;
    }

    fn refresh(&mut self) {
        self.renderer.render(&self.nodes, &self.links);
        self.renderer.restart_layout(&self.layout);
        self.layout_generation += 1;
        self.needs_update = false;
    }
}
