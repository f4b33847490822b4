use super::*;
use crate::models::{DependencyNode, ResourceType};

/// Records every call made by the view.
#[derive(Default)]
struct RecordingRenderer {
    renders: usize,
    restarts: usize,
    highlights: Vec<(String, String)>,
    thumbnails: Vec<Thumbnail>,
}

impl TopologyRenderer for RecordingRenderer {
    fn render(&mut self, _nodes: &[RenderNode], _links: &[Link]) {
        self.renders += 1;
    }

    fn highlight_image(&mut self, node_id: &str, image: &str) {
        self.highlights.push((node_id.to_string(), image.to_string()));
    }

    fn restart_layout(&mut self, _params: &LayoutParams) {
        self.restarts += 1;
    }

    fn render_thumbnail(&mut self, thumbnail: &Thumbnail) {
        self.thumbnails.push(thumbnail.clone());
    }
}

fn dependencies() -> Vec<DependencyNode> {
    vec![
        DependencyNode::new(ResourceType::Net, "net1"),
        DependencyNode::new(ResourceType::Subnet, "sub1").depends_on(ResourceType::Net, "net1"),
        DependencyNode::new(ResourceType::Port, "port1")
            .depends_on(ResourceType::Subnet, "sub1")
            .depends_on(ResourceType::Net, "net1"),
    ]
}

fn loaded_view() -> TopologyView<RecordingRenderer> {
    let mut view = TopologyView::new(RecordingRenderer::default());
    view.load(GraphData::from_dependencies(&dependencies()));
    view
}

fn link(source: usize, target: usize) -> (usize, usize) {
    (source, target)
}

fn link_pairs(view: &TopologyView<RecordingRenderer>) -> Vec<(usize, usize)> {
    view.links()
        .iter()
        .map(|link| (link.source, link.target))
        .collect()
}

#[test]
fn test_graph_data_from_dependencies() {
    let graph = GraphData::from_dependencies(&[
        DependencyNode::new(ResourceType::Server, "vm1").depends_on(ResourceType::Volume, "vol1"),
        DependencyNode::new(ResourceType::Volume, "vol1").cloned(),
        DependencyNode::new(ResourceType::from("OS::Heat::Stack"), "stack1"),
    ]);

    let server = &graph.nodes[0];
    assert_eq!(server.required_by, vec!["vol1".to_string()]);
    assert_eq!(server.status, "Node Topology");
    assert_eq!(server.link_type, "relation");
    assert_eq!(server.image, "conveyordashboard/img/server-green.svg");
    assert!(server.info_box.contains("dependencies: [vol1]"));

    assert!(graph.nodes[1].cloned);
    assert_eq!(graph.nodes[1].image, "conveyordashboard/img/volume-gray.svg");
    assert_eq!(graph.nodes[2].image, "conveyordashboard/img/unknown-green.svg");
}

#[test]
fn test_truncate_type_keeps_trailing_segments() {
    assert_eq!(truncate_type("OS::Nova::Server", 45), "OS::Nova::Server");
    assert_eq!(truncate_type("OS::Neutron::SecurityGroup", 20), "...SecurityGroup");
    assert_eq!(truncate_type("OS::Neutron::Port", 17), "OS::Neutron::Port");
    assert_eq!(truncate_type("OS::Neutron::Port", 16), "...Neutron::Port");
}

#[test]
fn test_diff_graphs_reports_changed_fields_only() {
    let old = GraphData::from_dependencies(&dependencies()).nodes;
    let mut new = old.clone();
    new.remove(0);
    new[0].status = "Updating".to_string();
    new[1].x = 42.0;
    new.push(RenderNode::from_dependency(&DependencyNode::new(
        ResourceType::Server,
        "vm1",
    )));

    let diff = diff_graphs(&old, &new);

    assert_eq!(diff.removed, vec!["net1".to_string()]);
    assert_eq!(diff.added.len(), 1);
    assert_eq!(diff.added[0].id, "vm1");
    assert_eq!(
        diff.updated,
        vec![NodeUpdate {
            id: "sub1".to_string(),
            status: Some("Updating".to_string()),
            info_box: None,
            image: None,
            required_by: None,
        }]
    );
    assert!(diff.changes_structure());
    assert!(diff_graphs(&old, &old).is_empty());
}

#[test]
fn test_load_builds_deduplicated_links() {
    let view = loaded_view();

    assert_eq!(view.state(), ViewState::Loaded);
    assert_eq!(link_pairs(&view), vec![link(1, 0), link(2, 0), link(2, 1)]);
    assert_eq!(view.layout_generation(), 1);
    assert_eq!(view.renderer().renders, 1);

    let thumbnail = view.thumbnail();
    assert_eq!(thumbnail.node_ids.len(), 3);
    assert_eq!(thumbnail.edges.len(), 3);
    assert_eq!(thumbnail.params, Some(LayoutParams::thumbnail()));
    assert_eq!(view.layout(), &LayoutParams::default());
}

#[test]
fn test_build_links_skips_unknown_targets() {
    let mut view = TopologyView::new(NullRenderer);
    let mut graph = GraphData::from_dependencies(&dependencies());
    graph.nodes[0].required_by.push("ghost".to_string());

    view.load(graph);

    assert_eq!(view.links().len(), 3);
}

#[test]
fn test_status_only_update_keeps_nodes_and_positions() {
    let mut view = loaded_view();
    assert!(view.set_position("sub1", 120.0, 80.0));

    let mut graph = GraphData::from_dependencies(&dependencies());
    graph.nodes[1].status = "Cloning".to_string();
    let diff = view.update_topo(graph.clone());
    assert!(!diff.changes_structure());

    graph.nodes[1].status = "Cloned".to_string();
    view.update_topo(graph);

    let subnet = view.find_node("sub1").expect("node should be kept");
    assert_eq!(subnet.status, "Cloned");
    assert_eq!((subnet.x, subnet.y), (120.0, 80.0));
    assert_eq!(view.nodes().len(), 3);
    assert_eq!(view.layout_generation(), 1);
    assert_eq!(view.renderer().restarts, 1);
    assert_eq!(view.state(), ViewState::Loaded);
}

#[test]
fn test_image_change_highlights_before_swap() {
    let mut view = loaded_view();
    let mut graph = GraphData::from_dependencies(&dependencies());
    graph.nodes[2].image = resource_image(&ResourceType::Port, true);

    view.update_topo(graph);

    assert_eq!(
        view.renderer().highlights,
        vec![(
            "port1".to_string(),
            "conveyordashboard/img/port-gray.svg".to_string()
        )]
    );
    assert_eq!(
        view.find_node("port1").map(|node| node.image.as_str()),
        Some("conveyordashboard/img/port-gray.svg")
    );
}

#[test]
fn test_update_topo_adds_and_removes_nodes() {
    let mut view = loaded_view();
    view.set_position("port1", 10.0, 20.0);

    let graph = GraphData::from_dependencies(&[
        DependencyNode::new(ResourceType::Subnet, "sub2").depends_on(ResourceType::Net, "net1"),
        DependencyNode::new(ResourceType::Net, "net1"),
        DependencyNode::new(ResourceType::Port, "port1")
            .depends_on(ResourceType::Subnet, "sub2")
            .depends_on(ResourceType::Net, "net1"),
    ]);
    let diff = view.update_topo(graph);

    assert_eq!(diff.removed, vec!["sub1".to_string()]);
    assert_eq!(diff.added.len(), 1);

    let ids: Vec<&str> = view.nodes().iter().map(|node| node.id.as_str()).collect();
    assert_eq!(ids, vec!["net1", "port1", "sub2"]);
    assert!(link_pairs(&view).contains(&link(2, 0)));
    assert_eq!(view.find_node("port1").map(|node| node.x), Some(10.0));
    assert_eq!(view.layout_generation(), 2);
    assert!(!view.needs_update());
}

#[test]
fn test_update_topo_redraws_rewired_links() {
    let mut view = TopologyView::new(RecordingRenderer::default());
    view.load(GraphData::from_dependencies(&[
        DependencyNode::new(ResourceType::SecurityGroup, "sg1"),
        DependencyNode::new(ResourceType::SecurityGroup, "sg2"),
        DependencyNode::new(ResourceType::Port, "port1")
            .depends_on(ResourceType::SecurityGroup, "sg1"),
    ]));
    view.set_position("port1", 10.0, 20.0);
    let generation = view.layout_generation();

    let diff = view.update_topo(GraphData::from_dependencies(&[
        DependencyNode::new(ResourceType::SecurityGroup, "sg2"),
        DependencyNode::new(ResourceType::Port, "port1")
            .depends_on(ResourceType::SecurityGroup, "sg2"),
    ]));

    assert_eq!(diff.removed, vec!["sg1".to_string()]);
    assert!(diff.added.is_empty());
    assert!(diff.changes_links());

    let port = view.find_node_index("port1").expect("port1 should survive");
    let sg2 = view.find_node_index("sg2").expect("sg2 should survive");
    assert_eq!(link_pairs(&view), vec![link(port, sg2)]);
    assert_eq!(
        view.find_node("port1").map(|node| node.required_by.clone()),
        Some(vec!["sg2".to_string()])
    );
    assert_eq!(view.find_node("port1").map(|node| (node.x, node.y)), Some((10.0, 20.0)));
    assert_eq!(view.layout_generation(), generation + 1);
}

#[test]
fn test_rewired_edges_render_without_layout_restart() {
    let mut view = loaded_view();

    let diff = view.update_topo(GraphData::from_dependencies(&[
        DependencyNode::new(ResourceType::Net, "net1"),
        DependencyNode::new(ResourceType::Subnet, "sub1").depends_on(ResourceType::Net, "net1"),
        DependencyNode::new(ResourceType::Port, "port1").depends_on(ResourceType::Net, "net1"),
    ]));

    assert!(!diff.changes_structure());
    assert_eq!(diff.updated.len(), 1);
    assert_eq!(diff.updated[0].required_by, Some(vec!["net1".to_string()]));
    assert_eq!(link_pairs(&view), vec![link(1, 0), link(2, 0)]);
    assert_eq!(view.renderer().renders, 2);
    assert_eq!(view.renderer().restarts, 1);
}

#[test]
fn test_remove_node_reindexes_links() {
    let mut view = loaded_view();

    let removed = view.remove_node("net1").expect("node should exist");
    assert_eq!(removed.id, "net1");
    assert!(view.needs_update());
    assert_eq!(link_pairs(&view), vec![link(1, 0)]);
    assert_eq!(view.find_node_index("port1"), Some(1));

    assert!(view.remove_node("net1").is_none());
}

#[test]
fn test_add_node_waits_for_build_links() {
    let mut view = loaded_view();
    view.add_node(RenderNode::from_dependency(
        &DependencyNode::new(ResourceType::Server, "vm1").depends_on(ResourceType::Port, "port1"),
    ));
    assert!(view.needs_update());
    assert_eq!(view.links().len(), 3);

    view.build_links();
    assert!(link_pairs(&view).contains(&link(3, 2)));
}

#[test]
fn test_update_topo_highlights_thumbnail_nodes() {
    let mut view = loaded_view();
    let graph = GraphData::from_dependencies(&dependencies()[..2]);

    view.update_topo(graph);

    assert_eq!(
        view.thumbnail().highlighted,
        vec!["net1".to_string(), "sub1".to_string()]
    );
    assert_eq!(view.renderer().thumbnails.len(), 2);
}

#[test]
fn test_update_topo_on_fresh_view_loads() {
    let mut view = TopologyView::new(RecordingRenderer::default());
    let diff = view.update_topo(GraphData::from_dependencies(&dependencies()));

    assert_eq!(diff.added.len(), 3);
    assert_eq!(view.state(), ViewState::Loaded);
    assert_eq!(view.links().len(), 3);
}
