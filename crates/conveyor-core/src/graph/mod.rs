//! Arena index over a dependency snapshot.
//!
//! Nodes are addressed by their position in the snapshot; forward
//! (`dependencies`) and reverse (dependents) adjacency lists are built once,
//! so traversals never mutate the nodes themselves.

use std::collections::{HashMap, HashSet, VecDeque};

use log::debug;

use crate::models::{DependencyNode, ResourceType};

/// Read-only adjacency view of a snapshot.
pub struct DependencyIndex<'a> {
    nodes: &'a [DependencyNode],
    by_id: HashMap<&'a str, Vec<usize>>,
    forward: Vec<Vec<usize>>,
    reverse: Vec<Vec<usize>>,
}

impl<'a> DependencyIndex<'a> {
    /// Builds the index. Edges pointing at nodes missing from the snapshot
    /// are dropped.
    pub fn build(nodes: &'a [DependencyNode]) -> Self {
        let mut by_id: HashMap<&'a str, Vec<usize>> = HashMap::new();
        for (idx, node) in nodes.iter().enumerate() {
            by_id.entry(node.id.as_str()).or_default().push(idx);
        }

        let mut index = Self {
            nodes,
            by_id,
            forward: vec![Vec::new(); nodes.len()],
            reverse: vec![Vec::new(); nodes.len()],
        };

        for (idx, node) in nodes.iter().enumerate() {
            for dep in &node.dependencies {
                match index.position(&dep.resource_type, &dep.id) {
                    Some(target) => {
                        index.forward[idx].push(target);
                        index.reverse[target].push(idx);
                    }
                    None => debug!(
                        "Dangling edge {} {} -> {} {}",
                        node.resource_type, node.id, dep.resource_type, dep.id
                    ),
                }
            }
        }

        index
    }

    /// Position of `(resource_type, id)` in the snapshot.
    pub fn position(&self, resource_type: &ResourceType, id: &str) -> Option<usize> {
        self.by_id
            .get(id)?
            .iter()
            .copied()
            .find(|&idx| self.nodes[idx].resource_type == *resource_type)
    }

    pub fn node(&self, idx: usize) -> &'a DependencyNode {
        &self.nodes[idx]
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Nodes `idx` depends on.
    pub fn dependencies(&self, idx: usize) -> &[usize] {
        &self.forward[idx]
    }

    /// Nodes depending on `idx`.
    pub fn dependents(&self, idx: usize) -> &[usize] {
        &self.reverse[idx]
    }

    /// Nodes linked to `idx` in either direction, without duplicates.
    pub fn neighbours(&self, idx: usize) -> Vec<usize> {
        let mut seen = HashSet::new();
        self.forward[idx]
            .iter()
            .chain(self.reverse[idx].iter())
            .copied()
            .filter(|&n| n != idx && seen.insert(n))
            .collect()
    }

    /// Breadth-first closure from `seeds` over both edge directions,
    /// returning every reached node of `target_type` in discovery order.
    ///
    /// Matching nodes are collected but not expanded. Seeds themselves are
    /// never reported.
    pub fn reachable_of_type(&self, seeds: &[usize], target_type: &ResourceType) -> Vec<usize> {
        let mut visited: HashSet<usize> = seeds.iter().copied().collect();
        let mut queue: VecDeque<usize> = seeds.iter().copied().collect();
        let mut found = Vec::new();

        while let Some(current) = queue.pop_front() {
            for next in self.neighbours(current) {
                if !visited.insert(next) {
                    continue;
                }
                if self.nodes[next].resource_type == *target_type {
                    found.push(next);
                } else {
                    queue.push_back(next);
                }
            }
        }

        found
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Vec<DependencyNode> {
        vec![
            DependencyNode::new(ResourceType::Net, "net1"),
            DependencyNode::new(ResourceType::Subnet, "sub1").depends_on(ResourceType::Net, "net1"),
            DependencyNode::new(ResourceType::Port, "port1")
                .depends_on(ResourceType::Subnet, "sub1")
                .depends_on(ResourceType::Net, "net1"),
            DependencyNode::new(ResourceType::Server, "vm1").depends_on(ResourceType::Port, "port1"),
        ]
    }

    #[test]
    fn test_position_distinguishes_types() {
        let mut nodes = sample();
        nodes.push(DependencyNode::new(ResourceType::Volume, "net1"));
        let index = DependencyIndex::build(&nodes);
        assert_eq!(index.position(&ResourceType::Net, "net1"), Some(0));
        assert_eq!(index.position(&ResourceType::Volume, "net1"), Some(4));
        assert_eq!(index.position(&ResourceType::Router, "net1"), None);
    }

    #[test]
    fn test_adjacency_lists() {
        let nodes = sample();
        let index = DependencyIndex::build(&nodes);
        assert_eq!(index.dependencies(2), &[1, 0]);
        assert_eq!(index.dependents(0), &[1, 2]);
        assert_eq!(index.neighbours(1), vec![0, 2]);
    }

    #[test]
    fn test_dangling_edges_are_dropped() {
        let nodes = vec![DependencyNode::new(ResourceType::Port, "p").depends_on(ResourceType::Net, "gone")];
        let index = DependencyIndex::build(&nodes);
        assert!(index.dependencies(0).is_empty());
    }

    #[test]
    fn test_reachable_of_type_finds_transitive_server() {
        let nodes = sample();
        let index = DependencyIndex::build(&nodes);
        assert_eq!(index.reachable_of_type(&[0], &ResourceType::Server), vec![3]);
    }

    #[test]
    fn test_reachable_of_type_terminates_on_cycles() {
        let nodes = vec![
            DependencyNode::new(ResourceType::Volume, "a").depends_on(ResourceType::Volume, "b"),
            DependencyNode::new(ResourceType::Volume, "b").depends_on(ResourceType::Volume, "a"),
        ];
        let index = DependencyIndex::build(&nodes);
        assert_eq!(index.reachable_of_type(&[0], &ResourceType::Volume), vec![1]);
    }
}
