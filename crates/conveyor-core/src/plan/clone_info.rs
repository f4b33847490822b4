//! Clone submission payload.

use super::snapshot::get_dependency;
use crate::models::{CloneInfo, CloneLink, CloneResource, DependencyNode, Plan};

impl Plan {
    /// Builds the payload submitted to start a clone.
    ///
    /// An incremental clone skips resources created by an earlier pass and
    /// only sends the links that bridge already-cloned and new resources: a
    /// link is emitted when it is not cloned yet and at least one of its
    /// endpoints is. A full clone sends every resource and no links.
    pub fn extract_clone_info(&self, incremental: bool) -> CloneInfo {
        let clone_resources = self
            .updated_dependencies
            .iter()
            .filter(|node| !incremental || !node.is_cloned)
            .map(CloneResource::from)
            .collect();

        let clone_links = if incremental {
            self.bridge_links()
        } else {
            Vec::new()
        };

        CloneInfo {
            clone_resources,
            clone_links,
            update_resources: self.property_updates.clone(),
            replace_resources: self.substitutions.clone(),
        }
    }

    fn bridge_links(&self) -> Vec<CloneLink> {
        let mut links = Vec::new();
        for node in &self.updated_dependencies {
            for dep in &node.dependencies {
                let Some(target) =
                    get_dependency(&self.updated_dependencies, &dep.resource_type, &dep.id)
                else {
                    continue;
                };
                if self.is_link_cloned(node, target) {
                    continue;
                }
                if node.is_cloned || target.is_cloned {
                    links.push(CloneLink {
                        source: node.to_ref(),
                        target: dep.clone(),
                    });
                }
            }
        }
        links
    }

    /// A link already exists when both endpoints were cloned and the edge was
    /// part of the graph the plan was loaded with.
    fn is_link_cloned(&self, node: &DependencyNode, target: &DependencyNode) -> bool {
        node.is_cloned
            && target.is_cloned
            && get_dependency(&self.original_dependencies, &node.resource_type, &node.id)
                .is_some_and(|original| original.depends_on_ref(&target.resource_type, &target.id))
    }
}
