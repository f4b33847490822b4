//! Collection wrapper types for displaying groups of domain objects.

use std::{fmt, ops::Index};

use crate::{
    models::{DependencyNode, PlanSummary},
    topology::{Link, RenderNode},
};

/// Plan summaries, one section per plan.
///
/// ```rust
/// use conveyor_core::{display::PlanSummaries, models::{Plan, PlanSummary}};
///
/// let plan = Plan::new("plan-1", vec![]).with_name("web tier");
/// let output = PlanSummaries(vec![PlanSummary::from(&plan)]).to_string();
/// assert!(output.contains("## web tier (ID: plan-1)"));
/// ```
#[derive(Debug)]
pub struct PlanSummaries(pub Vec<PlanSummary>);

impl PlanSummaries {
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, PlanSummary> {
        self.0.iter()
    }
}

impl Index<usize> for PlanSummaries {
    type Output = PlanSummary;

    fn index(&self, index: usize) -> &Self::Output {
        &self.0[index]
    }
}

impl IntoIterator for PlanSummaries {
    type Item = PlanSummary;
    type IntoIter = std::vec::IntoIter<Self::Item>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl fmt::Display for PlanSummaries {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            writeln!(f, "No plans found.")
        } else {
            for plan in &self.0 {
                write!(f, "{plan}")?;
            }
            Ok(())
        }
    }
}

/// A dependency snapshot, or a slice of one, as a bullet list.
#[derive(Debug)]
pub struct Dependencies(pub Vec<DependencyNode>);

impl Dependencies {
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, DependencyNode> {
        self.0.iter()
    }
}

impl<'a> IntoIterator for &'a Dependencies {
    type Item = &'a DependencyNode;
    type IntoIter = std::slice::Iter<'a, DependencyNode>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl fmt::Display for Dependencies {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            return writeln!(f, "No resources found.");
        }
        for node in &self.0 {
            write!(f, "{node}")?;
        }
        Ok(())
    }
}

/// Nodes and links of a rendered topology.
pub struct Topology<'a> {
    pub nodes: &'a [RenderNode],
    pub links: &'a [Link],
}

impl fmt::Display for Topology<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "## Nodes")?;
        writeln!(f)?;
        if self.nodes.is_empty() {
            writeln!(f, "No nodes.")?;
        }
        for (idx, node) in self.nodes.iter().enumerate() {
            let cloned = if node.cloned { " (cloned)" } else { "" };
            writeln!(
                f,
                "{idx}. **{}** `{}`{cloned}",
                node.resource_type.short_name(),
                node.id
            )?;
        }

        if !self.links.is_empty() {
            writeln!(f)?;
            writeln!(f, "## Links")?;
            writeln!(f)?;
            for link in self.links {
                let endpoint = |idx: usize| self.nodes.get(idx).map_or("?", |n| n.id.as_str());
                writeln!(f, "- {} → {}", endpoint(link.source), endpoint(link.target))?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        models::{Plan, PlanType, ResourceType},
        topology::{NullRenderer, TopologyView},
    };

    #[test]
    fn test_plan_summaries_display() {
        let plan = Plan::new(
            "plan-1",
            vec![DependencyNode::new(ResourceType::Server, "vm1").cloned()],
        )
        .with_name("Web tier")
        .with_type(PlanType::Migrate);
        let summaries = PlanSummaries(vec![PlanSummary::from(&plan)]);

        let output = summaries.to_string();
        assert!(output.contains("## Web tier (ID: plan-1)"));
        assert!(output.contains("- **Type**: migrate"));
        assert!(output.contains("- **Resources**: 1 (1 cloned)"));

        assert_eq!(PlanSummaries(vec![]).to_string(), "No plans found.\n");
    }

    #[test]
    fn test_dependencies_display() {
        let deps = Dependencies(vec![
            DependencyNode::new(ResourceType::Port, "port1")
                .depends_on(ResourceType::Subnet, "sub1")
                .with_fixed_ip("sub1", "10.0.0.5"),
        ]);
        let output = deps.to_string();
        assert!(output.contains("- **OS::Neutron::Port** `port1`"));
        assert!(output.contains("  - → OS::Neutron::Subnet sub1"));
        assert!(output.contains("  - IP 10.0.0.5 on sub1"));

        assert_eq!(Dependencies(vec![]).to_string(), "No resources found.\n");
    }

    #[test]
    fn test_topology_display() {
        let mut view = TopologyView::new(NullRenderer);
        view.load(crate::topology::GraphData::from_dependencies(&[
            DependencyNode::new(ResourceType::Net, "net1"),
            DependencyNode::new(ResourceType::Subnet, "sub1").depends_on(ResourceType::Net, "net1"),
        ]));

        let output = Topology {
            nodes: view.nodes(),
            links: view.links(),
        }
        .to_string();
        assert!(output.contains("0. **Net** `net1`"));
        assert!(output.contains("- sub1 → net1"));
    }
}
