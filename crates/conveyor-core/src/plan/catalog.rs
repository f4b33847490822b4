//! Lookup of existing resources used while cascading a substitution.

use std::collections::HashMap;

/// Answers which existing subnets belong to a network.
///
/// Backed by the resource listing API in the dashboard; tests and the CLI
/// use [`StaticCatalog`].
pub trait ResourceCatalog {
    /// Subnet ids of `network_id`, in listing order.
    fn subnets_of_network(&self, network_id: &str) -> Vec<String>;
}

/// In-memory catalog.
#[derive(Debug, Clone, Default)]
pub struct StaticCatalog {
    subnets: HashMap<String, Vec<String>>,
}

impl StaticCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers the subnets of a network.
    pub fn with_network<I, S>(mut self, network_id: impl Into<String>, subnets: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.subnets.insert(
            network_id.into(),
            subnets.into_iter().map(Into::into).collect(),
        );
        self
    }
}

impl ResourceCatalog for StaticCatalog {
    fn subnets_of_network(&self, network_id: &str) -> Vec<String> {
        self.subnets.get(network_id).cloned().unwrap_or_default()
    }
}
