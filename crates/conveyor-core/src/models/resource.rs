//! Resource identity and dependency graph node types.

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

/// Type-safe enumeration of the resource kinds a plan can contain.
///
/// Unknown kinds are preserved verbatim so graphs from newer backends still
/// load.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ResourceType {
    Server,
    KeyPair,
    Flavor,
    Volume,
    VolumeType,
    Qos,
    Net,
    Subnet,
    Port,
    Router,
    RouterInterface,
    SecurityGroup,
    FloatingIp,
    Vip,
    Pool,
    PoolMember,
    HealthMonitor,
    Listener,
    Other(String),
}

impl ResourceType {
    /// The backend's string tag for this kind.
    pub fn as_str(&self) -> &str {
        match self {
            ResourceType::Server => "OS::Nova::Server",
            ResourceType::KeyPair => "OS::Nova::KeyPair",
            ResourceType::Flavor => "OS::Nova::Flavor",
            ResourceType::Volume => "OS::Cinder::Volume",
            ResourceType::VolumeType => "OS::Cinder::VolumeType",
            ResourceType::Qos => "OS::Cinder::Qos",
            ResourceType::Net => "OS::Neutron::Net",
            ResourceType::Subnet => "OS::Neutron::Subnet",
            ResourceType::Port => "OS::Neutron::Port",
            ResourceType::Router => "OS::Neutron::Router",
            ResourceType::RouterInterface => "OS::Neutron::RouterInterface",
            ResourceType::SecurityGroup => "OS::Neutron::SecurityGroup",
            ResourceType::FloatingIp => "OS::Neutron::FloatingIP",
            ResourceType::Vip => "OS::Neutron::Vip",
            ResourceType::Pool => "OS::Neutron::Pool",
            ResourceType::PoolMember => "OS::Neutron::PoolMember",
            ResourceType::HealthMonitor => "OS::Neutron::HealthMonitor",
            ResourceType::Listener => "OS::Neutron::Listener",
            ResourceType::Other(tag) => tag,
        }
    }

    /// Last `::` segment of the tag, e.g. `Subnet`.
    pub fn short_name(&self) -> &str {
        let tag = self.as_str();
        tag.rsplit("::").next().unwrap_or(tag)
    }

    /// Resource kinds whose edits warn when a server depends on them.
    pub fn is_shared_network(&self) -> bool {
        matches!(
            self,
            ResourceType::Net | ResourceType::Subnet | ResourceType::SecurityGroup
        )
    }
}

impl From<&str> for ResourceType {
    fn from(tag: &str) -> Self {
        match tag {
            "OS::Nova::Server" => ResourceType::Server,
            "OS::Nova::KeyPair" => ResourceType::KeyPair,
            "OS::Nova::Flavor" => ResourceType::Flavor,
            "OS::Cinder::Volume" => ResourceType::Volume,
            "OS::Cinder::VolumeType" => ResourceType::VolumeType,
            "OS::Cinder::Qos" => ResourceType::Qos,
            "OS::Neutron::Net" => ResourceType::Net,
            "OS::Neutron::Subnet" => ResourceType::Subnet,
            "OS::Neutron::Port" => ResourceType::Port,
            "OS::Neutron::Router" => ResourceType::Router,
            "OS::Neutron::RouterInterface" => ResourceType::RouterInterface,
            "OS::Neutron::SecurityGroup" => ResourceType::SecurityGroup,
            "OS::Neutron::FloatingIP" => ResourceType::FloatingIp,
            "OS::Neutron::Vip" => ResourceType::Vip,
            "OS::Neutron::Pool" => ResourceType::Pool,
            "OS::Neutron::PoolMember" => ResourceType::PoolMember,
            "OS::Neutron::HealthMonitor" => ResourceType::HealthMonitor,
            "OS::Neutron::Listener" => ResourceType::Listener,
            other => ResourceType::Other(other.to_string()),
        }
    }
}

impl From<String> for ResourceType {
    fn from(tag: String) -> Self {
        ResourceType::from(tag.as_str())
    }
}

impl From<ResourceType> for String {
    fn from(resource_type: ResourceType) -> Self {
        match resource_type {
            ResourceType::Other(tag) => tag,
            known => known.as_str().to_string(),
        }
    }
}

impl FromStr for ResourceType {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(ResourceType::from(s))
    }
}

impl fmt::Display for ResourceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Directed edge target: the resource a node depends on.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DependencyRef {
    #[serde(rename = "type")]
    pub resource_type: ResourceType,
    pub id: String,
}

impl DependencyRef {
    pub fn new(resource_type: ResourceType, id: impl Into<String>) -> Self {
        Self {
            resource_type,
            id: id.into(),
        }
    }

    /// Whether this reference points at `(resource_type, id)`.
    pub fn is(&self, resource_type: &ResourceType, id: &str) -> bool {
        self.resource_type == *resource_type && self.id == id
    }
}

/// Address allocation of a port on one subnet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FixedIp {
    pub subnet_id: String,
    #[serde(default)]
    pub ip_address: String,
}

/// One resource instance inside a plan's dependency graph.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DependencyNode {
    /// Resource kind
    #[serde(rename = "type")]
    pub resource_type: ResourceType,

    /// Identifier, unique within the plan for this kind
    pub id: String,

    /// Display name
    #[serde(default)]
    pub name: String,

    /// Already created by a previous incremental clone
    #[serde(default)]
    pub is_cloned: bool,

    /// Resources this node depends on
    #[serde(default)]
    pub dependencies: Vec<DependencyRef>,

    /// Port address allocations (empty for other kinds)
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub fixed_ips: Vec<FixedIp>,
}

impl DependencyNode {
    /// Creates a node with no dependencies.
    pub fn new(resource_type: ResourceType, id: impl Into<String>) -> Self {
        Self {
            resource_type,
            id: id.into(),
            name: String::new(),
            is_cloned: false,
            dependencies: Vec::new(),
            fixed_ips: Vec::new(),
        }
    }

    /// Adds a dependency edge.
    pub fn depends_on(mut self, resource_type: ResourceType, id: impl Into<String>) -> Self {
        self.dependencies.push(DependencyRef::new(resource_type, id));
        self
    }

    /// Marks the node as already cloned.
    pub fn cloned(mut self) -> Self {
        self.is_cloned = true;
        self
    }

    /// Adds a fixed IP allocation.
    pub fn with_fixed_ip(mut self, subnet_id: impl Into<String>, ip: impl Into<String>) -> Self {
        self.fixed_ips.push(FixedIp {
            subnet_id: subnet_id.into(),
            ip_address: ip.into(),
        });
        self
    }

    /// Whether this node is `(resource_type, id)`.
    pub fn is(&self, resource_type: &ResourceType, id: &str) -> bool {
        self.resource_type == *resource_type && self.id == id
    }

    /// Reference to this node.
    pub fn to_ref(&self) -> DependencyRef {
        DependencyRef::new(self.resource_type.clone(), self.id.clone())
    }

    /// Whether this node has an edge to `(resource_type, id)`.
    pub fn depends_on_ref(&self, resource_type: &ResourceType, id: &str) -> bool {
        self.dependencies.iter().any(|dep| dep.is(resource_type, id))
    }
}
