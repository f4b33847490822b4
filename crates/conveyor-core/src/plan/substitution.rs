//! Substitution cascades: replacing a resource with an existing one.
//!
//! Every cascade keeps the working snapshot closed under its edges: once it
//! returns, no node references a `(type, id)` that is no longer present.

use log::debug;

use super::{
    catalog::ResourceCatalog,
    snapshot::{
        get_dependency_mut, get_dependent_resources, repoint_edges, replace_resource_self,
        rewrite_edges,
    },
};
use crate::models::{Plan, ResourceType, Substitution};

fn is_valid_substitution(src_id: &str, dest_id: &str) -> bool {
    !src_id.is_empty() && !dest_id.is_empty() && src_id != dest_id
}

impl Plan {
    /// Records that `(resource_type, src_id)` is replaced by `dest_id`.
    ///
    /// Re-substituting the same source updates its record. Pending property
    /// edits of the source are dropped. Returns `false` (and changes
    /// nothing) for empty ids or a self-substitution.
    pub fn replace_resource(&mut self, resource_type: &ResourceType, src_id: &str, dest_id: &str) -> bool {
        if !is_valid_substitution(src_id, dest_id) {
            debug!("Ignoring substitution {resource_type} '{src_id}' -> '{dest_id}'");
            return false;
        }

        match self
            .substitutions
            .iter_mut()
            .find(|s| s.resource_type == *resource_type && s.src_id == src_id)
        {
            Some(existing) => existing.dest_id = dest_id.to_string(),
            None => self.substitutions.push(Substitution {
                resource_type: resource_type.clone(),
                src_id: src_id.to_string(),
                dest_id: dest_id.to_string(),
            }),
        }

        self.property_updates
            .retain(|update| !update.is(resource_type, src_id));
        self.touch();
        true
    }

    /// Substitution for kinds without a special cascade (key pairs, volume
    /// types, security groups, ...).
    pub fn change_common_resource(&mut self, resource_type: &ResourceType, src_id: &str, dest_id: &str) {
        if !self.replace_resource(resource_type, src_id, dest_id) {
            return;
        }
        rewrite_edges(&mut self.updated_dependencies, resource_type, src_id, dest_id);
        replace_resource_self(&mut self.updated_dependencies, resource_type, src_id, dest_id);
    }

    /// Replaces network `src_id` with `dest_id`, moving its subnets onto
    /// subnets of the destination network and its ports onto the new
    /// network.
    pub fn change_net(&mut self, src_id: &str, dest_id: &str, catalog: &dyn ResourceCatalog) {
        if !self.replace_resource(&ResourceType::Net, src_id, dest_id) {
            return;
        }

        let subnets: Vec<String> = get_dependent_resources(
            &self.updated_dependencies,
            &ResourceType::Net,
            src_id,
            Some(&[ResourceType::Subnet]),
            &[],
        )
        .into_iter()
        .filter(|subnet| subnet.depends_on_ref(&ResourceType::Net, src_id))
        .map(|subnet| subnet.id)
        .collect();

        let candidates = catalog.subnets_of_network(dest_id);
        let mut assigned: Vec<String> = Vec::new();
        for subnet_id in subnets {
            let replacement = candidates
                .iter()
                .find(|candidate| !assigned.contains(candidate))
                .or_else(|| candidates.first())
                .cloned();
            match replacement {
                Some(replacement) => {
                    self.change_subnet_from_net(src_id, dest_id, &subnet_id, &replacement);
                    assigned.push(replacement);
                }
                None => debug!("Network {dest_id} has no subnet to take over {subnet_id}"),
            }
        }

        let ports: Vec<String> = get_dependent_resources(
            &self.updated_dependencies,
            &ResourceType::Net,
            src_id,
            Some(&[ResourceType::Port]),
            &[],
        )
        .into_iter()
        .filter(|port| port.depends_on_ref(&ResourceType::Net, src_id))
        .map(|port| port.id)
        .collect();
        for port_id in ports {
            self.change_port_from_net(&port_id, src_id, dest_id);
        }

        rewrite_edges(&mut self.updated_dependencies, &ResourceType::Net, src_id, dest_id);
        replace_resource_self(&mut self.updated_dependencies, &ResourceType::Net, src_id, dest_id);
    }

    /// Replaces subnet `src_id` with `dest_id` without touching its network.
    pub fn change_subnet(&mut self, src_id: &str, dest_id: &str) {
        self.substitute_subnet(src_id, dest_id, None);
    }

    /// Subnet step of a network substitution: the surviving subnet node also
    /// moves from `net_src` to `net_dest`.
    pub fn change_subnet_from_net(&mut self, net_src: &str, net_dest: &str, src_id: &str, dest_id: &str) {
        self.substitute_subnet(src_id, dest_id, Some((net_src, net_dest)));
    }

    fn substitute_subnet(&mut self, src_id: &str, dest_id: &str, network: Option<(&str, &str)>) {
        if !self.replace_resource(&ResourceType::Subnet, src_id, dest_id) {
            return;
        }

        let ports = get_dependent_resources(
            &self.updated_dependencies,
            &ResourceType::Subnet,
            src_id,
            Some(&[ResourceType::Port]),
            &[],
        );
        for port in ports {
            self.change_port_from_subnet(&port.id, src_id, dest_id);
        }

        rewrite_edges(&mut self.updated_dependencies, &ResourceType::Subnet, src_id, dest_id);

        if let Some((net_src, net_dest)) = network {
            if let Some(subnet) =
                get_dependency_mut(&mut self.updated_dependencies, &ResourceType::Subnet, src_id)
            {
                repoint_edges(&mut subnet.dependencies, &ResourceType::Net, net_src, net_dest);
            }
        }

        replace_resource_self(&mut self.updated_dependencies, &ResourceType::Subnet, src_id, dest_id);
    }

    /// Moves a port from network `net_src` to `net_dest`.
    pub fn change_port_from_net(&mut self, port_id: &str, net_src: &str, net_dest: &str) {
        if let Some(port) =
            get_dependency_mut(&mut self.updated_dependencies, &ResourceType::Port, port_id)
        {
            repoint_edges(&mut port.dependencies, &ResourceType::Net, net_src, net_dest);
        }
    }

    /// Moves a port from subnet `sub_src` to `sub_dest`. Addresses allocated
    /// on the old subnet are cleared since they are not valid in the new
    /// subnet's CIDR.
    pub fn change_port_from_subnet(&mut self, port_id: &str, sub_src: &str, sub_dest: &str) {
        let Some(port) =
            get_dependency_mut(&mut self.updated_dependencies, &ResourceType::Port, port_id)
        else {
            return;
        };

        repoint_edges(&mut port.dependencies, &ResourceType::Subnet, sub_src, sub_dest);
        for fixed_ip in port.fixed_ips.iter_mut().filter(|ip| ip.subnet_id == sub_src) {
            fixed_ip.subnet_id = sub_dest.to_string();
            fixed_ip.ip_address.clear();
        }
    }
}
