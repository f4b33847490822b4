//! Editable fields per resource kind.

use serde_json::{json, Map, Value};

use super::{
    address, FieldDescriptor,
    FieldDescriptor::{Checkbox, Custom, MetadataTable, Select, Substitution, Text},
    FieldInput, FormSnapshot,
};
use crate::{
    error::{ConveyorError, Result},
    models::ResourceType,
};

const MAX_SUBNET_PREFIX: u8 = 31;

const SERVER: &[FieldDescriptor] = &[
    Text { name: "user_data", validator: None },
    Text { name: "description", validator: None },
    MetadataTable { name: "metadata" },
];

const KEY_PAIR: &[FieldDescriptor] = &[Substitution { control: "keypairs" }];

const VOLUME: &[FieldDescriptor] = &[
    Substitution { control: "volumes" },
    Text { name: "name", validator: None },
    Text { name: "size", validator: Some(positive_integer) },
    Text { name: "description", validator: None },
    Checkbox { name: "copy_data" },
    MetadataTable { name: "metadata" },
];

const VOLUME_TYPE: &[FieldDescriptor] = &[Substitution { control: "volumetypes" }];

const QOS: &[FieldDescriptor] = &[Substitution { control: "qoss" }];

const FLOATING_IP: &[FieldDescriptor] = &[Substitution { control: "fips" }];

const NET: &[FieldDescriptor] = &[
    Substitution { control: "networks" },
    Text { name: "name", validator: None },
    Select { name: "admin_state_up" },
    Checkbox { name: "shared" },
    Custom { name: "value_specs", extract: network_value_specs },
];

const SUBNET: &[FieldDescriptor] = &[
    Substitution { control: "subnets" },
    Text { name: "name", validator: None },
    Text { name: "cidr", validator: Some(subnet_cidr) },
    Text { name: "gateway_ip", validator: None },
    Checkbox { name: "no_gateway" },
    Checkbox { name: "enable_dhcp" },
    Text { name: "allocation_pools", validator: None },
    Text { name: "dns_nameservers", validator: None },
    Text { name: "host_routes", validator: None },
];

const PORT: &[FieldDescriptor] = &[Custom { name: "fixed_ips", extract: port_fixed_ips }];

const SECURITY_GROUP: &[FieldDescriptor] = &[
    Substitution { control: "sgs" },
    Custom { name: "rules", extract: security_group_rules },
];

const ROUTER: &[FieldDescriptor] = &[
    Substitution { control: "routers" },
    Text { name: "name", validator: None },
    Select { name: "admin_state_up" },
];

const POOL_MEMBER: &[FieldDescriptor] = &[
    Text { name: "address", validator: None },
    Text { name: "protocol_port", validator: Some(port_number) },
    Text { name: "weight", validator: None },
    Select { name: "admin_state_up" },
];

const VIP: &[FieldDescriptor] = &[
    Text { name: "name", validator: None },
    Text { name: "protocol_port", validator: Some(port_number) },
    Text { name: "connection_limit", validator: None },
    Text { name: "address", validator: None },
    Select { name: "admin_state_up" },
];

const POOL: &[FieldDescriptor] = &[
    Text { name: "name", validator: None },
    Text { name: "protocol_port", validator: Some(port_number) },
    Select { name: "admin_state_up" },
    Select { name: "lb_method" },
];

const HEALTH_MONITOR: &[FieldDescriptor] = &[
    Text { name: "delay", validator: Some(positive_integer) },
    Text { name: "max_retries", validator: Some(positive_integer) },
    Text { name: "timeout", validator: Some(positive_integer) },
    Select { name: "admin_state_up" },
    Select { name: "type" },
];

const LISTENER: &[FieldDescriptor] = &[
    Text { name: "protocol_port", validator: Some(port_number) },
    Select { name: "protocol" },
];

/// Editable fields of a resource kind, in form order.
pub fn field_table(resource_type: &ResourceType) -> &'static [FieldDescriptor] {
    match resource_type {
        ResourceType::Server => SERVER,
        ResourceType::KeyPair => KEY_PAIR,
        ResourceType::Volume => VOLUME,
        ResourceType::VolumeType => VOLUME_TYPE,
        ResourceType::Qos => QOS,
        ResourceType::FloatingIp => FLOATING_IP,
        ResourceType::Net => NET,
        ResourceType::Subnet => SUBNET,
        ResourceType::Port => PORT,
        ResourceType::SecurityGroup => SECURITY_GROUP,
        ResourceType::Router => ROUTER,
        ResourceType::PoolMember => POOL_MEMBER,
        ResourceType::Vip => VIP,
        ResourceType::Pool => POOL,
        ResourceType::HealthMonitor => HEALTH_MONITOR,
        ResourceType::Listener => LISTENER,
        _ => &[],
    }
}

fn subnet_cidr(value: &str) -> std::result::Result<(), String> {
    if address::check_cidr(value, MAX_SUBNET_PREFIX) {
        Ok(())
    } else {
        Err(format!(
            "'{value}' is not an IPv4 CIDR with a prefix of at most {MAX_SUBNET_PREFIX}"
        ))
    }
}

fn positive_integer(value: &str) -> std::result::Result<(), String> {
    match value.parse::<u64>() {
        Ok(n) if n > 0 => Ok(()),
        _ => Err(format!("'{value}' is not a positive integer")),
    }
}

fn port_number(value: &str) -> std::result::Result<(), String> {
    match value.parse::<u16>() {
        Ok(n) if n > 0 => Ok(()),
        _ => Err(format!("'{value}' is not a port number")),
    }
}

/// Provider attributes of a network. Sent as a whole when one of the
/// segmentation attributes changed.
fn network_value_specs(form: &FormSnapshot) -> Result<Option<Value>> {
    let mut specs = Map::new();
    let mut modified = false;

    for name in ["segmentation_id", "physical_network", "network_type"] {
        if let Some((current, original)) = form.text(name) {
            specs.insert(name.to_string(), Value::String(current.to_string()));
            modified |= current != original;
        }
    }
    if let Some((current, _)) = form.text("router_external") {
        specs.insert("router_external".to_string(), Value::String(current.to_string()));
    }

    Ok(modified.then_some(Value::Object(specs)))
}

/// Addresses of a port. Every address must lie in its subnet's allocation
/// pools; the full list is sent when any of them changed.
fn port_fixed_ips(form: &FormSnapshot) -> Result<Option<Value>> {
    let Some(FieldInput::FixedIps { ips }) = form.get("fixed_ips") else {
        return Ok(None);
    };

    let mut changed = false;
    let mut fixed_ips = Vec::with_capacity(ips.len());
    for ip in ips {
        if !address::ip_in_pools(&ip.allocation_pools, &ip.ip_address) {
            return Err(ConveyorError::invalid_input("fixed_ips").with_reason(format!(
                "{} is outside the allocation pools of subnet {}",
                ip.ip_address, ip.subnet_id
            )));
        }
        changed |= ip.ip_address != ip.original;
        fixed_ips.push(json!({
            "subnet_id": {"get_resource": ip.subnet_id},
            "ip_address": ip.ip_address,
        }));
    }

    Ok(changed.then_some(Value::Array(fixed_ips)))
}

/// Rules of a security group, serialized as a JSON string, minus the rules
/// deleted in the form.
fn security_group_rules(form: &FormSnapshot) -> Result<Option<Value>> {
    let Some(FieldInput::Rules {
        rules,
        deleted_ids,
        changed,
    }) = form.get("rules")
    else {
        return Ok(None);
    };

    if deleted_ids.is_empty() && !changed {
        return Ok(None);
    }

    let kept: Vec<&Value> = rules
        .iter()
        .filter(|rule| {
            rule.get("id")
                .and_then(Value::as_str)
                .map_or(true, |id| !deleted_ids.iter().any(|deleted| deleted == id))
        })
        .collect();
    Ok(Some(Value::String(serde_json::to_string(&kept)?)))
}
