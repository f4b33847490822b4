//! IPv4 helpers for subnet and port forms.

use std::net::Ipv4Addr;

use super::form::AllocationPool;

/// Whether `cidr` is an IPv4 CIDR (`a.b.c.d/len`) whose prefix length is at
/// most `max_prefix`.
pub fn check_cidr(cidr: &str, max_prefix: u8) -> bool {
    let Some((address, prefix)) = cidr.split_once('/') else {
        return false;
    };
    if address.parse::<Ipv4Addr>().is_err() {
        return false;
    }
    if prefix.is_empty() || (prefix.len() > 1 && prefix.starts_with('0')) {
        return false;
    }
    match prefix.parse::<u8>() {
        Ok(len) => len <= 32 && len <= max_prefix,
        Err(_) => false,
    }
}

/// Whether `ip` lies inside one of `pools`. Unparseable addresses or bounds
/// never match.
pub fn ip_in_pools(pools: &[AllocationPool], ip: &str) -> bool {
    let Ok(ip) = ip.parse::<Ipv4Addr>() else {
        return false;
    };
    pools.iter().any(|pool| {
        match (pool.start.parse::<Ipv4Addr>(), pool.end.parse::<Ipv4Addr>()) {
            (Ok(start), Ok(end)) => start <= ip && ip <= end,
            _ => false,
        }
    })
}
