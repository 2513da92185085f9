//! Local identity resolution.
//!
//! Rules are selected by comparing their source with this host's primary
//! IPv4 address. The address is taken from interface enumeration, with no
//! network traffic involved.
//!
//! # Selection order
//!
//! The first non-loopback IPv4 address in platform enumeration order wins.
//! On hosts with several qualifying interfaces the result therefore depends
//! on the order the operating system reports them; pass an explicit address
//! with `--local-ip` when that matters.

use crate::error::{IdentityError, IdentityResult};
use pnet::datalink;
use std::net::{IpAddr, Ipv4Addr};
use tracing::debug;

/// Determine this host's primary non-loopback IPv4 address.
pub fn resolve_local_ipv4() -> IdentityResult<Ipv4Addr> {
    let interfaces = datalink::interfaces();
    debug!(count = interfaces.len(), "enumerated network interfaces");

    let addrs = interfaces
        .iter()
        .flat_map(|iface| iface.ips.iter().map(|net| net.ip()));

    select_local_ipv4(addrs).ok_or(IdentityError::NoSuitableAddress)
}

/// Resolve the local address, honouring an explicit override if given.
pub fn resolve_with_override(local_ip: Option<&str>) -> IdentityResult<Ipv4Addr> {
    match local_ip {
        Some(s) => s
            .trim()
            .parse()
            .map_err(|_| IdentityError::InvalidOverride(s.to_string())),
        None => resolve_local_ipv4(),
    }
}

/// Pick the first address that is IPv4 (or IPv4-mapped) and not loopback.
pub fn select_local_ipv4<I>(addrs: I) -> Option<Ipv4Addr>
where
    I: IntoIterator<Item = IpAddr>,
{
    addrs.into_iter().find_map(|addr| {
        if addr.is_loopback() {
            return None;
        }
        match addr {
            IpAddr::V4(v4) => Some(v4),
            IpAddr::V6(v6) => v6.to_ipv4_mapped().filter(|v4| !v4.is_loopback()),
        }
    })
}
