//! UDP probe.
//!
//! UDP has no handshake, so "connecting" only binds a local socket and fixes
//! its peer. That validates name resolution and local routing, nothing more:
//! a successful UDP probe does not prove a listener exists on the far side.

use super::join_host_port;
use std::io;
use std::net::{Ipv4Addr, Ipv6Addr, SocketAddr};
use std::time::Duration;
use tokio::net::{lookup_host, UdpSocket};
use tokio::time::timeout;

/// "Connect" a UDP socket to `host:port` within `limit`.
pub async fn connect_udp(host: &str, port: u16, limit: Duration) -> io::Result<()> {
    let address = join_host_port(host, port);

    match timeout(limit, attempt_connect(&address)).await {
        Ok(result) => result,
        Err(_) => Err(io::Error::new(
            io::ErrorKind::TimedOut,
            format!("resolving {} timed out", address),
        )),
    }
}

async fn attempt_connect(address: &str) -> io::Result<()> {
    let addrs: Vec<SocketAddr> = lookup_host(address).await?.collect();

    let mut last_err = None;
    for addr in addrs {
        let local = local_bind_addr(&addr);
        let socket = match UdpSocket::bind(local).await {
            Ok(socket) => socket,
            Err(e) => {
                last_err = Some(e);
                continue;
            }
        };

        match socket.connect(addr).await {
            Ok(()) => return Ok(()),
            Err(e) => last_err = Some(e),
        }
    }

    Err(last_err.unwrap_or_else(|| {
        io::Error::new(
            io::ErrorKind::NotFound,
            format!("no addresses found for {}", address),
        )
    }))
}

/// Wildcard bind address in the same family as the peer.
fn local_bind_addr(peer: &SocketAddr) -> SocketAddr {
    match peer {
        SocketAddr::V4(_) => SocketAddr::from((Ipv4Addr::UNSPECIFIED, 0)),
        SocketAddr::V6(_) => SocketAddr::from((Ipv6Addr::UNSPECIFIED, 0)),
    }
}
