//! Connection probes.
//!
//! A probe is one timeout-bounded attempt to open a transport-level
//! connection to `destination:port`. Every failure mode (bad port, DNS,
//! refusal, unreachable network, timeout) collapses to `false`; callers learn
//! reachability, not diagnostics.

pub mod tcp;
pub mod udp;

use crate::types::{PortSpec, Protocol};
use async_trait::async_trait;
use std::time::Duration;
use tracing::debug;

pub use tcp::connect_tcp;
pub use udp::connect_udp;

/// Timeout applied to each probe unless configured otherwise.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(3);

/// Trait for reachability probe implementations.
///
/// The evaluator is generic over this so rule selection can be tested
/// without touching the network.
#[async_trait]
pub trait Prober: Send + Sync {
    /// Attempt a single connection. Never fails; unreachable is `false`.
    async fn probe(&self, destination: &str, protocol: &Protocol, port: &str) -> bool;

    /// Probe one declared port of a rule.
    async fn probe_spec(&self, destination: &str, spec: &PortSpec) -> bool {
        self.probe(destination, &spec.protocol, &spec.port).await
    }
}

/// Probe backed by real sockets.
#[derive(Debug, Clone, Copy)]
pub struct ConnectProbe {
    timeout: Duration,
}

impl ConnectProbe {
    pub fn new(timeout: Duration) -> Self {
        Self { timeout }
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }
}

impl Default for ConnectProbe {
    fn default() -> Self {
        Self::new(DEFAULT_TIMEOUT)
    }
}

#[async_trait]
impl Prober for ConnectProbe {
    async fn probe(&self, destination: &str, protocol: &Protocol, port: &str) -> bool {
        let port_num = match port.parse::<crate::types::Port>() {
            Ok(p) => p.as_u16(),
            Err(e) => {
                debug!(destination, port, error = %e, "cannot resolve port");
                return false;
            }
        };

        let result = match protocol {
            Protocol::Tcp => connect_tcp(destination, port_num, self.timeout).await,
            Protocol::Udp => connect_udp(destination, port_num, self.timeout).await,
            Protocol::Unsupported(name) => {
                debug!(destination, port, protocol = %name, "unsupported protocol");
                return false;
            }
        };

        match result {
            Ok(()) => true,
            Err(e) => {
                debug!(destination, port, %protocol, error = %e, "probe failed");
                false
            }
        }
    }
}

/// Combine a host and port into `host:port`.
///
/// Hosts containing a colon are IPv6 literals and get bracketed, so
/// `::1` and `80` become `[::1]:80`.
///
/// Scoped literals are bracketed too, but only numeric zones can be dialed:
/// Rust's `SocketAddr` parser rejects a named zone such as `fe80::1%eth0`,
/// and the bracketed form is not a resolvable host name either, so a rule
/// using one always reports a failed connection. Write the interface index
/// instead (`fe80::1%2`).
pub fn join_host_port(host: &str, port: u16) -> String {
    if host.contains(':') {
        format!("[{}]:{}", host, port)
    } else {
        format!("{}:{}", host, port)
    }
}
