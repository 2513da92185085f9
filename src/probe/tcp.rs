//! TCP connect probe.
//!
//! Completes a full handshake through the operating system's socket API and
//! closes the stream straight away. No privileges are required.

use super::join_host_port;
use std::io;
use std::net::SocketAddr;
use std::time::Duration;
use tokio::net::{lookup_host, TcpStream};
use tokio::time::timeout;

/// Connect to `host:port` over TCP within `limit`.
///
/// Name resolution and every connection attempt share the one deadline.
/// Resolved addresses are tried in order until one accepts.
pub async fn connect_tcp(host: &str, port: u16, limit: Duration) -> io::Result<()> {
    let address = join_host_port(host, port);

    match timeout(limit, attempt_connect(&address)).await {
        Ok(Ok(stream)) => {
            drop(stream);
            Ok(())
        }
        Ok(Err(e)) => Err(e),
        Err(_) => Err(io::Error::new(
            io::ErrorKind::TimedOut,
            format!("connection to {} timed out", address),
        )),
    }
}

async fn attempt_connect(address: &str) -> io::Result<TcpStream> {
    let addrs: Vec<SocketAddr> = lookup_host(address).await?.collect();

    let mut last_err = None;
    for addr in addrs {
        match TcpStream::connect(addr).await {
            Ok(stream) => return Ok(stream),
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

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Instant;
    use tokio::net::TcpListener;

    #[tokio::test]
    async fn test_connect_open_port() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let port = listener.local_addr().unwrap().port();

        assert!(connect_tcp("127.0.0.1", port, Duration::from_secs(1))
            .await
            .is_ok());
    }

    #[tokio::test]
    async fn test_connect_closed_port() {
        // Bind then drop to find a port nothing is listening on.
        let port = {
            let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
            listener.local_addr().unwrap().port()
        };

        let start = Instant::now();
        let result = connect_tcp("127.0.0.1", port, Duration::from_secs(3)).await;
        assert!(result.is_err());
        assert!(start.elapsed() < Duration::from_secs(4));
    }

    #[tokio::test]
    async fn test_unresolvable_host() {
        let result = connect_tcp("host.invalid", 80, Duration::from_secs(3)).await;
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_named_zone_is_not_dialable() {
        // `SocketAddr` only parses numeric scope ids.
        assert!("[fe80::1%eth0]:80".parse::<std::net::SocketAddr>().is_err());
        let result = connect_tcp("fe80::1%eth0", 80, Duration::from_secs(1)).await;
        assert!(result.is_err());
    }
}
