//! Configuration for a discovery sweep

use std::net::{Ipv4Addr, SocketAddr, SocketAddrV4};
use std::time::Duration;

/// SSDP multicast group
pub const MULTICAST_ADDR: SocketAddrV4 = SocketAddrV4::new(Ipv4Addr::new(239, 255, 255, 250), 1900);

/// Local port UDAP clients send their probe from
pub const DEFAULT_BIND_PORT: u16 = 1901;

/// Controls where the probe is sent from and to, and how long replies are
/// collected.
#[derive(Debug, Clone)]
pub struct DiscoveryConfig {
    /// Local address the UDP socket is bound to
    /// Default: 0.0.0.0:1901
    pub bind_addr: SocketAddr,

    /// Destination of the probe datagram
    /// Default: 239.255.255.250:1900
    pub target_addr: SocketAddr,

    /// How long replies are collected once the probe has been sent
    /// Default: 1 second
    pub listen_window: Duration,
}

impl Default for DiscoveryConfig {
    fn default() -> Self {
        Self {
            bind_addr: SocketAddr::V4(SocketAddrV4::new(Ipv4Addr::UNSPECIFIED, DEFAULT_BIND_PORT)),
            target_addr: SocketAddr::V4(MULTICAST_ADDR),
            listen_window: Duration::from_secs(1),
        }
    }
}

impl DiscoveryConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_bind_addr(mut self, addr: SocketAddr) -> Self {
        self.bind_addr = addr;
        self
    }

    pub fn with_target_addr(mut self, addr: SocketAddr) -> Self {
        self.target_addr = addr;
        self
    }

    pub fn with_listen_window(mut self, window: Duration) -> Self {
        self.listen_window = window;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = DiscoveryConfig::default();
        assert_eq!(config.bind_addr.to_string(), "0.0.0.0:1901");
        assert_eq!(config.target_addr.to_string(), "239.255.255.250:1900");
        assert_eq!(config.listen_window, Duration::from_secs(1));
    }

    #[test]
    fn test_builder_overrides() {
        let config = DiscoveryConfig::new()
            .with_bind_addr("127.0.0.1:0".parse().unwrap())
            .with_target_addr("127.0.0.1:5000".parse().unwrap())
            .with_listen_window(Duration::from_millis(250));

        assert_eq!(config.bind_addr.port(), 0);
        assert_eq!(config.target_addr.port(), 5000);
        assert_eq!(config.listen_window, Duration::from_millis(250));
    }
}
