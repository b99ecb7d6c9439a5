//! SSDP probe broadcasting and reply parsing
//!
//! A sweep sends a single `M-SEARCH` for `udap:rootservice` and collects
//! whatever answers arrive during the listen window. Replies are not
//! validated beyond the `200 OK` marker here; resolution decides whether a
//! reply describes a usable device.

use std::collections::HashMap;
use std::io::ErrorKind;
use std::net::SocketAddr;
use std::time::Duration;

use tokio::net::UdpSocket;
use tokio::time::{timeout_at, Instant};
use tracing::{debug, error, warn};

use crate::config::DiscoveryConfig;
use crate::error::{DiscoveryError, Result};

/// Probe sent to the multicast group
pub const DISCOVERY_REQUEST: &str = "M-SEARCH * HTTP/1.1\r\n\
    HOST: 239.255.255.250:1900\r\n\
    MAN: \"ssdp:discover\"\r\n\
    MX: 3\r\n\
    ST: udap:rootservice\r\n\
    USER-AGENT: UDAP/2.0\r\n\r\n";

/// Header pointing at the description document
pub const LOCATION_HEADER: &str = "LOCATION";

const SUCCESS_MARKER: &str = "200 OK";

/// Largest payload a UDP datagram over IPv4 can carry
const MAX_DATAGRAM: usize = 65_507;

/// Headers of one discovery reply
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DiscoveryReply {
    headers: HashMap<String, String>,
}

impl DiscoveryReply {
    pub fn new(headers: HashMap<String, String>) -> Self {
        Self { headers }
    }

    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).map(String::as_str)
    }

    pub fn location(&self) -> Option<&str> {
        self.header(LOCATION_HEADER)
    }

    pub fn headers(&self) -> &HashMap<String, String> {
        &self.headers
    }
}

/// Parse the text of a discovery reply.
///
/// Returns `None` unless the text carries a `200 OK` status. Header lines
/// are `TOKEN: value` where the token is made of uppercase ASCII letters and
/// hyphens; a repeated token keeps its last value.
pub fn parse_reply(text: &str) -> Option<DiscoveryReply> {
    if !text.contains(SUCCESS_MARKER) {
        return None;
    }

    let headers = text
        .lines()
        .filter_map(parse_header_line)
        .map(|(name, value)| (name.to_string(), value.to_string()))
        .collect();

    Some(DiscoveryReply { headers })
}

/// Split a line like "LOCATION: http://..." into its token and value
fn parse_header_line(line: &str) -> Option<(&str, &str)> {
    let (token, value) = line.trim_start().split_once(':')?;
    let is_token = !token.is_empty()
        && token
            .bytes()
            .all(|b| b.is_ascii_uppercase() || b == b'-');
    if !is_token {
        return None;
    }

    let value = value.strip_prefix(' ').unwrap_or(value);
    Some((token, value.trim_end()))
}

/// UDP endpoint for one discovery sweep
pub struct SsdpClient {
    socket: UdpSocket,
    target: SocketAddr,
    window: Duration,
}

impl SsdpClient {
    /// Bind the local socket described by `config`
    pub async fn bind(config: &DiscoveryConfig) -> Result<Self> {
        let socket = UdpSocket::bind(config.bind_addr).await.map_err(|e| {
            DiscoveryError::Network(format!("Failed to bind UDP socket {}: {}", config.bind_addr, e))
        })?;

        if config.bind_addr.is_ipv4() {
            socket.set_multicast_loop_v4(true).map_err(|e| {
                DiscoveryError::Network(format!("Failed to set multicast loop: {}", e))
            })?;
        }

        Ok(Self {
            socket,
            target: config.target_addr,
            window: config.listen_window,
        })
    }

    pub fn local_addr(&self) -> Result<SocketAddr> {
        self.socket
            .local_addr()
            .map_err(|e| DiscoveryError::Network(e.to_string()))
    }

    /// Send the probe and collect replies until the window closes.
    ///
    /// The socket is closed when this returns, so late replies are lost.
    /// Replies without the success marker are logged and skipped.
    pub async fn search(self) -> Result<Vec<DiscoveryReply>> {
        self.socket
            .send_to(DISCOVERY_REQUEST.as_bytes(), self.target)
            .await
            .map_err(|e| DiscoveryError::Network(format!("Failed to send M-SEARCH: {}", e)))?;
        debug!(target = %self.target, "discovery probe sent");

        let deadline = Instant::now() + self.window;
        let mut replies = Vec::new();
        let mut buffer = vec![0u8; MAX_DATAGRAM];

        loop {
            match timeout_at(deadline, self.socket.recv_from(&mut buffer)).await {
                Err(_) => break,
                Ok(Ok((size, from))) => {
                    if size == buffer.len() {
                        debug!(%from, size, "discovery reply filled the receive buffer, may be truncated");
                    }
                    let text = String::from_utf8_lossy(&buffer[..size]);
                    debug!(%from, "discovery reply:\n{}", text);

                    match parse_reply(&text) {
                        Some(reply) => replies.push(reply),
                        None => error!(%from, "discovery reply without success status, ignoring"),
                    }
                }
                // ICMP unreachable from an earlier probe on some platforms
                Ok(Err(e)) if e.kind() == ErrorKind::ConnectionReset => continue,
                Ok(Err(e)) => {
                    warn!(error = %e, "socket error while collecting discovery replies");
                    break;
                }
            }
        }

        debug!(count = replies.len(), "discovery window closed");
        Ok(replies)
    }
}
