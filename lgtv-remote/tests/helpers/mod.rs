//! Test helpers shared by the remote integration tests

#![allow(dead_code)]

use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::Mutex;

use async_trait::async_trait;
use lgtv_remote::{DeviceDescriptor, DiscoveryConfig};
use tokio::net::UdpSocket;
use udap_client::{Transport, TransportError, UdapRequest, UdapResponse};

pub const DESCRIPTION: &str = "<envelope><device>\
    <uuid>ABC-1</uuid>\
    <modelName>OLED55</modelName>\
    <friendlyName>Living Room TV</friendlyName>\
    <deviceType>tv</deviceType>\
    </device></envelope>";

pub fn descriptor(uuid: &str) -> DeviceDescriptor {
    DeviceDescriptor {
        uuid: uuid.to_string(),
        name: "OLED55".to_string(),
        friendly_name: "Living Room TV".to_string(),
        device_type: "tv".to_string(),
        hostname: "10.0.0.5".to_string(),
        port: 8080,
        pairing_key: None,
    }
}

pub fn reply_text(location: &str) -> String {
    format!(
        "HTTP/1.1 200 OK\r\n\
         LOCATION: {}\r\n\
         ST: udap:rootservice\r\n\
         USER-AGENT: UDAP/2.0\r\n\r\n",
        location
    )
}

/// Transport answering by path, recording every request
#[derive(Default)]
pub struct MockTransport {
    statuses: Mutex<HashMap<String, u16>>,
    bodies: Mutex<HashMap<String, String>>,
    offline: Mutex<bool>,
    requests: Mutex<Vec<UdapRequest>>,
}

impl MockTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn respond(&self, path: &str, status: u16, body: &str) {
        self.statuses.lock().unwrap().insert(path.to_string(), status);
        self.bodies.lock().unwrap().insert(path.to_string(), body.to_string());
    }

    /// Every further request fails at the network level
    pub fn go_offline(&self) {
        *self.offline.lock().unwrap() = true;
    }

    pub fn requests(&self) -> Vec<UdapRequest> {
        self.requests.lock().unwrap().clone()
    }

    pub fn last_body(&self) -> Option<String> {
        self.requests.lock().unwrap().last().and_then(|r| r.body.clone())
    }
}

#[async_trait]
impl Transport for MockTransport {
    async fn send(&self, request: UdapRequest) -> Result<UdapResponse, TransportError> {
        let path = request.path.clone();
        self.requests.lock().unwrap().push(request);

        if *self.offline.lock().unwrap() {
            return Err(TransportError::Network("host unreachable".to_string()));
        }

        let status = self.statuses.lock().unwrap().get(&path).copied().unwrap_or(404);
        let body = self.bodies.lock().unwrap().get(&path).cloned().unwrap_or_default();
        Ok(UdapResponse::new(status, body))
    }
}

/// Fake television answering every probe it receives with `replies`
pub async fn spawn_responder(replies: Vec<String>) -> SocketAddr {
    let socket = UdpSocket::bind("127.0.0.1:0").await.unwrap();
    let addr = socket.local_addr().unwrap();

    tokio::spawn(async move {
        let mut buffer = [0u8; 2048];
        while let Ok((_, from)) = socket.recv_from(&mut buffer).await {
            for reply in &replies {
                let _ = socket.send_to(reply.as_bytes(), from).await;
            }
        }
    });

    addr
}

pub fn loopback_config(target: SocketAddr) -> DiscoveryConfig {
    DiscoveryConfig::new()
        .with_bind_addr("127.0.0.1:0".parse().unwrap())
        .with_target_addr(target)
        .with_listen_window(std::time::Duration::from_millis(300))
}
