//! Test helpers: description fixtures and an in-memory transport

#![allow(dead_code)]

use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;
use udap_client::{Transport, TransportError, UdapRequest, UdapResponse};

/// Load a description document from `tests/fixtures`
pub fn load_fixture(filename: &str) -> String {
    let mut path = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    path.push("tests/fixtures");
    path.push(filename);

    fs::read_to_string(&path)
        .unwrap_or_else(|e| panic!("Failed to load fixture {}: {}", filename, e))
}

/// Discovery reply text pointing at `location`
pub fn reply_text(location: &str) -> String {
    format!(
        "HTTP/1.1 200 OK\r\n\
         CACHE-CONTROL: max-age=1800\r\n\
         EXT:\r\n\
         LOCATION: {}\r\n\
         SERVER: Linux/2.6.18 UDAP/2.0 LGSmartTV/1.0\r\n\
         ST: udap:rootservice\r\n\r\n",
        location
    )
}

enum Canned {
    Response(UdapResponse),
    Refused,
}

/// Transport answering from a table keyed by `host:port/path`
#[derive(Default)]
pub struct MockTransport {
    routes: Mutex<HashMap<String, Canned>>,
    requests: Mutex<Vec<UdapRequest>>,
}

impl MockTransport {
    pub fn new() -> Self {
        Self::default()
    }

    fn key(hostname: &str, port: u16, path: &str) -> String {
        format!("{}:{}{}", hostname, port, path)
    }

    pub fn respond(&self, hostname: &str, port: u16, path: &str, status: u16, body: &str) {
        self.routes.lock().unwrap().insert(
            Self::key(hostname, port, path),
            Canned::Response(UdapResponse::new(status, body)),
        );
    }

    pub fn refuse(&self, hostname: &str, port: u16, path: &str) {
        self.routes
            .lock()
            .unwrap()
            .insert(Self::key(hostname, port, path), Canned::Refused);
    }

    pub fn requests(&self) -> Vec<UdapRequest> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl Transport for MockTransport {
    async fn send(&self, request: UdapRequest) -> Result<UdapResponse, TransportError> {
        let key = Self::key(&request.hostname, request.port, &request.path);
        self.requests.lock().unwrap().push(request);

        match self.routes.lock().unwrap().get(&key) {
            Some(Canned::Response(response)) => Ok(response.clone()),
            Some(Canned::Refused) | None => {
                Err(TransportError::Network(format!("connection refused: {}", key)))
            }
        }
    }
}

/// Wraps a [`MockTransport`] and holds every request for `delay`
pub struct SlowTransport {
    inner: MockTransport,
    delay: Duration,
}

impl SlowTransport {
    pub fn new(inner: MockTransport, delay: Duration) -> Self {
        Self { inner, delay }
    }
}

#[async_trait]
impl Transport for SlowTransport {
    async fn send(&self, request: UdapRequest) -> Result<UdapResponse, TransportError> {
        tokio::time::sleep(self.delay).await;
        self.inner.send(request).await
    }
}
