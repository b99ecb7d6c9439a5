//! HTTP transport used for description fetches, pairing and commands.

use std::fmt;
use std::time::Duration;

use async_trait::async_trait;
use tracing::debug;

use crate::error::TransportError;

/// User agent announced by UDAP/2.0 clients
pub const USER_AGENT: &str = "UDAP/2.0";

/// Content type of every UDAP request body
pub const CONTENT_TYPE: &str = "text/xml; charset=utf-8";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Method::Get => f.write_str("GET"),
            Method::Post => f.write_str("POST"),
        }
    }
}

/// A request addressed to a television
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UdapRequest {
    pub method: Method,
    pub hostname: String,
    pub port: u16,
    pub path: String,
    pub body: Option<String>,
}

impl UdapRequest {
    pub fn get(hostname: impl Into<String>, port: u16, path: impl Into<String>) -> Self {
        Self {
            method: Method::Get,
            hostname: hostname.into(),
            port,
            path: path.into(),
            body: None,
        }
    }

    pub fn post(
        hostname: impl Into<String>,
        port: u16,
        path: impl Into<String>,
        body: String,
    ) -> Self {
        Self {
            method: Method::Post,
            hostname: hostname.into(),
            port,
            path: path.into(),
            body: Some(body),
        }
    }

    pub fn url(&self) -> String {
        format!("http://{}:{}{}", self.hostname, self.port, self.path)
    }
}

/// Status and body returned by the television
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UdapResponse {
    pub status: u16,
    pub body: String,
}

impl UdapResponse {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    /// UDAP devices answer accepted requests with exactly 200
    pub fn is_ok(&self) -> bool {
        self.status == 200
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Performs one HTTP exchange with a television.
///
/// Non-2xx statuses are not errors at this layer; callers decide what a
/// rejected request means.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn send(&self, request: UdapRequest) -> Result<UdapResponse, TransportError>;
}

/// Timeouts applied by [`HttpTransport`]
#[derive(Debug, Clone)]
pub struct TransportConfig {
    /// Default: 5 seconds
    pub connect_timeout: Duration,
    /// Default: 10 seconds
    pub request_timeout: Duration,
}

impl Default for TransportConfig {
    fn default() -> Self {
        Self {
            connect_timeout: Duration::from_secs(5),
            request_timeout: Duration::from_secs(10),
        }
    }
}

impl TransportConfig {
    pub fn with_connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = timeout;
        self
    }

    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }
}

/// [`Transport`] backed by a pooled `reqwest` client
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: reqwest::Client,
}

impl HttpTransport {
    pub fn new() -> Result<Self, TransportError> {
        Self::with_config(&TransportConfig::default())
    }

    pub fn with_config(config: &TransportConfig) -> Result<Self, TransportError> {
        let client = reqwest::Client::builder()
            .connect_timeout(config.connect_timeout)
            .timeout(config.request_timeout)
            .user_agent(USER_AGENT)
            // televisions live on the local network
            .no_proxy()
            .build()
            .map_err(|e| TransportError::Network(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self { client })
    }

    /// Use an already configured client (shared pools, proxies, ...)
    pub fn with_client(client: reqwest::Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn send(&self, request: UdapRequest) -> Result<UdapResponse, TransportError> {
        let url = request.url();
        debug!(method = %request.method, %url, "sending UDAP request");

        let builder = match request.method {
            Method::Get => self.client.get(&url),
            Method::Post => self.client.post(&url),
        };
        let builder = builder.header(reqwest::header::CONTENT_TYPE, CONTENT_TYPE);
        let builder = match request.body {
            Some(body) => builder.body(body),
            None => builder,
        };

        let response = builder
            .send()
            .await
            .map_err(|e| TransportError::Network(e.to_string()))?;

        let status = response.status().as_u16();
        let body = response
            .text()
            .await
            .map_err(|e| TransportError::Body(e.to_string()))?;

        debug!(%url, status, "UDAP response received");
        Ok(UdapResponse { status, body })
    }
}
