//! Error types for the UDAP client

use thiserror::Error;

/// Errors that can occur while talking UDAP to a television
#[derive(Debug, Error)]
pub enum TransportError {
    /// Connection, timeout or other HTTP-level failure
    #[error("Network/HTTP error: {0}")]
    Network(String),

    /// The response body could not be read
    #[error("Failed to read response body: {0}")]
    Body(String),

    /// A message could not be serialized to XML
    #[error("XML encoding error: {0}")]
    Encode(String),
}
