//! Error types for the discovery system.

use thiserror::Error;
use udap_client::TransportError;

/// Error type for discovery operations.
///
/// Only socket setup failures abort a sweep. Every other variant describes
/// why a single reply could not be turned into a device.
#[derive(Debug, Error)]
pub enum DiscoveryError {
    /// Socket creation, send or receive failure
    #[error("Network error: {0}")]
    Network(String),

    /// The reply had no `LOCATION` header
    #[error("Discovery reply has no LOCATION header")]
    MissingLocation,

    /// The `LOCATION` header is not a usable http URL
    #[error("Invalid LOCATION '{0}'")]
    InvalidLocation(String),

    /// Fetching the description document failed
    #[error("Description fetch failed: {0}")]
    Transport(#[from] TransportError),

    /// The description endpoint answered with a non-success status
    #[error("Description fetch returned HTTP {0}")]
    Http(u16),

    /// The description document is not well-formed XML
    #[error("Parse error: {0}")]
    Parse(String),

    /// A required element is absent from the description document
    #[error("Description document has no <{0}> element")]
    MissingElement(&'static str),
}

/// Convenience Result type alias for discovery operations.
pub type Result<T> = std::result::Result<T, DiscoveryError>;
