use lgtv_discovery::DiscoveryError;
use thiserror::Error;
use udap_client::TransportError;

#[derive(Error, Debug)]
pub enum RemoteError {
    #[error("Discovery error: {0}")]
    Discovery(#[from] DiscoveryError),

    #[error("Transport error: {0}")]
    Transport(#[from] TransportError),

    #[error("Device not found: {0}")]
    DeviceNotFound(String),
}

pub type Result<T> = std::result::Result<T, RemoteError>;
