//! # lgtv-remote - remote control for LG UDAP televisions
//!
//! ```rust,no_run
//! use lgtv_remote::LgTvRemote;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), lgtv_remote::RemoteError> {
//!     let remote = LgTvRemote::new()?;
//!
//!     let tvs = remote.discover().await?;
//!     let tv = tvs.first().expect("no television found");
//!
//!     // First call shows the pairing key on the TV screen
//!     remote.start_pairing(&tv.uuid, "").await?;
//!
//!     // Second call confirms the key read from the screen
//!     let outcome = remote.start_pairing(&tv.uuid, "123456").await?;
//!     println!("{}", outcome.status);
//!
//!     remote.send_cmd(&tv.uuid, "24").await?;
//!     remote.end_pairing(&tv.uuid).await?;
//!     Ok(())
//! }
//! ```
//!
//! ## Architecture
//!
//! ```text
//! lgtv-remote (registry, pairing, commands)
//!     ↓
//! lgtv-discovery (SSDP sweep, description resolution)
//!     ↓
//! udap-client (HTTP transport, UDAP message encoding)
//! ```
//!
//! The registry lives inside [`LgTvRemote`] and is in-memory only: pairing
//! keys survive rediscovery but not the process.

pub use error::{RemoteError, Result};
pub use registry::DeviceRegistry;
pub use remote::{LgTvRemote, LgTvRemoteBuilder, PairingOutcome, PairingStatus};

pub use lgtv_discovery::{DeviceDescriptor, DeviceInfo, DiscoveryConfig};
pub use udap_client::{HttpTransport, Transport, TransportConfig, UdapResponse};

mod error;
pub mod logging;
mod registry;
mod remote;
