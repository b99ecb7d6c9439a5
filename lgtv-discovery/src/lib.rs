//! LG television discovery library
//!
//! Finds UDAP/2.0 televisions on the local network. A sweep multicasts one
//! SSDP `M-SEARCH` for `udap:rootservice`, collects replies for a fixed
//! window, then follows each reply's `LOCATION` to the device's XML
//! description.
//!
//! # Quick Start
//!
//! ```no_run
//! use lgtv_discovery::{discover, DiscoveryConfig};
//! use udap_client::HttpTransport;
//!
//! # async fn run() -> lgtv_discovery::Result<()> {
//! let transport = HttpTransport::new()?;
//! for device in discover(&DiscoveryConfig::default(), &transport).await? {
//!     println!("Found {} ({}) at {}", device.friendly_name, device.uuid, device.hostname);
//! }
//! # Ok(())
//! # }
//! ```
//!
//! Finding no television is not an error; the list is simply empty.

mod config;
pub mod device;
mod error;
pub mod resolver;
pub mod ssdp;

pub use config::{DiscoveryConfig, DEFAULT_BIND_PORT, MULTICAST_ADDR};
pub use device::{DeviceDescription, DeviceDescriptor, DeviceInfo, DeviceLocation};
pub use error::{DiscoveryError, Result};
pub use resolver::DeviceResolver;
pub use ssdp::{parse_reply, DiscoveryReply, SsdpClient};

use udap_client::Transport;

/// Run one discovery sweep and resolve every reply.
///
/// Only socket setup failures are reported as errors. Replies that cannot
/// be resolved are logged and dropped.
pub async fn discover<T: Transport + ?Sized>(
    config: &DiscoveryConfig,
    transport: &T,
) -> Result<Vec<DeviceDescriptor>> {
    let replies = SsdpClient::bind(config).await?.search().await?;
    Ok(DeviceResolver::new(transport).resolve_all(&replies).await)
}
