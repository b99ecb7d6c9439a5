//! Turns discovery replies into device descriptors.

use futures::future::join_all;
use tracing::{debug, warn};
use udap_client::{Transport, UdapRequest};

use crate::device::{DeviceDescription, DeviceDescriptor, DeviceLocation};
use crate::error::{DiscoveryError, Result};
use crate::ssdp::DiscoveryReply;

/// Fetches and parses description documents through a [`Transport`]
pub struct DeviceResolver<'a, T: Transport + ?Sized> {
    transport: &'a T,
}

impl<'a, T: Transport + ?Sized> DeviceResolver<'a, T> {
    pub fn new(transport: &'a T) -> Self {
        Self { transport }
    }

    /// Resolve one reply.
    ///
    /// A reply without `LOCATION` fails before any request is made.
    pub async fn resolve(&self, reply: &DiscoveryReply) -> Result<DeviceDescriptor> {
        let location = reply.location().ok_or(DiscoveryError::MissingLocation)?;
        let location = DeviceLocation::parse(location)?;

        let response = self
            .transport
            .send(UdapRequest::get(
                location.hostname.clone(),
                location.port,
                location.description_path.clone(),
            ))
            .await?;

        if !response.is_success() {
            return Err(DiscoveryError::Http(response.status));
        }

        let description = DeviceDescription::from_xml(&response.body)?;
        debug!(
            uuid = %description.uuid,
            model = %description.model_name,
            host = %location.host,
            "resolved device description"
        );

        Ok(description.into_descriptor(&location))
    }

    /// Resolve every reply concurrently on the current task.
    ///
    /// Completes once each reply has either resolved or failed. Failures are
    /// logged and left out; order follows `replies`.
    pub async fn resolve_all(&self, replies: &[DiscoveryReply]) -> Vec<DeviceDescriptor> {
        let results = join_all(replies.iter().map(|reply| self.resolve(reply))).await;

        results
            .into_iter()
            .zip(replies)
            .filter_map(|(result, reply)| match result {
                Ok(device) => Some(device),
                Err(e) => {
                    warn!(
                        location = reply.location().unwrap_or("<none>"),
                        error = %e,
                        "skipping device that could not be resolved"
                    );
                    None
                }
            })
            .collect()
    }
}
