//! LgTvRemote - main entry point of the crate
//!
//! Owns the device registry and the transport, and exposes the discovery,
//! pairing and command operations.

use std::fmt;

use lgtv_discovery::{DeviceDescriptor, DeviceInfo, DiscoveryConfig};
use serde::Serialize;
use tracing::{debug, info};
use udap_client::{
    HttpTransport, Transport, TransportConfig, UdapMessage, UdapRequest, UdapResponse,
    COMMAND_PATH, PAIRING_PATH,
};

use crate::registry::DeviceRegistry;
use crate::{RemoteError, Result};

/// Outcome of a pairing attempt that reached the television
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PairingStatus {
    /// The key was accepted and stored
    Connected,
    /// The television answered with anything but 200
    InvalidPairingKey,
    /// No key was available; the television now shows one on screen
    PairingKeyDisplayed,
}

impl fmt::Display for PairingStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PairingStatus::Connected => f.write_str("CONNECTED"),
            PairingStatus::InvalidPairingKey => f.write_str("INVALID_PAIRING_KEY"),
            PairingStatus::PairingKeyDisplayed => f.write_str("PAIRING_KEY_DISPLAYED"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PairingOutcome {
    pub status: PairingStatus,
    pub device: DeviceInfo,
}

/// Remote control for every television found on the network
///
/// # Example
///
/// ```rust,no_run
/// use lgtv_remote::{LgTvRemote, PairingStatus};
///
/// # async fn run() -> lgtv_remote::Result<()> {
/// let remote = LgTvRemote::new()?;
///
/// for tv in remote.discover().await? {
///     let outcome = remote.start_pairing(&tv.uuid, "").await?;
///     assert_eq!(outcome.status, PairingStatus::PairingKeyDisplayed);
/// }
/// # Ok(())
/// # }
/// ```
pub struct LgTvRemote<T: Transport = HttpTransport> {
    transport: T,
    registry: DeviceRegistry,
    discovery: DiscoveryConfig,
}

impl LgTvRemote<HttpTransport> {
    /// Remote with default discovery settings and an HTTP transport
    pub fn new() -> Result<Self> {
        Self::builder().build()
    }

    pub fn builder() -> LgTvRemoteBuilder {
        LgTvRemoteBuilder::default()
    }
}

impl<T: Transport> LgTvRemote<T> {
    /// Remote using a custom transport and default discovery settings
    pub fn with_transport(transport: T) -> Self {
        LgTvRemoteBuilder::default().build_with_transport(transport)
    }

    pub fn registry(&self) -> &DeviceRegistry {
        &self.registry
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    pub fn discovery_config(&self) -> &DiscoveryConfig {
        &self.discovery
    }

    /// Run a discovery sweep and merge what it finds into the registry.
    ///
    /// Returns the devices found by this sweep, with `registered` reflecting
    /// any pairing key kept from earlier sweeps. No device is not an error.
    pub async fn discover(&self) -> Result<Vec<DeviceInfo>> {
        let devices = lgtv_discovery::discover(&self.discovery, &self.transport).await?;

        let mut found: Vec<DeviceInfo> = Vec::with_capacity(devices.len());
        for device in devices {
            let stored = self.registry.upsert(device);
            found.retain(|info| info.uuid != stored.uuid);
            found.push(stored.to_info());
        }

        info!(count = found.len(), "discovery finished");
        Ok(found)
    }

    /// Devices holding a pairing key
    pub fn list_paired(&self) -> Vec<DeviceInfo> {
        self.registry.list_paired()
    }

    /// Pair with a television.
    ///
    /// With a non-empty `key`, or failing that a stored key, a `hello` is
    /// sent and a 200 answer stores the key. Without any key the television
    /// is asked to display one.
    pub async fn start_pairing(&self, uuid: &str, key: &str) -> Result<PairingOutcome> {
        let device = self.device(uuid)?;

        let key_to_send = if key.is_empty() {
            device.pairing_key.clone().filter(|stored| !stored.is_empty())
        } else {
            Some(key.to_string())
        };

        let status = match key_to_send {
            Some(key) => {
                debug!(%uuid, "sending pairing key");
                let body = UdapMessage::hello(&key, device.port).to_xml()?;
                let response = self.post(&device, PAIRING_PATH, body).await?;

                if response.is_ok() {
                    self.registry.set_pairing_key(uuid, &key);
                    info!(%uuid, "paired");
                    PairingStatus::Connected
                } else {
                    debug!(%uuid, status = response.status, "pairing key rejected");
                    PairingStatus::InvalidPairingKey
                }
            }
            None => {
                debug!(%uuid, "requesting pairing key display");
                let body = UdapMessage::show_key().to_xml()?;
                self.post(&device, PAIRING_PATH, body).await?;
                PairingStatus::PairingKeyDisplayed
            }
        };

        let device = self.registry.get(uuid).unwrap_or(device);
        Ok(PairingOutcome {
            status,
            device: device.to_info(),
        })
    }

    /// End the pairing session.
    ///
    /// The stored key is kept so a later `start_pairing(uuid, "")` can
    /// reconnect without a new key.
    pub async fn end_pairing(&self, uuid: &str) -> Result<UdapResponse> {
        let device = self.device(uuid)?;
        debug!(%uuid, "ending pairing");

        let body = UdapMessage::byebye(device.port).to_xml()?;
        self.post(&device, PAIRING_PATH, body).await
    }

    /// Send a key-input command; the response is returned as received
    pub async fn send_cmd(&self, uuid: &str, cmd: &str) -> Result<UdapResponse> {
        let device = self.device(uuid)?;
        debug!(%uuid, %cmd, "sending command");

        let body = UdapMessage::key_input(cmd).to_xml()?;
        self.post(&device, COMMAND_PATH, body).await
    }

    fn device(&self, uuid: &str) -> Result<DeviceDescriptor> {
        self.registry
            .get(uuid)
            .ok_or_else(|| RemoteError::DeviceNotFound(uuid.to_string()))
    }

    async fn post(&self, device: &DeviceDescriptor, path: &str, body: String) -> Result<UdapResponse> {
        let request = UdapRequest::post(device.hostname.clone(), device.port, path, body);
        Ok(self.transport.send(request).await?)
    }
}

/// Configures a [`LgTvRemote`]
#[derive(Debug, Clone, Default)]
pub struct LgTvRemoteBuilder {
    discovery: DiscoveryConfig,
    transport: TransportConfig,
}

impl LgTvRemoteBuilder {
    pub fn discovery_config(mut self, config: DiscoveryConfig) -> Self {
        self.discovery = config;
        self
    }

    pub fn transport_config(mut self, config: TransportConfig) -> Self {
        self.transport = config;
        self
    }

    pub fn build(self) -> Result<LgTvRemote<HttpTransport>> {
        let transport = HttpTransport::with_config(&self.transport)?;
        Ok(self.build_with_transport(transport))
    }

    /// Build around an existing transport; the transport config is unused
    pub fn build_with_transport<T: Transport>(self, transport: T) -> LgTvRemote<T> {
        LgTvRemote {
            transport,
            registry: DeviceRegistry::new(),
            discovery: self.discovery,
        }
    }
}
