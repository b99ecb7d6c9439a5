//! Device description parsing and the descriptor types built from it.

use serde::{Deserialize, Serialize};
use url::Url;
use xmltree::{Element, XMLNode};

use crate::error::{DiscoveryError, Result};

/// Network location of a television, taken from a reply's `LOCATION` URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeviceLocation {
    /// `hostname[:port]` exactly as written in the URL
    pub host: String,
    pub hostname: String,
    pub port: u16,
    /// Path and query of the description document
    pub description_path: String,
}

impl DeviceLocation {
    /// Parse a location URL such as `http://10.0.0.5:8080/desc.xml`.
    ///
    /// When the URL omits the port, the scheme's default is used.
    pub fn parse(location: &str) -> Result<Self> {
        let url = Url::parse(location.trim())
            .map_err(|_| DiscoveryError::InvalidLocation(location.to_string()))?;

        let hostname = url
            .host_str()
            .ok_or_else(|| DiscoveryError::InvalidLocation(location.to_string()))?
            .to_string();
        let port = url
            .port_or_known_default()
            .ok_or_else(|| DiscoveryError::InvalidLocation(location.to_string()))?;
        let host = match url.port() {
            Some(explicit) => format!("{}:{}", hostname, explicit),
            None => hostname.clone(),
        };

        let mut description_path = url.path().to_string();
        if let Some(query) = url.query() {
            description_path.push('?');
            description_path.push_str(query);
        }

        Ok(Self {
            host,
            hostname,
            port,
            description_path,
        })
    }
}

/// Identifying fields of a description document
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeviceDescription {
    pub uuid: String,
    pub model_name: String,
    pub friendly_name: String,
    pub device_type: String,
}

impl DeviceDescription {
    /// Parse a description document.
    ///
    /// Each field is the text of the first element with that name anywhere
    /// in the document, whatever wraps it.
    ///
    /// # Errors
    ///
    /// `DiscoveryError::Parse` if the XML is malformed,
    /// `DiscoveryError::MissingElement` if a field's element is absent.
    pub fn from_xml(xml: &str) -> Result<Self> {
        let root = Element::parse(xml.as_bytes())
            .map_err(|e| DiscoveryError::Parse(format!("Failed to parse device XML: {}", e)))?;

        Ok(Self {
            uuid: required_text(&root, "uuid")?,
            model_name: required_text(&root, "modelName")?,
            friendly_name: required_text(&root, "friendlyName")?,
            device_type: required_text(&root, "deviceType")?,
        })
    }

    /// Combine with the location the description was fetched from.
    ///
    /// The pairing key starts out unset; the registry carries a known key
    /// forward.
    pub fn into_descriptor(self, location: &DeviceLocation) -> DeviceDescriptor {
        DeviceDescriptor {
            uuid: self.uuid,
            name: self.model_name,
            friendly_name: self.friendly_name,
            device_type: self.device_type,
            hostname: location.hostname.clone(),
            port: location.port,
            pairing_key: None,
        }
    }
}

fn required_text(root: &Element, name: &'static str) -> Result<String> {
    find_descendant(root, name)
        .map(|element| {
            element
                .get_text()
                .map(|text| text.trim().to_string())
                .unwrap_or_default()
        })
        .ok_or(DiscoveryError::MissingElement(name))
}

/// Depth-first, document-order search including `element` itself
fn find_descendant<'a>(element: &'a Element, name: &str) -> Option<&'a Element> {
    if element.name == name {
        return Some(element);
    }
    element.children.iter().find_map(|child| match child {
        XMLNode::Element(child) => find_descendant(child, name),
        _ => None,
    })
}

/// A known television
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeviceDescriptor {
    /// Unique device identifier
    pub uuid: String,
    /// Model name, e.g. "42LW5700-TA"
    pub name: String,
    pub friendly_name: String,
    pub device_type: String,
    pub hostname: String,
    pub port: u16,
    /// Set once pairing succeeds
    pub pairing_key: Option<String>,
}

impl DeviceDescriptor {
    /// A pairing key is stored and non-empty
    pub fn is_registered(&self) -> bool {
        self.pairing_key.as_deref().is_some_and(|key| !key.is_empty())
    }

    pub fn to_info(&self) -> DeviceInfo {
        DeviceInfo {
            uuid: self.uuid.clone(),
            name: self.name.clone(),
            friendly_name: self.friendly_name.clone(),
            device_type: self.device_type.clone(),
            registered: self.is_registered(),
        }
    }
}

/// Public view of a [`DeviceDescriptor`].
///
/// Network location and pairing key stay private to the remote.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeviceInfo {
    pub uuid: String,
    pub name: String,
    pub friendly_name: String,
    #[serde(rename = "type")]
    pub device_type: String,
    pub registered: bool,
}

impl From<&DeviceDescriptor> for DeviceInfo {
    fn from(device: &DeviceDescriptor) -> Self {
        device.to_info()
    }
}
