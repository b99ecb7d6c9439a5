//! UDAP/2.0 request bodies.
//!
//! Every pairing or command request posted to a television carries the same
//! small envelope:
//!
//! ```xml
//! <envelope>
//!   <api type="pairing">
//!     <name>hello</name>
//!     <value>1234</value>
//!     <port>8080</port>
//!   </api>
//! </envelope>
//! ```

use std::fmt;

use xmltree::{Element, EmitterConfig, XMLNode};

use crate::error::TransportError;

/// The `type` attribute of the `<api>` element
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApiType {
    Pairing,
    Command,
}

impl ApiType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ApiType::Pairing => "pairing",
            ApiType::Command => "command",
        }
    }
}

impl fmt::Display for ApiType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single UDAP message, ready to be rendered as an XML body
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UdapMessage {
    pub api: ApiType,
    pub name: String,
    pub value: Option<String>,
    pub port: Option<u16>,
}

impl UdapMessage {
    pub fn new(api: ApiType, name: impl Into<String>) -> Self {
        Self {
            api,
            name: name.into(),
            value: None,
            port: None,
        }
    }

    pub fn with_value(mut self, value: impl Into<String>) -> Self {
        self.value = Some(value.into());
        self
    }

    pub fn with_port(mut self, port: u16) -> Self {
        self.port = Some(port);
        self
    }

    /// Ask the television to show its pairing key on screen
    pub fn show_key() -> Self {
        Self::new(ApiType::Pairing, "showKey")
    }

    /// Confirm a pairing key
    pub fn hello(key: impl Into<String>, port: u16) -> Self {
        Self::new(ApiType::Pairing, "hello")
            .with_value(key)
            .with_port(port)
    }

    /// Terminate the pairing session
    pub fn byebye(port: u16) -> Self {
        Self::new(ApiType::Pairing, "byebye").with_port(port)
    }

    /// Remote-control key press
    pub fn key_input(code: impl Into<String>) -> Self {
        Self::new(ApiType::Command, "HandleKeyInput").with_value(code)
    }

    /// Build the `<envelope>` element tree for this message
    pub fn to_element(&self) -> Element {
        let mut api = Element::new("api");
        api.attributes
            .insert("type".to_string(), self.api.as_str().to_string());
        api.children.push(text_element("name", &self.name));
        if let Some(value) = &self.value {
            api.children.push(text_element("value", value));
        }
        if let Some(port) = self.port {
            api.children.push(text_element("port", &port.to_string()));
        }

        let mut envelope = Element::new("envelope");
        envelope.children.push(XMLNode::Element(api));
        envelope
    }

    /// Serialize to the XML document sent as request body
    pub fn to_xml(&self) -> Result<String, TransportError> {
        let config = EmitterConfig::new()
            .perform_indent(false)
            .write_document_declaration(true);

        let mut buffer = Vec::new();
        self.to_element()
            .write_with_config(&mut buffer, config)
            .map_err(|e| TransportError::Encode(e.to_string()))?;

        String::from_utf8(buffer).map_err(|e| TransportError::Encode(e.to_string()))
    }
}

fn text_element(name: &str, text: &str) -> XMLNode {
    let mut element = Element::new(name);
    element.children.push(XMLNode::Text(text.to_string()));
    XMLNode::Element(element)
}
