//! Private UDAP/2.0 client for LG television communication
//!
//! This crate provides the two leaf services the remote is built on: an
//! HTTP [`Transport`] that performs one request against a television and
//! returns its status and body, and [`UdapMessage`], which renders the XML
//! envelopes posted to the pairing and command endpoints.

mod error;
pub mod message;
pub mod transport;

pub use error::TransportError;
pub use message::{ApiType, UdapMessage};
pub use transport::{
    HttpTransport, Method, Transport, TransportConfig, UdapRequest, UdapResponse,
};

/// Endpoint accepting `showKey`, `hello` and `byebye` messages
pub const PAIRING_PATH: &str = "/udap/api/pairing";

/// Endpoint accepting key-input commands
pub const COMMAND_PATH: &str = "/udap/api/command";
