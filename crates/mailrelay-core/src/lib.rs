/// Mailrelay Core - Shared library for the Mailrelay SES forwarding Lambda
///
/// This crate contains the configuration model, the forwarding mapping,
/// AWS service traits and the forwarding engine used by the worker Lambda.
pub mod constants;
pub mod email;
pub mod error;
pub mod forwarder;
pub mod models;
pub mod services;
pub mod utils;

// Re-export commonly used types
pub use error::RelayError;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
