/// Error types for Mailrelay
use thiserror::Error;

#[derive(Error, Debug)]
pub enum RelayError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Parameter store error: {0}")]
    Parameter(String),

    #[error("Invalid forwarding mapping: {0}")]
    Mapping(String),

    #[error("Invalid event: {0}")]
    Event(String),

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("SES error: {0}")]
    Ses(String),

    #[error("Forwarding failed: {0}")]
    Forward(String),
}
