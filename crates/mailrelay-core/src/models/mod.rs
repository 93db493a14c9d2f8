pub mod config;
/// Data models for Mailrelay
pub mod events;
pub mod mapping;
pub mod request;

// Re-export commonly used types
pub use config::*;
pub use events::*;
pub use mapping::*;
pub use request::*;
