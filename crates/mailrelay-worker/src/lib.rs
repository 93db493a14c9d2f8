/// Mailrelay Worker - SES forwarding Lambda
///
/// This module contains the notification handler invoked for every stored email.
pub mod handlers;

// Re-export commonly used items
pub use handlers::{NotificationHandler, Outcome};
pub use mailrelay_core::*;
