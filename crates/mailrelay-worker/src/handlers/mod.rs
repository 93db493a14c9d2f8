/// Lambda event handlers
pub mod notification;

pub use notification::{NotificationHandler, Outcome};
