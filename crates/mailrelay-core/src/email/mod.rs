/// Email processing modules
pub mod headers;

pub use headers::{header_recipients, rewrite_message, split_message};
