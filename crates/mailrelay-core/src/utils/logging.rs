/// Logging utilities: subscriber setup and PII redaction
use regex::Regex;
use std::sync::LazyLock;
use tracing_subscriber::EnvFilter;

// Email redaction regex
static EMAIL_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Z|a-z]{2,}\b").unwrap());

/// Installs the JSON tracing subscriber used by the Lambda
///
/// `RUST_LOG` overrides the default `info` filter.
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .json()
        .init();
}

/// Redacts email addresses from text, preserving domain for debugging
///
/// # Examples
/// ```
/// use mailrelay_core::utils::logging::redact_email;
///
/// assert_eq!(redact_email("user@example.com"), "***@example.com");
/// assert_eq!(redact_email("Contact: test@acme.com for help"), "Contact: ***@acme.com for help");
/// ```
pub fn redact_email(text: &str) -> String {
    EMAIL_PATTERN
        .replace_all(text, |caps: &regex::Captures| {
            let email = &caps[0];
            if let Some(at_pos) = email.find('@') {
                format!("***{}", &email[at_pos..])
            } else {
                "***@***".to_string()
            }
        })
        .to_string()
}
