/// Recipient mapping for forwarded mail
use crate::models::ForwardMapping;

/// Where a message goes and which original recipient it is sent on behalf of
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Routing {
    pub destinations: Vec<String>,
    /// Last original recipient with a mapping entry; used as the SES source
    pub original_recipient: String,
}

/// Maps the original recipients through the forwarding mapping
///
/// Returns `None` when no recipient has a mapping entry.
pub fn route_recipients(
    mapping: &ForwardMapping,
    recipients: &[String],
    allow_plus_sign: bool,
) -> Option<Routing> {
    let mut destinations = Vec::new();
    let mut original_recipient = None;

    for recipient in recipients {
        if let Some(targets) = mapping.resolve(recipient, allow_plus_sign) {
            destinations.extend(targets.iter().cloned());
            original_recipient = Some(recipient.clone());
        }
    }

    match original_recipient {
        Some(original_recipient) if !destinations.is_empty() => Some(Routing {
            destinations,
            original_recipient,
        }),
        _ => None,
    }
}
