/// AWS Lambda event types
use crate::constants::{SES_EVENT_SOURCE, SES_EVENT_VERSION};
use crate::error::RelayError;
use crate::models::ForwardRequest;
use serde::Deserialize;

/// Notification wrapper - either an S3 object notification or an SES receipt
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum MailEvent {
    S3(S3Event), // Try S3 first: its records require the `s3` block
    Ses(SesEvent),
}

/// S3 object-created event for a stored raw email
#[derive(Debug, Clone, Deserialize)]
pub struct S3Event {
    #[serde(rename = "Records")]
    pub records: Vec<S3EventRecord>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct S3EventRecord {
    #[serde(rename = "eventSource", default)]
    pub event_source: String,
    #[serde(rename = "eventName", default)]
    pub event_name: String,
    pub s3: S3Info,
    /// Receipt details, present when SES relays the notification
    #[serde(default)]
    pub ses: Option<SesPayload>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct S3Info {
    pub bucket: S3Bucket,
    pub object: S3Object,
}

#[derive(Debug, Clone, Deserialize)]
pub struct S3Bucket {
    pub name: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct S3Object {
    pub key: String,
    pub size: Option<i64>,
}

/// SES receipt event from direct Lambda invocation
#[derive(Debug, Clone, Deserialize)]
pub struct SesEvent {
    #[serde(rename = "Records")]
    pub records: Vec<SesEventRecord>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SesEventRecord {
    #[serde(rename = "eventSource")]
    pub event_source: String,
    #[serde(rename = "eventVersion")]
    pub event_version: String,
    pub ses: SesPayload,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SesPayload {
    pub mail: SesMail,
    pub receipt: SesReceipt,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SesMail {
    #[serde(rename = "messageId")]
    pub message_id: String,
    #[serde(default)]
    pub source: String,
    #[serde(default)]
    pub destination: Vec<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SesReceipt {
    pub recipients: Vec<String>,
}

/// Where a raw email lives and who it was originally sent to
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InboundMail {
    pub bucket: String,
    pub key: String,
    /// Envelope recipients, when the notification carries them
    pub recipients: Option<Vec<String>>,
}

impl MailEvent {
    pub fn from_value(value: serde_json::Value) -> Result<Self, RelayError> {
        serde_json::from_value(value)
            .map_err(|e| RelayError::Event(format!("Received invalid SES message: {}", e)))
    }

    /// Locates the raw email described by the first record
    pub fn locate(&self, request: &ForwardRequest) -> Result<InboundMail, RelayError> {
        match self {
            Self::Ses(event) => {
                let record = event
                    .records
                    .first()
                    .ok_or_else(|| RelayError::Event("SES event has no records".to_string()))?;

                if record.event_source != SES_EVENT_SOURCE
                    || record.event_version != SES_EVENT_VERSION
                {
                    return Err(RelayError::Event(format!(
                        "Received invalid SES message: source {}, version {}",
                        record.event_source, record.event_version
                    )));
                }

                Ok(InboundMail {
                    bucket: request.email_bucket.clone(),
                    key: request.object_key(&record.ses.mail.message_id),
                    recipients: Some(record.ses.receipt.recipients.clone()),
                })
            }
            Self::S3(event) => {
                let record = event
                    .records
                    .first()
                    .ok_or_else(|| RelayError::Event("S3 event has no records".to_string()))?;

                Ok(InboundMail {
                    bucket: record.s3.bucket.name.clone(),
                    key: decode_object_key(&record.s3.object.key),
                    recipients: record
                        .ses
                        .as_ref()
                        .map(|ses| ses.receipt.recipients.clone()),
                })
            }
        }
    }
}

/// S3 notifications carry form-encoded keys (`+` for a space, `%XX` escapes)
fn decode_object_key(key: &str) -> String {
    // keep literal pair separators inside the key
    let escaped = key.replace('&', "%26").replace('=', "%3D");
    url::form_urlencoded::parse(escaped.as_bytes())
        .map(|(name, _)| name.into_owned())
        .next()
        .unwrap_or_default()
}
