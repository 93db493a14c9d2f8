/// SES email sending service
use crate::error::RelayError;
use crate::utils::logging::redact_email;
use async_trait::async_trait;

#[async_trait]
pub trait EmailSender: Send + Sync {
    /// Sends a raw RFC 5322 message, returning the SES message id
    async fn send_raw_email(
        &self,
        raw_email: &[u8],
        from: &str,
        to: &[String],
    ) -> Result<String, RelayError>;
}

pub struct SesEmailSender {
    client: aws_sdk_ses::Client,
}

impl SesEmailSender {
    pub fn new(client: aws_sdk_ses::Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl EmailSender for SesEmailSender {
    async fn send_raw_email(
        &self,
        raw_email: &[u8],
        from: &str,
        to: &[String],
    ) -> Result<String, RelayError> {
        use aws_sdk_ses::primitives::Blob;

        let raw_message = aws_sdk_ses::types::RawMessage::builder()
            .data(Blob::new(raw_email))
            .build()
            .map_err(|e| RelayError::Ses(format!("Failed to build raw message: {}", e)))?;

        // Single attempt: a failed send fails the invocation
        let response = self
            .client
            .send_raw_email()
            .raw_message(raw_message)
            .source(from)
            .set_destinations(Some(to.to_vec()))
            .send()
            .await
            .map_err(|e| RelayError::Ses(format!("SES send_raw_email failed: {}", e)))?;

        let message_id = response.message_id;

        tracing::info!(
            "Sent email via SES: {} (to: {})",
            message_id,
            redact_email(&to.join(", "))
        );
        Ok(message_id)
    }
}
