/// SES-backed forwarder: fetch from S3, rewrite headers, resend via SES
use super::{Completion, Forwarder, Routing, route_recipients};
use crate::email::{header_recipients, rewrite_message};
use crate::error::RelayError;
use crate::models::{ForwardRequest, MailEvent};
use crate::services::{EmailSender, StorageService};
use crate::utils::logging::redact_email;
use lambda_runtime::Context;
use serde_json::Value;
use std::sync::Arc;
use tracing::{Instrument, error, info};

#[derive(Debug, Clone)]
pub struct ForwarderOptions {
    /// Ignore `+tag` suffixes when looking recipients up in the mapping
    pub allow_plus_sign: bool,
}

impl Default for ForwarderOptions {
    fn default() -> Self {
        Self {
            allow_plus_sign: true,
        }
    }
}

#[derive(Clone)]
pub struct SesForwarder {
    storage: Arc<dyn StorageService>,
    sender: Arc<dyn EmailSender>,
    options: ForwarderOptions,
}

impl SesForwarder {
    pub fn new(storage: Arc<dyn StorageService>, sender: Arc<dyn EmailSender>) -> Self {
        Self {
            storage,
            sender,
            options: ForwarderOptions::default(),
        }
    }

    pub fn with_options(mut self, options: ForwarderOptions) -> Self {
        self.options = options;
        self
    }

    /// Forwards the email described by `event`
    ///
    /// Returns the SES message id, or `None` when no recipient maps to a
    /// destination and there is nothing to send.
    pub async fn forward_email(
        &self,
        event: Value,
        request: &ForwardRequest,
    ) -> Result<Option<String>, RelayError> {
        let event = MailEvent::from_value(event)?;
        let mail = event.locate(request)?;

        // Envelope recipients let us skip the download when nothing maps
        let routing = match &mail.recipients {
            Some(recipients) => match self.route(request, recipients) {
                Some(routing) => Some(routing),
                None => return Ok(None),
            },
            None => None,
        };

        let raw_email = self.storage.download(&mail.bucket, &mail.key).await?;

        let routing = match routing {
            Some(routing) => routing,
            None => match self.route(request, &header_recipients(&raw_email)) {
                Some(routing) => routing,
                None => return Ok(None),
            },
        };

        info!(
            original_recipient = %redact_email(&routing.original_recipient),
            destinations = %redact_email(&routing.destinations.join(", ")),
            "Forwarding email from s3://{}/{}",
            mail.bucket,
            mail.key
        );

        let message = rewrite_message(&raw_email, &request.from_email);
        let message_id = self
            .sender
            .send_raw_email(&message, &routing.original_recipient, &routing.destinations)
            .await?;

        Ok(Some(message_id))
    }

    fn route(&self, request: &ForwardRequest, recipients: &[String]) -> Option<Routing> {
        let routing = route_recipients(
            &request.forward_mapping,
            recipients,
            self.options.allow_plus_sign,
        );
        if routing.is_none() {
            info!(
                "Finishing process. No new recipients found for original destinations: {}",
                redact_email(&recipients.join(", "))
            );
        }
        routing
    }
}

impl Forwarder for SesForwarder {
    fn forward(&self, event: Value, context: Context, done: Completion, request: ForwardRequest) {
        let forwarder = self.clone();
        let span = tracing::info_span!("forwarder.ses", request_id = %context.request_id);

        tokio::spawn(
            async move {
                let result = forwarder.forward_email(event, &request).await;
                if let Err(e) = &result {
                    error!(error = %e, "SES forwarding failed");
                }
                done.complete(result.map(|_| ()));
            }
            .instrument(span),
        );
    }
}
