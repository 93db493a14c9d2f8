/// Notification handler - forwards a stored email using the mapping kept in SSM
use lambda_runtime::{Context, Error, LambdaEvent};
use mailrelay_core::error::RelayError;
use mailrelay_core::forwarder::{Forwarder, SesForwarder, forward_and_wait};
use mailrelay_core::models::{ForwardMapping, ForwardRequest, RelayConfig};
use mailrelay_core::services::parameters::{ParameterStore, SsmParameterStore};
use mailrelay_core::services::s3::S3StorageService;
use mailrelay_core::services::ses::SesEmailSender;
use mailrelay_core::utils::logging::redact_email;
use serde_json::Value;
use std::sync::Arc;
use tracing::{debug, error, info};

/// How an invocation completed successfully
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// A required setting is absent; nothing was fetched or forwarded
    MissingConfig,
    /// The SSM parameter had no value; nothing was forwarded
    NoMapping,
    /// The forwarder reported success
    Forwarded,
}

pub struct NotificationHandler {
    config: RelayConfig,
    parameters: Arc<dyn ParameterStore>,
    forwarder: Arc<dyn Forwarder>,
}

impl NotificationHandler {
    pub fn new(
        config: RelayConfig,
        parameters: Arc<dyn ParameterStore>,
        forwarder: Arc<dyn Forwarder>,
    ) -> Self {
        Self {
            config,
            parameters,
            forwarder,
        }
    }

    /// Builds the handler from the process environment and the default AWS
    /// credential chain
    pub async fn from_env() -> Self {
        let config = RelayConfig::from_env();
        let aws_config = aws_config::load_from_env().await;

        let ssm_client = aws_sdk_ssm::Client::new(&aws_config);
        let s3_client = aws_sdk_s3::Client::new(&aws_config);
        let ses_client = aws_sdk_ses::Client::new(&aws_config);

        let forwarder = SesForwarder::new(
            Arc::new(S3StorageService::new(s3_client)),
            Arc::new(SesEmailSender::new(ses_client)),
        );

        Self::new(
            config,
            Arc::new(SsmParameterStore::new(ssm_client)),
            Arc::new(forwarder),
        )
    }

    pub fn config(&self) -> &RelayConfig {
        &self.config
    }

    /// Lambda entry point
    pub async fn handle(&self, event: LambdaEvent<Value>) -> Result<(), Error> {
        let LambdaEvent { payload, context } = event;

        self.process(payload, context)
            .await
            .inspect_err(|e| error!(error = %e, "Invocation failed"))?;
        Ok(())
    }

    /// Runs one invocation: validate settings, fetch the mapping, forward
    #[tracing::instrument(
        name = "notification.process",
        skip_all,
        fields(request_id = %context.request_id)
    )]
    pub async fn process(&self, event: Value, context: Context) -> Result<Outcome, RelayError> {
        let logging = self.config.logging_enabled;

        if logging {
            info!(event = %event, "Received SES event");
        }

        let settings = match self.config.required() {
            Ok(settings) => settings,
            Err(e) => {
                error!(error = %e, "Missing required environment variables, skipping forwarding");
                return Ok(Outcome::MissingConfig);
            }
        };

        let value = self
            .parameters
            .get_parameter(settings.mapping_parameter)
            .await?;

        if logging {
            debug!(
                parameter = %settings.mapping_parameter,
                has_value = value.is_some(),
                "Fetched SSM parameter"
            );
        }

        let Some(raw_mapping) = value.filter(|value| !value.is_empty()) else {
            if logging {
                info!(
                    "Not forwarding mail. Reason: No email mapping found in SSM parameter {}",
                    settings.mapping_parameter
                );
            }
            return Ok(Outcome::NoMapping);
        };

        let mapping = ForwardMapping::parse(&raw_mapping)?;
        let request = ForwardRequest::builder()
            .from_email(settings.from_email)
            .email_bucket(settings.bucket_name)
            .email_key_prefix(self.config.bucket_prefix.clone())
            .forward_mapping(mapping)
            .build();

        if logging {
            let config = serde_json::to_string(&request).unwrap_or_default();
            info!(config = %redact_email(&config), "Forwarding email with config");
        }

        forward_and_wait(self.forwarder.as_ref(), event, context, request).await?;
        Ok(Outcome::Forwarded)
    }
}
