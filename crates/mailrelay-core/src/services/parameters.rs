/// SSM Parameter Store access
use crate::error::RelayError;
use async_trait::async_trait;

#[async_trait]
pub trait ParameterStore: Send + Sync {
    /// Fetches a parameter value; `Ok(None)` when the parameter carries no value
    async fn get_parameter(&self, name: &str) -> Result<Option<String>, RelayError>;
}

/// SSM parameter store implementation
pub struct SsmParameterStore {
    client: aws_sdk_ssm::Client,
}

impl SsmParameterStore {
    pub fn new(client: aws_sdk_ssm::Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl ParameterStore for SsmParameterStore {
    async fn get_parameter(&self, name: &str) -> Result<Option<String>, RelayError> {
        let response = self
            .client
            .get_parameter()
            .name(name)
            .send()
            .await
            .map_err(|e| {
                RelayError::Parameter(format!("SSM get_parameter failed for {}: {}", name, e))
            })?;

        Ok(response
            .parameter()
            .and_then(|parameter| parameter.value())
            .map(str::to_string))
    }
}
