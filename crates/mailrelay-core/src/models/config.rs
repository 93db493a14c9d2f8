/// Process-wide configuration, read once at cold start
use crate::constants::{
    ENV_BUCKET_NAME, ENV_BUCKET_PREFIX, ENV_ENABLE_LOGGING, ENV_FROM_EMAIL, ENV_MAPPING_PARAMETER,
};
use crate::error::RelayError;
use serde::Serialize;

/// Relay configuration resolved from the environment
///
/// Required values are kept optional here: a missing value is reported per
/// invocation rather than failing Lambda initialization.
#[derive(Debug, Clone, Default, Serialize)]
pub struct RelayConfig {
    pub mapping_parameter: Option<String>,
    pub from_email: Option<String>,
    pub bucket_name: Option<String>,
    pub bucket_prefix: Option<String>,
    pub logging_enabled: bool,
}

/// Borrowed view of the required settings, available once validated
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RequiredSettings<'a> {
    pub mapping_parameter: &'a str,
    pub from_email: &'a str,
    pub bucket_name: &'a str,
}

impl RelayConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Builds the configuration from an arbitrary variable lookup
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |name: &str| lookup(name).filter(|value| !value.is_empty());

        Self {
            mapping_parameter: non_empty(ENV_MAPPING_PARAMETER),
            from_email: non_empty(ENV_FROM_EMAIL),
            bucket_name: non_empty(ENV_BUCKET_NAME),
            bucket_prefix: non_empty(ENV_BUCKET_PREFIX),
            logging_enabled: lookup(ENV_ENABLE_LOGGING).as_deref() == Some("true"),
        }
    }

    /// Validates that the required settings are present
    pub fn required(&self) -> Result<RequiredSettings<'_>, RelayError> {
        match (
            self.mapping_parameter.as_deref(),
            self.from_email.as_deref(),
            self.bucket_name.as_deref(),
        ) {
            (Some(mapping_parameter), Some(from_email), Some(bucket_name)) => {
                Ok(RequiredSettings {
                    mapping_parameter,
                    from_email,
                    bucket_name,
                })
            }
            _ => {
                let missing: Vec<&str> = [
                    (ENV_MAPPING_PARAMETER, self.mapping_parameter.is_none()),
                    (ENV_FROM_EMAIL, self.from_email.is_none()),
                    (ENV_BUCKET_NAME, self.bucket_name.is_none()),
                ]
                .into_iter()
                .filter_map(|(name, absent)| absent.then_some(name))
                .collect();

                Err(RelayError::Config(format!(
                    "Missing required environment variables: {}",
                    missing.join(", ")
                )))
            }
        }
    }
}
