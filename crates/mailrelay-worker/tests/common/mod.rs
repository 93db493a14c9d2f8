//! Common test utilities and helpers for integration tests
#![allow(dead_code)]

use async_trait::async_trait;
use lambda_runtime::Context;
use mailrelay_core::error::RelayError;
use mailrelay_core::forwarder::{Completion, Forwarder};
use mailrelay_core::models::{ForwardRequest, RelayConfig};
use mailrelay_core::services::ParameterStore;
use serde_json::Value;
use std::collections::HashMap;
use std::io::Write;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};
use tracing_subscriber::fmt::MakeWriter;

pub mod mock_aws;

/// Get path to test fixtures directory
pub fn fixtures_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures")
}

/// Load a test email fixture
pub fn load_email_fixture(name: &str) -> Vec<u8> {
    let path = fixtures_dir().join("emails").join(name);
    std::fs::read(&path).unwrap_or_else(|_| panic!("Failed to read fixture: {:?}", path))
}

/// Generate a unique SES message ID
pub fn generate_test_message_id() -> String {
    format!("test-{}", uuid::Uuid::new_v4().simple())
}

/// Configuration with every variable set
pub fn full_config(logging_enabled: bool) -> RelayConfig {
    config_from(&[
        ("EMAIL_MAPPING_SSM_KEY", "/mailrelay/mapping"),
        ("FROM_EMAIL", "relay@acme.com"),
        ("BUCKET_NAME", "raw-emails"),
        ("BUCKET_PREFIX", "inbox/"),
        ("ENABLE_LOGGING", if logging_enabled { "true" } else { "false" }),
    ])
}

pub fn config_from(vars: &[(&str, &str)]) -> RelayConfig {
    let vars: HashMap<String, String> = vars
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    RelayConfig::from_lookup(|name| vars.get(name).cloned())
}

pub fn context(request_id: &str) -> Context {
    let mut context = Context::default();
    context.request_id = request_id.to_string();
    context
}

/// SES receipt event for a message stored under `message_id`
pub fn ses_event(message_id: &str, recipients: &[&str]) -> Value {
    serde_json::json!({
        "Records": [{
            "eventSource": "aws:ses",
            "eventVersion": "1.0",
            "ses": {
                "mail": {
                    "messageId": message_id,
                    "timestamp": "2025-11-01T12:00:00.000Z",
                    "source": "jane@sender.example.com",
                    "destination": recipients
                },
                "receipt": {
                    "timestamp": "2025-11-01T12:00:00.000Z",
                    "recipients": recipients,
                    "spamVerdict": {"status": "PASS"},
                    "virusVerdict": {"status": "PASS"},
                    "action": {"type": "Lambda", "functionArn": "arn:aws:lambda:us-east-1:123:function:mailrelay"}
                }
            }
        }]
    })
}

/// S3 object-created event for `bucket/key`
pub fn s3_event(bucket: &str, key: &str) -> Value {
    serde_json::json!({
        "Records": [{
            "eventVersion": "2.1",
            "eventSource": "aws:s3",
            "awsRegion": "us-east-1",
            "eventTime": "2025-11-01T12:00:00.000Z",
            "eventName": "ObjectCreated:Put",
            "s3": {
                "bucket": {"name": bucket, "arn": format!("arn:aws:s3:::{}", bucket)},
                "object": {"key": key, "size": 1024}
            }
        }]
    })
}

/// Parameter store double returning a fixed value
pub struct MockParameterStore {
    value: Result<Option<String>, String>,
    calls: Mutex<Vec<String>>,
}

impl MockParameterStore {
    pub fn with_value(value: &str) -> Self {
        Self::new(Ok(Some(value.to_string())))
    }

    pub fn without_value() -> Self {
        Self::new(Ok(None))
    }

    pub fn failing(message: &str) -> Self {
        Self::new(Err(message.to_string()))
    }

    fn new(value: Result<Option<String>, String>) -> Self {
        Self {
            value,
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl ParameterStore for MockParameterStore {
    async fn get_parameter(&self, name: &str) -> Result<Option<String>, RelayError> {
        self.calls.lock().unwrap().push(name.to_string());
        self.value.clone().map_err(RelayError::Parameter)
    }
}

/// Forwarder double recording every invocation
pub struct RecordingForwarder {
    failure: Option<String>,
    invocations: Mutex<Vec<(Value, ForwardRequest)>>,
}

impl RecordingForwarder {
    pub fn succeeding() -> Self {
        Self {
            failure: None,
            invocations: Mutex::new(Vec::new()),
        }
    }

    pub fn failing(reason: &str) -> Self {
        Self {
            failure: Some(reason.to_string()),
            invocations: Mutex::new(Vec::new()),
        }
    }

    pub fn invocations(&self) -> Vec<(Value, ForwardRequest)> {
        self.invocations.lock().unwrap().clone()
    }
}

impl Forwarder for RecordingForwarder {
    fn forward(&self, event: Value, _context: Context, done: Completion, request: ForwardRequest) {
        self.invocations.lock().unwrap().push((event, request));
        match &self.failure {
            Some(reason) => done.fail(RelayError::Ses(reason.clone())),
            None => done.succeed(),
        }
    }
}

/// In-memory sink for formatted tracing output
#[derive(Clone, Default)]
pub struct LogCapture {
    buffer: Arc<Mutex<Vec<u8>>>,
}

impl LogCapture {
    pub fn contents(&self) -> String {
        String::from_utf8_lossy(&self.buffer.lock().unwrap()).into_owned()
    }
}

impl Write for LogCapture {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.buffer.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}

impl<'a> MakeWriter<'a> for LogCapture {
    type Writer = LogCapture;

    fn make_writer(&'a self) -> Self::Writer {
        self.clone()
    }
}

/// Routes tracing output of the current thread into a buffer until the
/// guard is dropped
pub fn capture_logs() -> (LogCapture, tracing::subscriber::DefaultGuard) {
    let capture = LogCapture::default();
    let subscriber = tracing_subscriber::fmt()
        .with_writer(capture.clone())
        .with_ansi(false)
        .with_max_level(tracing::Level::TRACE)
        .finish();
    let guard = tracing::subscriber::set_default(subscriber);
    (capture, guard)
}
