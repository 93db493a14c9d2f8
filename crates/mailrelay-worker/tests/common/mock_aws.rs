/// Mock AWS services for integration testing
use async_trait::async_trait;
use mailrelay_core::error::RelayError;
use mailrelay_core::services::{EmailSender, StorageService};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

/// Mock S3 client for testing
#[derive(Clone, Default)]
pub struct MockS3 {
    pub objects: Arc<Mutex<HashMap<String, Vec<u8>>>>,
    pub downloads: Arc<Mutex<Vec<String>>>,
}

impl MockS3 {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn put_object(&self, bucket: &str, key: &str, data: Vec<u8>) {
        self.objects
            .lock()
            .unwrap()
            .insert(format!("{}/{}", bucket, key), data);
    }

    pub fn download_count(&self) -> usize {
        self.downloads.lock().unwrap().len()
    }
}

#[async_trait]
impl StorageService for MockS3 {
    async fn download(&self, bucket: &str, key: &str) -> Result<Vec<u8>, RelayError> {
        let path = format!("{}/{}", bucket, key);
        self.downloads.lock().unwrap().push(path.clone());
        self.objects
            .lock()
            .unwrap()
            .get(&path)
            .cloned()
            .ok_or_else(|| RelayError::Storage(format!("NoSuchKey: s3://{}", path)))
    }
}

#[derive(Debug, Clone)]
pub struct SentEmail {
    pub raw: String,
    pub source: String,
    pub destinations: Vec<String>,
}

/// Mock SES client for testing
#[derive(Clone, Default)]
pub struct MockSES {
    pub sent_emails: Arc<Mutex<Vec<SentEmail>>>,
    pub rejection: Option<String>,
}

impl MockSES {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn rejecting(reason: &str) -> Self {
        Self {
            rejection: Some(reason.to_string()),
            ..Self::default()
        }
    }

    pub fn sent(&self) -> Vec<SentEmail> {
        self.sent_emails.lock().unwrap().clone()
    }
}

#[async_trait]
impl EmailSender for MockSES {
    async fn send_raw_email(
        &self,
        raw_email: &[u8],
        from: &str,
        to: &[String],
    ) -> Result<String, RelayError> {
        if let Some(reason) = &self.rejection {
            return Err(RelayError::Ses(reason.clone()));
        }

        let mut sent = self.sent_emails.lock().unwrap();
        sent.push(SentEmail {
            raw: String::from_utf8_lossy(raw_email).into_owned(),
            source: from.to_string(),
            destinations: to.to_vec(),
        });
        Ok(format!("ses-{}", sent.len()))
    }
}
