/// Forwarding request handed to the forwarder
use crate::models::ForwardMapping;
use serde::Serialize;
use typed_builder::TypedBuilder;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, TypedBuilder)]
#[serde(rename_all = "camelCase")]
pub struct ForwardRequest {
    /// Verified sender placed in the rewritten `From:` header
    #[builder(setter(into))]
    pub from_email: String,
    /// Bucket holding the raw email
    #[builder(setter(into))]
    pub email_bucket: String,
    #[builder(default)]
    pub email_key_prefix: Option<String>,
    pub forward_mapping: ForwardMapping,
}

impl ForwardRequest {
    /// Object key of a message stored by SES under its message id
    pub fn object_key(&self, message_id: &str) -> String {
        format!(
            "{}{}",
            self.email_key_prefix.as_deref().unwrap_or_default(),
            message_id
        )
    }
}
