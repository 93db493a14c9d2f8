/// Application constants
///
/// This module contains all hardcoded values used throughout the application.
/// Constants are organized by category for easy maintenance.
// ============================================================================
// Environment Variables
// ============================================================================
/// Name of the SSM parameter holding the JSON forwarding mapping
pub const ENV_MAPPING_PARAMETER: &str = "EMAIL_MAPPING_SSM_KEY";

/// Verified sender address used in the rewritten `From:` header
pub const ENV_FROM_EMAIL: &str = "FROM_EMAIL";

/// Bucket SES writes raw emails into
pub const ENV_BUCKET_NAME: &str = "BUCKET_NAME";

/// Optional key prefix within the bucket
pub const ENV_BUCKET_PREFIX: &str = "BUCKET_PREFIX";

/// Diagnostic logging gate, enabled only by the exact value `"true"`
pub const ENV_ENABLE_LOGGING: &str = "ENABLE_LOGGING";

// ============================================================================
// Event Format
// ============================================================================

/// `eventSource` of SES receipt notifications
pub const SES_EVENT_SOURCE: &str = "aws:ses";

/// `eventVersion` of SES receipt notifications
pub const SES_EVENT_VERSION: &str = "1.0";

// ============================================================================
// Mapping Keys
// ============================================================================

/// Mapping key matching every recipient not matched otherwise
pub const CATCH_ALL_KEY: &str = "@";
