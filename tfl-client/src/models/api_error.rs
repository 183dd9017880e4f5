//! The API's error body.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::timestamp;

/// A structured error describing a non-200 response.
///
/// TfL sends this as JSON for most failures. When it does not (rate limiting
/// from the gateway, for example, answers with plain text), the client
/// synthesizes one with `exception_type` set to `"Unknown"`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Error)]
#[serde(rename_all = "camelCase")]
#[error("{http_status_code} {http_status} ({exception_type}): {message}")]
pub struct ApiError {
    /// When the error occurred. Absent if the server did not say.
    #[serde(default, deserialize_with = "timestamp::option::deserialize")]
    pub timestamp_utc: Option<DateTime<Utc>>,

    /// Server-side exception class, e.g. `EntityNotFoundException`.
    pub exception_type: String,

    pub http_status_code: u16,

    /// Status text, e.g. `Not Found` or `Invalid App Key`.
    pub http_status: String,

    /// The request URI the error refers to.
    pub relative_uri: String,

    /// Human-readable message.
    pub message: String,

    #[serde(skip_deserializing, skip_serializing_if = "Option::is_none")]
    pub(crate) content_expires: Option<DateTime<Utc>>,

    #[serde(skip_deserializing, skip_serializing_if = "Option::is_none")]
    pub(crate) shared_expires: Option<DateTime<Utc>>,
}

impl ApiError {
    /// Build an error record from parts of a response.
    pub fn new(
        timestamp_utc: Option<DateTime<Utc>>,
        exception_type: impl Into<String>,
        http_status_code: u16,
        http_status: impl Into<String>,
        relative_uri: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            timestamp_utc,
            exception_type: exception_type.into(),
            http_status_code,
            http_status: http_status.into(),
            relative_uri: relative_uri.into(),
            message: message.into(),
            content_expires: None,
            shared_expires: None,
        }
    }
}
