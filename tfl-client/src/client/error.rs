//! Client error types.

use thiserror::Error;

/// Longest body excerpt kept on a validation error.
const BODY_EXCERPT_CHARS: usize = 500;

/// Errors from the TfL client.
///
/// A non-200 response is not an error here: it comes back as
/// [`ApiResponse::Error`](super::ApiResponse::Error).
#[derive(Debug, Error)]
pub enum ClientError {
    /// The request never produced a response (DNS, connect, timeout, ...).
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// A 200 response whose body does not match the declared record type.
    #[error("{model} validation failed: {message}{}", body_suffix(.body))]
    Validation {
        model: String,
        message: String,
        body: Option<String>,
    },

    /// The client or an endpoint is set up wrongly.
    #[error("configuration error: {0}")]
    Configuration(#[from] ConfigurationError),

    /// The caller passed an unusable combination of arguments.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
}

impl ClientError {
    /// A validation error, keeping at most the first 500 characters of `body`.
    pub fn validation(
        model: impl Into<String>,
        message: impl std::fmt::Display,
        body: Option<&str>,
    ) -> Self {
        ClientError::Validation {
            model: model.into(),
            message: message.to_string(),
            body: body.map(excerpt),
        }
    }

    /// Attach a body excerpt to a validation error that has none.
    pub(crate) fn with_body(self, text: &str) -> Self {
        match self {
            ClientError::Validation {
                model,
                message,
                body: None,
            } => ClientError::Validation {
                model,
                message,
                body: Some(excerpt(text)),
            },
            other => other,
        }
    }
}

/// Misconfiguration of the client or its endpoint table.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigurationError {
    /// No record type is registered under this name.
    #[error("no record type named {0}")]
    UnknownModel(String),

    /// An endpoint's declared model is not the record type asked for.
    #[error("expected {expected} records, got {found}")]
    ModelMismatch {
        expected: &'static str,
        found: &'static str,
    },

    /// A template placeholder has no matching argument.
    #[error("template {template} needs argument {index}")]
    MissingUrlArgument { template: &'static str, index: usize },

    /// An argument would not stay inside its path segment.
    #[error("argument {index} for {template} is not a valid path segment: {value:?}")]
    InvalidUrlArgument {
        template: &'static str,
        index: usize,
        value: String,
    },

    #[error("malformed URL template {template}")]
    MalformedTemplate { template: &'static str },

    #[error("invalid base URL {url}: {message}")]
    InvalidBaseUrl { url: String, message: String },

    #[error("invalid credential {name}")]
    InvalidCredential { name: &'static str },
}

fn excerpt(body: &str) -> String {
    body.chars().take(BODY_EXCERPT_CHARS).collect()
}

fn body_suffix(body: &Option<String>) -> String {
    match body {
        Some(body) => format!(" (body: {body})"),
        None => String::new(),
    }
}
