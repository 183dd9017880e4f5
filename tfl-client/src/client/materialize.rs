//! Building records from decoded response bodies.

use serde_json::Value;

use crate::expiry::{Expiry, response_date};
use crate::models::{AnyRecord, ApiError, Record, RecordCatalogue};

use super::error::{ClientError, ConfigurationError};
use super::transport::Response;

/// Exception type used for errors the server did not describe in JSON.
pub const UNKNOWN_EXCEPTION: &str = "Unknown";

/// One record, or a list of them, depending on the body's shape.
#[derive(Debug, Clone, PartialEq)]
pub enum Materialized {
    Single(AnyRecord),
    Many(Vec<AnyRecord>),
}

impl Materialized {
    /// Number of records.
    pub fn len(&self) -> usize {
        match self {
            Materialized::Single(_) => 1,
            Materialized::Many(records) => records.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Build `model` records from `body`, stamping each with `expiry`.
///
/// An object gives one record; an array gives one record per element, in
/// order. Anything else fails validation, as does an element missing a
/// required field.
pub fn materialize(
    catalogue: &RecordCatalogue,
    model: &str,
    body: Value,
    expiry: Expiry,
) -> Result<Materialized, ClientError> {
    let construct = catalogue
        .constructor(model)
        .ok_or_else(|| ConfigurationError::UnknownModel(model.to_string()))?;

    let build = |value: Value| -> Result<AnyRecord, ClientError> {
        let mut record = construct(value).map_err(|e| ClientError::validation(model, e, None))?;
        record.stamp(expiry);
        Ok(record)
    };

    match body {
        Value::Object(_) => build(body).map(Materialized::Single),
        Value::Array(items) => items
            .into_iter()
            .map(build)
            .collect::<Result<Vec<_>, _>>()
            .map(Materialized::Many),
        other => Err(ClientError::validation(
            model,
            format!("expected an object or an array, got {}", kind(&other)),
            Some(&other.to_string()),
        )),
    }
}

fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

/// Turn a non-200 response into an [`ApiError`].
///
/// A body with `Content-Type: application/json` (exactly) is decoded as an
/// `ApiError`. Anything else is described from the response itself, with
/// `exception_type` set to `"Unknown"` and the raw body as the message.
pub fn materialize_error(
    catalogue: &RecordCatalogue,
    response: &Response,
) -> Result<ApiError, ClientError> {
    if response.content_type() != Some("application/json") {
        return Ok(ApiError::new(
            response_date(&response.headers),
            UNKNOWN_EXCEPTION,
            response.status,
            response.status_text.clone(),
            response.url.clone(),
            response.text(),
        ));
    }

    let text = response.text();
    let body = response
        .json()
        .map_err(|e| ClientError::validation(ApiError::NAME, e, Some(&text)))?;

    match materialize(catalogue, ApiError::NAME, body, Expiry::none())
        .map_err(|e| e.with_body(&text))?
    {
        Materialized::Single(record) => ApiError::try_from(record).map_err(|other| {
            ConfigurationError::ModelMismatch {
                expected: ApiError::NAME,
                found: other.name(),
            }
            .into()
        }),
        Materialized::Many(_) => Err(ClientError::validation(
            ApiError::NAME,
            "expected a single error object, got an array",
            Some(&text),
        )),
    }
}
