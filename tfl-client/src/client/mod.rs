//! TfL unified API client.
//!
//! This module provides a blocking client for the Transport for London
//! unified API, which serves lines, stop points, disruptions and arrival
//! predictions.
//!
//! Key characteristics of the API:
//! - Responses are JSON, either one object or an array of them
//! - Each response carries `Cache-Control` and `Date` headers, from which
//!   every returned record gets its expiry timestamps
//! - Failures are usually a JSON `ApiError`, but the gateway sometimes
//!   answers with plain text (rate limiting in particular)

mod config;
mod endpoints;
mod error;
mod facade;
mod fixture;
mod materialize;
mod transport;

pub use config::{
    APP_ID_VAR, APP_KEY_VAR, BASE_URL_VAR, ClientConfig, Credentials, DEFAULT_BASE_URL,
};
pub use endpoints::{Direction, Endpoint, EndpointDescriptor};
pub use error::{ClientError, ConfigurationError};
pub use facade::{ApiResponse, TflClient};
pub use fixture::{FixtureError, FixtureTransport, RecordedRequest};
pub use materialize::{Materialized, UNKNOWN_EXCEPTION, materialize, materialize_error};
pub use transport::{HttpTransport, Response, Transport};
