//! Typed client for the Transport for London unified API.
//!
//! Responses are decoded into strongly-typed records, each stamped with
//! the cache expiry the server advertised for it.

pub mod client;
pub mod expiry;
pub mod models;

pub use client::{ApiResponse, ClientConfig, ClientError, Direction, TflClient};
pub use models::{ApiError, Record};
