//! The HTTP seam.
//!
//! [`Transport`] sends one GET and hands back the raw response. The real
//! implementation is [`HttpTransport`]; tests and offline runs use
//! [`FixtureTransport`](super::FixtureTransport).

use std::time::Duration;

use reqwest::header::{CONTENT_TYPE, HeaderMap, HeaderName, HeaderValue};
use reqwest::{StatusCode, Url};
use tracing::debug;

use super::config::{ClientConfig, Credentials};
use super::error::{ClientError, ConfigurationError};

/// A fully-read HTTP response.
#[derive(Debug, Clone, PartialEq)]
pub struct Response {
    pub status: u16,
    /// Canonical reason phrase for `status`, e.g. `Too Many Requests`.
    pub status_text: String,
    pub headers: HeaderMap,
    /// The URL the response came from.
    pub url: String,
    pub body: Vec<u8>,
}

impl Response {
    /// A response with no headers and an empty URL.
    pub fn new(status: u16, body: impl Into<Vec<u8>>) -> Self {
        Self {
            status,
            status_text: reason_phrase(status).to_string(),
            headers: HeaderMap::new(),
            url: String::new(),
            body: body.into(),
        }
    }

    pub fn with_header(mut self, name: HeaderName, value: HeaderValue) -> Self {
        self.headers.insert(name, value);
        self
    }

    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        self.url = url.into();
        self
    }

    pub fn is_ok(&self) -> bool {
        self.status == StatusCode::OK.as_u16()
    }

    /// The body as text, with invalid UTF-8 replaced.
    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }

    pub fn json(&self) -> Result<serde_json::Value, serde_json::Error> {
        serde_json::from_slice(&self.body)
    }

    /// The raw `Content-Type` header value.
    pub fn content_type(&self) -> Option<&str> {
        self.headers.get(CONTENT_TYPE).and_then(|v| v.to_str().ok())
    }
}

fn reason_phrase(status: u16) -> &'static str {
    StatusCode::from_u16(status)
        .ok()
        .and_then(|s| s.canonical_reason())
        .unwrap_or("")
}

/// Sends a GET for `path` (relative to the base URL) with query parameters.
///
/// Parameters whose value is `None` are omitted. Implementations return
/// `Err` only when no response was received; any status code is `Ok`.
pub trait Transport {
    fn send_request(
        &self,
        path: &str,
        params: &[(&str, Option<String>)],
    ) -> Result<Response, ClientError>;
}

impl<T: Transport + ?Sized> Transport for &T {
    fn send_request(
        &self,
        path: &str,
        params: &[(&str, Option<String>)],
    ) -> Result<Response, ClientError> {
        (**self).send_request(path, params)
    }
}

/// Blocking HTTP transport over `reqwest`.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    http: reqwest::blocking::Client,
    base_url: Url,
    credentials: Option<Credentials>,
}

impl HttpTransport {
    pub fn new(config: &ClientConfig) -> Result<Self, ClientError> {
        let base_url = parse_base_url(&config.base_url)?;

        if let Some(credentials) = &config.credentials {
            if credentials.app_key.trim().is_empty() {
                return Err(ConfigurationError::InvalidCredential { name: "app_key" }.into());
            }
            if credentials.app_id.as_deref().is_some_and(|id| id.trim().is_empty()) {
                return Err(ConfigurationError::InvalidCredential { name: "app_id" }.into());
            }
        }

        let http = reqwest::blocking::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            http,
            base_url,
            credentials: config.credentials.clone(),
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Full request URL, including credentials.
    pub fn request_url(
        &self,
        path: &str,
        params: &[(&str, Option<String>)],
    ) -> Result<Url, ClientError> {
        let mut url = self.base_url.join(path).map_err(|e| {
            ConfigurationError::InvalidBaseUrl {
                url: format!("{}{}", self.base_url, path),
                message: e.to_string(),
            }
        })?;

        let mut present: Vec<(&str, &str)> = params
            .iter()
            .filter_map(|(k, v)| v.as_deref().map(|v| (*k, v)))
            .collect();
        if let Some(credentials) = &self.credentials {
            for (k, v) in credentials.query_pairs() {
                present.push((k, v));
            }
        }

        if !present.is_empty() {
            url.query_pairs_mut().extend_pairs(present);
        }

        Ok(url)
    }
}

impl Transport for HttpTransport {
    fn send_request(
        &self,
        path: &str,
        params: &[(&str, Option<String>)],
    ) -> Result<Response, ClientError> {
        let url = self.request_url(path, params)?;

        debug!(path, "sending request");

        let response = self.http.get(url).send()?;

        let status = response.status();
        let headers = response.headers().clone();
        let mut url = response.url().clone();
        // Never hand credentials back to callers (they end up in ApiError).
        strip_credentials(&mut url);
        let body = response.bytes()?.to_vec();

        debug!(path, status = status.as_u16(), bytes = body.len(), "received response");

        Ok(Response {
            status: status.as_u16(),
            status_text: status.canonical_reason().unwrap_or("").to_string(),
            headers,
            url: url.to_string(),
            body,
        })
    }
}

fn parse_base_url(raw: &str) -> Result<Url, ConfigurationError> {
    let invalid = |message: String| ConfigurationError::InvalidBaseUrl {
        url: raw.to_string(),
        message,
    };

    let mut url = Url::parse(raw).map_err(|e| invalid(e.to_string()))?;
    if url.cannot_be_a_base() {
        return Err(invalid("cannot be a base".to_string()));
    }

    // `join` replaces the last segment unless the path ends in a slash.
    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }

    Ok(url)
}

fn strip_credentials(url: &mut Url) {
    let kept: Vec<(String, String)> = url
        .query_pairs()
        .filter(|(k, _)| k != "app_id" && k != "app_key")
        .map(|(k, v)| (k.into_owned(), v.into_owned()))
        .collect();

    if kept.is_empty() {
        url.set_query(None);
    } else {
        url.query_pairs_mut().clear().extend_pairs(kept);
    }
}
