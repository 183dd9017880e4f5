//! Fixture transport for testing without API access.
//!
//! Serves recorded responses keyed by request path, either inserted in code
//! or loaded from a directory of JSON files.

use std::collections::{BTreeMap, HashMap};
use std::path::{Path, PathBuf};
use std::sync::{Mutex, PoisonError};

use reqwest::header::{CONTENT_TYPE, HeaderName, HeaderValue};
use serde::Deserialize;
use thiserror::Error;
use tracing::debug;

use super::error::ClientError;
use super::transport::{Response, Transport};

/// Errors loading fixtures from disk.
#[derive(Debug, Error)]
pub enum FixtureError {
    #[error("failed to read {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse {path:?}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid header {name:?} in {path:?}")]
    InvalidHeader { path: PathBuf, name: String },

    #[error("no fixture files found in {0:?}")]
    Empty(PathBuf),
}

/// One recorded response, as stored on disk.
///
/// ```json
/// {
///   "path": "Line/victoria",
///   "status_code": 200,
///   "headers": {"Content-Type": "application/json", "Date": "..."},
///   "url": "https://api.tfl.gov.uk/Line/victoria",
///   "content": "[{\"id\": \"victoria\", ...}]"
/// }
/// ```
///
/// `content` is the raw body text.
#[derive(Debug, Deserialize)]
struct FixtureFile {
    path: String,
    #[serde(default = "default_status")]
    status_code: u16,
    #[serde(default)]
    headers: BTreeMap<String, String>,
    url: Option<String>,
    content: String,
}

fn default_status() -> u16 {
    200
}

fn io_error(path: &Path) -> impl FnOnce(std::io::Error) -> FixtureError + use<> {
    let path = path.to_path_buf();
    move |source| FixtureError::Io { path, source }
}

/// A request the fixture transport received.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedRequest {
    pub path: String,
    /// Parameters that had a value.
    pub params: Vec<(String, String)>,
}

/// Transport that serves canned responses.
///
/// Query parameters are recorded but play no part in lookup. A path with
/// no fixture gets a plain-text 404.
#[derive(Debug, Default)]
pub struct FixtureTransport {
    responses: HashMap<String, Response>,
    requests: Mutex<Vec<RecordedRequest>>,
}

impl FixtureTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Serve `response` for `path`, replacing any earlier fixture.
    pub fn insert(&mut self, path: impl Into<String>, response: Response) {
        self.responses.insert(path.into(), response);
    }

    pub fn with_response(mut self, path: impl Into<String>, response: Response) -> Self {
        self.insert(path, response);
        self
    }

    /// Load every `*.json` file in `dir` as a fixture.
    pub fn from_dir(dir: impl AsRef<Path>) -> Result<Self, FixtureError> {
        let dir = dir.as_ref();
        let mut transport = Self::new();

        for entry in std::fs::read_dir(dir).map_err(io_error(dir))? {
            let path = entry.map_err(io_error(dir))?.path();
            if !path.is_file() || path.extension().and_then(|s| s.to_str()) != Some("json") {
                continue;
            }

            let json = std::fs::read_to_string(&path).map_err(io_error(&path))?;
            let file: FixtureFile =
                serde_json::from_str(&json).map_err(|source| FixtureError::Parse {
                    path: path.clone(),
                    source,
                })?;

            let fixture_path = file.path.clone();
            transport.insert(fixture_path, file.into_response(&path)?);
        }

        if transport.responses.is_empty() {
            return Err(FixtureError::Empty(dir.to_path_buf()));
        }

        debug!(dir = %dir.display(), fixtures = transport.responses.len(), "loaded fixtures");

        Ok(transport)
    }

    /// Paths with a fixture.
    pub fn paths(&self) -> impl Iterator<Item = &str> {
        self.responses.keys().map(String::as_str)
    }

    /// Requests received so far, oldest first.
    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.requests
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn request_count(&self) -> usize {
        self.requests
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }
}

impl FixtureFile {
    fn into_response(self, file: &Path) -> Result<Response, FixtureError> {
        let invalid = |name: &str| FixtureError::InvalidHeader {
            path: file.to_path_buf(),
            name: name.to_string(),
        };

        let url = self.url.unwrap_or_else(|| self.path.clone());
        let mut response = Response::new(self.status_code, self.content).with_url(url);

        for (name, value) in &self.headers {
            let header_name = HeaderName::from_bytes(name.as_bytes()).map_err(|_| invalid(name))?;
            let header_value = HeaderValue::from_str(value).map_err(|_| invalid(name))?;
            response.headers.append(header_name, header_value);
        }

        Ok(response)
    }
}

impl Transport for FixtureTransport {
    fn send_request(
        &self,
        path: &str,
        params: &[(&str, Option<String>)],
    ) -> Result<Response, ClientError> {
        let params = params
            .iter()
            .filter_map(|(k, v)| v.as_ref().map(|v| (k.to_string(), v.clone())))
            .collect();
        self.requests
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(RecordedRequest {
                path: path.to_string(),
                params,
            });

        match self.responses.get(path) {
            Some(response) => Ok(response.clone()),
            None => {
                debug!(path, "no fixture");
                Ok(Response::new(404, format!("no fixture for {path}"))
                    .with_header(CONTENT_TYPE, HeaderValue::from_static("text/plain"))
                    .with_url(path))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use reqwest::header::{CACHE_CONTROL, DATE};
    use std::fs;

    #[test]
    fn serves_inserted_response() {
        let transport = FixtureTransport::new().with_response("Line/Meta/Modes", Response::new(200, "[]"));

        let response = transport.send_request("Line/Meta/Modes", &[]).unwrap();

        assert_eq!(response.status, 200);
        assert_eq!(response.text(), "[]");
        assert_eq!(transport.request_count(), 1);
    }

    #[test]
    fn unknown_path_returns_404() {
        let transport = FixtureTransport::new();

        let response = transport.send_request("Line/nope", &[]).unwrap();

        assert_eq!(response.status, 404);
        assert_eq!(response.status_text, "Not Found");
        assert_eq!(response.content_type(), Some("text/plain"));
    }

    #[test]
    fn records_present_params_only() {
        let transport = FixtureTransport::new();

        transport
            .send_request(
                "Line/victoria/Status",
                &[("detail", Some("true".into())), ("skip", None)],
            )
            .unwrap();

        assert_eq!(
            transport.requests(),
            vec![RecordedRequest {
                path: "Line/victoria/Status".into(),
                params: vec![("detail".into(), "true".into())],
            }]
        );
    }

    #[test]
    fn load_from_dir() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(
            dir.path().join("modes.json"),
            r#"{
                "path": "Line/Meta/Modes",
                "status_code": 200,
                "headers": {
                    "Content-Type": "application/json; charset=utf-8",
                    "Cache-Control": "public, must-revalidate, max-age=43200, s-maxage=86400",
                    "Date": "Tue, 15 Nov 1994 12:45:26 GMT"
                },
                "url": "https://api.tfl.gov.uk/Line/Meta/Modes",
                "content": "[{\"isTflService\": true, \"isFarePaying\": true, \"isScheduledService\": true, \"modeName\": \"tube\"}]"
            }"#,
        )
        .unwrap();
        fs::write(dir.path().join("README.txt"), "ignored").unwrap();

        let transport = FixtureTransport::from_dir(dir.path()).unwrap();
        let response = transport.send_request("Line/Meta/Modes", &[]).unwrap();

        assert_eq!(transport.paths().collect::<Vec<_>>(), vec!["Line/Meta/Modes"]);
        assert_eq!(response.status, 200);
        assert_eq!(response.url, "https://api.tfl.gov.uk/Line/Meta/Modes");
        assert!(response.headers.contains_key(CACHE_CONTROL));
        assert!(response.headers.contains_key(DATE));
        assert!(response.text().contains("tube"));
    }

    #[test]
    fn status_defaults_to_ok() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(
            dir.path().join("a.json"),
            r#"{"path": "Line/a", "content": "{}"}"#,
        )
        .unwrap();

        let transport = FixtureTransport::from_dir(dir.path()).unwrap();
        let response = transport.send_request("Line/a", &[]).unwrap();
        assert_eq!(response.status, 200);
        assert_eq!(response.url, "Line/a");
    }

    #[test]
    fn empty_dir_is_error() {
        let dir = tempfile::tempdir().unwrap();
        assert!(matches!(
            FixtureTransport::from_dir(dir.path()),
            Err(FixtureError::Empty(_))
        ));
    }

    #[test]
    fn malformed_file_is_error() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("bad.json"), "{not json").unwrap();
        assert!(matches!(
            FixtureTransport::from_dir(dir.path()),
            Err(FixtureError::Parse { .. })
        ));
    }

    #[test]
    fn bundled_fixtures_load() {
        let transport = FixtureTransport::from_dir("data/fixtures").unwrap();
        let paths: Vec<_> = transport.paths().collect();
        assert!(paths.contains(&"Line/Meta/Modes"));
        assert!(paths.contains(&"Line/victoria"));
    }
}
