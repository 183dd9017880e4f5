//! Client configuration.

/// Default base URL for the TfL unified API.
pub const DEFAULT_BASE_URL: &str = "https://api.tfl.gov.uk/";

/// Default request timeout in seconds.
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Environment variable holding the application key.
pub const APP_KEY_VAR: &str = "TFL_APP_KEY";

/// Environment variable holding the (legacy) application id.
pub const APP_ID_VAR: &str = "TFL_APP_ID";

/// Environment variable overriding the base URL.
pub const BASE_URL_VAR: &str = "TFL_BASE_URL";

/// API credentials, sent as `app_id` / `app_key` query parameters.
///
/// Anonymous access works but is rate limited to roughly one request per
/// second.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    pub app_id: Option<String>,
    pub app_key: String,
}

impl Credentials {
    pub fn new(app_key: impl Into<String>) -> Self {
        Self {
            app_id: None,
            app_key: app_key.into(),
        }
    }

    pub fn with_app_id(mut self, app_id: impl Into<String>) -> Self {
        self.app_id = Some(app_id.into());
        self
    }

    /// Query parameters to append to every request.
    pub fn query_pairs(&self) -> Vec<(&'static str, &str)> {
        let mut pairs = Vec::with_capacity(2);
        if let Some(app_id) = &self.app_id {
            pairs.push(("app_id", app_id.as_str()));
        }
        pairs.push(("app_key", self.app_key.as_str()));
        pairs
    }
}

// Keep keys out of logs.
impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("app_id", &self.app_id)
            .field("app_key", &"<redacted>")
            .finish()
    }
}

/// Configuration for [`HttpTransport`](super::HttpTransport).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Base URL for the API (defaults to production TfL)
    pub base_url: String,
    /// Optional credentials
    pub credentials: Option<Credentials>,
    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            credentials: None,
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }
}

impl ClientConfig {
    /// Anonymous access to the production API.
    pub fn new() -> Self {
        Self::default()
    }

    /// Read configuration from `TFL_APP_KEY`, `TFL_APP_ID` and `TFL_BASE_URL`.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build configuration from a variable lookup. Empty values count as unset.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let var = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let mut config = Self::new();

        if let Some(base_url) = var(BASE_URL_VAR) {
            config = config.with_base_url(base_url);
        }

        if let Some(app_key) = var(APP_KEY_VAR) {
            let mut credentials = Credentials::new(app_key);
            if let Some(app_id) = var(APP_ID_VAR) {
                credentials = credentials.with_app_id(app_id);
            }
            config = config.with_credentials(credentials);
        }

        config
    }

    /// Set a custom base URL (for testing or a proxy).
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    pub fn with_credentials(mut self, credentials: Credentials) -> Self {
        self.credentials = Some(credentials);
        self
    }

    /// Set request timeout.
    pub fn with_timeout(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }
}
