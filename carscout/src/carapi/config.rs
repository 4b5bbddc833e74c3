//! CarAPI client configuration.

use std::fmt;
use std::time::Duration;

/// Environment variable holding the CarAPI token identifier.
pub const API_TOKEN_ENV: &str = "CAR_API_TOKEN";
/// Environment variable holding the CarAPI secret.
pub const API_SECRET_ENV: &str = "CAR_API_SECRET";
/// Environment variable overriding the CarAPI base URL.
pub const BASE_URL_ENV: &str = "CAR_API_BASE_URL";

/// The credential pair exchanged for a bearer token.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    /// API token identifier.
    pub api_token: String,
    /// API secret.
    pub api_secret: String,
}

impl Credentials {
    /// Creates a credential pair.
    #[must_use]
    pub fn new(api_token: impl Into<String>, api_secret: impl Into<String>) -> Self {
        Self {
            api_token: api_token.into(),
            api_secret: api_secret.into(),
        }
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("api_token", &self.api_token)
            .field("api_secret", &"<redacted>")
            .finish()
    }
}

/// Configuration for the CarAPI client.
#[derive(Debug, Clone)]
pub struct CarApiConfig {
    /// Credentials, if any were found. Absence is reported on first use.
    pub credentials: Option<Credentials>,
    /// Base URL for the API.
    pub base_url: String,
    /// Timeout for the login call.
    pub auth_timeout: Duration,
    /// Default timeout for resource calls.
    pub request_timeout: Duration,
}

impl CarApiConfig {
    /// Default CarAPI base URL.
    pub const DEFAULT_BASE_URL: &'static str = "https://carapi.app";
    /// Default login timeout.
    pub const DEFAULT_AUTH_TIMEOUT: Duration = Duration::from_secs(10);
    /// Default resource request timeout.
    pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

    /// Creates a new configuration with the given credentials.
    #[must_use]
    pub fn new(api_token: impl Into<String>, api_secret: impl Into<String>) -> Self {
        Self::default().with_credentials(Credentials::new(api_token, api_secret))
    }

    /// Creates configuration from environment variables.
    ///
    /// Reads from:
    /// - `CAR_API_TOKEN` - API token identifier
    /// - `CAR_API_SECRET` - API secret
    /// - `CAR_API_BASE_URL` - Optional base URL
    ///
    /// Missing credentials are not an error here; the client reports them
    /// when a token is first needed.
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Creates configuration from an arbitrary key lookup.
    pub(crate) fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let credentials = match (non_empty(API_TOKEN_ENV), non_empty(API_SECRET_ENV)) {
            (Some(token), Some(secret)) => Some(Credentials::new(token, secret)),
            _ => None,
        };

        let base_url = non_empty(BASE_URL_ENV).unwrap_or_else(|| Self::DEFAULT_BASE_URL.to_owned());

        Self {
            credentials,
            base_url,
            ..Self::default()
        }
    }

    /// Sets the credentials.
    #[must_use]
    pub fn with_credentials(mut self, credentials: Credentials) -> Self {
        self.credentials = Some(credentials);
        self
    }

    /// Sets the base URL.
    #[must_use]
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Sets the login timeout.
    #[must_use]
    pub const fn with_auth_timeout(mut self, timeout: Duration) -> Self {
        self.auth_timeout = timeout;
        self
    }

    /// Sets the default resource request timeout.
    #[must_use]
    pub const fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }

    /// Whether both halves of the credential pair are present.
    #[must_use]
    pub const fn has_credentials(&self) -> bool {
        self.credentials.is_some()
    }
}

impl Default for CarApiConfig {
    fn default() -> Self {
        Self {
            credentials: None,
            base_url: Self::DEFAULT_BASE_URL.to_owned(),
            auth_timeout: Self::DEFAULT_AUTH_TIMEOUT,
            request_timeout: Self::DEFAULT_REQUEST_TIMEOUT,
        }
    }
}
