//! CarAPI client with bearer token caching.

use std::sync::{Arc, OnceLock};
use std::time::Duration;

use reqwest::header::{ACCEPT, AUTHORIZATION, HeaderMap, HeaderName, HeaderValue};
use reqwest::{Client, Method};
use serde::Serialize;
use serde::de::DeserializeOwned;
use tokio::sync::Mutex;
use tracing::{debug, error, info, instrument, warn};

use crate::error::{Error, Result};

use super::config::{API_SECRET_ENV, API_TOKEN_ENV, CarApiConfig};
use super::query::{
    AUTH_ENDPOINT, EnginesQuery, MakesQuery, ModelsQuery, QueryParams, ResourceQuery, TrimsQuery,
};
use super::token::{self, CachedToken, Clock, SystemClock};
use super::types::{ApiPage, EmptyReason, Engine, Make, Model, QueryOutcome, Trim};

const JSON: &str = "application/json";

static SHARED: OnceLock<Arc<CarApiClient>> = OnceLock::new();

/// Login request body.
#[derive(Serialize)]
struct LoginRequest<'a> {
    api_token: &'a str,
    api_secret: &'a str,
}

/// Per-call transport options for [`CarApiClient::request`].
#[derive(Debug, Clone, Default)]
pub struct RequestOptions {
    /// Extra headers. These override the defaults, except `Authorization`.
    pub headers: HeaderMap,
    /// Timeout override for this call.
    pub timeout: Option<Duration>,
}

impl RequestOptions {
    /// Create empty options.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a header.
    #[must_use]
    pub fn with_header(mut self, name: HeaderName, value: HeaderValue) -> Self {
        self.headers.insert(name, value);
        self
    }

    /// Override the request timeout.
    #[must_use]
    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }
}

/// Authenticated CarAPI client.
///
/// Exchanges the configured credentials for a bearer token on first use and
/// reuses it until it is within
/// [`REFRESH_MARGIN_SECS`](super::token::REFRESH_MARGIN_SECS) of expiry.
/// Token acquisition is single-flight: concurrent callers that find the
/// cache stale wait for one login instead of each issuing their own.
#[derive(Debug)]
pub struct CarApiClient {
    config: CarApiConfig,
    http: Client,
    token: Mutex<Option<CachedToken>>,
    clock: Arc<dyn Clock>,
}

impl CarApiClient {
    /// Create a new client with the given configuration.
    ///
    /// Missing credentials are logged and reported on first use.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built.
    pub fn new(config: CarApiConfig) -> Result<Self> {
        if !config.has_credentials() {
            warn!(
                "CarAPI credentials not found; \
                 set {API_TOKEN_ENV} and {API_SECRET_ENV} before querying"
            );
        }

        let http = Client::builder().build()?;

        Ok(Self {
            config,
            http,
            token: Mutex::new(None),
            clock: Arc::new(SystemClock),
        })
    }

    /// Create a client from environment variables.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built.
    pub fn from_env() -> Result<Self> {
        Self::new(CarApiConfig::from_env())
    }

    /// The process-wide client, built from the environment on first use.
    ///
    /// Prefer passing a client explicitly; this exists for call sites that
    /// have nowhere to hold one.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built.
    pub fn shared() -> Result<Arc<Self>> {
        if let Some(client) = SHARED.get() {
            return Ok(Arc::clone(client));
        }
        let client = Arc::new(Self::from_env()?);
        Ok(Arc::clone(SHARED.get_or_init(|| client)))
    }

    /// Replace the time source used for expiry checks.
    #[must_use]
    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    /// Get the configuration.
    #[must_use]
    pub const fn config(&self) -> &CarApiConfig {
        &self.config
    }

    /// Get the base URL.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.config.base_url
    }

    /// A copy of the currently cached token, fresh or not.
    pub async fn cached_token(&self) -> Option<CachedToken> {
        self.token.lock().await.clone()
    }

    /// Return a bearer token valid for at least the refresh margin.
    ///
    /// Serves the cached token when it is fresh; otherwise logs in and
    /// replaces the cache. A failed login leaves the cache untouched.
    ///
    /// # Errors
    ///
    /// - [`Error::Config`] if credentials are missing
    /// - [`Error::Transport`] if the login call is rejected
    /// - [`Error::Auth`] if the response holds no usable token
    /// - [`Error::Http`] on network failure
    pub async fn acquire_token(&self) -> Result<String> {
        let mut slot = self.token.lock().await;

        if let Some(cached) = slot.as_ref()
            && cached.is_fresh(self.clock.now())
        {
            debug!("using cached CarAPI token");
            return Ok(cached.token().to_owned());
        }

        let fresh = self
            .login()
            .await
            .inspect_err(|e| error!(error = %e, "failed to obtain CarAPI token"))?;
        let token = fresh.token().to_owned();
        *slot = Some(fresh);
        Ok(token)
    }

    async fn login(&self) -> Result<CachedToken> {
        let credentials = self.config.credentials.as_ref().ok_or_else(|| {
            Error::config(format!(
                "CarAPI credentials not configured ({API_TOKEN_ENV}, {API_SECRET_ENV})"
            ))
        })?;

        info!("requesting new CarAPI token");

        let response = self
            .http
            .post(self.url(AUTH_ENDPOINT))
            .header(ACCEPT, JSON)
            .json(&LoginRequest {
                api_token: &credentials.api_token,
                api_secret: &credentials.api_secret,
            })
            .timeout(self.config.auth_timeout)
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;
        if !status.is_success() {
            return Err(Error::transport(status.as_u16(), AUTH_ENDPOINT, body));
        }

        let token = token::extract_token(&body)?;
        let expires_at = token::decode_expiry(&token)?;
        let cached = CachedToken::new(token, expires_at);

        match expires_at {
            Some(exp) if cached.is_fresh(self.clock.now()) => {
                info!(expires_at = exp, "obtained CarAPI token");
            }
            Some(exp) => {
                warn!(expires_at = exp, "CarAPI issued a token that is already near expiry");
            }
            None => warn!("CarAPI token has no exp claim; it will not be reused"),
        }

        Ok(cached)
    }

    /// Make an authenticated request to CarAPI.
    ///
    /// A token is acquired first. Caller headers override the defaults, but
    /// `Authorization` is always the client's bearer token.
    ///
    /// An empty or unparsable 2xx body is not an error: it comes back as
    /// [`QueryOutcome::Empty`] and is logged.
    ///
    /// # Errors
    ///
    /// - [`Error::Transport`] on a non-2xx status
    /// - any error from [`Self::acquire_token`]
    /// - [`Error::Http`] on network failure
    #[instrument(skip_all, fields(method = %method, endpoint = %endpoint))]
    pub async fn request<T: DeserializeOwned>(
        &self,
        method: Method,
        endpoint: &str,
        query: &QueryParams,
        options: RequestOptions,
    ) -> Result<QueryOutcome<T>> {
        let token = self.acquire_token().await?;

        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static(JSON));
        headers.extend(options.headers);
        let bearer = HeaderValue::from_str(&format!("Bearer {token}"))
            .map_err(|e| Error::auth(format!("token is not a valid header value: {e}")))?;
        headers.insert(AUTHORIZATION, bearer);

        let mut request = self
            .http
            .request(method, self.url(endpoint))
            .headers(headers)
            .timeout(options.timeout.unwrap_or(self.config.request_timeout));
        if !query.is_empty() {
            request = request.query(query.as_slice());
        }

        let response = request.send().await?;
        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            error!(status = status.as_u16(), "CarAPI rejected the request");
            return Err(Error::transport(status.as_u16(), endpoint, body));
        }

        Ok(Self::parse_page(endpoint, &body))
    }

    /// Parse a 2xx body, degrading to an empty outcome instead of failing.
    fn parse_page<T: DeserializeOwned>(endpoint: &str, body: &str) -> QueryOutcome<T> {
        if body.trim().is_empty() {
            warn!(endpoint, "empty response from CarAPI");
            return QueryOutcome::Empty(EmptyReason::EmptyBody);
        }

        match serde_json::from_str::<ApiPage<T>>(body) {
            Ok(page) => QueryOutcome::Fetched(page),
            Err(e) => {
                error!(endpoint, error = %e, "failed to parse CarAPI response");
                QueryOutcome::Empty(EmptyReason::Unparsable(e.to_string()))
            }
        }
    }

    /// Run a list query against its endpoint.
    ///
    /// # Errors
    ///
    /// See [`Self::request`].
    pub async fn query<Q: ResourceQuery>(&self, query: &Q) -> Result<QueryOutcome<Q::Record>> {
        self.request(Method::GET, Q::ENDPOINT, &query.params(), RequestOptions::default())
            .await
    }

    /// List makes.
    ///
    /// # Errors
    ///
    /// See [`Self::request`].
    pub async fn makes(&self, query: &MakesQuery) -> Result<QueryOutcome<Make>> {
        self.query(query).await
    }

    /// List models, optionally filtered by make and year.
    ///
    /// # Errors
    ///
    /// See [`Self::request`].
    pub async fn models(&self, query: &ModelsQuery) -> Result<QueryOutcome<Model>> {
        self.query(query).await
    }

    /// List trims, optionally filtered by make, model and year.
    ///
    /// # Errors
    ///
    /// See [`Self::request`].
    pub async fn trims(&self, query: &TrimsQuery) -> Result<QueryOutcome<Trim>> {
        self.query(query).await
    }

    /// List engines, optionally filtered by make and model.
    ///
    /// # Errors
    ///
    /// See [`Self::request`].
    pub async fn engines(&self, query: &EnginesQuery) -> Result<QueryOutcome<Engine>> {
        self.query(query).await
    }

    fn url(&self, endpoint: &str) -> String {
        format!("{}{endpoint}", self.config.base_url.trim_end_matches('/'))
    }
}
