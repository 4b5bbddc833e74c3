//! Bearer token handling: response extraction, claim decoding and freshness.

use std::fmt;

use base64::Engine as _;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use serde_json::Value;

use crate::error::{Error, Result};

/// A cached token is refreshed once it is within this many seconds of expiry.
pub const REFRESH_MARGIN_SECS: u64 = 60;

/// Source of the current time, in seconds since the Unix epoch.
pub trait Clock: Send + Sync + fmt::Debug {
    /// Current time in whole seconds since the Unix epoch.
    fn now(&self) -> u64;
}

/// Wall-clock time.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> u64 {
        u64::try_from(chrono::Utc::now().timestamp()).unwrap_or_default()
    }
}

/// A bearer token together with its expiry claim.
#[derive(Clone, PartialEq, Eq)]
pub struct CachedToken {
    token: String,
    expires_at: Option<u64>,
}

impl CachedToken {
    /// Creates a cached token.
    #[must_use]
    pub fn new(token: impl Into<String>, expires_at: Option<u64>) -> Self {
        Self {
            token: token.into(),
            expires_at,
        }
    }

    /// The raw bearer string.
    #[must_use]
    pub fn token(&self) -> &str {
        &self.token
    }

    /// The `exp` claim, if the token carried one.
    #[must_use]
    pub const fn expires_at(&self) -> Option<u64> {
        self.expires_at
    }

    /// Whether the token may be reused at `now`.
    ///
    /// Tokens without an expiry claim are never reused.
    #[must_use]
    pub fn is_fresh(&self, now: u64) -> bool {
        self.expires_at
            .is_some_and(|exp| now < exp.saturating_sub(REFRESH_MARGIN_SECS))
    }
}

impl fmt::Debug for CachedToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CachedToken")
            .field("token", &"<redacted>")
            .field("expires_at", &self.expires_at)
            .finish()
    }
}

/// Pull the token out of a login response body.
///
/// Accepts a JSON object with a `token` field, a JSON string, or the raw
/// token text (surrounding whitespace and quotes are stripped).
pub(crate) fn extract_token(body: &str) -> Result<String> {
    let token = match serde_json::from_str::<Value>(body) {
        Ok(Value::Object(map)) => map
            .get("token")
            .and_then(Value::as_str)
            .map(str::trim)
            .unwrap_or_default()
            .to_owned(),
        Ok(Value::String(s)) => s.trim().to_owned(),
        _ => body.trim().trim_matches('"').trim().to_owned(),
    };

    if token.is_empty() {
        return Err(Error::auth("no token in login response"));
    }
    Ok(token)
}

/// Read the `exp` claim from a JWT without verifying its signature.
pub(crate) fn decode_expiry(token: &str) -> Result<Option<u64>> {
    let payload = token
        .split('.')
        .nth(1)
        .filter(|segment| !segment.is_empty())
        .ok_or_else(|| Error::auth("malformed token: missing payload segment"))?;

    let bytes = URL_SAFE_NO_PAD
        .decode(payload.trim_end_matches('='))
        .map_err(|e| Error::auth(format!("malformed token payload: {e}")))?;

    let claims: Value = serde_json::from_slice(&bytes)
        .map_err(|e| Error::auth(format!("malformed token claims: {e}")))?;

    Ok(claims.get("exp").and_then(exp_seconds))
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn exp_seconds(value: &Value) -> Option<u64> {
    value.as_u64().or_else(|| {
        value
            .as_f64()
            .filter(|secs| secs.is_finite() && *secs >= 0.0)
            .map(|secs| secs as u64)
    })
}
