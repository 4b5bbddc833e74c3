//! CarAPI (<https://carapi.app>) vehicle specification client.
//!
//! # Architecture
//!
//! - [`CarApiClient`]: authenticated client with a single-flight token cache
//! - [`CarApiConfig`]: credentials, base URL and timeouts
//! - [`ResourceQuery`]: typed queries for the list endpoints
//! - [`QueryOutcome`]: a page of records, or a degraded empty result

mod client;
mod config;
mod query;
mod token;
mod types;

pub use client::{CarApiClient, RequestOptions};
pub use config::{API_SECRET_ENV, API_TOKEN_ENV, BASE_URL_ENV, CarApiConfig, Credentials};
pub use query::{
    AUTH_ENDPOINT, ENGINES_ENDPOINT, EnginesQuery, MAKES_ENDPOINT, MODELS_ENDPOINT, MakesQuery,
    ModelsQuery, QueryParams, ResourceQuery, TRIMS_ENDPOINT, TrimsQuery,
};
pub use token::{CachedToken, Clock, REFRESH_MARGIN_SECS, SystemClock};
pub use types::{
    ApiPage, Collection, EmptyReason, Engine, Make, Model, NameRef, QueryOutcome, Scalar, Trim,
};
