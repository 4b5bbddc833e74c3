//! Query parameters for the CarAPI list endpoints.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use super::types::{Engine, Make, Model, Trim};

/// Login endpoint path.
pub const AUTH_ENDPOINT: &str = "/api/auth/login";
/// Makes endpoint path.
pub const MAKES_ENDPOINT: &str = "/api/makes";
/// Models endpoint path.
pub const MODELS_ENDPOINT: &str = "/api/models";
/// Trims endpoint path.
pub const TRIMS_ENDPOINT: &str = "/api/trims";
/// Engines endpoint path.
pub const ENGINES_ENDPOINT: &str = "/api/engines";

/// Ordered query parameters holding only the values a caller supplied.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryParams(Vec<(&'static str, String)>);

impl QueryParams {
    /// Create an empty parameter set.
    #[must_use]
    pub const fn new() -> Self {
        Self(Vec::new())
    }

    /// Append a parameter.
    pub fn push(&mut self, key: &'static str, value: impl ToString) {
        self.0.push((key, value.to_string()));
    }

    /// Append a parameter only when a value is present.
    pub fn push_opt(&mut self, key: &'static str, value: Option<impl ToString>) {
        if let Some(value) = value {
            self.push(key, value);
        }
    }

    /// Append the model year filter; zero counts as absent.
    pub fn push_year(&mut self, year: Option<u32>) {
        self.push_opt("year", year.filter(|&year| year != 0));
    }

    /// Append a text filter only when it is present and not blank.
    pub fn push_text(&mut self, key: &'static str, value: Option<&str>) {
        self.push_opt(key, value.map(str::trim).filter(|v| !v.is_empty()));
    }

    /// Look up a parameter value.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|(k, _)| *k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Whether the parameter is present.
    #[must_use]
    pub fn contains(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    /// Number of parameters.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether no parameters are set.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// The parameters as key/value pairs, in insertion order.
    #[must_use]
    pub fn as_slice(&self) -> &[(&'static str, String)] {
        &self.0
    }

    /// Iterate over the parameters.
    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &str)> {
        self.0.iter().map(|(k, v)| (*k, v.as_str()))
    }
}

/// A query against one CarAPI list endpoint.
pub trait ResourceQuery {
    /// Endpoint path, relative to the base URL.
    const ENDPOINT: &'static str;

    /// Record type on the returned page.
    type Record: DeserializeOwned;

    /// The query parameters to send.
    fn params(&self) -> QueryParams;
}

/// Page selection shared by every list query.
macro_rules! paging {
    ($ty:ty) => {
        impl $ty {
            /// Sets the 1-based page number.
            #[must_use]
            pub const fn with_page(mut self, page: u32) -> Self {
                self.page = Some(page);
                self
            }

            /// Sets the page size.
            #[must_use]
            pub const fn with_limit(mut self, limit: u32) -> Self {
                self.limit = Some(limit);
                self
            }
        }
    };
}

/// Query for `GET /api/makes`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MakesQuery {
    /// Page number.
    pub page: Option<u32>,
    /// Page size.
    pub limit: Option<u32>,
}

impl MakesQuery {
    /// Create an unfiltered query.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            page: None,
            limit: None,
        }
    }
}

paging!(MakesQuery);

impl ResourceQuery for MakesQuery {
    const ENDPOINT: &'static str = MAKES_ENDPOINT;
    type Record = Make;

    fn params(&self) -> QueryParams {
        let mut params = QueryParams::new();
        params.push_opt("page", self.page);
        params.push_opt("limit", self.limit);
        params
    }
}

/// Query for `GET /api/models`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModelsQuery {
    /// Filter by make name.
    pub make: Option<String>,
    /// Filter by model year.
    pub year: Option<u32>,
    /// Page number.
    pub page: Option<u32>,
    /// Page size.
    pub limit: Option<u32>,
}

impl ModelsQuery {
    /// Create an unfiltered query.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Filter by make.
    #[must_use]
    pub fn with_make(mut self, make: impl Into<String>) -> Self {
        self.make = Some(make.into());
        self
    }

    /// Filter by model year.
    #[must_use]
    pub const fn with_year(mut self, year: u32) -> Self {
        self.year = Some(year);
        self
    }
}

paging!(ModelsQuery);

impl ResourceQuery for ModelsQuery {
    const ENDPOINT: &'static str = MODELS_ENDPOINT;
    type Record = Model;

    fn params(&self) -> QueryParams {
        let mut params = QueryParams::new();
        params.push_text("make", self.make.as_deref());
        params.push_year(self.year);
        params.push_opt("page", self.page);
        params.push_opt("limit", self.limit);
        params
    }
}

/// Query for `GET /api/trims`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrimsQuery {
    /// Filter by make name.
    pub make: Option<String>,
    /// Filter by model name.
    pub model: Option<String>,
    /// Filter by model year.
    pub year: Option<u32>,
    /// Page number.
    pub page: Option<u32>,
    /// Page size.
    pub limit: Option<u32>,
}

impl TrimsQuery {
    /// Create an unfiltered query.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Filter by make.
    #[must_use]
    pub fn with_make(mut self, make: impl Into<String>) -> Self {
        self.make = Some(make.into());
        self
    }

    /// Filter by model.
    #[must_use]
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = Some(model.into());
        self
    }

    /// Filter by model year.
    #[must_use]
    pub const fn with_year(mut self, year: u32) -> Self {
        self.year = Some(year);
        self
    }
}

paging!(TrimsQuery);

impl ResourceQuery for TrimsQuery {
    const ENDPOINT: &'static str = TRIMS_ENDPOINT;
    type Record = Trim;

    fn params(&self) -> QueryParams {
        let mut params = QueryParams::new();
        params.push_text("make", self.make.as_deref());
        params.push_text("model", self.model.as_deref());
        params.push_year(self.year);
        params.push_opt("page", self.page);
        params.push_opt("limit", self.limit);
        params
    }
}

/// Query for `GET /api/engines`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnginesQuery {
    /// Filter by make name.
    pub make: Option<String>,
    /// Filter by model name.
    pub model: Option<String>,
    /// Page number.
    pub page: Option<u32>,
    /// Page size.
    pub limit: Option<u32>,
}

impl EnginesQuery {
    /// Create an unfiltered query.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Filter by make.
    #[must_use]
    pub fn with_make(mut self, make: impl Into<String>) -> Self {
        self.make = Some(make.into());
        self
    }

    /// Filter by model.
    #[must_use]
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = Some(model.into());
        self
    }
}

paging!(EnginesQuery);

impl ResourceQuery for EnginesQuery {
    const ENDPOINT: &'static str = ENGINES_ENDPOINT;
    type Record = Engine;

    fn params(&self) -> QueryParams {
        let mut params = QueryParams::new();
        params.push_text("make", self.make.as_deref());
        params.push_text("model", self.model.as_deref());
        params.push_opt("page", self.page);
        params.push_opt("limit", self.limit);
        params
    }
}
