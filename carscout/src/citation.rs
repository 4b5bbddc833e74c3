//! Source citation footer appended to every tool output.
//!
//! Downstream report writers parse this block, so its layout is fixed:
//!
//! ```text
//! ---SOURCE CITATION---
//! Source: CarAPI - https://carapi.app
//! API Endpoint: GET /api/models
//! Query Parameters: make=Ford, year=all, limit=50
//! Query Time: 2026-10-16T12:00:00Z
//! Results Returned: 30 of 112
//! ```
//!
//! On failure the last line is `Error: <message>` instead.

use std::fmt;

use chrono::{DateTime, SecondsFormat, Utc};

/// Source line for CarAPI-backed results.
pub const CARAPI_SOURCE: &str = "CarAPI - https://carapi.app";

/// First line of the footer.
pub const CITATION_HEADER: &str = "---SOURCE CITATION---";

/// How the cited query ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CitationStatus {
    /// Records were returned (possibly none).
    Returned {
        /// Records on the returned page.
        count: usize,
        /// Total matching records, when the endpoint reports one.
        total: Option<u64>,
    },
    /// The query failed.
    Failed(String),
}

/// Citation metadata for one query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Citation {
    source: String,
    method: &'static str,
    endpoint: String,
    parameters: Vec<(String, String)>,
    query_time: DateTime<Utc>,
    status: CitationStatus,
}

impl Citation {
    /// Start a citation for a GET against `endpoint`.
    #[must_use]
    pub fn new(
        source: impl Into<String>,
        endpoint: impl Into<String>,
        query_time: DateTime<Utc>,
    ) -> Self {
        Self {
            source: source.into(),
            method: "GET",
            endpoint: endpoint.into(),
            parameters: Vec::new(),
            query_time,
            status: CitationStatus::Returned {
                count: 0,
                total: Some(0),
            },
        }
    }

    /// Start a CarAPI citation stamped with the current time.
    #[must_use]
    pub fn carapi(endpoint: impl Into<String>) -> Self {
        Self::new(CARAPI_SOURCE, endpoint, Utc::now())
    }

    /// Record a query parameter.
    #[must_use]
    pub fn with_parameter(mut self, key: impl Into<String>, value: impl fmt::Display) -> Self {
        self.parameters.push((key.into(), value.to_string()));
        self
    }

    /// Record a filter, rendering an absent value as `all`.
    #[must_use]
    pub fn with_filter(self, key: impl Into<String>, value: Option<impl fmt::Display>) -> Self {
        match value {
            Some(value) => self.with_parameter(key, value),
            None => self.with_parameter(key, "all"),
        }
    }

    /// Record a parameter only when it was sent.
    #[must_use]
    pub fn with_optional(self, key: impl Into<String>, value: Option<impl fmt::Display>) -> Self {
        match value {
            Some(value) => self.with_parameter(key, value),
            None => self,
        }
    }

    /// Mark the query as returning `count` of `total` records.
    #[must_use]
    pub fn returned(mut self, count: usize, total: Option<u64>) -> Self {
        self.status = CitationStatus::Returned { count, total };
        self
    }

    /// Mark the query as failed.
    #[must_use]
    pub fn failed(mut self, message: impl Into<String>) -> Self {
        self.status = CitationStatus::Failed(message.into());
        self
    }

    /// The endpoint path.
    #[must_use]
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// The query time.
    #[must_use]
    pub const fn query_time(&self) -> DateTime<Utc> {
        self.query_time
    }

    /// How the query ended.
    #[must_use]
    pub const fn status(&self) -> &CitationStatus {
        &self.status
    }
}

impl fmt::Display for Citation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{CITATION_HEADER}")?;
        writeln!(f, "Source: {}", self.source)?;
        writeln!(f, "API Endpoint: {} {}", self.method, self.endpoint)?;

        f.write_str("Query Parameters: ")?;
        if self.parameters.is_empty() {
            f.write_str("none")?;
        }
        for (i, (key, value)) in self.parameters.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{key}={value}")?;
        }
        writeln!(f)?;

        writeln!(
            f,
            "Query Time: {}",
            self.query_time.to_rfc3339_opts(SecondsFormat::Secs, true)
        )?;

        match &self.status {
            CitationStatus::Returned {
                count,
                total: Some(total),
            } => write!(f, "Results Returned: {count} of {total}"),
            CitationStatus::Returned { count, total: None } => {
                write!(f, "Results Returned: {count}")
            }
            CitationStatus::Failed(message) => write!(f, "Error: {message}"),
        }
    }
}

/// A tool's text output: body followed by its citation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Report {
    /// Human-readable listing or error message.
    pub body: String,
    /// Citation footer.
    pub citation: Citation,
}

impl Report {
    /// Create a report.
    #[must_use]
    pub fn new(body: impl Into<String>, citation: Citation) -> Self {
        Self {
            body: body.into(),
            citation,
        }
    }
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}\n\n{}", self.body, self.citation)
    }
}
