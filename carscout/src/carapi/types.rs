//! CarAPI response types.
//!
//! Record fields are optional and lenient: CarAPI is not consistent about
//! numbers versus strings, or about embedding related records versus naming
//! them, and a single odd field must not turn a whole page into a parse
//! failure. A field whose value has the wrong shape reads as `None`.

use std::fmt;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Read an optional record field, treating a value of the wrong shape as absent.
fn lenient<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = Value::deserialize(deserializer)?;
    Ok(serde_json::from_value(value).ok())
}

/// Collection metadata attached to every list response.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Collection {
    /// Total number of records matching the query, across all pages.
    #[serde(default)]
    pub total: u64,
    /// Number of records on this page, when reported.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub count: Option<u64>,
    /// Number of pages, when reported.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pages: Option<u64>,
}

/// One page of results from a list endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiPage<T> {
    /// The records on this page.
    #[serde(default = "Vec::new")]
    pub data: Vec<T>,
    /// Collection metadata.
    #[serde(default)]
    pub collection: Collection,
}

impl<T> ApiPage<T> {
    /// The normalized empty result: no records, zero total.
    #[must_use]
    pub const fn empty() -> Self {
        Self {
            data: Vec::new(),
            collection: Collection {
                total: 0,
                count: None,
                pages: None,
            },
        }
    }

    /// Number of records on this page.
    #[must_use]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Whether this page holds no records.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Total matching records, falling back to the page length when the
    /// response carried no collection total.
    #[must_use]
    pub fn total(&self) -> u64 {
        if self.collection.total == 0 {
            self.data.len() as u64
        } else {
            self.collection.total
        }
    }

    /// Number of matching records not on this page.
    #[must_use]
    pub fn remaining(&self) -> u64 {
        self.total().saturating_sub(self.data.len() as u64)
    }
}

impl<T> Default for ApiPage<T> {
    fn default() -> Self {
        Self::empty()
    }
}

/// Why a resource query produced no data without failing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EmptyReason {
    /// The response body was empty.
    EmptyBody,
    /// The response body could not be parsed.
    Unparsable(String),
}

impl fmt::Display for EmptyReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyBody => f.write_str("empty response body"),
            Self::Unparsable(reason) => write!(f, "unparsable response body: {reason}"),
        }
    }
}

/// Result of a resource query that reached CarAPI and got a 2xx answer.
#[derive(Debug, Clone, PartialEq)]
pub enum QueryOutcome<T> {
    /// A page was parsed from the response.
    Fetched(ApiPage<T>),
    /// The response was empty or unparsable; treated as no results.
    Empty(EmptyReason),
}

impl<T> QueryOutcome<T> {
    /// Collapse into a page, substituting the empty page for degraded results.
    #[must_use]
    pub fn into_page(self) -> ApiPage<T> {
        match self {
            Self::Fetched(page) => page,
            Self::Empty(_) => ApiPage::empty(),
        }
    }

    /// The fetched page, if any.
    #[must_use]
    pub const fn page(&self) -> Option<&ApiPage<T>> {
        match self {
            Self::Fetched(page) => Some(page),
            Self::Empty(_) => None,
        }
    }

    /// Whether the response was empty or unparsable.
    #[must_use]
    pub const fn is_degraded(&self) -> bool {
        matches!(self, Self::Empty(_))
    }
}

/// A number-or-string field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Scalar {
    /// Integer value.
    Int(i64),
    /// Floating point value.
    Float(f64),
    /// Textual value.
    Text(String),
}

impl fmt::Display for Scalar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Int(n) => write!(f, "{n}"),
            Self::Float(x) => write!(f, "{x:?}"),
            Self::Text(s) => f.write_str(s),
        }
    }
}

/// A related record given either by name or as an embedded object.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum NameRef {
    /// Just the name.
    Name(String),
    /// An embedded object with a `name` field.
    Object {
        /// The related record's name.
        #[serde(default)]
        name: Option<String>,
    },
}

impl NameRef {
    /// The related record's name, if present.
    #[must_use]
    pub fn name(&self) -> Option<&str> {
        match self {
            Self::Name(name) => Some(name),
            Self::Object { name } => name.as_deref(),
        }
    }
}

/// A vehicle make (brand).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Make {
    /// CarAPI identifier.
    #[serde(default, deserialize_with = "lenient")]
    pub id: Option<i64>,
    /// Make name, e.g. `Ford`.
    #[serde(default, deserialize_with = "lenient")]
    pub name: Option<String>,
}

/// A vehicle model.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Model {
    /// CarAPI identifier.
    #[serde(default, deserialize_with = "lenient")]
    pub id: Option<i64>,
    /// Model name, e.g. `F-150`.
    #[serde(default, deserialize_with = "lenient")]
    pub name: Option<String>,
    /// The model's make.
    #[serde(default, deserialize_with = "lenient")]
    pub make: Option<NameRef>,
    /// Model year.
    #[serde(default, deserialize_with = "lenient")]
    pub year: Option<Scalar>,
}

/// A trim: one configuration of a model.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Trim {
    /// CarAPI identifier.
    #[serde(default, deserialize_with = "lenient")]
    pub id: Option<i64>,
    /// Trim name.
    #[serde(default, deserialize_with = "lenient")]
    pub name: Option<String>,
    /// Human-readable trim description.
    #[serde(default, deserialize_with = "lenient")]
    pub description: Option<String>,
    /// Model year.
    #[serde(default, deserialize_with = "lenient")]
    pub year: Option<Scalar>,
    /// The trim's make.
    #[serde(default, deserialize_with = "lenient")]
    pub make: Option<NameRef>,
    /// The trim's model.
    #[serde(default, deserialize_with = "lenient")]
    pub model: Option<NameRef>,
    /// Engine specification, when embedded.
    #[serde(default, deserialize_with = "lenient")]
    pub engine: Option<Engine>,
}

/// Engine specifications.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Engine {
    /// CarAPI identifier.
    #[serde(default, deserialize_with = "lenient")]
    pub id: Option<i64>,
    /// Displacement in litres.
    #[serde(default, deserialize_with = "lenient")]
    pub size: Option<Scalar>,
    /// Cylinder count.
    #[serde(default, deserialize_with = "lenient")]
    pub cylinders: Option<Scalar>,
    /// Fuel type.
    #[serde(default, deserialize_with = "lenient")]
    pub fuel_type: Option<String>,
    /// Peak horsepower.
    #[serde(default, deserialize_with = "lenient")]
    pub horsepower_hp: Option<Scalar>,
    /// RPM at peak horsepower.
    #[serde(default, deserialize_with = "lenient")]
    pub horsepower_rpm: Option<Scalar>,
}
