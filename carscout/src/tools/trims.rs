//! `search_car_trims`: list trim configurations with engine basics.

use std::sync::Arc;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

use crate::carapi::{ApiPage, CarApiClient, TRIMS_ENDPOINT, Trim, TrimsQuery};
use crate::citation::Citation;
use crate::error::ToolError;
use crate::tool::Tool;

use super::{
    Count, NOT_AVAILABLE, UNKNOWN, default_limit, listing, or, respond, text_filter, year_filter,
};

const SHOWN: usize = 20;

/// Arguments for [`SearchCarTrims`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchCarTrimsArgs {
    /// Make filter.
    #[serde(default)]
    pub make: Option<String>,
    /// Model filter.
    #[serde(default)]
    pub model: Option<String>,
    /// Model year filter.
    #[serde(default)]
    pub year: Option<u32>,
    /// Page size.
    #[serde(default = "default_limit")]
    pub limit: u32,
    /// Page number.
    #[serde(default)]
    pub page: Option<u32>,
}

impl Default for SearchCarTrimsArgs {
    fn default() -> Self {
        Self {
            make: None,
            model: None,
            year: None,
            limit: default_limit(),
            page: None,
        }
    }
}

/// Lists trims (specific configurations of a model).
#[derive(Debug, Clone)]
pub struct SearchCarTrims {
    client: Arc<CarApiClient>,
}

impl SearchCarTrims {
    /// Create the tool over a shared client.
    #[must_use]
    pub const fn new(client: Arc<CarApiClient>) -> Self {
        Self { client }
    }
}

#[async_trait]
impl Tool for SearchCarTrims {
    const NAME: &'static str = "search_car_trims";
    type Args = SearchCarTrimsArgs;
    type Output = String;
    type Error = ToolError;

    fn description(&self) -> String {
        "Search for car trims (specific configurations of a model), including engine \
         size and cylinder count. Filter by make, model and year."
            .to_owned()
    }

    fn parameters_schema(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "make": {"type": "string", "description": "Car make"},
                "model": {"type": "string", "description": "Car model"},
                "year": {"type": "integer", "description": "Model year"},
                "limit": {
                    "type": "integer",
                    "minimum": 1,
                    "description": "Maximum number of trims to return (default: 50)"
                },
                "page": {"type": "integer", "minimum": 1, "description": "Page number"}
            }
        })
    }

    async fn call(&self, args: Self::Args) -> Result<Self::Output, Self::Error> {
        let SearchCarTrimsArgs {
            make,
            model,
            year,
            limit,
            page,
        } = args;

        let mut query = TrimsQuery {
            make: text_filter(make),
            model: text_filter(model),
            year: year_filter(year),
            page: None,
            limit: None,
        }
        .with_limit(limit);
        if let Some(page) = page {
            query = query.with_page(page);
        }

        let citation = Citation::carapi(TRIMS_ENDPOINT)
            .with_filter("make", query.make.as_deref())
            .with_filter("model", query.model.as_deref())
            .with_filter("year", query.year)
            .with_optional("page", page)
            .with_parameter("limit", limit);

        Ok(respond(
            self.client.trims(&query).await,
            "searching for car trims",
            citation,
            Count::OfTotal,
            render,
        ))
    }
}

fn render_trim(trim: &Trim) -> String {
    let engine = trim.engine.as_ref();
    format!(
        "- {} {} {} {} (Engine: {}L, {} cyl)",
        or(trim.year.as_ref(), UNKNOWN),
        trim.make.as_ref().and_then(|m| m.name()).unwrap_or(UNKNOWN),
        trim.model.as_ref().and_then(|m| m.name()).unwrap_or(UNKNOWN),
        trim.description.as_deref().unwrap_or(NOT_AVAILABLE),
        or(engine.and_then(|e| e.size.as_ref()), NOT_AVAILABLE),
        or(engine.and_then(|e| e.cylinders.as_ref()), NOT_AVAILABLE),
    )
}

fn render(page: &ApiPage<Trim>) -> String {
    if page.is_empty() {
        return "No car trims found.".to_owned();
    }
    let lines: Vec<String> = page.data.iter().take(SHOWN).map(render_trim).collect();
    listing(
        format!("Found {} trims. First {}:", page.total(), lines.len()),
        lines,
        page.remaining(),
    )
}
