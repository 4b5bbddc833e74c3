//! `search_car_models`: list models, filtered by make and year.

use std::sync::Arc;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

use crate::carapi::{ApiPage, CarApiClient, MODELS_ENDPOINT, Model, ModelsQuery};
use crate::citation::Citation;
use crate::error::ToolError;
use crate::tool::Tool;

use super::{Count, UNKNOWN, default_limit, listing, or, respond, text_filter, year_filter};

const SHOWN: usize = 30;

/// Arguments for [`SearchCarModels`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchCarModelsArgs {
    /// Make filter, e.g. `Ford`.
    #[serde(default)]
    pub make: Option<String>,
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

impl Default for SearchCarModelsArgs {
    fn default() -> Self {
        Self {
            make: None,
            year: None,
            limit: default_limit(),
            page: None,
        }
    }
}

/// Lists car models, optionally narrowed by make and year.
#[derive(Debug, Clone)]
pub struct SearchCarModels {
    client: Arc<CarApiClient>,
}

impl SearchCarModels {
    /// Create the tool over a shared client.
    #[must_use]
    pub const fn new(client: Arc<CarApiClient>) -> Self {
        Self { client }
    }
}

#[async_trait]
impl Tool for SearchCarModels {
    const NAME: &'static str = "search_car_models";
    type Args = SearchCarModelsArgs;
    type Output = String;
    type Error = ToolError;

    fn description(&self) -> String {
        "Search for car models, optionally filtered by make and/or model year. \
         Use this to find specific models or browse what a brand offers."
            .to_owned()
    }

    fn parameters_schema(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "make": {"type": "string", "description": "Car make, e.g. 'Ford' or 'Toyota'"},
                "year": {"type": "integer", "description": "Model year, e.g. 2020"},
                "limit": {
                    "type": "integer",
                    "minimum": 1,
                    "description": "Maximum number of models to return (default: 50)"
                },
                "page": {"type": "integer", "minimum": 1, "description": "Page number"}
            }
        })
    }

    async fn call(&self, args: Self::Args) -> Result<Self::Output, Self::Error> {
        let SearchCarModelsArgs {
            make,
            year,
            limit,
            page,
        } = args;

        let mut query = ModelsQuery {
            make: text_filter(make),
            year: year_filter(year),
            page: None,
            limit: None,
        }
        .with_limit(limit);
        if let Some(page) = page {
            query = query.with_page(page);
        }

        let citation = Citation::carapi(MODELS_ENDPOINT)
            .with_filter("make", query.make.as_deref())
            .with_filter("year", query.year)
            .with_optional("page", page)
            .with_parameter("limit", limit);

        Ok(respond(
            self.client.models(&query).await,
            "searching for car models",
            citation,
            Count::OfTotal,
            render,
        ))
    }
}

fn render(page: &ApiPage<Model>) -> String {
    if page.is_empty() {
        return "No car models found.".to_owned();
    }
    let lines: Vec<String> = page
        .data
        .iter()
        .take(SHOWN)
        .map(|model| {
            format!(
                "- {} {} {}",
                or(model.year.as_ref(), UNKNOWN),
                model.make.as_ref().and_then(|m| m.name()).unwrap_or(UNKNOWN),
                model.name.as_deref().unwrap_or(UNKNOWN),
            )
        })
        .collect();
    listing(
        format!("Found {} models. First {}:", page.total(), lines.len()),
        lines,
        page.remaining(),
    )
}
