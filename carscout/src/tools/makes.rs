//! `search_car_makes`: list vehicle brands.

use std::sync::Arc;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

use crate::carapi::{ApiPage, CarApiClient, MAKES_ENDPOINT, Make, MakesQuery};
use crate::citation::Citation;
use crate::error::ToolError;
use crate::tool::Tool;

use super::{Count, UNKNOWN, default_limit, listing, respond};

/// Makes shown in the listing.
const SHOWN: usize = 20;

/// Arguments for [`SearchCarMakes`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchCarMakesArgs {
    /// Page size.
    #[serde(default = "default_limit")]
    pub limit: u32,
    /// Page number.
    #[serde(default)]
    pub page: Option<u32>,
}

impl Default for SearchCarMakesArgs {
    fn default() -> Self {
        Self {
            limit: default_limit(),
            page: None,
        }
    }
}

/// Lists the car makes CarAPI knows about.
#[derive(Debug, Clone)]
pub struct SearchCarMakes {
    client: Arc<CarApiClient>,
}

impl SearchCarMakes {
    /// Create the tool over a shared client.
    #[must_use]
    pub const fn new(client: Arc<CarApiClient>) -> Self {
        Self { client }
    }
}

#[async_trait]
impl Tool for SearchCarMakes {
    const NAME: &'static str = "search_car_makes";
    type Args = SearchCarMakesArgs;
    type Output = String;
    type Error = ToolError;

    fn description(&self) -> String {
        "Search for car makes (brands). Returns the car manufacturers available in CarAPI, \
         with a source citation. Use this to find which brands exist."
            .to_owned()
    }

    fn parameters_schema(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "limit": {
                    "type": "integer",
                    "minimum": 1,
                    "description": "Maximum number of makes to return (default: 50)"
                },
                "page": {
                    "type": "integer",
                    "minimum": 1,
                    "description": "Page number for paging through results"
                }
            }
        })
    }

    async fn call(&self, args: Self::Args) -> Result<Self::Output, Self::Error> {
        let mut query = MakesQuery::new().with_limit(args.limit);
        if let Some(page) = args.page {
            query = query.with_page(page);
        }

        let citation = Citation::carapi(MAKES_ENDPOINT)
            .with_optional("page", args.page)
            .with_parameter("limit", args.limit);

        Ok(respond(
            self.client.makes(&query).await,
            "searching for car makes",
            citation,
            Count::OfTotal,
            render,
        ))
    }
}

fn render(page: &ApiPage<Make>) -> String {
    if page.is_empty() {
        return "No car makes found.".to_owned();
    }
    let lines: Vec<String> = page
        .data
        .iter()
        .take(SHOWN)
        .map(|make| format!("- {}", make.name.as_deref().unwrap_or(UNKNOWN)))
        .collect();
    listing(
        format!("Found {} car makes. First {}:", page.total(), lines.len()),
        lines,
        page.remaining(),
    )
}
