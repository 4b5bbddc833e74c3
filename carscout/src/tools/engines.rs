//! `search_car_engines`: engine specifications by make and model.

use std::sync::Arc;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

use crate::carapi::{ApiPage, CarApiClient, ENGINES_ENDPOINT, Engine, EnginesQuery};
use crate::citation::Citation;
use crate::error::ToolError;
use crate::tool::Tool;

use super::{Count, NOT_AVAILABLE, listing, or, respond, text_filter};

const SHOWN: usize = 30;

/// Arguments for [`SearchCarEngines`].
///
/// Unlike the other tools there is no default page size: CarAPI's own
/// default applies unless `limit` is given.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchCarEnginesArgs {
    /// Make filter.
    #[serde(default)]
    pub make: Option<String>,
    /// Model filter.
    #[serde(default)]
    pub model: Option<String>,
    /// Page size.
    #[serde(default)]
    pub limit: Option<u32>,
    /// Page number.
    #[serde(default)]
    pub page: Option<u32>,
}

/// Lists engine specifications.
#[derive(Debug, Clone)]
pub struct SearchCarEngines {
    client: Arc<CarApiClient>,
}

impl SearchCarEngines {
    /// Create the tool over a shared client.
    #[must_use]
    pub const fn new(client: Arc<CarApiClient>) -> Self {
        Self { client }
    }
}

#[async_trait]
impl Tool for SearchCarEngines {
    const NAME: &'static str = "search_car_engines";
    type Args = SearchCarEnginesArgs;
    type Output = String;
    type Error = ToolError;

    fn description(&self) -> String {
        "Search for engine specifications: displacement, cylinders, fuel type, \
         horsepower and peak RPM. Filter by make and model."
            .to_owned()
    }

    fn parameters_schema(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "make": {"type": "string", "description": "Car make"},
                "model": {"type": "string", "description": "Car model"},
                "limit": {
                    "type": "integer",
                    "minimum": 1,
                    "description": "Maximum number of engines to return"
                },
                "page": {"type": "integer", "minimum": 1, "description": "Page number"}
            }
        })
    }

    async fn call(&self, args: Self::Args) -> Result<Self::Output, Self::Error> {
        let SearchCarEnginesArgs {
            make,
            model,
            limit,
            page,
        } = args;
        let query = EnginesQuery {
            make: text_filter(make),
            model: text_filter(model),
            page,
            limit,
        };

        let citation = Citation::carapi(ENGINES_ENDPOINT)
            .with_filter("make", query.make.as_deref())
            .with_filter("model", query.model.as_deref())
            .with_optional("page", page)
            .with_optional("limit", limit);

        Ok(respond(
            self.client.engines(&query).await,
            "searching for engines",
            citation,
            Count::PageOnly,
            render,
        ))
    }
}

fn render_engine(engine: &Engine) -> String {
    format!(
        "- {}L, {} cyl, {}, {}hp @ {}rpm",
        or(engine.size.as_ref(), NOT_AVAILABLE),
        or(engine.cylinders.as_ref(), NOT_AVAILABLE),
        engine.fuel_type.as_deref().unwrap_or(NOT_AVAILABLE),
        or(engine.horsepower_hp.as_ref(), NOT_AVAILABLE),
        or(engine.horsepower_rpm.as_ref(), NOT_AVAILABLE),
    )
}

fn render(page: &ApiPage<Engine>) -> String {
    if page.is_empty() {
        return "No engine information found.".to_owned();
    }
    let lines = page.data.iter().take(SHOWN).map(render_engine).collect();
    listing("Engine specifications:".to_owned(), lines, 0)
}
