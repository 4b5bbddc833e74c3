//! Vehicle research tools backed by CarAPI.
//!
//! Every tool returns a text listing followed by a citation footer (see
//! [`crate::citation`]). API failures do not surface as tool errors: the
//! agent gets the error message and the footer as ordinary output, so it
//! can report the failure instead of retrying in a loop.
//!
//! # Example
//!
//! ```ignore
//! use std::sync::Arc;
//! use carscout::prelude::*;
//!
//! let client = Arc::new(CarApiClient::from_env()?);
//! let toolbox = vehicle_toolbox(&client);
//! let text = toolbox.call("search_car_makes", serde_json::json!({"limit": 20})).await?;
//! ```

mod engines;
mod makes;
mod models;
mod trims;

use std::fmt::Display;
use std::sync::Arc;

use tracing::error;

use crate::carapi::{ApiPage, CarApiClient, QueryOutcome};
use crate::citation::{Citation, Report};
use crate::error::{Error, Result};
use crate::tool::ToolBox;

pub use engines::{SearchCarEngines, SearchCarEnginesArgs};
pub use makes::{SearchCarMakes, SearchCarMakesArgs};
pub use models::{SearchCarModels, SearchCarModelsArgs};
pub use trims::{SearchCarTrims, SearchCarTrimsArgs};

/// Page size used when the agent does not ask for one.
pub const DEFAULT_LIMIT: u32 = 50;

const UNKNOWN: &str = "Unknown";
const NOT_AVAILABLE: &str = "N/A";

/// Build a toolbox holding all four vehicle tools over one client.
#[must_use]
pub fn vehicle_toolbox(client: &Arc<CarApiClient>) -> ToolBox {
    let mut toolbox = ToolBox::new();
    toolbox.add(SearchCarMakes::new(Arc::clone(client)));
    toolbox.add(SearchCarModels::new(Arc::clone(client)));
    toolbox.add(SearchCarTrims::new(Arc::clone(client)));
    toolbox.add(SearchCarEngines::new(Arc::clone(client)));
    toolbox
}

const fn default_limit() -> u32 {
    DEFAULT_LIMIT
}

/// A text filter, or `None` when absent or blank.
fn text_filter(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_owned())
        .filter(|v| !v.is_empty())
}

/// A model year filter, or `None` when absent or zero.
fn year_filter(year: Option<u32>) -> Option<u32> {
    year.filter(|&year| year != 0)
}

/// `value`, or `fallback` when absent.
fn or<T: Display>(value: Option<T>, fallback: &str) -> String {
    value.map_or_else(|| fallback.to_owned(), |v| v.to_string())
}

/// Header line plus the bulleted lines, and a note for records past this page.
fn listing(header: String, lines: Vec<String>, remaining: u64) -> String {
    let mut out = header;
    for line in lines {
        out.push('\n');
        out.push_str(&line);
    }
    if remaining > 0 {
        out.push_str(&format!("\n... and {remaining} more."));
    }
    out
}

/// The error path: message plus a citation that records the failure.
fn failure(action: &str, err: &Error, citation: Citation) -> Report {
    error!(error = %err, "error {action}");
    Report::new(format!("Error {action}: {err}"), citation.failed(err.to_string()))
}

/// How the footer counts results.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Count {
    OfTotal,
    PageOnly,
}

/// Turn a query result into the text an agent receives.
fn respond<T>(
    result: Result<QueryOutcome<T>>,
    action: &str,
    citation: Citation,
    count: Count,
    render: impl FnOnce(&ApiPage<T>) -> String,
) -> String {
    let report = match result {
        Ok(outcome) => {
            let page = outcome.into_page();
            let total = match count {
                Count::OfTotal => Some(page.total()),
                Count::PageOnly => None,
            };
            Report::new(render(&page), citation.returned(page.len(), total))
        }
        Err(e) => failure(action, &e, citation),
    };
    report.to_string()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::carapi::CarApiConfig;

    #[test]
    fn toolbox_registers_all_tools() {
        let client = Arc::new(CarApiClient::new(CarApiConfig::default()).unwrap());
        let toolbox = vehicle_toolbox(&client);
        assert_eq!(
            toolbox.names(),
            [
                "search_car_engines",
                "search_car_makes",
                "search_car_models",
                "search_car_trims"
            ]
        );
    }

    #[test]
    fn blank_text_filter_is_absent() {
        assert_eq!(text_filter(Some(" Ford ".into())).as_deref(), Some("Ford"));
        assert_eq!(text_filter(Some("   ".into())), None);
        assert_eq!(text_filter(None), None);
    }

    #[test]
    fn zero_year_filter_is_absent() {
        assert_eq!(year_filter(Some(2020)), Some(2020));
        assert_eq!(year_filter(Some(0)), None);
        assert_eq!(year_filter(None), None);
    }

    #[test]
    fn or_falls_back() {
        assert_eq!(or(Some(2020), UNKNOWN), "2020");
        assert_eq!(or(None::<u32>, NOT_AVAILABLE), "N/A");
    }

    #[test]
    fn listing_appends_remaining() {
        let text = listing("Found 3:".into(), vec!["- a".into()], 2);
        assert_eq!(text, "Found 3:\n- a\n... and 2 more.");
        assert_eq!(listing("Found 1:".into(), vec!["- a".into()], 0), "Found 1:\n- a");
    }

    #[test]
    fn failure_renders_message_and_footer() {
        let citation = Citation::carapi("/api/makes");
        let err = Error::transport(500, "/api/makes", "boom");
        let report = failure("searching for car makes", &err, citation);
        let text = report.to_string();
        assert!(text.starts_with("Error searching for car makes: HTTP 500"));
        assert!(text.contains("---SOURCE CITATION---"));
        assert!(text.contains("Error: HTTP 500 from /api/makes: boom"));
    }

    #[test]
    fn respond_degraded_outcome_is_empty_listing() {
        let text = respond::<crate::carapi::Make>(
            Ok(QueryOutcome::Empty(crate::carapi::EmptyReason::EmptyBody)),
            "searching for car makes",
            Citation::carapi("/api/makes"),
            Count::OfTotal,
            |page| format!("{} records", page.len()),
        );
        assert!(text.starts_with("0 records\n\n---SOURCE CITATION---"));
        assert!(text.ends_with("Results Returned: 0 of 0"));
    }

    #[test]
    fn respond_page_only_count() {
        let text = respond(
            Ok(QueryOutcome::Fetched(ApiPage {
                data: vec![1, 2],
                collection: crate::carapi::Collection::default(),
            })),
            "searching for engines",
            Citation::carapi("/api/engines"),
            Count::PageOnly,
            |_| String::new(),
        );
        assert!(text.ends_with("Results Returned: 2"));
    }
}
