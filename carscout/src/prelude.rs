//! Prelude module for convenient imports.
//!
//! # Usage
//!
//! ```rust,ignore
//! use carscout::prelude::*;
//! ```

pub use crate::carapi::{
    ApiPage, CarApiClient, CarApiConfig, Credentials, EmptyReason, Engine, EnginesQuery, Make,
    MakesQuery, Model, ModelsQuery, QueryOutcome, RequestOptions, ResourceQuery, Trim, TrimsQuery,
};
pub use crate::citation::{Citation, CitationStatus, Report};
pub use crate::error::{Error, Result, ToolError};
pub use crate::tool::{BoxedTool, DynTool, Tool, ToolBox, ToolDefinition, ToolResult};
pub use crate::tools::{
    DEFAULT_LIMIT, SearchCarEngines, SearchCarMakes, SearchCarModels, SearchCarTrims,
    vehicle_toolbox,
};
