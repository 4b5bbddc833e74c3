//! Carscout - CarAPI vehicle data for research agents
//!
//! This crate wraps the CarAPI vehicle specification service in an
//! authenticated client with token caching, and exposes its list endpoints
//! as agent tools whose text output carries a source citation.

pub mod carapi;
pub mod citation;
pub mod error;
pub mod prelude;
pub mod tool;
pub mod tools;

pub use error::{Error, Result, ToolError};
