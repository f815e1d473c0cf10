//! MCP server for the JobBOSS2 manufacturing ERP.
//!
//! Tools are declared in per-resource tables under [`tools`] and composed by
//! the [`registry`], which wraps every handler with argument validation, the
//! read-only mutation gate ([`policy`]) and response-size truncation
//! ([`format`]). The [`server`] module exposes the registry over MCP.

pub mod format;
pub mod policy;
pub mod registry;
pub mod server;
pub mod tools;
