//! REST client for the JobBOSS2 manufacturing-ERP API.
//!
//! This crate is intended to be used by:
//! - `jobboss2-mcp` (MCP tool handlers)
//!
//! It owns OAuth2 client-credentials token management, endpoint
//! normalization/safety, and the `Data` response-envelope handling. It
//! intentionally contains **no** MCP protocol logic and **no** mutation
//! policy: callers decide what may be invoked.

pub mod client;
pub mod config;
pub mod endpoint;
pub mod error;
pub mod params;

pub use client::Jb2Client;
pub use config::ClientConfig;
pub use error::{ClientError, Result};
pub use params::QueryParams;
