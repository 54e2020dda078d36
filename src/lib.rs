//! Weather MCP Server Library
//!
//! A Model Context Protocol server exposing geocoding, hourly weather
//! forecasts and event listings as tools, built on a generic tool registry.
//!
//! # Architecture
//!
//! - **core**: configuration, error handling, the server handler and transports
//! - **domains::tools**: tool registry, argument validation, fault containment
//!   and the tool definitions themselves
//!
//! # Example
//!
//! ```rust,no_run
//! use weather_mcp_server::core::{Config, McpServer, TransportService};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = Config::from_env();
//!     let server = McpServer::new(config.clone())?;
//!     TransportService::new(config.transport).run(server).await?;
//!     Ok(())
//! }
//! ```

pub mod core;
pub mod domains;

// Re-export commonly used types for convenience
pub use core::{Config, Error, McpServer, Result};
pub use domains::tools::{InvocationContext, ToolRegistry, ToolResult};
