//! Tools domain module.
//!
//! This module handles all tool-related functionality for the MCP server.
//! Tools are executable functions that can be called by MCP clients.
//!
//! ## Architecture
//!
//! - `schema.rs` - Typed parameter descriptors and argument validation
//! - `registry.rs` - Tool registration and the single invocation path
//! - `handlers.rs` - The `ToolHandler` trait implemented by every tool
//! - `context.rs` - Per-request context passed explicitly to handlers
//! - `content.rs` - The response envelope (`ToolResult`)
//! - `router.rs` - rmcp ToolRouter built from the registry (STDIO/TCP)
//! - `definitions/` - Individual tool implementations
//!
//! ## Adding a New Tool
//!
//! 1. Create a new file in `definitions/` with a handler struct, `NAME`,
//!    `DESCRIPTION` and a `schema()` constructor
//! 2. Implement `ToolHandler` for it
//! 3. Register it in `definitions::register_all`
//!
//! Both transports pick it up from the registry.

mod arguments;
mod content;
mod context;
pub mod definitions;
mod error;
mod handlers;
mod registry;
pub mod router;
pub mod schema;

pub use arguments::ValidatedArguments;
pub use content::{ContentBlock, ToolResult};
pub use context::{InvocationContext, TransportKind};
pub use error::{HandlerFault, ToolError};
pub use handlers::{FnHandler, ToolHandler, handler_fn};
pub use registry::{ToolDefinition, ToolRegistry};
pub use router::build_tool_router;
pub use schema::{ParamKind, ParamSpec, ToolSchema, ValidationError};
