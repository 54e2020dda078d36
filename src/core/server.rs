//! MCP Server implementation and lifecycle management.
//!
//! ## Tool Architecture
//!
//! Tools are defined in `domains/tools/definitions/` with one file per tool
//! and registered into a shared [`ToolRegistry`]. The rmcp `ToolRouter` used
//! by session transports is derived from that registry in
//! `domains/tools/router.rs`, and the HTTP transport calls the registry
//! directly through [`McpServer::call_tool`]. Both paths share validation
//! and fault handling.

use rmcp::{ServerHandler, handler::server::tool::ToolRouter, model::*, tool_handler};
use std::sync::Arc;
use tracing::info;

use super::config::Config;
use crate::domains::tools::{
    InvocationContext, ToolError, ToolRegistry, build_tool_router, definitions,
};

/// The main MCP server handler.
#[derive(Clone)]
pub struct McpServer {
    /// Server configuration.
    config: Arc<Config>,

    /// Registered tools, shared with the router.
    registry: Arc<ToolRegistry>,

    /// Tool router for handling tool calls.
    tool_router: ToolRouter<Self>,
}

impl McpServer {
    /// Create a server with every built-in tool registered.
    pub fn new(config: Config) -> super::error::Result<Self> {
        let mut registry = ToolRegistry::new();
        definitions::register_all(&mut registry, &config)?;
        info!("Registered {} tool(s)", registry.len());
        Ok(Self::with_registry(config, registry))
    }

    /// Create a server around an already populated registry.
    pub fn with_registry(config: Config, registry: ToolRegistry) -> Self {
        let registry = Arc::new(registry);
        Self {
            tool_router: build_tool_router::<Self>(registry.clone()),
            config: Arc::new(config),
            registry,
        }
    }

    /// Get the server name.
    pub fn name(&self) -> &str {
        &self.config.server.name
    }

    /// Get the server version.
    pub fn version(&self) -> &str {
        &self.config.server.version
    }

    pub fn config(&self) -> &Arc<Config> {
        &self.config
    }

    pub fn registry(&self) -> &Arc<ToolRegistry> {
        &self.registry
    }

    // ========================================================================
    // HTTP Transport Support Methods
    // ========================================================================

    /// List all available tools in `tools/list` shape.
    pub fn list_tools(&self) -> Vec<serde_json::Value> {
        self.registry
            .get_all_tools()
            .into_iter()
            .map(|t| {
                serde_json::json!({
                    "name": t.name,
                    "description": t.description,
                    "inputSchema": t.input_schema
                })
            })
            .collect()
    }

    /// Call a tool by name and return the `tools/call` result body.
    pub async fn call_tool(
        &self,
        name: &str,
        arguments: serde_json::Value,
        context: &InvocationContext,
    ) -> std::result::Result<serde_json::Value, ToolError> {
        let result = self.registry.invoke(name, &arguments, context).await?;
        Ok(result.to_json())
    }
}

/// ServerHandler implementation with tool_handler macro for automatic tool routing.
#[tool_handler]
impl ServerHandler for McpServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            instructions: Some(
                "Weather and events MCP server. Use get_coordinates to resolve a city, then \
                 get_weather_forecast or get_weather_forecast_for_date_range for hourly \
                 temperatures; list_events lists upcoming events."
                    .to_string(),
            ),
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            server_info: Implementation {
                name: self.config.server.name.clone(),
                version: self.config.server.version.clone(),
                ..Implementation::from_build_env()
            },
            ..Default::default()
        }
    }
}
