//! Tool Router - builds the rmcp ToolRouter from the registry.
//!
//! Every registered tool becomes one route. Each route forwards to
//! [`ToolRegistry::invoke`], so STDIO/TCP sessions go through exactly the
//! same validation and fault handling as the HTTP transport.

use std::sync::Arc;

use futures::FutureExt;
use rmcp::{
    ErrorData as McpError,
    handler::server::tool::{ToolCallContext, ToolRoute, ToolRouter},
    model::CallToolResult,
};

use super::context::{InvocationContext, TransportKind};
use super::error::ToolError;
use super::registry::{ToolDefinition, ToolRegistry};

/// Build the tool router with all registered tools.
pub fn build_tool_router<S>(registry: Arc<ToolRegistry>) -> ToolRouter<S>
where
    S: Send + Sync + 'static,
{
    registry
        .definitions()
        .iter()
        .fold(ToolRouter::new(), |router, definition| {
            router.with_route(create_route(registry.clone(), definition))
        })
}

/// Create a ToolRoute that dispatches through the registry.
fn create_route<S>(registry: Arc<ToolRegistry>, definition: &ToolDefinition) -> ToolRoute<S>
where
    S: Send + Sync + 'static,
{
    let name = definition.name().to_string();
    ToolRoute::new_dyn(definition.to_tool(), move |ctx: ToolCallContext<'_, S>| {
        let args = ctx.arguments.clone().unwrap_or_default();
        let registry = registry.clone();
        let name = name.clone();
        async move {
            let context = InvocationContext::new(TransportKind::Session);
            registry
                .invoke(&name, &serde_json::Value::Object(args), &context)
                .await
                .map(CallToolResult::from)
                .map_err(to_mcp_error)
        }
        .boxed()
    })
}

fn to_mcp_error(err: ToolError) -> McpError {
    match err {
        ToolError::UnknownTool(_) => McpError::invalid_params(err.to_string(), None),
        ToolError::DuplicateTool(_) => McpError::internal_error(err.to_string(), None),
    }
}
