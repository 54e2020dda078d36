//! STDIO transport implementation.
//!
//! Standard input/output transport for MCP - the default mode. Logs go to
//! stderr so stdout carries protocol messages only.

use rmcp::ServiceExt;
use tracing::info;

use super::{TransportError, TransportResult, shutdown_signal};
use crate::core::McpServer;

/// STDIO transport handler.
pub struct StdioTransport;

impl StdioTransport {
    /// Serve one session over stdin/stdout.
    pub async fn run(server: McpServer) -> TransportResult<()> {
        info!("Ready - communicating via stdin/stdout");

        let service = server
            .serve(rmcp::transport::stdio())
            .await
            .map_err(|e| TransportError::init(e.to_string()))?;

        // Dropping the running service cancels the session.
        tokio::select! {
            result = service.waiting() => {
                let reason = result.map_err(|e| TransportError::service(e.to_string()))?;
                info!("STDIO session ended: {:?}", reason);
            }
            _ = shutdown_signal() => {
                info!("Stopping STDIO transport");
            }
        }

        Ok(())
    }
}
