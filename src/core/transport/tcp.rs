//! TCP transport implementation.
//!
//! Raw TCP socket transport; every accepted connection is an independent
//! MCP session sharing the same tool registry.

use rmcp::ServiceExt;
use std::net::SocketAddr;
use tokio::net::{TcpListener, TcpStream};
use tracing::{info, warn};

use super::{TransportConfig, TransportError, TransportResult, config::TcpConfig, shutdown_signal};
use crate::core::McpServer;

/// TCP transport handler.
pub struct TcpTransport {
    config: TcpConfig,
}

impl TcpTransport {
    pub fn new(config: TcpConfig) -> Self {
        Self { config }
    }

    /// Create from TransportConfig (extracts TCP config).
    pub fn from_transport_config(config: &TransportConfig) -> Option<Self> {
        match config {
            TransportConfig::Tcp(tcp_config) => Some(Self::new(tcp_config.clone())),
            #[allow(unreachable_patterns)]
            _ => None,
        }
    }

    /// Get the bind address.
    pub fn address(&self) -> String {
        format!("{}:{}", self.config.host, self.config.port)
    }

    /// Accept connections until a shutdown signal arrives.
    pub async fn run(self, server: McpServer) -> TransportResult<()> {
        let addr = self.address();

        let listener = TcpListener::bind(&addr)
            .await
            .map_err(|e| TransportError::bind(&addr, e))?;

        info!("Ready - listening on {} (JSON-RPC over TCP)", addr);

        let shutdown = shutdown_signal();
        tokio::pin!(shutdown);

        loop {
            tokio::select! {
                accepted = listener.accept() => match accepted {
                    Ok((stream, peer_addr)) => {
                        info!("Accepted connection from {}", peer_addr);

                        if let Err(e) = stream.set_nodelay(true) {
                            warn!("Failed to set TCP_NODELAY for {}: {}", peer_addr, e);
                        }

                        tokio::spawn(Self::handle_connection(server.clone(), stream, peer_addr));
                    }
                    Err(e) => {
                        warn!("Failed to accept connection: {}", e);
                        // Avoid spinning on persistent errors.
                        tokio::time::sleep(tokio::time::Duration::from_millis(100)).await;
                    }
                },
                _ = &mut shutdown => {
                    info!("Stopping TCP transport on {}", addr);
                    return Ok(());
                }
            }
        }
    }

    /// Serve a single MCP session over an accepted connection.
    async fn handle_connection(server: McpServer, stream: TcpStream, peer_addr: SocketAddr) {
        let service = match server.serve(stream).await {
            Ok(s) => {
                info!("Client {} connected, serving...", peer_addr);
                s
            }
            Err(e) => {
                warn!("Failed to initialize service for {}: {}", peer_addr, e);
                return;
            }
        };

        match service.waiting().await {
            Ok(reason) => info!("Client {} disconnected: {:?}", peer_addr, reason),
            Err(e) => warn!("Error while serving client {}: {}", peer_addr, e),
        }
    }
}
