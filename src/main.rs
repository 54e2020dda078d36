//! Weather MCP Server entry point.
//!
//! Initializes logging, loads configuration, registers the tools and runs
//! the configured transport until shutdown.

use anyhow::{Context, Result};
use tracing::{Level, info};
use tracing_subscriber::{EnvFilter, fmt};

use weather_mcp_server::core::config::LoggingConfig;
use weather_mcp_server::core::{Config, McpServer, TransportService};

#[tokio::main]
async fn main() -> Result<()> {
    // Logging comes up first so configuration warnings are not lost.
    let logging = LoggingConfig::from_env();
    init_logging(&logging.level, logging.with_timestamps);

    let config = Config::from_env();

    info!("Starting {} v{}", config.server.name, config.server.version);
    info!("Upstream: {:?}", config.upstream);

    let server = McpServer::new(config.clone()).context("Failed to initialize server")?;

    info!("Server initialized");

    TransportService::new(config.transport)
        .run(server)
        .await
        .context("Transport failed")?;

    info!("Server shutting down");

    Ok(())
}

/// Initialize the logging subsystem.
///
/// Logs go to stderr; `RUST_LOG` directives are honoured on top of `level`.
fn init_logging(level: &str, with_timestamps: bool) {
    let level = match level.to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    };

    let filter = EnvFilter::from_default_env().add_directive(level.into());

    let builder = fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .with_writer(std::io::stderr);

    if with_timestamps {
        builder.init();
    } else {
        builder.without_time().init();
    }
}
