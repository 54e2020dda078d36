//! Configuration management for the MCP server.
//!
//! This module provides a centralized configuration structure that can be
//! populated from environment variables (optionally via a `.env` file) or
//! defaults.

use super::transport::TransportConfig;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use tracing::{info, warn};

/// Public Open-Meteo geocoding endpoint.
pub const DEFAULT_GEOCODING_URL: &str = "https://geocoding-api.open-meteo.com/v1/search";

/// Public Open-Meteo forecast endpoint.
pub const DEFAULT_FORECAST_URL: &str = "https://api.open-meteo.com/v1/forecast";

/// Main configuration structure for the MCP server.
///
/// This struct contains all configurable aspects of the server, organized
/// by concern for clarity and maintainability.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Server identification and metadata.
    pub server: ServerConfig,

    /// Logging configuration.
    pub logging: LoggingConfig,

    /// Transport configuration.
    pub transport: TransportConfig,

    /// Upstream HTTP API configuration.
    pub upstream: UpstreamConfig,

    /// Tool behaviour defaults.
    pub tools: ToolsConfig,
}

/// Server identification configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// The name of the server as reported to clients.
    pub name: String,

    /// The version of the server.
    pub version: String,
}

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level filter (e.g., "info", "debug", "trace").
    pub level: String,

    /// Whether to include timestamps in log output.
    pub with_timestamps: bool,
}

/// Configuration for the upstream weather and geocoding APIs.
#[derive(Clone, Serialize, Deserialize)]
pub struct UpstreamConfig {
    /// Geocoding search endpoint.
    pub geocoding_url: String,

    /// Hourly forecast endpoint.
    pub forecast_url: String,

    /// Optional Open-Meteo customer API key, sent as `apikey`.
    pub api_key: Option<String>,

    /// Per-request timeout in seconds.
    pub timeout_secs: u64,
}

/// Custom Debug implementation to redact secrets from logs.
impl std::fmt::Debug for UpstreamConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UpstreamConfig")
            .field("geocoding_url", &self.geocoding_url)
            .field("forecast_url", &self.forecast_url)
            .field("api_key", &self.api_key.as_ref().map(|_| "[REDACTED]"))
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}

/// Defaults applied by the weather tools.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolsConfig {
    /// Temperature unit used when a call does not specify one.
    pub temperature_unit: String,

    /// Number of hourly slots returned by `get_weather_forecast`.
    pub forecast_hours: usize,
}

impl Default for UpstreamConfig {
    fn default() -> Self {
        Self {
            geocoding_url: DEFAULT_GEOCODING_URL.to_string(),
            forecast_url: DEFAULT_FORECAST_URL.to_string(),
            api_key: None,
            timeout_secs: 30,
        }
    }
}

impl Default for ToolsConfig {
    fn default() -> Self {
        Self {
            temperature_unit: "fahrenheit".to_string(),
            forecast_hours: 24,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            with_timestamps: true,
        }
    }
}

impl LoggingConfig {
    /// Read `MCP_LOG_LEVEL` and `MCP_LOG_TIMESTAMPS` without logging anything.
    ///
    /// Used to set up tracing before [`Config::from_env`] runs, so that its
    /// warnings about bad values reach the subscriber. Malformed values
    /// silently fall back here and are reported by `Config::from_env`.
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        let defaults = Self::default();
        Self {
            level: std::env::var("MCP_LOG_LEVEL").unwrap_or(defaults.level),
            with_timestamps: std::env::var("MCP_LOG_TIMESTAMPS")
                .ok()
                .and_then(|v| v.trim().parse().ok())
                .unwrap_or(defaults.with_timestamps),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server: ServerConfig {
                name: "weather-mcp-server".to_string(),
                version: env!("CARGO_PKG_VERSION").to_string(),
            },
            logging: LoggingConfig::default(),
            transport: TransportConfig::default(),
            upstream: UpstreamConfig::default(),
            tools: ToolsConfig::default(),
        }
    }
}

impl Config {
    /// Create a new configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Load configuration from environment variables.
    ///
    /// Environment variables are expected to be prefixed with `MCP_`.
    /// For example: `MCP_SERVER_NAME`, `MCP_LOG_LEVEL`.
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        let mut config = Self::default();

        if let Ok(name) = std::env::var("MCP_SERVER_NAME") {
            config.server.name = name;
        }

        if let Ok(level) = std::env::var("MCP_LOG_LEVEL") {
            config.logging.level = level;
        }

        if let Some(with_timestamps) = env_parse("MCP_LOG_TIMESTAMPS") {
            config.logging.with_timestamps = with_timestamps;
        }

        // Load transport configuration from environment
        config.transport = TransportConfig::from_env();

        if let Ok(url) = std::env::var("MCP_GEOCODING_URL") {
            config.upstream.geocoding_url = url;
        }

        if let Ok(url) = std::env::var("MCP_FORECAST_URL") {
            config.upstream.forecast_url = url;
        }

        if let Ok(api_key) = std::env::var("MCP_OPEN_METEO_API_KEY") {
            if !api_key.trim().is_empty() {
                config.upstream.api_key = Some(api_key);
                info!("Open-Meteo API key loaded from environment");
            }
        }

        if let Some(secs) = env_parse("MCP_UPSTREAM_TIMEOUT_SECS") {
            config.upstream.timeout_secs = secs;
        }

        if let Ok(unit) = std::env::var("MCP_TEMPERATURE_UNIT") {
            match unit.to_lowercase().as_str() {
                u @ ("fahrenheit" | "celsius") => config.tools.temperature_unit = u.to_string(),
                _ => warn!(
                    "Ignoring MCP_TEMPERATURE_UNIT={:?} (expected fahrenheit or celsius)",
                    unit
                ),
            }
        }

        if let Some(hours) = env_parse::<usize>("MCP_FORECAST_HOURS") {
            if hours == 0 {
                warn!("Ignoring MCP_FORECAST_HOURS=0");
            } else {
                config.tools.forecast_hours = hours;
            }
        }

        config
    }
}

/// Read and parse an environment variable, warning when it is malformed.
pub(crate) fn env_parse<T: FromStr>(key: &str) -> Option<T> {
    let raw = std::env::var(key).ok()?;
    match raw.trim().parse() {
        Ok(value) => Some(value),
        Err(_) => {
            warn!("Ignoring invalid value for {}: {:?}", key, raw);
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;
    use std::sync::{Arc, Mutex};

    // Mutex to ensure env var tests run serially
    static ENV_TEST_LOCK: Mutex<()> = Mutex::new(());

    #[test]
    fn test_upstream_from_env() {
        let _lock = ENV_TEST_LOCK.lock().unwrap();
        unsafe {
            std::env::set_var("MCP_OPEN_METEO_API_KEY", "test_key_12345");
            std::env::set_var("MCP_FORECAST_URL", "http://localhost:9999/forecast");
            std::env::set_var("MCP_UPSTREAM_TIMEOUT_SECS", "5");
        }
        let config = Config::from_env();
        assert_eq!(config.upstream.api_key.as_deref(), Some("test_key_12345"));
        assert_eq!(config.upstream.forecast_url, "http://localhost:9999/forecast");
        assert_eq!(config.upstream.timeout_secs, 5);
        unsafe {
            std::env::remove_var("MCP_OPEN_METEO_API_KEY");
            std::env::remove_var("MCP_FORECAST_URL");
            std::env::remove_var("MCP_UPSTREAM_TIMEOUT_SECS");
        }
    }

    #[test]
    fn test_invalid_numbers_fall_back_to_defaults() {
        let _lock = ENV_TEST_LOCK.lock().unwrap();
        unsafe {
            std::env::set_var("MCP_FORECAST_HOURS", "lots");
            std::env::set_var("MCP_TEMPERATURE_UNIT", "kelvin");
        }
        let config = Config::from_env();
        assert_eq!(config.tools.forecast_hours, 24);
        assert_eq!(config.tools.temperature_unit, "fahrenheit");
        unsafe {
            std::env::remove_var("MCP_FORECAST_HOURS");
            std::env::remove_var("MCP_TEMPERATURE_UNIT");
        }
    }

    #[test]
    fn test_tool_defaults_from_env() {
        let _lock = ENV_TEST_LOCK.lock().unwrap();
        unsafe {
            std::env::set_var("MCP_FORECAST_HOURS", "48");
            std::env::set_var("MCP_TEMPERATURE_UNIT", "Celsius");
        }
        let config = Config::from_env();
        assert_eq!(config.tools.forecast_hours, 48);
        assert_eq!(config.tools.temperature_unit, "celsius");
        unsafe {
            std::env::remove_var("MCP_FORECAST_HOURS");
            std::env::remove_var("MCP_TEMPERATURE_UNIT");
        }
    }

    #[test]
    fn test_api_key_redacted_in_debug() {
        let upstream = UpstreamConfig {
            api_key: Some("super_secret_key".to_string()),
            ..Default::default()
        };
        let debug_str = format!("{:?}", upstream);
        assert!(debug_str.contains("REDACTED"));
        assert!(!debug_str.contains("super_secret_key"));
    }

    #[test]
    fn test_config_default_endpoints() {
        let config = Config::default();
        assert_eq!(config.upstream.geocoding_url, DEFAULT_GEOCODING_URL);
        assert_eq!(config.upstream.forecast_url, DEFAULT_FORECAST_URL);
        assert!(config.upstream.api_key.is_none());
    }

    /// In-memory log sink for asserting on emitted events.
    #[derive(Clone, Default)]
    struct CapturedLogs(Arc<Mutex<Vec<u8>>>);

    impl io::Write for CapturedLogs {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_logging_config_reads_env_silently() {
        let _lock = ENV_TEST_LOCK.lock().unwrap();
        unsafe {
            std::env::set_var("MCP_LOG_LEVEL", "debug");
            std::env::set_var("MCP_LOG_TIMESTAMPS", "maybe");
        }
        let captured = CapturedLogs::default();
        let writer = captured.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_writer(move || writer.clone())
            .with_ansi(false)
            .finish();

        let logging = tracing::subscriber::with_default(subscriber, LoggingConfig::from_env);
        assert_eq!(logging.level, "debug");
        assert!(logging.with_timestamps);
        assert!(captured.0.lock().unwrap().is_empty());
        unsafe {
            std::env::remove_var("MCP_LOG_LEVEL");
            std::env::remove_var("MCP_LOG_TIMESTAMPS");
        }
    }

    #[test]
    fn test_invalid_values_are_logged_once_subscriber_is_set() {
        let _lock = ENV_TEST_LOCK.lock().unwrap();
        unsafe {
            std::env::set_var("MCP_FORECAST_HOURS", "lots");
            std::env::set_var("MCP_TEMPERATURE_UNIT", "kelvin");
        }
        let captured = CapturedLogs::default();
        let writer = captured.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_writer(move || writer.clone())
            .with_ansi(false)
            .finish();

        let config = tracing::subscriber::with_default(subscriber, Config::from_env);
        assert_eq!(config.tools.forecast_hours, 24);

        let logs = String::from_utf8(captured.0.lock().unwrap().clone()).unwrap();
        assert!(logs.contains("Ignoring invalid value for MCP_FORECAST_HOURS"));
        assert!(logs.contains("Ignoring MCP_TEMPERATURE_UNIT=\"kelvin\""));
        unsafe {
            std::env::remove_var("MCP_FORECAST_HOURS");
            std::env::remove_var("MCP_TEMPERATURE_UNIT");
        }
    }
}
