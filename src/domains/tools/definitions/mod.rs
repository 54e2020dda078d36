//! Tool definitions module.
//!
//! Each tool lives in its own file and exposes `NAME`, `DESCRIPTION` and a
//! `schema()` constructor; `register_all` wires them into a registry.

pub mod events;
pub mod weather;

#[cfg(test)]
pub mod test_support;

use std::sync::Arc;

pub use events::ListEventsTool;
pub use weather::{GetCoordinatesTool, OpenMeteoClient, WeatherForecastRangeTool, WeatherForecastTool};

use super::ToolRegistry;
use crate::core::{Config, Error, Result};

/// Register every built-in tool with settings taken from `config`.
pub fn register_all(registry: &mut ToolRegistry, config: &Config) -> Result<()> {
    let client = OpenMeteoClient::new(&config.upstream)
        .map_err(|e| Error::config(format!("Failed to build HTTP client: {}", e)))?;
    let client = Arc::new(client);
    let unit = config.tools.temperature_unit.as_str();

    registry.register(
        GetCoordinatesTool::NAME,
        GetCoordinatesTool::schema(),
        GetCoordinatesTool::new(client.clone()),
    )?;
    registry.register(
        WeatherForecastTool::NAME,
        WeatherForecastTool::schema(unit),
        WeatherForecastTool::new(client.clone(), config.tools.forecast_hours),
    )?;
    registry.register(
        WeatherForecastRangeTool::NAME,
        WeatherForecastRangeTool::schema(unit),
        WeatherForecastRangeTool::new(client),
    )?;
    registry.register(ListEventsTool::NAME, ListEventsTool::schema(), ListEventsTool::new())?;

    Ok(())
}
