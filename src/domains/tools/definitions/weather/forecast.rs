//! Hourly forecast for the next hours at a coordinate.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use tracing::{info, instrument};

use super::client::{ForecastQuery, OpenMeteoClient};
use super::format::{collect_slots, hour_prefix, render_forecast, upcoming_window};
use super::{coordinate_subject, with_coordinate_params};
use crate::domains::tools::{
    HandlerFault, InvocationContext, ToolHandler, ToolResult, ToolSchema, ValidatedArguments,
};

/// Forecast tool returning the next `hours` hourly temperatures from now.
pub struct WeatherForecastTool {
    client: Arc<OpenMeteoClient>,
    hours: usize,
    now: fn() -> DateTime<Utc>,
}

impl WeatherForecastTool {
    /// Tool name as registered in MCP.
    pub const NAME: &'static str = "get_weather_forecast";

    /// Tool description shown to clients.
    pub const DESCRIPTION: &'static str = "Get hourly temperature forecast for a given location \
         using longitude and latitude coordinates";

    pub fn new(client: Arc<OpenMeteoClient>, hours: usize) -> Self {
        Self {
            client,
            hours,
            now: Utc::now,
        }
    }

    /// Replace the clock used to locate the current hour.
    #[cfg(test)]
    fn with_clock(mut self, now: fn() -> DateTime<Utc>) -> Self {
        self.now = now;
        self
    }

    pub fn schema(default_unit: &str) -> ToolSchema {
        with_coordinate_params(ToolSchema::new(Self::DESCRIPTION), default_unit)
    }
}

#[async_trait::async_trait]
impl ToolHandler for WeatherForecastTool {
    fn activity(&self) -> &str {
        "fetching weather forecast for"
    }

    fn subject(&self, arguments: &ValidatedArguments) -> String {
        coordinate_subject(arguments)
    }

    #[instrument(skip_all)]
    async fn call(
        &self,
        arguments: &ValidatedArguments,
        _context: &InvocationContext,
    ) -> Result<ToolResult, HandlerFault> {
        let query: ForecastQuery = super::forecast_query(arguments)?;
        info!(
            "Fetching forecast for ({}, {})",
            query.latitude, query.longitude
        );

        let data = self.client.hourly_forecast(&query).await?;
        let window = upcoming_window(&data.hourly.time, &hour_prefix((self.now)()), self.hours);
        let slots = collect_slots(&data, window);

        let header = format!(
            "Weather Forecast for coordinates ({}, {}):\n\nNext {} Hours Temperature Forecast:\n",
            query.latitude,
            query.longitude,
            slots.len()
        );
        Ok(ToolResult::text(render_forecast(&header, &slots)))
    }
}
