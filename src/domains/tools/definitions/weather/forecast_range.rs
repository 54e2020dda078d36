//! Hourly forecast for an explicit date range.
//!
//! Unlike `get_weather_forecast`, the result is not clipped to the hours
//! following "now": every hourly slot of the requested range is returned.

use std::sync::Arc;

use tracing::{info, instrument};

use super::client::OpenMeteoClient;
use super::format::{collect_slots, render_forecast};
use super::{coordinate_subject, forecast_query, with_coordinate_params};
use crate::domains::tools::schema::parse_date;
use crate::domains::tools::{
    HandlerFault, InvocationContext, ParamSpec, ToolHandler, ToolResult, ToolSchema,
    ValidatedArguments,
};

/// Forecast tool bounded by `start_date` and `end_date`.
pub struct WeatherForecastRangeTool {
    client: Arc<OpenMeteoClient>,
}

impl WeatherForecastRangeTool {
    /// Tool name as registered in MCP.
    pub const NAME: &'static str = "get_weather_forecast_for_date_range";

    /// Tool description shown to clients.
    pub const DESCRIPTION: &'static str = "Get hourly temperature forecast for a specific location \
         and date range using latitude and longitude coordinates";

    pub fn new(client: Arc<OpenMeteoClient>) -> Self {
        Self { client }
    }

    pub fn schema(default_unit: &str) -> ToolSchema {
        with_coordinate_params(ToolSchema::new(Self::DESCRIPTION), default_unit)
            .param(
                ParamSpec::date("start_date")
                    .describe("Start date to get the weather forecast for (YYYY-MM-DD)"),
            )
            .param(
                ParamSpec::date("end_date")
                    .describe("End date to get the weather forecast for (YYYY-MM-DD)"),
            )
    }
}

#[async_trait::async_trait]
impl ToolHandler for WeatherForecastRangeTool {
    fn activity(&self) -> &str {
        "fetching weather forecast for"
    }

    fn subject(&self, arguments: &ValidatedArguments) -> String {
        match (arguments.str("start_date"), arguments.str("end_date")) {
            (Some(start), Some(end)) => {
                format!("{} from {} to {}", coordinate_subject(arguments), start, end)
            }
            _ => coordinate_subject(arguments),
        }
    }

    #[instrument(skip_all)]
    async fn call(
        &self,
        arguments: &ValidatedArguments,
        _context: &InvocationContext,
    ) -> Result<ToolResult, HandlerFault> {
        let query = forecast_query(arguments)?;
        let (start, end) = match (&query.start_date, &query.end_date) {
            (Some(start), Some(end)) => (start.clone(), end.clone()),
            _ => return Err(HandlerFault::invalid_input("start_date and end_date are required")),
        };
        if parse_date(&start) > parse_date(&end) {
            return Err(HandlerFault::invalid_input(format!(
                "start_date {} is after end_date {}",
                start, end
            )));
        }

        info!(
            "Fetching forecast for ({}, {}) from {} to {}",
            query.latitude, query.longitude, start, end
        );

        let data = self.client.hourly_forecast(&query).await?;
        let slots = collect_slots(&data, 0..data.hourly.time.len());

        let header = format!(
            "Weather Forecast for coordinates ({}, {}) from {} to {}:\n\n{} Hours Temperature Forecast:\n",
            query.latitude,
            query.longitude,
            start,
            end,
            slots.len()
        );
        Ok(ToolResult::text(render_forecast(&header, &slots)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domains::tools::ToolRegistry;
    use crate::domains::tools::definitions::test_support::MockUpstream;
    use serde_json::json;

    fn registry_for(config: &crate::core::config::UpstreamConfig) -> ToolRegistry {
        let client = Arc::new(OpenMeteoClient::new(config).unwrap());
        let mut registry = ToolRegistry::new();
        registry
            .register(
                WeatherForecastRangeTool::NAME,
                WeatherForecastRangeTool::schema("fahrenheit"),
                WeatherForecastRangeTool::new(client),
            )
            .unwrap();
        registry
    }

    /// Two full days of hourly data, long past.
    fn two_day_body() -> String {
        let times: Vec<String> = ["2024-01-10", "2024-01-11"]
            .iter()
            .flat_map(|d| (0..24).map(move |h| format!("{}T{:02}:00", d, h)))
            .collect();
        let temps: Vec<f64> = (0..48).map(|h| 30.0 + (h % 10) as f64).collect();
        let codes: Vec<i64> = vec![0; 48];
        json!({
            "latitude": 40.71,
            "longitude": -74.01,
            "hourly_units": { "temperature_2m": "°F" },
            "hourly": { "time": times, "temperature_2m": temps, "weather_code": codes }
        })
        .to_string()
    }

    #[tokio::test]
    async fn test_returns_whole_requested_range() {
        let upstream = MockUpstream::start(200, two_day_body()).await;
        let registry = registry_for(&upstream.upstream_config());

        let result = registry
            .invoke(
                WeatherForecastRangeTool::NAME,
                &json!({
                    "latitude": 40.71,
                    "longitude": -74.01,
                    "start_date": "2024-01-10",
                    "end_date": "2024-01-11T12:00:00Z"
                }),
                &InvocationContext::default(),
            )
            .await
            .unwrap();
        let text = result.first_text();

        assert!(text.starts_with(
            "Weather Forecast for coordinates (40.71, -74.01) from 2024-01-10 to 2024-01-11:\n\n48 Hours Temperature Forecast:\n"
        ));
        assert_eq!(text.lines().filter(|l| l.starts_with("- ")).count(), 48);
        assert!(text.contains("- 2024-01-10T00:00: 30°F (weatherCode: 0)"));

        let requests = upstream.requests();
        assert!(requests[0].contains("&start_date=2024-01-10&end_date=2024-01-11"));
    }

    #[tokio::test]
    async fn test_reversed_range_is_a_fault() {
        let upstream = MockUpstream::start(200, two_day_body()).await;
        let registry = registry_for(&upstream.upstream_config());

        let result = registry
            .invoke(
                WeatherForecastRangeTool::NAME,
                &json!({
                    "latitude": 1,
                    "longitude": 2,
                    "start_date": "2024-01-12",
                    "end_date": "2024-01-10"
                }),
                &InvocationContext::default(),
            )
            .await
            .unwrap();
        assert_eq!(
            result.first_text(),
            "Error fetching weather forecast for \"1, 2 from 2024-01-12 to 2024-01-10\": \
             start_date 2024-01-12 is after end_date 2024-01-10"
        );
        assert!(upstream.requests().is_empty());
    }

    #[tokio::test]
    async fn test_missing_dates_are_validation_errors() {
        let upstream = MockUpstream::start(200, two_day_body()).await;
        let registry = registry_for(&upstream.upstream_config());

        let result = registry
            .invoke(
                WeatherForecastRangeTool::NAME,
                &json!({ "latitude": 1, "longitude": 2, "start_date": "soon" }),
                &InvocationContext::default(),
            )
            .await
            .unwrap();
        let text = result.first_text();
        assert!(text.contains("start_date: expected a date"));
        assert!(text.contains("end_date: missing required field"));
        assert!(upstream.requests().is_empty());
    }
}
