//! Weather tools backed by the Open-Meteo APIs.
//!
//! - `coordinates`: city name to latitude/longitude
//! - `forecast`: next hours of hourly temperatures at a coordinate
//! - `forecast_range`: hourly temperatures for an explicit date range

pub mod client;
pub mod coordinates;
pub mod forecast;
pub mod forecast_range;
pub mod format;

pub use client::OpenMeteoClient;
pub use coordinates::GetCoordinatesTool;
pub use forecast::WeatherForecastTool;
pub use forecast_range::WeatherForecastRangeTool;

use client::ForecastQuery;

use crate::domains::tools::{HandlerFault, ParamSpec, ToolSchema, ValidatedArguments};

/// Temperature units accepted by the forecast API.
pub const TEMPERATURE_UNITS: [&str; 2] = ["fahrenheit", "celsius"];

/// Add latitude, longitude and temperature unit parameters.
fn with_coordinate_params(schema: ToolSchema, default_unit: &str) -> ToolSchema {
    schema
        .param(ParamSpec::number_in("latitude", -90.0, 90.0).describe("Latitude coordinate (-90 to 90)"))
        .param(
            ParamSpec::number_in("longitude", -180.0, 180.0)
                .describe("Longitude coordinate (-180 to 180)"),
        )
        .param(
            ParamSpec::one_of("temperature_unit", TEMPERATURE_UNITS)
                .with_default(default_unit)
                .describe("Temperature unit: fahrenheit or celsius"),
        )
}

/// `"<lat>, <lon>"`, used as the fault subject.
fn coordinate_subject(arguments: &ValidatedArguments) -> String {
    match (arguments.f64("latitude"), arguments.f64("longitude")) {
        (Some(lat), Some(lon)) => format!("{}, {}", lat, lon),
        _ => arguments.to_string(),
    }
}

fn forecast_query(arguments: &ValidatedArguments) -> Result<ForecastQuery, HandlerFault> {
    arguments.parse()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn validate(value: serde_json::Value) -> ValidatedArguments {
        with_coordinate_params(ToolSchema::new("t"), "celsius")
            .validate("t", &value)
            .unwrap()
    }

    #[test]
    fn test_unit_default_comes_from_caller() {
        let args = validate(json!({ "latitude": 1, "longitude": 2 }));
        assert_eq!(args.str("temperature_unit"), Some("celsius"));
    }

    #[test]
    fn test_forecast_query_from_arguments() {
        let args = validate(json!({ "latitude": 48.85, "longitude": 2.35, "temperature_unit": "fahrenheit" }));
        let query = forecast_query(&args).unwrap();
        assert_eq!(query.latitude, 48.85);
        assert_eq!(query.longitude, 2.35);
        assert_eq!(query.temperature_unit, "fahrenheit");
        assert_eq!(query.start_date, None);
    }

    #[test]
    fn test_forecast_query_keeps_dates() {
        let schema = with_coordinate_params(ToolSchema::new("t"), "celsius")
            .param(ParamSpec::date("start_date"))
            .param(ParamSpec::date("end_date"));
        let args = schema
            .validate(
                "t",
                &json!({ "latitude": 1, "longitude": 2, "start_date": "2026-03-01", "end_date": "2026-03-02" }),
            )
            .unwrap();
        let query = forecast_query(&args).unwrap();
        assert_eq!(query.latitude, 1.0);
        assert_eq!(query.temperature_unit, "celsius");
        assert_eq!(query.start_date.as_deref(), Some("2026-03-01"));
        assert_eq!(query.end_date.as_deref(), Some("2026-03-02"));
    }

    #[test]
    fn test_coordinate_subject() {
        let args = validate(json!({ "latitude": -33.9, "longitude": 151 }));
        assert_eq!(coordinate_subject(&args), "-33.9, 151");
    }
}
