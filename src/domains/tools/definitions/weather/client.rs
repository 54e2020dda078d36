//! Open-Meteo HTTP client shared by the weather tools.
//!
//! Wraps a single `reqwest::Client` and knows how to build geocoding and
//! forecast requests and decode their responses.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::core::config::UpstreamConfig;
use crate::domains::tools::HandlerFault;

/// Hourly variables requested from the forecast API.
const HOURLY_VARIABLES: &str = "temperature_2m,weather_code";

// ============================================================================
// Wire types
// ============================================================================

/// Geocoding search response. `results` is absent when nothing matched.
#[derive(Debug, Clone, Deserialize)]
pub struct GeocodingResponse {
    #[serde(default)]
    pub results: Vec<GeocodingResult>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct GeocodingResult {
    pub latitude: f64,
    pub longitude: f64,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub country: Option<String>,
}

/// Latitude/longitude pair returned by `get_coordinates`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

impl From<&GeocodingResult> for Coordinates {
    fn from(result: &GeocodingResult) -> Self {
        Self {
            latitude: result.latitude,
            longitude: result.longitude,
        }
    }
}

/// Forecast response (only the fields the tools read).
#[derive(Debug, Clone, Deserialize)]
pub struct WeatherResponse {
    pub latitude: f64,
    pub longitude: f64,
    #[serde(default)]
    pub timezone: Option<String>,
    pub hourly_units: HourlyUnits,
    pub hourly: HourlySeries,
}

#[derive(Debug, Clone, Deserialize)]
pub struct HourlyUnits {
    pub temperature_2m: String,
}

/// Parallel hourly arrays. Open-Meteo reports missing samples as `null`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct HourlySeries {
    pub time: Vec<String>,
    #[serde(default)]
    pub temperature_2m: Vec<Option<f64>>,
    #[serde(default)]
    pub weather_code: Vec<Option<i64>>,
}

/// Parameters of one forecast request, parsed from validated tool arguments.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ForecastQuery {
    pub latitude: f64,
    pub longitude: f64,
    pub temperature_unit: String,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
}

// ============================================================================
// Client
// ============================================================================

/// Thin async client for the Open-Meteo geocoding and forecast APIs.
#[derive(Debug, Clone)]
pub struct OpenMeteoClient {
    http: reqwest::Client,
    geocoding_url: String,
    forecast_url: String,
    api_key: Option<String>,
}

impl OpenMeteoClient {
    /// Build a client from configuration.
    pub fn new(config: &UpstreamConfig) -> Result<Self, reqwest::Error> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            http,
            geocoding_url: config.geocoding_url.clone(),
            forecast_url: config.forecast_url.clone(),
            api_key: config.api_key.clone(),
        })
    }

    /// Full geocoding URL for a city name (first match only).
    pub fn geocoding_url(&self, address: &str) -> Result<String, HandlerFault> {
        let mut pairs = vec![("name", address.to_string()), ("count", "1".to_string())];
        if let Some(key) = &self.api_key {
            pairs.push(("apikey", key.clone()));
        }
        with_query(&self.geocoding_url, &pairs)
    }

    /// Full forecast URL for a query.
    pub fn forecast_url(&self, query: &ForecastQuery) -> Result<String, HandlerFault> {
        let mut pairs = vec![
            ("latitude", query.latitude.to_string()),
            ("longitude", query.longitude.to_string()),
            ("hourly", HOURLY_VARIABLES.to_string()),
            ("temperature_unit", query.temperature_unit.clone()),
        ];
        if let Some(start) = &query.start_date {
            pairs.push(("start_date", start.clone()));
        }
        if let Some(end) = &query.end_date {
            pairs.push(("end_date", end.clone()));
        }
        if let Some(key) = &self.api_key {
            pairs.push(("apikey", key.clone()));
        }
        with_query(&self.forecast_url, &pairs)
    }

    /// Look up the first geocoding match for a city name.
    pub async fn search_city(&self, address: &str) -> Result<Option<Coordinates>, HandlerFault> {
        let url = self.geocoding_url(address)?;
        debug!("Geocoding request: {}", redact_key(&url));

        let response = self.http.get(&url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(HandlerFault::status(format!(
                "HTTP error! status: {}",
                status.as_u16()
            )));
        }

        let body = response.text().await?;
        let data: GeocodingResponse = serde_json::from_str(&body)?;
        Ok(data.results.first().map(Coordinates::from))
    }

    /// Fetch the hourly forecast series.
    pub async fn hourly_forecast(&self, query: &ForecastQuery) -> Result<WeatherResponse, HandlerFault> {
        let url = self.forecast_url(query)?;
        debug!("Forecast request: {}", redact_key(&url));

        let response = self.http.get(&url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(HandlerFault::status(format!(
                "Weather API request failed: {}",
                status
            )));
        }

        let body = response.text().await?;
        Ok(serde_json::from_str(&body)?)
    }
}

fn with_query(base: &str, pairs: &[(&str, String)]) -> Result<String, HandlerFault> {
    let query = serde_urlencoded::to_string(pairs)
        .map_err(|e| HandlerFault::other(format!("Failed to encode query: {}", e)))?;
    let separator = if base.contains('?') { '&' } else { '?' };
    Ok(format!("{}{}{}", base, separator, query))
}

/// Strip the `apikey` value before logging a URL.
fn redact_key(url: &str) -> String {
    match url.find("apikey=") {
        Some(pos) => {
            let start = pos + "apikey=".len();
            let end = url[start..].find('&').map_or(url.len(), |i| start + i);
            format!("{}[REDACTED]{}", &url[..start], &url[end..])
        }
        None => url.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client(api_key: Option<&str>) -> OpenMeteoClient {
        OpenMeteoClient::new(&UpstreamConfig {
            geocoding_url: "http://geo.test/v1/search".to_string(),
            forecast_url: "http://wx.test/v1/forecast".to_string(),
            api_key: api_key.map(str::to_string),
            timeout_secs: 5,
        })
        .unwrap()
    }

    fn query() -> ForecastQuery {
        ForecastQuery {
            latitude: 37.7749,
            longitude: -122.4194,
            temperature_unit: "fahrenheit".to_string(),
            start_date: None,
            end_date: None,
        }
    }

    #[test]
    fn test_geocoding_url_encodes_city() {
        let url = client(None).geocoding_url("San José").unwrap();
        assert_eq!(url, "http://geo.test/v1/search?name=San+Jos%C3%A9&count=1");
    }

    #[test]
    fn test_geocoding_url_with_api_key() {
        let url = client(Some("k1")).geocoding_url("Paris").unwrap();
        assert_eq!(url, "http://geo.test/v1/search?name=Paris&count=1&apikey=k1");
    }

    #[test]
    fn test_forecast_url() {
        let url = client(None).forecast_url(&query()).unwrap();
        assert_eq!(
            url,
            "http://wx.test/v1/forecast?latitude=37.7749&longitude=-122.4194\
             &hourly=temperature_2m%2Cweather_code&temperature_unit=fahrenheit"
        );
    }

    #[test]
    fn test_forecast_url_with_dates() {
        let mut q = query();
        q.start_date = Some("2025-06-01".to_string());
        q.end_date = Some("2025-06-02".to_string());
        let url = client(None).forecast_url(&q).unwrap();
        assert!(url.ends_with("&start_date=2025-06-01&end_date=2025-06-02"));
    }

    #[test]
    fn test_base_url_with_existing_query() {
        let url = with_query("http://x.test/search?lang=en", &[("name", "Oslo".to_string())]).unwrap();
        assert_eq!(url, "http://x.test/search?lang=en&name=Oslo");
    }

    #[test]
    fn test_redact_key() {
        assert_eq!(
            redact_key("http://x/s?name=a&apikey=secret&count=1"),
            "http://x/s?name=a&apikey=[REDACTED]&count=1"
        );
        assert_eq!(redact_key("http://x/s?apikey=secret"), "http://x/s?apikey=[REDACTED]");
        assert_eq!(redact_key("http://x/s?name=a"), "http://x/s?name=a");
    }

    #[test]
    fn test_decode_geocoding_without_results() {
        let data: GeocodingResponse = serde_json::from_str(r#"{"generationtime_ms":0.5}"#).unwrap();
        assert!(data.results.is_empty());
    }

    #[test]
    fn test_decode_weather_with_null_samples() {
        let body = r#"{
            "latitude": 52.52, "longitude": 13.41, "timezone": "GMT",
            "hourly_units": { "time": "iso8601", "temperature_2m": "°F" },
            "hourly": {
                "time": ["2025-06-01T00:00", "2025-06-01T01:00"],
                "temperature_2m": [61.2, null],
                "weather_code": [3, null]
            }
        }"#;
        let data: WeatherResponse = serde_json::from_str(body).unwrap();
        assert_eq!(data.hourly.time.len(), 2);
        assert_eq!(data.hourly.temperature_2m, vec![Some(61.2), None]);
        assert_eq!(data.hourly_units.temperature_2m, "°F");
    }
}
