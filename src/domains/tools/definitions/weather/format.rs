//! Forecast windowing and text rendering.

use std::ops::Range;

use chrono::{DateTime, Utc};

use super::client::WeatherResponse;

/// One hourly sample ready for display.
#[derive(Debug, Clone, PartialEq)]
pub struct HourlySlot {
    pub time: String,
    pub temperature: Option<f64>,
    pub weather_code: Option<i64>,
    pub unit: String,
}

/// `YYYY-MM-DDTHH` prefix of the given instant, comparable with Open-Meteo
/// hourly timestamps.
pub fn hour_prefix(now: DateTime<Utc>) -> String {
    now.format("%Y-%m-%dT%H").to_string()
}

/// Index range of the next `max_hours` slots starting at the current hour.
///
/// Starts at the first timestamp that sorts at or after `now_prefix`; if the
/// whole series is in the past it starts at the beginning.
pub fn upcoming_window(times: &[String], now_prefix: &str, max_hours: usize) -> Range<usize> {
    let start = times
        .iter()
        .position(|t| t.as_str() >= now_prefix)
        .unwrap_or(0);
    let len = max_hours.min(times.len() - start);
    start..start + len
}

/// Collect the slots of `range` from a forecast response.
pub fn collect_slots(data: &WeatherResponse, range: Range<usize>) -> Vec<HourlySlot> {
    let hourly = &data.hourly;
    range
        .filter_map(|i| {
            hourly.time.get(i).map(|time| HourlySlot {
                time: time.clone(),
                temperature: hourly.temperature_2m.get(i).copied().flatten(),
                weather_code: hourly.weather_code.get(i).copied().flatten(),
                unit: data.hourly_units.temperature_2m.clone(),
            })
        })
        .collect()
}

/// Render slots under a header, one `- time: temp (weatherCode: n)` line each.
pub fn render_forecast(header: &str, slots: &[HourlySlot]) -> String {
    let lines: Vec<String> = slots
        .iter()
        .map(|slot| {
            let temperature = slot
                .temperature
                .map_or_else(|| "n/a".to_string(), |t| format!("{}{}", t, slot.unit));
            let code = slot
                .weather_code
                .map_or_else(|| "n/a".to_string(), |c| c.to_string());
            format!("- {}: {} (weatherCode: {})", slot.time, temperature, code)
        })
        .collect();
    format!("{}{}", header, lines.join("\n"))
}
