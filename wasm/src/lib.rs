//! WebAssembly module for the Plant Care platform
//!
//! Provides client-side computation for:
//! - Reminder status and next due dates
//! - Interval presets and species-based suggestions
//! - Weather and season interval adjustments
//!
//! Dates cross the boundary as `YYYY-MM-DD` strings and structured values as
//! JSON. The caller supplies "today" so results match the browser's clock.

use chrono::{DateTime, NaiveDate, NaiveTime};
use rust_decimal::Decimal;
use wasm_bindgen::prelude::*;

// Re-export shared types for use in JavaScript
pub use shared::models::*;
pub use shared::validation::*;

fn parse_date(value: &str, what: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(value, "%Y-%m-%d").map_err(|e| format!("Invalid {}: {}", what, e))
}

fn parse_snapshot(weather_json: &str) -> Result<WeatherSnapshot, String> {
    serde_json::from_str(weather_json).map_err(|e| format!("Invalid weather JSON: {}", e))
}

fn to_js(result: Result<String, String>) -> Result<String, JsValue> {
    result.map_err(|e| JsValue::from_str(&e))
}

fn reminder_status_json(next_due: &str, today: &str) -> Result<String, String> {
    let due = parse_date(next_due, "due date")?;
    let today = parse_date(today, "today")?;
    let info = get_reminder_status_at(due, today.and_time(NaiveTime::MIN));
    serde_json::to_string(&info).map_err(|e| e.to_string())
}

fn next_due_string(cared_at: &str, interval_days: u32) -> Result<String, String> {
    validate_interval_days(interval_days)?;
    let cared_at = DateTime::parse_from_rfc3339(cared_at)
        .map_err(|e| format!("Invalid care timestamp: {}", e))?;
    Ok(calculate_next_due_date(cared_at.naive_local(), interval_days)
        .format("%Y-%m-%d")
        .to_string())
}

fn season_string(latitude: f64, date: &str) -> Result<String, String> {
    let latitude = Decimal::try_from(latitude).map_err(|e| format!("Invalid latitude: {}", e))?;
    validate_latitude(latitude)?;
    Ok(get_current_season(latitude, parse_date(date, "date")?).to_string())
}

fn adjustment_json(
    base_interval: u32,
    weather_json: &str,
    is_indoor: bool,
    season: &str,
) -> Result<String, String> {
    validate_interval_days(base_interval)?;
    let weather = parse_snapshot(weather_json)?;
    let season: Season = serde_json::from_value(serde_json::Value::String(season.to_lowercase()))
        .map_err(|_| format!("Unknown season: {}", season))?;

    let adjustment = adjust_interval_for_weather(base_interval, &weather, is_indoor, season);
    serde_json::to_string(&adjustment).map_err(|e| e.to_string())
}

fn alerts_json(weather_json: &str, has_outdoor_plants: bool) -> Result<String, String> {
    let weather = parse_snapshot(weather_json)?;
    serde_json::to_string(&get_weather_alerts(&weather, has_outdoor_plants)).map_err(|e| e.to_string())
}

/// Classify a due date relative to `today`; returns status JSON
#[wasm_bindgen]
pub fn reminder_status(next_due: &str, today: &str) -> Result<String, JsValue> {
    to_js(reminder_status_json(next_due, today))
}

/// Next due day for care done at an RFC 3339 timestamp
#[wasm_bindgen]
pub fn next_due_date(cared_at: &str, interval_days: u32) -> Result<String, JsValue> {
    to_js(next_due_string(cared_at, interval_days))
}

/// Human label for an interval
#[wasm_bindgen]
pub fn format_care_interval(days: u32) -> String {
    format_interval(days)
}

/// Suggest a watering interval from species care notes
#[wasm_bindgen]
pub fn suggest_watering_interval(care_frequency: &str) -> u32 {
    suggest_interval_from_species(care_frequency)
}

/// Preset intervals for a care type name
#[wasm_bindgen]
pub fn care_type_intervals(care_type: &str) -> Vec<u32> {
    get_suggested_intervals(care_type).to_vec()
}

/// Check an interval is within the allowed range
#[wasm_bindgen]
pub fn is_valid_interval(days: u32) -> bool {
    validate_interval_days(days).is_ok()
}

/// Season at a latitude on a date
#[wasm_bindgen]
pub fn current_season(latitude: f64, date: &str) -> Result<String, JsValue> {
    to_js(season_string(latitude, date))
}

/// Adjust an interval for a weather snapshot; returns adjustment JSON
#[wasm_bindgen]
pub fn adjust_watering_interval(
    base_interval: u32,
    weather_json: &str,
    is_indoor: bool,
    season: &str,
) -> Result<String, JsValue> {
    to_js(adjustment_json(base_interval, weather_json, is_indoor, season))
}

/// Alerts for a weather snapshot; returns a JSON array
#[wasm_bindgen]
pub fn weather_alerts(weather_json: &str, has_outdoor_plants: bool) -> Result<String, JsValue> {
    to_js(alerts_json(weather_json, has_outdoor_plants))
}

#[cfg(test)]
mod tests {
    use super::*;

    const WEATHER: &str = r#"{
        "current": {
            "temperature_celsius": "4",
            "humidity_percent": 20,
            "precipitation_mm": "0",
            "weather_code": 3
        },
        "daily": [
            {"date": "2024-01-10", "temperature_max_celsius": "6", "temperature_min_celsius": "2",
             "precipitation_sum_mm": "0", "weather_code": 3},
            {"date": "2024-01-11", "temperature_max_celsius": "5", "temperature_min_celsius": "3",
             "precipitation_sum_mm": "0", "weather_code": 3}
        ]
    }"#;

    #[test]
    fn test_reminder_status_json() {
        let json = reminder_status_json("2024-03-09", "2024-03-10").unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["status"], "overdue");
        assert_eq!(value["label"], "1 day overdue");

        assert!(reminder_status_json("03/09/2024", "2024-03-10").is_err());
    }

    #[test]
    fn test_next_due_string() {
        assert_eq!(next_due_string("2024-02-28T20:00:00+01:00", 1).unwrap(), "2024-02-29");
        assert!(next_due_string("2024-02-28T20:00:00+01:00", 0).is_err());
    }

    #[test]
    fn test_presets_and_labels() {
        assert_eq!(care_type_intervals("PRUNING"), vec![30, 60, 90, 180]);
        assert_eq!(care_type_intervals("unknown"), vec![7, 14, 30]);
        assert_eq!(format_care_interval(21), "Every 3 weeks");
        assert_eq!(suggest_watering_interval("Water once a month"), 30);
        assert!(is_valid_interval(365));
        assert!(!is_valid_interval(366));
    }

    #[test]
    fn test_season_string() {
        assert_eq!(season_string(51.5, "2024-10-15").unwrap(), "autumn");
        assert_eq!(season_string(-51.5, "2024-10-15").unwrap(), "spring");
        assert!(season_string(120.0, "2024-10-15").is_err());
    }

    #[test]
    fn test_adjustment_json() {
        let json = adjustment_json(7, WEATHER, false, "Winter").unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["adjusted_interval"], 10);
        assert_eq!(value["reason"], "Extended due to winter season");

        assert!(adjustment_json(7, WEATHER, false, "monsoon").is_err());
    }

    #[test]
    fn test_alerts_json() {
        let json = alerts_json(WEATHER, true).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        let types: Vec<&str> = value
            .as_array()
            .unwrap()
            .iter()
            .map(|a| a["alert_type"].as_str().unwrap())
            .collect();
        assert_eq!(types, vec!["frost", "low_humidity"]);
    }
}
