//! Weather API client for fetching weather data
//!
//! Integrates with the Open-Meteo forecast API for current conditions and a
//! daily forecast

use std::time::Duration;

use chrono::NaiveDate;
use reqwest::Client;
use rust_decimal::Decimal;
use serde::Deserialize;
use shared::{CurrentConditions, DailyForecast, WeatherSnapshot};

use crate::config::WeatherConfig;
use crate::error::{AppError, AppResult};

const CURRENT_FIELDS: &str = "temperature_2m,relative_humidity_2m,precipitation,weather_code";
const DAILY_FIELDS: &str = "temperature_2m_max,temperature_2m_min,precipitation_sum,weather_code";

/// Weather API client
#[derive(Clone)]
pub struct WeatherClient {
    client: Client,
    base_url: String,
    forecast_days: u8,
}

/// Open-Meteo forecast response
#[derive(Debug, Deserialize)]
struct OpenMeteoResponse {
    current: OpenMeteoCurrent,
    daily: OpenMeteoDaily,
}

#[derive(Debug, Deserialize)]
struct OpenMeteoCurrent {
    temperature_2m: f64,
    relative_humidity_2m: f64,
    #[serde(default)]
    precipitation: f64,
    #[serde(default)]
    weather_code: i32,
}

/// Daily values arrive as parallel columns, one entry per day
#[derive(Debug, Deserialize)]
struct OpenMeteoDaily {
    time: Vec<NaiveDate>,
    temperature_2m_max: Vec<Option<f64>>,
    temperature_2m_min: Vec<Option<f64>>,
    precipitation_sum: Vec<Option<f64>>,
    weather_code: Vec<Option<i32>>,
}

impl WeatherClient {
    /// Create a new WeatherClient from configuration
    pub fn new(config: &WeatherConfig) -> AppResult<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()
            .map_err(|e| AppError::Configuration(format!("Weather HTTP client: {}", e)))?;

        Ok(Self {
            client,
            base_url: config.api_endpoint.clone(),
            forecast_days: config.forecast_days,
        })
    }

    /// Fetch current conditions and the daily forecast by GPS coordinates
    pub async fn get_snapshot(
        &self,
        latitude: Decimal,
        longitude: Decimal,
    ) -> AppResult<WeatherSnapshot> {
        let forecast_days = self.forecast_days.to_string();
        let latitude = latitude.to_string();
        let longitude = longitude.to_string();

        tracing::debug!(%latitude, %longitude, "Fetching weather snapshot");

        let response = self
            .client
            .get(&self.base_url)
            .query(&[
                ("latitude", latitude.as_str()),
                ("longitude", longitude.as_str()),
                ("current", CURRENT_FIELDS),
                ("daily", DAILY_FIELDS),
                ("timezone", "auto"),
                ("forecast_days", forecast_days.as_str()),
            ])
            .send()
            .await
            .map_err(|e| {
                tracing::warn!("Weather API request failed: {}", e);
                AppError::WeatherServiceUnavailable
            })?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::ExternalService(format!(
                "Weather API error: {} - {}",
                status, body
            )));
        }

        let data: OpenMeteoResponse = response.json().await.map_err(|e| {
            AppError::ExternalService(format!("Failed to parse weather response: {}", e))
        })?;

        Ok(convert_response(data))
    }
}

fn decimal(value: f64) -> Decimal {
    Decimal::from_f64_retain(value).unwrap_or_default().round_dp(2)
}

/// Convert the columnar Open-Meteo response into a snapshot.
///
/// Rows stay aligned with `time`, so `daily[1]` is always tomorrow. The
/// forecast ends at the first day without both temperatures, and columns of
/// unequal length are truncated to the shortest. Missing rain counts as zero.
fn convert_response(data: OpenMeteoResponse) -> WeatherSnapshot {
    let current = CurrentConditions {
        temperature_celsius: decimal(data.current.temperature_2m),
        humidity_percent: data.current.relative_humidity_2m.round() as i32,
        precipitation_mm: decimal(data.current.precipitation),
        weather_code: data.current.weather_code,
    };

    let d = data.daily;
    let daily = d
        .time
        .into_iter()
        .zip(d.temperature_2m_max)
        .zip(d.temperature_2m_min)
        .zip(d.precipitation_sum)
        .zip(d.weather_code)
        .map_while(|((((date, max), min), rain), code)| {
            Some(DailyForecast {
                date,
                temperature_max_celsius: decimal(max?),
                temperature_min_celsius: decimal(min?),
                precipitation_sum_mm: decimal(rain.unwrap_or(0.0)),
                weather_code: code.unwrap_or_default(),
            })
        })
        .collect();

    WeatherSnapshot { current, daily }
}
