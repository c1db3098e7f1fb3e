//! HTTP handlers for weather-driven care endpoints

use axum::{
    extract::{Query, State},
    Json,
};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use shared::{
    adjust_interval_for_weather, format_interval, get_current_season, get_weather_alerts,
    validate_humidity, validate_latitude, validate_longitude, IntervalAdjustment, Season,
    WeatherAlert, WeatherSnapshot,
};
use validator::Validate;

use crate::error::{AppError, AppResult};
use crate::services::schedule::local_now;
use crate::services::weather::{AdviceOptions, CareAdvice, WeatherService};
use crate::AppState;

fn check_location(latitude: Decimal, longitude: Decimal) -> AppResult<()> {
    validate_latitude(latitude).map_err(|msg| AppError::field("latitude", msg))?;
    validate_longitude(longitude).map_err(|msg| AppError::field("longitude", msg))?;
    Ok(())
}

fn check_snapshot(weather: &WeatherSnapshot) -> AppResult<()> {
    validate_humidity(weather.current.humidity_percent)
        .map_err(|msg| AppError::field("weather.current.humidity_percent", msg))
}

fn today() -> NaiveDate {
    local_now().date_naive()
}

/// Input for adjusting an interval against a weather snapshot
#[derive(Debug, Deserialize, Validate)]
pub struct AdjustIntervalInput {
    #[validate(range(min = 1, max = 365, message = "Interval must be between 1 and 365 days"))]
    pub base_interval: u32,
    pub weather: WeatherSnapshot,
    #[serde(default)]
    pub is_indoor: bool,
    /// Explicit season; derived from `latitude` and `date` when omitted
    pub season: Option<Season>,
    pub latitude: Option<Decimal>,
    pub date: Option<NaiveDate>,
}

#[derive(Debug, Serialize)]
pub struct AdjustIntervalResponse {
    pub season: Season,
    #[serde(flatten)]
    pub adjustment: IntervalAdjustment,
    pub label: String,
}

/// Adjust a care interval for weather and season
pub async fn adjust_interval(
    Json(input): Json<AdjustIntervalInput>,
) -> AppResult<Json<AdjustIntervalResponse>> {
    input.validate()?;
    check_snapshot(&input.weather)?;

    let season = match (input.season, input.latitude) {
        (Some(season), _) => season,
        (None, Some(latitude)) => {
            validate_latitude(latitude).map_err(|msg| AppError::field("latitude", msg))?;
            get_current_season(latitude, input.date.unwrap_or_else(today))
        }
        (None, None) => {
            return Err(AppError::field("season", "Either season or latitude is required"));
        }
    };

    let adjustment =
        adjust_interval_for_weather(input.base_interval, &input.weather, input.is_indoor, season);
    let label = format_interval(adjustment.adjusted_interval);

    Ok(Json(AdjustIntervalResponse {
        season,
        adjustment,
        label,
    }))
}

/// Input for computing weather alerts
#[derive(Debug, Deserialize)]
pub struct WeatherAlertsInput {
    pub weather: WeatherSnapshot,
    #[serde(default)]
    pub has_outdoor_plants: bool,
}

/// Compute alerts for a weather snapshot
pub async fn weather_alerts(
    Json(input): Json<WeatherAlertsInput>,
) -> AppResult<Json<Vec<WeatherAlert>>> {
    check_snapshot(&input.weather)?;
    Ok(Json(get_weather_alerts(&input.weather, input.has_outdoor_plants)))
}

/// Query parameters for season lookup
#[derive(Debug, Deserialize)]
pub struct SeasonQuery {
    pub latitude: Decimal,
    pub date: Option<NaiveDate>,
}

#[derive(Debug, Serialize)]
pub struct SeasonResponse {
    pub season: Season,
    pub date: NaiveDate,
}

/// Meteorological season for a latitude
pub async fn current_season(Query(query): Query<SeasonQuery>) -> AppResult<Json<SeasonResponse>> {
    validate_latitude(query.latitude).map_err(|msg| AppError::field("latitude", msg))?;

    let date = query.date.unwrap_or_else(today);
    Ok(Json(SeasonResponse {
        season: get_current_season(query.latitude, date),
        date,
    }))
}

/// Query parameters for a location
#[derive(Debug, Deserialize)]
pub struct LocationQuery {
    pub latitude: Decimal,
    pub longitude: Decimal,
}

/// Fetch current weather and forecast from the provider
pub async fn get_weather_forecast(
    State(state): State<AppState>,
    Query(query): Query<LocationQuery>,
) -> AppResult<Json<WeatherSnapshot>> {
    check_location(query.latitude, query.longitude)?;

    let service = WeatherService::new(state.weather_client.clone());
    let snapshot = service.get_snapshot(query.latitude, query.longitude).await?;
    Ok(Json(snapshot))
}

/// Query parameters for care advice
#[derive(Debug, Deserialize, Validate)]
pub struct CareAdviceQuery {
    pub latitude: Decimal,
    pub longitude: Decimal,
    #[validate(range(min = 1, max = 365, message = "Interval must be between 1 and 365 days"))]
    pub base_interval: u32,
    #[serde(default)]
    pub is_indoor: bool,
    #[serde(default)]
    pub has_outdoor_plants: bool,
}

/// Fetch weather for a location and return interval advice with alerts
pub async fn get_care_advice(
    State(state): State<AppState>,
    Query(query): Query<CareAdviceQuery>,
) -> AppResult<Json<CareAdvice>> {
    query.validate()?;
    check_location(query.latitude, query.longitude)?;

    let service = WeatherService::new(state.weather_client.clone());
    let advice = service
        .care_advice(
            query.latitude,
            query.longitude,
            AdviceOptions {
                base_interval: query.base_interval,
                is_indoor: query.is_indoor,
                has_outdoor_plants: query.has_outdoor_plants,
                today: today(),
            },
        )
        .await?;
    Ok(Json(advice))
}
