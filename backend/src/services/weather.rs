//! Weather service combining live forecasts with the care heuristics

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Serialize;
use shared::{
    adjust_interval_for_weather, describe_weather_code, format_interval, get_current_season,
    get_weather_alerts, IntervalAdjustment, Season, WeatherAlert, WeatherSnapshot,
};

use crate::error::AppResult;
use crate::external::weather::WeatherClient;

/// Weather service for care advice
#[derive(Clone)]
pub struct WeatherService {
    weather_client: WeatherClient,
}

/// Current conditions in display form
#[derive(Debug, Clone, Serialize)]
pub struct ConditionSummary {
    pub description: &'static str,
    pub emoji: &'static str,
    pub temperature_celsius: Decimal,
    pub humidity_percent: i32,
}

/// Weather-aware care advice for one location
#[derive(Debug, Clone, Serialize)]
pub struct CareAdvice {
    pub season: Season,
    pub conditions: ConditionSummary,
    pub base_interval: u32,
    #[serde(flatten)]
    pub adjustment: IntervalAdjustment,
    pub adjusted_label: String,
    pub alerts: Vec<WeatherAlert>,
}

/// Options for computing care advice
#[derive(Debug, Clone, Copy)]
pub struct AdviceOptions {
    pub base_interval: u32,
    pub is_indoor: bool,
    pub has_outdoor_plants: bool,
    pub today: NaiveDate,
}

impl WeatherService {
    /// Create a new WeatherService with weather API client
    pub fn new(weather_client: WeatherClient) -> Self {
        Self { weather_client }
    }

    /// Fetch the current snapshot for a location
    pub async fn get_snapshot(&self, latitude: Decimal, longitude: Decimal) -> AppResult<WeatherSnapshot> {
        self.weather_client.get_snapshot(latitude, longitude).await
    }

    /// Fetch weather for a location and derive interval advice and alerts
    pub async fn care_advice(
        &self,
        latitude: Decimal,
        longitude: Decimal,
        options: AdviceOptions,
    ) -> AppResult<CareAdvice> {
        let snapshot = self.get_snapshot(latitude, longitude).await?;
        let season = get_current_season(latitude, options.today);
        let advice = build_advice(&snapshot, season, options);

        tracing::debug!(
            %season,
            base = options.base_interval,
            adjusted = advice.adjustment.adjusted_interval,
            alerts = advice.alerts.len(),
            "Computed care advice"
        );

        Ok(advice)
    }
}

/// Derive advice from an already fetched snapshot
pub fn build_advice(snapshot: &WeatherSnapshot, season: Season, options: AdviceOptions) -> CareAdvice {
    let adjustment =
        adjust_interval_for_weather(options.base_interval, snapshot, options.is_indoor, season);
    let (description, emoji) = describe_weather_code(snapshot.current.weather_code);

    CareAdvice {
        season,
        conditions: ConditionSummary {
            description,
            emoji,
            temperature_celsius: snapshot.current.temperature_celsius,
            humidity_percent: snapshot.current.humidity_percent,
        },
        base_interval: options.base_interval,
        adjusted_label: format_interval(adjustment.adjusted_interval),
        adjustment,
        alerts: get_weather_alerts(snapshot, options.has_outdoor_plants),
    }
}
