//! Weather data models and the weather/season interval heuristics

use chrono::{Datelike, NaiveDate};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

/// Current conditions plus a daily forecast for one location.
///
/// `daily[0]` is today and `daily[1]` is tomorrow.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeatherSnapshot {
    pub current: CurrentConditions,
    pub daily: Vec<DailyForecast>,
}

/// Conditions at the time the snapshot was taken
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CurrentConditions {
    pub temperature_celsius: Decimal,
    pub humidity_percent: i32,
    pub precipitation_mm: Decimal,
    /// WMO weather interpretation code
    pub weather_code: i32,
}

/// One day of forecast
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DailyForecast {
    pub date: NaiveDate,
    pub temperature_max_celsius: Decimal,
    pub temperature_min_celsius: Decimal,
    pub precipitation_sum_mm: Decimal,
    pub weather_code: i32,
}

impl WeatherSnapshot {
    /// Tomorrow's forecast, if the snapshot has one
    pub fn tomorrow(&self) -> Option<&DailyForecast> {
        self.daily.get(1)
    }

    /// Total precipitation over the first `days` forecast days
    pub fn forecast_precipitation(&self, days: usize) -> Decimal {
        self.daily
            .iter()
            .take(days)
            .map(|d| d.precipitation_sum_mm)
            .sum()
    }
}

/// Meteorological season
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Season {
    Spring,
    Summer,
    Autumn,
    Winter,
}

impl std::fmt::Display for Season {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Season::Spring => write!(f, "spring"),
            Season::Summer => write!(f, "summer"),
            Season::Autumn => write!(f, "autumn"),
            Season::Winter => write!(f, "winter"),
        }
    }
}

/// Meteorological season for a latitude on a given date.
///
/// Northern hemisphere: Dec-Feb winter, Mar-May spring, Jun-Aug summer,
/// Sep-Nov autumn. The southern hemisphere (negative latitude) is two
/// quarters ahead.
pub fn get_current_season(latitude: Decimal, date: NaiveDate) -> Season {
    let northern = match date.month() {
        12 | 1 | 2 => Season::Winter,
        3..=5 => Season::Spring,
        6..=8 => Season::Summer,
        _ => Season::Autumn,
    };

    if latitude >= Decimal::ZERO {
        return northern;
    }

    match northern {
        Season::Winter => Season::Summer,
        Season::Spring => Season::Autumn,
        Season::Summer => Season::Winter,
        Season::Autumn => Season::Spring,
    }
}

/// Interval after weather/season adjustment
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct IntervalAdjustment {
    pub adjusted_interval: u32,
    pub reason: Option<String>,
}

// Adjustment thresholds
const RAIN_FORECAST_DAYS: usize = 2;
const RAIN_FORECAST_MM: i64 = 10;
const HIGH_HUMIDITY_PERCENT: i32 = 70;
const HIGH_TEMPERATURE_C: i64 = 35;
const SUMMER_HEAT_C: i64 = 30;

/// Adjust a base care interval for weather and season.
///
/// Indoor plants ignore the weather; only winter dormancy stretches their
/// interval by 30%. Outdoor plants sum independent day adjustments and never
/// drop below one day.
pub fn adjust_interval_for_weather(
    base_interval: u32,
    weather: &WeatherSnapshot,
    is_indoor: bool,
    season: Season,
) -> IntervalAdjustment {
    if is_indoor {
        return adjust_indoor_interval(base_interval, season);
    }

    let current = &weather.current;
    let mut adjustment: i64 = 0;
    let mut reasons: Vec<&str> = Vec::new();

    if weather.forecast_precipitation(RAIN_FORECAST_DAYS) > Decimal::from(RAIN_FORECAST_MM) {
        adjustment += 2;
        reasons.push("rain forecast");
    }

    if current.humidity_percent > HIGH_HUMIDITY_PERCENT {
        adjustment += 1;
        reasons.push("high humidity");
    }

    if current.temperature_celsius > Decimal::from(HIGH_TEMPERATURE_C) {
        adjustment -= 1;
        reasons.push("high temperature");
    }

    if season == Season::Winter {
        adjustment += 3;
        reasons.push("winter season");
    }

    if season == Season::Summer && current.temperature_celsius > Decimal::from(SUMMER_HEAT_C) {
        adjustment -= 1;
        reasons.push("summer heat");
    }

    let adjusted = (i64::from(base_interval) + adjustment).max(1);
    let reason = match adjustment {
        0 => None,
        a if a > 0 => Some(format!("Extended due to {}", reasons.join(", "))),
        _ => Some(format!("Shortened due to {}", reasons.join(", "))),
    };

    IntervalAdjustment {
        adjusted_interval: u32::try_from(adjusted).unwrap_or(u32::MAX),
        reason,
    }
}

fn adjust_indoor_interval(base_interval: u32, season: Season) -> IntervalAdjustment {
    if season != Season::Winter {
        return IntervalAdjustment {
            adjusted_interval: base_interval,
            reason: None,
        };
    }

    let stretched = (Decimal::from(base_interval) * Decimal::new(13, 1))
        .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero);

    IntervalAdjustment {
        adjusted_interval: stretched.to_u32().unwrap_or(base_interval).max(1),
        reason: Some("Extended for winter dormancy".to_string()),
    }
}

/// Kinds of weather alerts
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum WeatherAlertType {
    Frost,
    Heatwave,
    HeavyRain,
    LowHumidity,
}

/// Alert severity
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord)]
#[serde(rename_all = "lowercase")]
pub enum AlertSeverity {
    Warning,
    Critical,
}

/// A weather condition worth warning a plant owner about
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeatherAlert {
    pub alert_type: WeatherAlertType,
    pub severity: AlertSeverity,
    pub title: String,
    pub message: String,
}

// Alert thresholds
const FROST_WARNING_C: i64 = 5;
const FROST_CRITICAL_C: i64 = 0;
const HEATWAVE_WARNING_C: i64 = 35;
const HEATWAVE_CRITICAL_C: i64 = 40;
const HEAVY_RAIN_WARNING_MM: i64 = 20;
const HEAVY_RAIN_CRITICAL_MM: i64 = 50;
const LOW_HUMIDITY_PERCENT: i32 = 30;

/// Alerts for tomorrow's forecast and current humidity.
///
/// Each check is independent; one snapshot can raise several alerts. Heavy
/// rain only matters when there are outdoor plants.
pub fn get_weather_alerts(weather: &WeatherSnapshot, has_outdoor_plants: bool) -> Vec<WeatherAlert> {
    let mut alerts = Vec::new();

    if let Some(tomorrow) = weather.tomorrow() {
        let min = tomorrow.temperature_min_celsius;
        if min < Decimal::from(FROST_WARNING_C) {
            alerts.push(WeatherAlert {
                alert_type: WeatherAlertType::Frost,
                severity: if min < Decimal::from(FROST_CRITICAL_C) {
                    AlertSeverity::Critical
                } else {
                    AlertSeverity::Warning
                },
                title: "Frost warning".to_string(),
                message: format!(
                    "Temperatures dropping to {}°C tomorrow. Protect or bring in frost-sensitive plants.",
                    min.normalize()
                ),
            });
        }

        let max = tomorrow.temperature_max_celsius;
        if max > Decimal::from(HEATWAVE_WARNING_C) {
            alerts.push(WeatherAlert {
                alert_type: WeatherAlertType::Heatwave,
                severity: if max > Decimal::from(HEATWAVE_CRITICAL_C) {
                    AlertSeverity::Critical
                } else {
                    AlertSeverity::Warning
                },
                title: "Heat warning".to_string(),
                message: format!(
                    "Temperatures reaching {}°C tomorrow. Water early and provide shade.",
                    max.normalize()
                ),
            });
        }

        let rain = tomorrow.precipitation_sum_mm;
        if has_outdoor_plants && rain > Decimal::from(HEAVY_RAIN_WARNING_MM) {
            alerts.push(WeatherAlert {
                alert_type: WeatherAlertType::HeavyRain,
                severity: if rain > Decimal::from(HEAVY_RAIN_CRITICAL_MM) {
                    AlertSeverity::Critical
                } else {
                    AlertSeverity::Warning
                },
                title: "Heavy rain expected".to_string(),
                message: format!(
                    "{}mm of rain expected tomorrow. Skip watering outdoor plants and check drainage.",
                    rain.normalize()
                ),
            });
        }
    }

    let humidity = weather.current.humidity_percent;
    if humidity < LOW_HUMIDITY_PERCENT {
        alerts.push(WeatherAlert {
            alert_type: WeatherAlertType::LowHumidity,
            severity: AlertSeverity::Warning,
            title: "Low humidity".to_string(),
            message: format!(
                "Humidity is {}%. Consider misting tropical plants.",
                humidity
            ),
        });
    }

    alerts
}

/// Short description and emoji for a WMO weather code
pub fn describe_weather_code(code: i32) -> (&'static str, &'static str) {
    match code {
        0 => ("Clear sky", "☀️"),
        1 => ("Mainly clear", "🌤️"),
        2 => ("Partly cloudy", "⛅"),
        3 => ("Overcast", "☁️"),
        45 | 48 => ("Fog", "🌫️"),
        51 | 53 | 55 => ("Drizzle", "🌦️"),
        56 | 57 => ("Freezing drizzle", "🌧️"),
        61 | 63 | 65 => ("Rain", "🌧️"),
        66 | 67 => ("Freezing rain", "🌧️"),
        71 | 73 | 75 | 77 => ("Snow", "🌨️"),
        80..=82 => ("Rain showers", "🌦️"),
        85 | 86 => ("Snow showers", "🌨️"),
        95 => ("Thunderstorm", "⛈️"),
        96 | 99 => ("Thunderstorm with hail", "⛈️"),
        _ => ("Unknown", "🌡️"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn forecast(date: NaiveDate, max: &str, min: &str, rain: &str) -> DailyForecast {
        DailyForecast {
            date,
            temperature_max_celsius: dec(max),
            temperature_min_celsius: dec(min),
            precipitation_sum_mm: dec(rain),
            weather_code: 0,
        }
    }

    fn snapshot(temp: &str, humidity: i32, daily: Vec<DailyForecast>) -> WeatherSnapshot {
        WeatherSnapshot {
            current: CurrentConditions {
                temperature_celsius: dec(temp),
                humidity_percent: humidity,
                precipitation_mm: Decimal::ZERO,
                weather_code: 0,
            },
            daily,
        }
    }

    fn mild() -> WeatherSnapshot {
        snapshot(
            "20",
            50,
            vec![
                forecast(day(2024, 7, 15), "22", "14", "0"),
                forecast(day(2024, 7, 16), "23", "15", "0"),
            ],
        )
    }

    #[test]
    fn test_season_northern_hemisphere() {
        let seattle = dec("47.6");
        assert_eq!(get_current_season(seattle, day(2024, 7, 15)), Season::Summer);
        assert_eq!(get_current_season(seattle, day(2024, 1, 15)), Season::Winter);
        assert_eq!(get_current_season(seattle, day(2024, 12, 1)), Season::Winter);
        assert_eq!(get_current_season(seattle, day(2024, 4, 1)), Season::Spring);
        assert_eq!(get_current_season(seattle, day(2024, 10, 31)), Season::Autumn);
    }

    #[test]
    fn test_season_southern_hemisphere() {
        let sydney = dec("-33.9");
        assert_eq!(get_current_season(sydney, day(2024, 7, 15)), Season::Winter);
        assert_eq!(get_current_season(sydney, day(2024, 1, 15)), Season::Summer);
        assert_eq!(get_current_season(sydney, day(2024, 4, 1)), Season::Autumn);
        assert_eq!(get_current_season(sydney, day(2024, 10, 1)), Season::Spring);
    }

    #[test]
    fn test_equator_uses_northern_seasons() {
        assert_eq!(get_current_season(Decimal::ZERO, day(2024, 7, 1)), Season::Summer);
    }

    #[test]
    fn test_indoor_winter_extension() {
        let result = adjust_interval_for_weather(7, &mild(), true, Season::Winter);
        assert_eq!(result.adjusted_interval, 9);
        assert_eq!(result.reason.as_deref(), Some("Extended for winter dormancy"));

        // 5 * 1.3 = 6.5 rounds up
        let result = adjust_interval_for_weather(5, &mild(), true, Season::Winter);
        assert_eq!(result.adjusted_interval, 7);
    }

    #[test]
    fn test_indoor_other_seasons_unchanged() {
        let scorching = snapshot("42", 90, vec![]);
        for season in [Season::Spring, Season::Summer, Season::Autumn] {
            let result = adjust_interval_for_weather(7, &scorching, true, season);
            assert_eq!(result, IntervalAdjustment { adjusted_interval: 7, reason: None });
        }
    }

    #[test]
    fn test_outdoor_no_signals() {
        let result = adjust_interval_for_weather(7, &mild(), false, Season::Spring);
        assert_eq!(result.adjusted_interval, 7);
        assert!(result.reason.is_none());
    }

    #[test]
    fn test_outdoor_rain_and_humidity_extend() {
        let wet = snapshot(
            "18",
            80,
            vec![
                forecast(day(2024, 5, 1), "20", "12", "6"),
                forecast(day(2024, 5, 2), "19", "11", "5.5"),
                forecast(day(2024, 5, 3), "19", "11", "40"),
            ],
        );
        let result = adjust_interval_for_weather(7, &wet, false, Season::Spring);
        assert_eq!(result.adjusted_interval, 10);
        assert_eq!(
            result.reason.as_deref(),
            Some("Extended due to rain forecast, high humidity")
        );
    }

    #[test]
    fn test_rain_only_counts_first_two_days() {
        let later_rain = snapshot(
            "18",
            50,
            vec![
                forecast(day(2024, 5, 1), "20", "12", "0"),
                forecast(day(2024, 5, 2), "19", "11", "0"),
                forecast(day(2024, 5, 3), "19", "11", "40"),
            ],
        );
        let result = adjust_interval_for_weather(7, &later_rain, false, Season::Spring);
        assert_eq!(result.adjusted_interval, 7);
    }

    #[test]
    fn test_outdoor_summer_heat_shortens() {
        let hot = snapshot("37", 40, vec![]);
        let result = adjust_interval_for_weather(7, &hot, false, Season::Summer);
        assert_eq!(result.adjusted_interval, 5);
        assert_eq!(
            result.reason.as_deref(),
            Some("Shortened due to high temperature, summer heat")
        );
    }

    #[test]
    fn test_outdoor_never_below_one_day() {
        let hot = snapshot("38", 20, vec![]);
        let result = adjust_interval_for_weather(1, &hot, false, Season::Summer);
        assert_eq!(result.adjusted_interval, 1);
        assert!(result.reason.is_some());
    }

    #[test]
    fn test_outdoor_winter_extends() {
        let result = adjust_interval_for_weather(7, &mild(), false, Season::Winter);
        assert_eq!(result.adjusted_interval, 10);
        assert_eq!(result.reason.as_deref(), Some("Extended due to winter season"));
    }

    #[test]
    fn test_balanced_signals_leave_reason_empty() {
        // +1 humidity, -1 heat
        let muggy = snapshot("36", 85, vec![]);
        let result = adjust_interval_for_weather(7, &muggy, false, Season::Spring);
        assert_eq!(result.adjusted_interval, 7);
        assert!(result.reason.is_none());
    }

    #[test]
    fn test_frost_alert_critical() {
        let cold = snapshot(
            "8",
            50,
            vec![
                forecast(day(2024, 1, 10), "9", "2", "0"),
                forecast(day(2024, 1, 11), "10", "-2", "0"),
            ],
        );
        let alerts = get_weather_alerts(&cold, true);
        assert_eq!(alerts.len(), 1);
        assert_eq!(alerts[0].alert_type, WeatherAlertType::Frost);
        assert_eq!(alerts[0].severity, AlertSeverity::Critical);
    }

    #[test]
    fn test_frost_alert_warning() {
        let chilly = snapshot(
            "8",
            50,
            vec![
                forecast(day(2024, 1, 10), "9", "6", "0"),
                forecast(day(2024, 1, 11), "10", "3", "0"),
            ],
        );
        let alerts = get_weather_alerts(&chilly, false);
        assert_eq!(alerts.len(), 1);
        assert_eq!(alerts[0].severity, AlertSeverity::Warning);
    }

    #[test]
    fn test_heatwave_thresholds() {
        let hot = snapshot(
            "30",
            50,
            vec![
                forecast(day(2024, 7, 10), "33", "20", "0"),
                forecast(day(2024, 7, 11), "38", "22", "0"),
            ],
        );
        let alerts = get_weather_alerts(&hot, true);
        assert_eq!(alerts.len(), 1);
        assert_eq!(alerts[0].alert_type, WeatherAlertType::Heatwave);
        assert_eq!(alerts[0].severity, AlertSeverity::Warning);

        let extreme = snapshot(
            "30",
            50,
            vec![
                forecast(day(2024, 7, 10), "33", "20", "0"),
                forecast(day(2024, 7, 11), "41", "22", "0"),
            ],
        );
        let alerts = get_weather_alerts(&extreme, true);
        assert_eq!(alerts[0].severity, AlertSeverity::Critical);
    }

    #[test]
    fn test_heavy_rain_needs_outdoor_plants() {
        let stormy = snapshot(
            "20",
            60,
            vec![
                forecast(day(2024, 9, 1), "22", "15", "0"),
                forecast(day(2024, 9, 2), "21", "15", "55"),
            ],
        );
        assert!(get_weather_alerts(&stormy, false).is_empty());

        let alerts = get_weather_alerts(&stormy, true);
        assert_eq!(alerts.len(), 1);
        assert_eq!(alerts[0].alert_type, WeatherAlertType::HeavyRain);
        assert_eq!(alerts[0].severity, AlertSeverity::Critical);
    }

    #[test]
    fn test_low_humidity_independent_of_outdoor_flag() {
        let dry = snapshot("22", 25, vec![]);
        let alerts = get_weather_alerts(&dry, false);
        assert_eq!(alerts.len(), 1);
        assert_eq!(alerts[0].alert_type, WeatherAlertType::LowHumidity);
        assert_eq!(alerts[0].severity, AlertSeverity::Warning);
    }

    #[test]
    fn test_alerts_stack() {
        let wild = snapshot(
            "20",
            20,
            vec![
                forecast(day(2024, 3, 1), "22", "15", "0"),
                // Nonsensical but possible from a provider: every check fires
                forecast(day(2024, 3, 2), "41", "-1", "60"),
            ],
        );
        assert_eq!(get_weather_alerts(&wild, true).len(), 4);
    }

    #[test]
    fn test_alerts_without_forecast() {
        let bare = snapshot("20", 50, vec![]);
        assert!(get_weather_alerts(&bare, true).is_empty());
    }

    #[test]
    fn test_describe_weather_code() {
        assert_eq!(describe_weather_code(0).0, "Clear sky");
        assert_eq!(describe_weather_code(63).0, "Rain");
        assert_eq!(describe_weather_code(81).0, "Rain showers");
        assert_eq!(describe_weather_code(1234).0, "Unknown");
    }
}
