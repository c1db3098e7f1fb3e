//! HTTP handlers for care type metadata and interval suggestions

use axum::{extract::Path, Json};
use serde::{Deserialize, Serialize};
use shared::{format_interval, get_suggested_intervals, suggest_interval_from_species, CareType};
use validator::Validate;

use crate::error::AppResult;

/// A preset interval with its display label
#[derive(Debug, Serialize)]
pub struct IntervalOption {
    pub days: u32,
    pub label: String,
}

fn interval_options(days: &[u32]) -> Vec<IntervalOption> {
    days.iter()
        .map(|&d| IntervalOption {
            days: d,
            label: format_interval(d),
        })
        .collect()
}

/// Care type with display metadata and presets
#[derive(Debug, Serialize)]
pub struct CareTypeResponse {
    pub care_type: CareType,
    pub emoji: &'static str,
    pub label: &'static str,
    pub suggested_intervals: Vec<IntervalOption>,
}

/// List all care types
pub async fn list_care_types() -> Json<Vec<CareTypeResponse>> {
    let types = CareType::ALL
        .into_iter()
        .map(|care_type| {
            let info = care_type.info();
            CareTypeResponse {
                care_type,
                emoji: info.emoji,
                label: info.label,
                suggested_intervals: interval_options(care_type.suggested_intervals()),
            }
        })
        .collect();
    Json(types)
}

/// Preset intervals for a care type; unknown names get the generic presets
pub async fn get_care_type_intervals(Path(care_type): Path<String>) -> Json<Vec<IntervalOption>> {
    Json(interval_options(get_suggested_intervals(&care_type)))
}

/// Input for suggesting an interval from care notes
#[derive(Debug, Deserialize, Validate)]
pub struct SuggestIntervalInput {
    #[validate(length(max = 1000, message = "Care frequency text must be at most 1000 characters"))]
    pub care_frequency: String,
}

#[derive(Debug, Serialize)]
pub struct SuggestIntervalResponse {
    pub interval_days: u32,
    pub label: String,
}

/// Suggest a watering interval from free-text species care notes
pub async fn suggest_interval(
    Json(input): Json<SuggestIntervalInput>,
) -> AppResult<Json<SuggestIntervalResponse>> {
    input.validate()?;

    let interval_days = suggest_interval_from_species(&input.care_frequency);
    Ok(Json(SuggestIntervalResponse {
        interval_days,
        label: format_interval(interval_days),
    }))
}
