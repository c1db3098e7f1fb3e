//! HTTP handlers for care schedule management endpoints

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use serde::Deserialize;
use shared::{validate_care_type, CareType};
use uuid::Uuid;

use crate::error::{AppError, AppResult};
use crate::services::schedule::{
    local_now, CareLogResult, EnableReminderInput, LogCareInput, ScheduleService, ScheduleView,
    UpdateIntervalInput,
};
use crate::AppState;

fn service(state: &AppState) -> ScheduleService {
    ScheduleService::new(state.schedules.clone(), state.config.reminders.clone())
}

fn parse_care_type(raw: &str) -> AppResult<CareType> {
    validate_care_type(raw).map_err(|msg| AppError::field("care_type", msg))
}

/// Optional override of "today" for status computation
#[derive(Debug, Deserialize)]
pub struct TodayQuery {
    pub today: Option<NaiveDate>,
}

impl TodayQuery {
    fn now(&self) -> NaiveDateTime {
        self.today
            .map(|d| d.and_time(NaiveTime::MIN))
            .unwrap_or_else(|| local_now().naive_local())
    }
}

/// List schedules for a plant
pub async fn list_plant_schedules(
    State(state): State<AppState>,
    Path(plant_id): Path<Uuid>,
    Query(query): Query<TodayQuery>,
) -> Json<Vec<ScheduleView>> {
    Json(service(&state).list_for_plant(plant_id, query.now()).await)
}

/// Enable a reminder for a plant
pub async fn enable_reminder(
    State(state): State<AppState>,
    Path(plant_id): Path<Uuid>,
    Json(input): Json<EnableReminderInput>,
) -> AppResult<(StatusCode, Json<ScheduleView>)> {
    let view = service(&state).enable(plant_id, input, local_now()).await?;
    Ok((StatusCode::CREATED, Json(view)))
}

/// Change a reminder's interval
pub async fn update_reminder_interval(
    State(state): State<AppState>,
    Path((plant_id, care_type)): Path<(Uuid, String)>,
    Json(input): Json<UpdateIntervalInput>,
) -> AppResult<Json<ScheduleView>> {
    let care_type = parse_care_type(&care_type)?;
    let view = service(&state)
        .update_interval(plant_id, care_type, input, local_now().naive_local())
        .await?;
    Ok(Json(view))
}

/// Disable a reminder
pub async fn disable_reminder(
    State(state): State<AppState>,
    Path((plant_id, care_type)): Path<(Uuid, String)>,
) -> AppResult<Json<ScheduleView>> {
    let care_type = parse_care_type(&care_type)?;
    let view = service(&state)
        .disable(plant_id, care_type, local_now().naive_local())
        .await?;
    Ok(Json(view))
}

/// Delete a reminder
pub async fn delete_reminder(
    State(state): State<AppState>,
    Path((plant_id, care_type)): Path<(Uuid, String)>,
) -> AppResult<StatusCode> {
    let care_type = parse_care_type(&care_type)?;
    service(&state).delete(plant_id, care_type).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Log a care activity for a plant
pub async fn log_care(
    State(state): State<AppState>,
    Path(plant_id): Path<Uuid>,
    Json(input): Json<LogCareInput>,
) -> AppResult<(StatusCode, Json<CareLogResult>)> {
    let result = service(&state).log_care(plant_id, input, local_now()).await?;
    Ok((StatusCode::CREATED, Json(result)))
}

/// Query parameters for the due reminders listing
#[derive(Debug, Deserialize)]
pub struct DueQuery {
    pub within_days: Option<u32>,
    pub today: Option<NaiveDate>,
}

/// List reminders due soon across all plants
pub async fn list_due_reminders(
    State(state): State<AppState>,
    Query(query): Query<DueQuery>,
) -> AppResult<Json<Vec<ScheduleView>>> {
    if matches!(query.within_days, Some(days) if days > 365) {
        return Err(AppError::field("within_days", "Look-ahead must be at most 365 days"));
    }

    let now = TodayQuery { today: query.today }.now();
    Ok(Json(service(&state).due(query.within_days, now).await))
}
