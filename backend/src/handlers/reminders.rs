//! HTTP handlers for stateless reminder calculations

use axum::Json;
use chrono::{DateTime, FixedOffset, NaiveDate};
use serde::{Deserialize, Serialize};
use shared::{calculate_next_due_date, get_reminder_status_at, ReminderStatusInfo};
use validator::Validate;

use crate::error::AppResult;
use crate::services::schedule::local_now;

/// Input for computing a next due date
#[derive(Debug, Deserialize, Validate)]
pub struct NextDueInput {
    pub cared_at: DateTime<FixedOffset>,
    #[validate(range(min = 1, max = 365, message = "Interval must be between 1 and 365 days"))]
    pub interval_days: u32,
}

#[derive(Debug, Serialize)]
pub struct NextDueResponse {
    pub next_due_date: NaiveDate,
}

/// Compute the next due day after a care event
pub async fn next_due_date(Json(input): Json<NextDueInput>) -> AppResult<Json<NextDueResponse>> {
    input.validate()?;

    Ok(Json(NextDueResponse {
        next_due_date: calculate_next_due_date(input.cared_at.naive_local(), input.interval_days),
    }))
}

/// Input for classifying a due date
#[derive(Debug, Deserialize)]
pub struct ReminderStatusInput {
    pub next_due_date: NaiveDate,
    /// Defaults to the server's local date
    pub today: Option<NaiveDate>,
}

/// Classify a due date into a reminder status
pub async fn reminder_status(Json(input): Json<ReminderStatusInput>) -> Json<ReminderStatusInfo> {
    let now = input
        .today
        .map(|d| d.and_time(chrono::NaiveTime::MIN))
        .unwrap_or_else(|| local_now().naive_local());

    Json(get_reminder_status_at(input.next_due_date, now))
}
