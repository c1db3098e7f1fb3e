//! Schedule service for managing care reminders
//!
//! Schedules live in a process-local [`ScheduleBook`]; every response carries
//! the reminder status computed at read time.

use std::sync::Arc;

use chrono::{DateTime, FixedOffset, Local, NaiveDateTime};
use serde::{Deserialize, Serialize};
use shared::{
    format_interval, get_reminder_status_at, CareLog, CareOutcome, CareScheduleRecord, CareType,
    ReminderStatusInfo, ScheduleBook,
};
use tokio::sync::RwLock;
use uuid::Uuid;
use validator::Validate;

use crate::config::ReminderConfig;
use crate::error::AppResult;

/// Schedule service for managing care reminders
#[derive(Clone)]
pub struct ScheduleService {
    book: Arc<RwLock<ScheduleBook>>,
    config: ReminderConfig,
}

/// A schedule together with its status at read time
#[derive(Debug, Clone, Serialize)]
pub struct ScheduleView {
    #[serde(flatten)]
    pub record: CareScheduleRecord,
    pub interval_label: String,
    pub status: ReminderStatusInfo,
}

impl ScheduleView {
    fn new(record: &CareScheduleRecord, now: NaiveDateTime) -> Self {
        Self {
            record: record.clone(),
            interval_label: format_interval(record.interval_days),
            status: get_reminder_status_at(record.next_due_date, now),
        }
    }
}

/// Input for enabling a reminder
#[derive(Debug, Deserialize, Validate)]
pub struct EnableReminderInput {
    pub care_type: CareType,
    #[validate(range(min = 1, max = 365, message = "Interval must be between 1 and 365 days"))]
    pub interval_days: u32,
}

/// Input for changing a reminder interval
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateIntervalInput {
    #[validate(range(min = 1, max = 365, message = "Interval must be between 1 and 365 days"))]
    pub interval_days: u32,
}

/// Input for logging care on a plant
#[derive(Debug, Deserialize, Validate)]
pub struct LogCareInput {
    pub care_type: CareType,
    /// Defaults to the current local time
    pub cared_at: Option<DateTime<FixedOffset>>,
    #[validate(length(max = 2000, message = "Notes must be at most 2000 characters"))]
    pub notes: Option<String>,
}

/// Result of logging care
#[derive(Debug, Clone, Serialize)]
pub struct CareLogResult {
    pub log: CareLog,
    /// What the log did to its schedule; absent for untracked care types
    pub outcome: Option<CareOutcome>,
    /// The matching schedule, if the care type is tracked
    pub schedule: Option<ScheduleView>,
}

impl ScheduleService {
    /// Create a new ScheduleService instance
    pub fn new(book: Arc<RwLock<ScheduleBook>>, config: ReminderConfig) -> Self {
        Self { book, config }
    }

    /// List all schedules for a plant
    pub async fn list_for_plant(&self, plant_id: Uuid, now: NaiveDateTime) -> Vec<ScheduleView> {
        let book = self.book.read().await;
        book.for_plant(plant_id)
            .into_iter()
            .map(|r| ScheduleView::new(r, now))
            .collect()
    }

    /// Enable a reminder for a plant
    pub async fn enable(
        &self,
        plant_id: Uuid,
        input: EnableReminderInput,
        now: DateTime<FixedOffset>,
    ) -> AppResult<ScheduleView> {
        input.validate()?;

        let mut book = self.book.write().await;
        let record = book.enable_reminder(plant_id, input.care_type, input.interval_days, now)?;

        tracing::info!(
            %plant_id,
            care_type = %input.care_type,
            interval_days = input.interval_days,
            next_due = %record.next_due_date,
            "Reminder enabled"
        );

        Ok(ScheduleView::new(record, now.naive_local()))
    }

    /// Change a reminder's interval
    pub async fn update_interval(
        &self,
        plant_id: Uuid,
        care_type: CareType,
        input: UpdateIntervalInput,
        now: NaiveDateTime,
    ) -> AppResult<ScheduleView> {
        input.validate()?;

        let mut book = self.book.write().await;
        let record = book.update_interval(plant_id, care_type, input.interval_days)?;

        tracing::info!(%plant_id, %care_type, interval_days = input.interval_days, "Reminder interval updated");

        Ok(ScheduleView::new(record, now))
    }

    /// Turn a reminder off
    pub async fn disable(
        &self,
        plant_id: Uuid,
        care_type: CareType,
        now: NaiveDateTime,
    ) -> AppResult<ScheduleView> {
        let mut book = self.book.write().await;
        let record = book.disable(plant_id, care_type)?;

        tracing::info!(%plant_id, %care_type, "Reminder disabled");

        Ok(ScheduleView::new(record, now))
    }

    /// Delete a reminder permanently
    pub async fn delete(&self, plant_id: Uuid, care_type: CareType) -> AppResult<()> {
        let mut book = self.book.write().await;
        book.remove(plant_id, care_type)?;

        tracing::info!(%plant_id, %care_type, "Reminder deleted");

        Ok(())
    }

    /// Log care and advance the matching schedule
    pub async fn log_care(
        &self,
        plant_id: Uuid,
        input: LogCareInput,
        now: DateTime<FixedOffset>,
    ) -> AppResult<CareLogResult> {
        input.validate()?;

        let log = CareLog {
            plant_id,
            care_type: input.care_type,
            cared_at: input.cared_at.unwrap_or(now),
            notes: input.notes,
        };

        let mut book = self.book.write().await;
        let applied = book
            .record_care(&log, self.config.default_interval_days)
            .map(|(outcome, r)| (outcome, ScheduleView::new(r, now.naive_local())));

        match &applied {
            Some((CareOutcome::Created, view)) => tracing::info!(
                %plant_id,
                care_type = %log.care_type,
                next_due = %view.record.next_due_date,
                "Schedule created from first care log"
            ),
            Some((CareOutcome::Advanced, view)) => tracing::debug!(
                %plant_id,
                care_type = %log.care_type,
                next_due = %view.record.next_due_date,
                "Schedule advanced"
            ),
            Some((CareOutcome::Stale, view)) => tracing::warn!(
                %plant_id,
                care_type = %log.care_type,
                cared_at = %log.cared_at,
                last_cared_at = ?view.record.last_cared_at,
                "Care log predates last recorded care; schedule unchanged"
            ),
            None => tracing::debug!(%plant_id, care_type = %log.care_type, "Care logged without schedule"),
        }

        let (outcome, schedule) = match applied {
            Some((outcome, view)) => (Some(outcome), Some(view)),
            None => (None, None),
        };

        Ok(CareLogResult {
            log,
            outcome,
            schedule,
        })
    }

    /// Enabled reminders due within `within_days` (config default when
    /// omitted), most urgent first
    pub async fn due(&self, within_days: Option<u32>, now: NaiveDateTime) -> Vec<ScheduleView> {
        let within = within_days.unwrap_or(self.config.due_window_days);
        let book = self.book.read().await;
        book.due_within(now.date(), within)
            .into_iter()
            .map(|r| ScheduleView::new(r, now))
            .collect()
    }
}

/// Current local time with its UTC offset
pub fn local_now() -> DateTime<FixedOffset> {
    Local::now().fixed_offset()
}
