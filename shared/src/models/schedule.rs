//! Care schedule records and their lifecycle

use chrono::{DateTime, Days, FixedOffset, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::collections::hash_map::Entry;
use std::collections::HashMap;
use thiserror::Error;
use uuid::Uuid;

use super::care::CareType;
use super::reminder::{calculate_next_due_date, get_reminder_status_at, ReminderStatusInfo};
use crate::validation::validate_interval_days;

/// A recurring care obligation for one plant and one care type
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CareScheduleRecord {
    pub id: Uuid,
    pub plant_id: Uuid,
    pub care_type: CareType,
    pub interval_days: u32,
    pub next_due_date: NaiveDate,
    pub last_cared_at: Option<DateTime<FixedOffset>>,
    pub enabled: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl CareScheduleRecord {
    /// Create an enabled schedule. The first due date counts from the last
    /// care when known, otherwise from `now`.
    pub fn new(
        plant_id: Uuid,
        care_type: CareType,
        interval_days: u32,
        last_cared_at: Option<DateTime<FixedOffset>>,
        now: DateTime<FixedOffset>,
    ) -> Self {
        let anchor = last_cared_at.unwrap_or(now);
        let timestamp = now.with_timezone(&Utc);
        Self {
            id: Uuid::new_v4(),
            plant_id,
            care_type,
            interval_days,
            next_due_date: calculate_next_due_date(anchor.naive_local(), interval_days),
            last_cared_at,
            enabled: true,
            created_at: timestamp,
            updated_at: timestamp,
        }
    }

    /// Record care performed at `cared_at`.
    ///
    /// Returns false and leaves the record untouched when the log predates
    /// the last recorded care.
    pub fn record_care(&mut self, cared_at: DateTime<FixedOffset>) -> bool {
        if matches!(self.last_cared_at, Some(last) if cared_at < last) {
            return false;
        }

        self.last_cared_at = Some(cared_at);
        self.next_due_date = calculate_next_due_date(cared_at.naive_local(), self.interval_days);
        self.touch();
        true
    }

    /// Change the interval and recompute the next due date.
    pub fn set_interval(&mut self, interval_days: u32) -> Result<(), ScheduleError> {
        validate_interval_days(interval_days).map_err(|_| ScheduleError::InvalidInterval(interval_days))?;

        self.next_due_date = match self.last_cared_at {
            Some(last) => calculate_next_due_date(last.naive_local(), interval_days),
            None => shift_days(
                self.next_due_date,
                i64::from(interval_days) - i64::from(self.interval_days),
            ),
        };
        self.interval_days = interval_days;
        self.touch();
        Ok(())
    }

    /// Display status relative to `now`
    pub fn status_at(&self, now: DateTime<FixedOffset>) -> ReminderStatusInfo {
        get_reminder_status_at(self.next_due_date, now.naive_local())
    }

    fn touch(&mut self) {
        self.updated_at = Utc::now();
    }
}

fn shift_days(date: NaiveDate, delta: i64) -> NaiveDate {
    let days = Days::new(delta.unsigned_abs());
    let shifted = if delta >= 0 {
        date.checked_add_days(days)
    } else {
        date.checked_sub_days(days)
    };
    shifted.unwrap_or(date)
}

/// A single logged care activity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CareLog {
    pub plant_id: Uuid,
    pub care_type: CareType,
    pub cared_at: DateTime<FixedOffset>,
    pub notes: Option<String>,
}

/// What a care log did to its schedule
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum CareOutcome {
    /// No schedule existed; one was created from the log
    Created,
    /// The next due date moved forward
    Advanced,
    /// The log predates the last recorded care and was not applied
    Stale,
}

/// Errors raised by schedule lifecycle operations
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ScheduleError {
    #[error("Interval must be between 1 and 365 days, got {0}")]
    InvalidInterval(u32),

    #[error("A {care_type} reminder already exists for plant {plant_id}")]
    Duplicate { plant_id: Uuid, care_type: CareType },

    #[error("No {care_type} reminder for plant {plant_id}")]
    NotFound { plant_id: Uuid, care_type: CareType },
}

/// All care schedules, at most one per (plant, care type)
#[derive(Debug, Clone, Default)]
pub struct ScheduleBook {
    records: HashMap<(Uuid, CareType), CareScheduleRecord>,
}

impl ScheduleBook {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn get(&self, plant_id: Uuid, care_type: CareType) -> Option<&CareScheduleRecord> {
        self.records.get(&(plant_id, care_type))
    }

    /// All schedules for a plant, in care type order
    pub fn for_plant(&self, plant_id: Uuid) -> Vec<&CareScheduleRecord> {
        let mut records: Vec<_> = self
            .records
            .values()
            .filter(|r| r.plant_id == plant_id)
            .collect();
        records.sort_by_key(|r| r.care_type);
        records
    }

    /// Enable a reminder.
    ///
    /// A disabled schedule for the same pair is switched back on with the new
    /// interval; an enabled one is a duplicate.
    pub fn enable_reminder(
        &mut self,
        plant_id: Uuid,
        care_type: CareType,
        interval_days: u32,
        now: DateTime<FixedOffset>,
    ) -> Result<&CareScheduleRecord, ScheduleError> {
        validate_interval_days(interval_days).map_err(|_| ScheduleError::InvalidInterval(interval_days))?;

        match self.records.entry((plant_id, care_type)) {
            Entry::Occupied(entry) => {
                let existing = entry.into_mut();
                if existing.enabled {
                    return Err(ScheduleError::Duplicate { plant_id, care_type });
                }
                let last = existing.last_cared_at;
                *existing = CareScheduleRecord {
                    id: existing.id,
                    created_at: existing.created_at,
                    ..CareScheduleRecord::new(plant_id, care_type, interval_days, last, now)
                };
                Ok(&*existing)
            }
            Entry::Vacant(entry) => Ok(&*entry.insert(CareScheduleRecord::new(
                plant_id,
                care_type,
                interval_days,
                None,
                now,
            ))),
        }
    }

    /// Apply a care log to the matching schedule.
    ///
    /// The first watering log for a plant without a watering schedule creates
    /// one with `default_interval_days`. Other care types without a schedule
    /// are not tracked and yield `None`. A log older than the last recorded
    /// care leaves the schedule untouched and reports [`CareOutcome::Stale`].
    pub fn record_care(
        &mut self,
        log: &CareLog,
        default_interval_days: u32,
    ) -> Option<(CareOutcome, &CareScheduleRecord)> {
        match self.records.entry((log.plant_id, log.care_type)) {
            Entry::Occupied(entry) => {
                let record = entry.into_mut();
                let outcome = if record.record_care(log.cared_at) {
                    CareOutcome::Advanced
                } else {
                    CareOutcome::Stale
                };
                Some((outcome, &*record))
            }
            Entry::Vacant(entry) => {
                if log.care_type != CareType::Watering {
                    return None;
                }
                let record = entry.insert(CareScheduleRecord::new(
                    log.plant_id,
                    log.care_type,
                    default_interval_days,
                    Some(log.cared_at),
                    log.cared_at,
                ));
                Some((CareOutcome::Created, &*record))
            }
        }
    }

    pub fn update_interval(
        &mut self,
        plant_id: Uuid,
        care_type: CareType,
        interval_days: u32,
    ) -> Result<&CareScheduleRecord, ScheduleError> {
        let record = self
            .records
            .get_mut(&(plant_id, care_type))
            .ok_or(ScheduleError::NotFound { plant_id, care_type })?;
        record.set_interval(interval_days)?;
        Ok(&*record)
    }

    /// Turn a reminder off without forgetting its history
    pub fn disable(
        &mut self,
        plant_id: Uuid,
        care_type: CareType,
    ) -> Result<&CareScheduleRecord, ScheduleError> {
        let record = self
            .records
            .get_mut(&(plant_id, care_type))
            .ok_or(ScheduleError::NotFound { plant_id, care_type })?;
        record.enabled = false;
        record.touch();
        Ok(&*record)
    }

    pub fn remove(
        &mut self,
        plant_id: Uuid,
        care_type: CareType,
    ) -> Result<CareScheduleRecord, ScheduleError> {
        self.records
            .remove(&(plant_id, care_type))
            .ok_or(ScheduleError::NotFound { plant_id, care_type })
    }

    /// Enabled schedules due on or before `today + within_days`, most urgent
    /// first
    pub fn due_within(&self, today: NaiveDate, within_days: u32) -> Vec<&CareScheduleRecord> {
        let horizon = today
            .checked_add_days(Days::new(u64::from(within_days)))
            .unwrap_or(NaiveDate::MAX);
        let mut due: Vec<_> = self
            .records
            .values()
            .filter(|r| r.enabled && r.next_due_date <= horizon)
            .collect();
        sort_by_urgency(&mut due);
        due
    }
}

/// Sort schedules most urgent first: earliest due date, then care type.
///
/// Status buckets are a monotonic function of the due date, so this is also
/// status order for any fixed "today".
pub fn sort_by_urgency(records: &mut [&CareScheduleRecord]) {
    records.sort_by_key(|r| (r.next_due_date, r.care_type));
}
