//! Due-date calculation and reminder status classification

use chrono::{Days, Local, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

/// Urgency bucket for a reminder.
///
/// Variants are declared most urgent first so the derived ordering sorts
/// overdue reminders to the top.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "kebab-case")]
pub enum ReminderStatus {
    Overdue,
    DueToday,
    DueSoon,
    Upcoming,
}

impl ReminderStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ReminderStatus::Overdue => "overdue",
            ReminderStatus::DueToday => "due-today",
            ReminderStatus::DueSoon => "due-soon",
            ReminderStatus::Upcoming => "upcoming",
        }
    }
}

impl std::fmt::Display for ReminderStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Display status of a reminder, computed fresh on every read
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ReminderStatusInfo {
    pub status: ReminderStatus,
    /// Negative when overdue
    pub days_until_due: i64,
    pub label: String,
}

/// Last day (inclusive) that still counts as "due soon"
pub const DUE_SOON_DAYS: i64 = 2;

/// Next due day after care on `care_date`.
///
/// The time of day is discarded: the result is the calendar day
/// `interval_days` after the care day. Callers validate the interval
/// (1-365) beforehand.
pub fn calculate_next_due_date(care_date: NaiveDateTime, interval_days: u32) -> NaiveDate {
    let care_day = care_date.date();
    care_day
        .checked_add_days(Days::new(u64::from(interval_days)))
        .unwrap_or(NaiveDate::MAX)
}

/// Status of a reminder relative to the current local time
pub fn get_reminder_status(next_due_date: NaiveDate) -> ReminderStatusInfo {
    get_reminder_status_at(next_due_date, Local::now().naive_local())
}

/// Status of a reminder relative to `now`; only the calendar day of `now`
/// is considered.
pub fn get_reminder_status_at(next_due_date: NaiveDate, now: NaiveDateTime) -> ReminderStatusInfo {
    let diff_days = (next_due_date - now.date()).num_days();
    classify_days_until_due(diff_days)
}

/// Bucket a signed day difference into a reminder status
pub fn classify_days_until_due(diff_days: i64) -> ReminderStatusInfo {
    let (status, label) = match diff_days {
        d if d < 0 => {
            let overdue = -d;
            let label = if overdue == 1 {
                "1 day overdue".to_string()
            } else {
                format!("{} days overdue", overdue)
            };
            (ReminderStatus::Overdue, label)
        }
        0 => (ReminderStatus::DueToday, "Due today".to_string()),
        1 => (ReminderStatus::DueSoon, "Due tomorrow".to_string()),
        d if d <= DUE_SOON_DAYS => (ReminderStatus::DueSoon, format!("Due in {} days", d)),
        d => (ReminderStatus::Upcoming, format!("Due in {} days", d)),
    };

    ReminderStatusInfo {
        status,
        days_until_due: diff_days,
        label,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(y: i32, m: u32, d: u32, h: u32, min: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_opt(h, min, 0)
            .unwrap()
    }

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_next_due_discards_time_of_day() {
        let due = calculate_next_due_date(at(2024, 3, 10, 18, 45), 3);
        assert_eq!(due, day(2024, 3, 13));
        assert_eq!(
            due.and_hms_opt(0, 0, 0).unwrap(),
            at(2024, 3, 13, 0, 0)
        );
    }

    #[test]
    fn test_next_due_crosses_month_boundary() {
        assert_eq!(calculate_next_due_date(at(2024, 1, 28, 9, 0), 7), day(2024, 2, 4));
    }

    #[test]
    fn test_next_due_crosses_year_boundary() {
        assert_eq!(calculate_next_due_date(at(2024, 12, 28, 9, 0), 7), day(2025, 1, 4));
    }

    #[test]
    fn test_next_due_handles_leap_day() {
        assert_eq!(calculate_next_due_date(at(2024, 2, 28, 23, 59), 1), day(2024, 2, 29));
        assert_eq!(calculate_next_due_date(at(2023, 2, 28, 0, 0), 1), day(2023, 3, 1));
    }

    #[test]
    fn test_status_boundaries() {
        let now = at(2024, 6, 15, 14, 30);

        let s = get_reminder_status_at(day(2024, 6, 14), now);
        assert_eq!(s.status, ReminderStatus::Overdue);
        assert_eq!(s.label, "1 day overdue");
        assert_eq!(s.days_until_due, -1);

        let s = get_reminder_status_at(day(2024, 6, 15), now);
        assert_eq!(s.status, ReminderStatus::DueToday);
        assert_eq!(s.label, "Due today");

        let s = get_reminder_status_at(day(2024, 6, 16), now);
        assert_eq!(s.status, ReminderStatus::DueSoon);
        assert_eq!(s.label, "Due tomorrow");

        let s = get_reminder_status_at(day(2024, 6, 17), now);
        assert_eq!(s.status, ReminderStatus::DueSoon);
        assert_eq!(s.label, "Due in 2 days");

        let s = get_reminder_status_at(day(2024, 6, 18), now);
        assert_eq!(s.status, ReminderStatus::Upcoming);
        assert_eq!(s.label, "Due in 3 days");
    }

    #[test]
    fn test_status_plural_overdue() {
        let s = get_reminder_status_at(day(2024, 6, 10), at(2024, 6, 15, 0, 0));
        assert_eq!(s.label, "5 days overdue");
        assert_eq!(s.days_until_due, -5);
    }

    #[test]
    fn test_status_ignores_time_of_day() {
        // Just before midnight still counts as the same day
        let s = get_reminder_status_at(day(2024, 6, 16), at(2024, 6, 15, 23, 59));
        assert_eq!(s.status, ReminderStatus::DueSoon);
        assert_eq!(s.days_until_due, 1);
    }

    #[test]
    fn test_status_ordering_by_urgency() {
        assert!(ReminderStatus::Overdue < ReminderStatus::DueToday);
        assert!(ReminderStatus::DueToday < ReminderStatus::DueSoon);
        assert!(ReminderStatus::DueSoon < ReminderStatus::Upcoming);
    }

    #[test]
    fn test_status_serializes_kebab_case() {
        let json = serde_json::to_string(&ReminderStatus::DueToday).unwrap();
        assert_eq!(json, "\"due-today\"");
    }
}
