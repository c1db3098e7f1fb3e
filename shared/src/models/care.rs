//! Care activity types and interval presets

use serde::{Deserialize, Serialize};
use std::str::FromStr;
use thiserror::Error;

/// Kinds of recurring plant care
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CareType {
    Watering,
    Fertilizing,
    Repotting,
    Pruning,
    PestTreatment,
    Other,
}

impl CareType {
    /// All care types in display order
    pub const ALL: [CareType; 6] = [
        CareType::Watering,
        CareType::Fertilizing,
        CareType::Repotting,
        CareType::Pruning,
        CareType::PestTreatment,
        CareType::Other,
    ];

    /// Wire name, e.g. `PEST_TREATMENT`
    pub fn as_str(&self) -> &'static str {
        match self {
            CareType::Watering => "WATERING",
            CareType::Fertilizing => "FERTILIZING",
            CareType::Repotting => "REPOTTING",
            CareType::Pruning => "PRUNING",
            CareType::PestTreatment => "PEST_TREATMENT",
            CareType::Other => "OTHER",
        }
    }

    /// Display metadata for this care type
    pub fn info(&self) -> CareTypeInfo {
        care_type_info(*self)
    }

    /// Preset intervals offered when setting up a reminder
    pub fn suggested_intervals(&self) -> &'static [u32] {
        match self {
            CareType::Watering => &[3, 7, 10, 14, 21],
            CareType::Fertilizing => &[14, 21, 30, 42, 60],
            CareType::Repotting => &[180, 365],
            CareType::Pruning => &[30, 60, 90, 180],
            CareType::PestTreatment => &[14, 30, 60],
            CareType::Other => &FALLBACK_INTERVALS,
        }
    }
}

impl std::fmt::Display for CareType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Error returned when a string names no known care type
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("Unknown care type: {0}")]
pub struct ParseCareTypeError(pub String);

impl FromStr for CareType {
    type Err = ParseCareTypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_uppercase().replace(['-', ' '], "_");
        CareType::ALL
            .into_iter()
            .find(|care_type| care_type.as_str() == normalized)
            .ok_or_else(|| ParseCareTypeError(s.to_string()))
    }
}

/// Emoji and human label for a care type
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
pub struct CareTypeInfo {
    pub emoji: &'static str,
    pub label: &'static str,
}

/// Intervals offered for types without their own presets
const FALLBACK_INTERVALS: [u32; 3] = [7, 14, 30];

/// Look up display metadata for a care type
pub fn care_type_info(care_type: CareType) -> CareTypeInfo {
    match care_type {
        CareType::Watering => CareTypeInfo { emoji: "💧", label: "Watering" },
        CareType::Fertilizing => CareTypeInfo { emoji: "🌱", label: "Fertilizing" },
        CareType::Repotting => CareTypeInfo { emoji: "🪴", label: "Repotting" },
        CareType::Pruning => CareTypeInfo { emoji: "✂️", label: "Pruning" },
        CareType::PestTreatment => CareTypeInfo { emoji: "🐛", label: "Pest Treatment" },
        CareType::Other => CareTypeInfo { emoji: "📝", label: "Other" },
    }
}

/// Preset intervals for a care type given by name.
///
/// Names that do not parse fall back to 7/14/30 days, the same presets
/// `OTHER` uses.
pub fn get_suggested_intervals(care_type: &str) -> &'static [u32] {
    care_type
        .parse::<CareType>()
        .map(|t| t.suggested_intervals())
        .unwrap_or(&FALLBACK_INTERVALS)
}

/// Human-readable description of an interval in days
pub fn format_interval(days: u32) -> String {
    match days {
        1 => "Daily".to_string(),
        7 => "Weekly".to_string(),
        14 => "Every 2 weeks".to_string(),
        21 => "Every 3 weeks".to_string(),
        30 => "Monthly".to_string(),
        n => format!("Every {} days", n),
    }
}
