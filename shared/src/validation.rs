//! Validation utilities for the Plant Care platform
//!
//! The scheduling core assumes validated input; these checks run at the
//! boundaries (HTTP handlers, WASM bindings) before values reach it.

use rust_decimal::Decimal;

use crate::models::CareType;

/// Shortest allowed reminder interval
pub const MIN_INTERVAL_DAYS: u32 = 1;

/// Longest allowed reminder interval
pub const MAX_INTERVAL_DAYS: u32 = 365;

// ============================================================================
// Schedule Validations
// ============================================================================

/// Validate a reminder interval (1-365 days)
pub fn validate_interval_days(days: u32) -> Result<(), &'static str> {
    if !(MIN_INTERVAL_DAYS..=MAX_INTERVAL_DAYS).contains(&days) {
        return Err("Interval must be between 1 and 365 days");
    }
    Ok(())
}

/// Validate and parse a care type name
pub fn validate_care_type(name: &str) -> Result<CareType, &'static str> {
    name.parse::<CareType>().map_err(|_| "Unknown care type")
}

// ============================================================================
// Location and Weather Validations
// ============================================================================

/// Validate latitude is within -90..=90
pub fn validate_latitude(latitude: Decimal) -> Result<(), &'static str> {
    if latitude < Decimal::from(-90) || latitude > Decimal::from(90) {
        return Err("Latitude must be between -90 and 90");
    }
    Ok(())
}

/// Validate longitude is within -180..=180
pub fn validate_longitude(longitude: Decimal) -> Result<(), &'static str> {
    if longitude < Decimal::from(-180) || longitude > Decimal::from(180) {
        return Err("Longitude must be between -180 and 180");
    }
    Ok(())
}

/// Validate relative humidity is a percentage
pub fn validate_humidity(humidity_percent: i32) -> Result<(), &'static str> {
    if !(0..=100).contains(&humidity_percent) {
        return Err("Humidity must be between 0 and 100%");
    }
    Ok(())
}
