//! Shared types and models for the Plant Care platform
//!
//! This crate contains the reminder scheduling core shared between the
//! backend, the browser (via WASM), and any other component that needs to
//! compute due dates, reminder status, or weather-adjusted intervals.

pub mod models;
pub mod validation;

pub use models::*;
pub use validation::*;
