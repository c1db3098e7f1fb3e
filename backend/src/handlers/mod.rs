//! HTTP handlers for the Plant Care API

mod care_types;
mod health;
mod reminders;
mod schedules;
mod weather;

pub use care_types::*;
pub use health::*;
pub use reminders::*;
pub use schedules::*;
pub use weather::*;
