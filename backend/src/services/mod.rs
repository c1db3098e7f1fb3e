//! Business logic services for the Plant Care platform

pub mod schedule;
pub mod weather;

pub use schedule::ScheduleService;
pub use weather::WeatherService;
