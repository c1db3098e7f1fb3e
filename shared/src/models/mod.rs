//! Domain models for the Plant Care platform

mod care;
mod reminder;
mod schedule;
mod species;
mod weather;

pub use care::*;
pub use reminder::*;
pub use schedule::*;
pub use species::*;
pub use weather::*;
