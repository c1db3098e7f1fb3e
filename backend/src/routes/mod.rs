//! Route definitions for the Plant Care API

use axum::{
    routing::{get, post, put},
    Router,
};

use crate::{handlers, AppState};

/// Create API routes
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(handlers::health_check))
        .nest("/care-types", care_type_routes())
        .route("/intervals/suggest", post(handlers::suggest_interval))
        .nest("/reminders", reminder_routes())
        .nest("/plants", plant_routes())
        .route("/schedules/due", get(handlers::list_due_reminders))
        .nest("/weather", weather_routes())
}

/// Care type metadata routes
fn care_type_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(handlers::list_care_types))
        .route("/:care_type/intervals", get(handlers::get_care_type_intervals))
}

/// Stateless reminder calculations
fn reminder_routes() -> Router<AppState> {
    Router::new()
        .route("/next-due", post(handlers::next_due_date))
        .route("/status", post(handlers::reminder_status))
}

/// Per-plant schedule and care log routes
fn plant_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/:plant_id/schedules",
            get(handlers::list_plant_schedules).post(handlers::enable_reminder),
        )
        .route(
            "/:plant_id/schedules/:care_type",
            put(handlers::update_reminder_interval).delete(handlers::delete_reminder),
        )
        .route(
            "/:plant_id/schedules/:care_type/disable",
            post(handlers::disable_reminder),
        )
        .route("/:plant_id/care-logs", post(handlers::log_care))
}

/// Weather-driven care routes
fn weather_routes() -> Router<AppState> {
    Router::new()
        .route("/adjust", post(handlers::adjust_interval))
        .route("/alerts", post(handlers::weather_alerts))
        .route("/season", get(handlers::current_season))
        .route("/forecast", get(handlers::get_weather_forecast))
        .route("/care-advice", get(handlers::get_care_advice))
}
