//! Plant Care - reminder engine and HTTP API
//!
//! Tracks per-plant care schedules, classifies due dates into reminder
//! statuses and adapts watering intervals to local weather.

use axum::{routing::get, Router};
use shared::ScheduleBook;
use std::sync::Arc;
use tokio::sync::RwLock;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

pub mod config;
pub mod error;
pub mod external;
pub mod handlers;
pub mod routes;
pub mod services;

pub use config::Config;
pub use error::{AppError, AppResult};
pub use external::WeatherClient;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub schedules: Arc<RwLock<ScheduleBook>>,
    pub weather_client: WeatherClient,
}

impl AppState {
    /// Build state with an empty schedule book
    pub fn new(config: Config) -> AppResult<Self> {
        let weather_client = WeatherClient::new(&config.weather)?;
        Ok(Self {
            config: Arc::new(config),
            schedules: Arc::new(RwLock::new(ScheduleBook::new())),
            weather_client,
        })
    }
}

/// Create the application router with all routes and middleware
pub fn create_app(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/", get(root))
        .route("/health", get(handlers::health_check))
        .nest("/api/v1", routes::api_routes())
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

/// Root endpoint
async fn root() -> &'static str {
    "Plant Care API v1"
}
