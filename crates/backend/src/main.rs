// =============================================================================
// Surge Backend - API Server Entry Point
// =============================================================================
// Table of Contents:
// 1. Imports
// 2. Main Entry Point
// 3. Router Setup
// =============================================================================

mod config;
mod error;
mod festivals;
mod predictions;

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::Config;

// -----------------------------------------------------------------------------
// 2. Main Entry Point
// -----------------------------------------------------------------------------

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load environment variables from multiple possible locations
    if dotenvy::dotenv().is_err() {
        let _ = dotenvy::from_filename("crates/backend/.env");
    }

    // Load configuration
    let config = Config::from_env();

    // Build router
    let app = create_router();

    // Start server
    let listener = tokio::net::TcpListener::bind(&config.bind_address).await?;
    tracing::info!("Surge API Server running on http://{}", config.bind_address);

    axum::serve(listener, app).await?;

    Ok(())
}

// -----------------------------------------------------------------------------
// 3. Router Setup
// -----------------------------------------------------------------------------

fn create_router() -> Router {
    // CORS configuration (consumed by the operations dashboard)
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        // Discovery & liveness
        .route("/", get(predictions::service_info))
        .route("/health", get(predictions::health))
        // Prediction API
        .route("/api/predict/festival", post(predictions::predict_festival))
        .route("/api/predict/pollution", post(predictions::predict_pollution))
        .route("/api/predict/staff", post(predictions::forecast_staff))
        .route("/api/predict/combined", get(predictions::combined_prediction))
        // Festival calendar API
        .route("/api/festivals", get(festivals::list_festivals))
        .route("/api/festivals/window", get(festivals::festival_window))
        // Middleware
        .layer(TraceLayer::new_for_http())
        .layer(cors)
}
