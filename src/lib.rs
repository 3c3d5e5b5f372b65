//! DriveNow Rentals - backend de gestión de flota y alquileres
//!
//! API REST para administrar vehículos, conductores, solicitudes de alquiler
//! y los documentos con vencimiento de cada uno.

pub mod config;
pub mod controllers;
pub mod database;
pub mod dto;
pub mod middleware;
pub mod models;
pub mod repositories;
pub mod routes;
pub mod services;
pub mod state;
pub mod utils;

use axum::{extract::DefaultBodyLimit, response::Json, routing::get, Router};
use serde_json::json;
use tower_http::compression::CompressionLayer;
use tower_http::trace::TraceLayer;

use crate::middleware::cors::create_cors_layer;
use crate::state::AppState;

/// Tope del body completo de una request; las solicitudes de alquiler
/// llegan como multipart con varias fotos de hasta 5MB cada una.
const MAX_REQUEST_BODY_BYTES: usize = 50 * 1024 * 1024;

/// Arma el router completo de la aplicación.
pub fn build_router(state: AppState) -> Router {
    let api = Router::new()
        .merge(routes::create_vehicle_router())
        .merge(routes::create_driver_router())
        .merge(routes::create_rental_router())
        .merge(routes::create_alert_router())
        .merge(routes::create_auth_router());

    Router::new()
        .route("/health", get(health))
        .nest("/api", api)
        .layer(DefaultBodyLimit::max(MAX_REQUEST_BODY_BYTES))
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .layer(create_cors_layer())
        .with_state(state)
}

/// Health check simple
async fn health() -> Json<serde_json::Value> {
    Json(json!({
        "status": "ok",
        "timestamp": chrono::Utc::now().to_rfc3339(),
    }))
}
