//! Rutas de alertas de vencimiento y catálogo de documentos

use axum::{extract::State, routing::get, Json, Router};

use crate::controllers::alert_controller::AlertController;
use crate::dto::document_dto::DocumentTypeEntry;
use crate::models::ExpiryAlert;
use crate::services::expiry_service::DocumentStats;
use crate::state::AppState;
use crate::utils::errors::AppError;

pub fn create_alert_router() -> Router<AppState> {
    Router::new()
        .route("/document-expiry-alerts", get(expiry_alerts))
        .route("/document-types", get(document_types))
        .route("/dashboard/document-stats", get(document_stats))
}

async fn expiry_alerts(
    State(state): State<AppState>,
) -> Result<Json<Vec<ExpiryAlert>>, AppError> {
    let controller = AlertController::new(state);
    controller.expiry_alerts().await
}

async fn document_types(State(state): State<AppState>) -> Json<Vec<DocumentTypeEntry>> {
    let controller = AlertController::new(state);
    controller.document_types().await
}

async fn document_stats(State(state): State<AppState>) -> Result<Json<DocumentStats>, AppError> {
    let controller = AlertController::new(state);
    controller.document_stats().await
}
