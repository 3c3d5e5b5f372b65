//! Controller de alertas de vencimiento y catálogo de documentos

use axum::Json;
use chrono::Utc;

use crate::dto::document_dto::DocumentTypeEntry;
use crate::models::{ExpiryAlert, VEHICLE_DOCUMENT_TYPES};
use crate::services::expiry_service::{self, DocumentStats};
use crate::state::AppState;
use crate::utils::errors::AppResult;

pub struct AlertController {
    state: AppState,
}

impl AlertController {
    pub fn new(state: AppState) -> Self {
        Self { state }
    }

    /// Escaneo de vencimientos sobre todos los documentos de la flota.
    pub async fn expiry_alerts(&self) -> AppResult<Json<Vec<ExpiryAlert>>> {
        let vehicles = self.state.store.vehicles().await?;
        let drivers = self.state.store.drivers().await?;
        let alerts = expiry_service::scan(&vehicles, &drivers, Utc::now().date_naive());
        Ok(Json(alerts))
    }

    pub async fn document_types(&self) -> Json<Vec<DocumentTypeEntry>> {
        Json(
            VEHICLE_DOCUMENT_TYPES
                .iter()
                .map(|&(value, label)| DocumentTypeEntry { value, label })
                .collect(),
        )
    }

    pub async fn document_stats(&self) -> AppResult<Json<DocumentStats>> {
        let vehicles = self.state.store.vehicles().await?;
        let stats = expiry_service::document_stats(&vehicles, Utc::now().date_naive());
        Ok(Json(stats))
    }
}
