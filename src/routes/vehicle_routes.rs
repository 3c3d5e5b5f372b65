//! Rutas de vehículos y sus documentos

use axum::{
    extract::{Multipart, Path, State},
    http::StatusCode,
    routing::{delete, get, post, put},
    Json, Router,
};
use serde_json::Value;

use crate::controllers::document_controller::{DocumentController, DocumentOwner};
use crate::controllers::vehicle_controller::VehicleController;
use crate::dto::document_dto::{DocumentEnvelope, UpdateDocumentRequest};
use crate::dto::vehicle_dto::{CreateVehicleRequest, UpdateVehicleRequest, VehicleEnvelope};
use crate::models::{Document, Vehicle};
use crate::state::AppState;
use crate::utils::errors::AppError;

pub fn create_vehicle_router() -> Router<AppState> {
    Router::new()
        .route("/vehicles", post(create_vehicle))
        .route("/vehicles", get(list_vehicles))
        .route("/vehicles/:id", get(get_vehicle))
        .route("/vehicles/:id", put(update_vehicle))
        .route("/vehicles/:id", delete(delete_vehicle))
        .route("/vehicles/:id/documents", post(attach_document))
        .route("/vehicles/:id/documents", get(list_documents))
        .route("/vehicles/:id/documents/:doc_id", put(update_document))
        .route("/vehicles/:id/documents/:doc_id", delete(delete_document))
}

async fn create_vehicle(
    State(state): State<AppState>,
    Json(request): Json<CreateVehicleRequest>,
) -> Result<(StatusCode, Json<VehicleEnvelope>), AppError> {
    let controller = VehicleController::new(state);
    controller.create(request).await
}

async fn list_vehicles(State(state): State<AppState>) -> Result<Json<Vec<Vehicle>>, AppError> {
    let controller = VehicleController::new(state);
    controller.list().await
}

async fn get_vehicle(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<Vehicle>, AppError> {
    let controller = VehicleController::new(state);
    controller.get(id).await
}

async fn update_vehicle(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(request): Json<UpdateVehicleRequest>,
) -> Result<Json<VehicleEnvelope>, AppError> {
    let controller = VehicleController::new(state);
    controller.update(id, request).await
}

async fn delete_vehicle(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<Value>, AppError> {
    let controller = VehicleController::new(state);
    controller.delete(id).await
}

async fn attach_document(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    multipart: Multipart,
) -> Result<(StatusCode, Json<DocumentEnvelope>), AppError> {
    let controller = DocumentController::new(state);
    controller
        .attach(DocumentOwner::Vehicle, id, multipart)
        .await
}

async fn list_documents(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<Vec<Document>>, AppError> {
    let controller = DocumentController::new(state);
    controller.list(DocumentOwner::Vehicle, id).await
}

async fn update_document(
    State(state): State<AppState>,
    Path((id, doc_id)): Path<(i64, i64)>,
    Json(request): Json<UpdateDocumentRequest>,
) -> Result<Json<DocumentEnvelope>, AppError> {
    let controller = DocumentController::new(state);
    controller
        .update(DocumentOwner::Vehicle, id, doc_id, request)
        .await
}

async fn delete_document(
    State(state): State<AppState>,
    Path((id, doc_id)): Path<(i64, i64)>,
) -> Result<Json<Value>, AppError> {
    let controller = DocumentController::new(state);
    controller
        .delete(DocumentOwner::Vehicle, id, doc_id)
        .await
}
