//! Rutas de conductores, contrato/pago y sus documentos

use axum::{
    extract::{Multipart, Path, State},
    http::{header::HeaderName, StatusCode},
    routing::{delete, get, post, put},
    Json, Router,
};
use serde_json::Value;

use crate::controllers::document_controller::{DocumentController, DocumentOwner};
use crate::controllers::driver_controller::DriverController;
use crate::dto::document_dto::{DocumentEnvelope, UpdateDocumentRequest};
use crate::dto::driver_dto::{
    ContractUpdateRequest, CreateDriverRequest, DriverEnvelope, DriverWithVehicle,
    PaymentUpdateRequest, UpdateDriverRequest,
};
use crate::models::Document;
use crate::state::AppState;
use crate::utils::errors::AppError;

pub fn create_driver_router() -> Router<AppState> {
    Router::new()
        .route("/drivers", post(create_driver))
        .route("/drivers", get(list_drivers))
        .route("/drivers/:id", get(get_driver))
        .route("/drivers/:id", put(update_driver))
        .route("/drivers/:id", delete(delete_driver))
        .route("/drivers/:id/contract", post(update_contract))
        .route("/drivers/:id/payment", post(update_payment))
        .route("/drivers/:id/documents", post(attach_document))
        .route("/drivers/:id/documents", get(list_documents))
        .route("/drivers/:id/documents/:doc_id", put(update_document))
        .route("/drivers/:id/documents/:doc_id", delete(delete_document))
        .route(
            "/drivers/:id/documents/:doc_id/download",
            get(download_document),
        )
}

async fn create_driver(
    State(state): State<AppState>,
    Json(request): Json<CreateDriverRequest>,
) -> Result<(StatusCode, Json<DriverEnvelope>), AppError> {
    let controller = DriverController::new(state);
    controller.create(request).await
}

async fn list_drivers(
    State(state): State<AppState>,
) -> Result<Json<Vec<DriverWithVehicle>>, AppError> {
    let controller = DriverController::new(state);
    controller.list().await
}

async fn get_driver(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<DriverWithVehicle>, AppError> {
    let controller = DriverController::new(state);
    controller.get(id).await
}

async fn update_driver(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(request): Json<UpdateDriverRequest>,
) -> Result<Json<DriverEnvelope>, AppError> {
    let controller = DriverController::new(state);
    controller.update(id, request).await
}

async fn delete_driver(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<Value>, AppError> {
    let controller = DriverController::new(state);
    controller.delete(id).await
}

async fn update_contract(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(request): Json<ContractUpdateRequest>,
) -> Result<Json<DriverEnvelope>, AppError> {
    let controller = DriverController::new(state);
    controller.update_contract(id, request).await
}

async fn update_payment(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(request): Json<PaymentUpdateRequest>,
) -> Result<Json<DriverEnvelope>, AppError> {
    let controller = DriverController::new(state);
    controller.update_payment(id, request).await
}

async fn attach_document(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    multipart: Multipart,
) -> Result<(StatusCode, Json<DocumentEnvelope>), AppError> {
    let controller = DocumentController::new(state);
    controller.attach(DocumentOwner::Driver, id, multipart).await
}

async fn list_documents(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<Vec<Document>>, AppError> {
    let controller = DocumentController::new(state);
    controller.list(DocumentOwner::Driver, id).await
}

async fn update_document(
    State(state): State<AppState>,
    Path((id, doc_id)): Path<(i64, i64)>,
    Json(request): Json<UpdateDocumentRequest>,
) -> Result<Json<DocumentEnvelope>, AppError> {
    let controller = DocumentController::new(state);
    controller
        .update(DocumentOwner::Driver, id, doc_id, request)
        .await
}

async fn delete_document(
    State(state): State<AppState>,
    Path((id, doc_id)): Path<(i64, i64)>,
) -> Result<Json<Value>, AppError> {
    let controller = DocumentController::new(state);
    controller.delete(DocumentOwner::Driver, id, doc_id).await
}

async fn download_document(
    State(state): State<AppState>,
    Path((id, doc_id)): Path<(i64, i64)>,
) -> Result<([(HeaderName, String); 2], Vec<u8>), AppError> {
    let controller = DocumentController::new(state);
    controller.download_driver_document(id, doc_id).await
}
