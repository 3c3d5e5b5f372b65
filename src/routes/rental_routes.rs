//! Rutas de solicitudes de alquiler

use axum::{
    extract::{Multipart, Path, State},
    http::StatusCode,
    routing::{get, post, put},
    Json, Router,
};

use crate::controllers::rental_controller::RentalController;
use crate::dto::rental_dto::{ApplicationEnvelope, DecideApplicationRequest, DecisionEnvelope};
use crate::middleware::auth::AuthUser;
use crate::models::RentalApplication;
use crate::state::AppState;
use crate::utils::errors::AppError;

pub fn create_rental_router() -> Router<AppState> {
    Router::new()
        .route("/rentals", post(submit_application))
        .route("/rental-applications", get(list_applications))
        .route("/rental-applications/:id", get(get_application))
        .route("/rental-applications/:id", put(decide_application))
}

async fn submit_application(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<(StatusCode, Json<ApplicationEnvelope>), AppError> {
    let controller = RentalController::new(state);
    controller.submit(multipart).await
}

async fn list_applications(
    State(state): State<AppState>,
) -> Result<Json<Vec<RentalApplication>>, AppError> {
    let controller = RentalController::new(state);
    controller.list().await
}

async fn get_application(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<RentalApplication>, AppError> {
    let controller = RentalController::new(state);
    controller.get(id).await
}

async fn decide_application(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    auth: Option<AuthUser>,
    Json(request): Json<DecideApplicationRequest>,
) -> Result<Json<DecisionEnvelope>, AppError> {
    let controller = RentalController::new(state);
    controller.decide(id, auth, request).await
}
