//! DTOs de solicitudes de renta

use serde::{Deserialize, Serialize};

use crate::models::{Driver, RentalApplication, Vehicle};

// Decisión de admin sobre una solicitud (PUT /rental-applications/:id)
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct DecideApplicationRequest {
    /// "approved" o "rejected"; cualquier otro valor es un 400.
    pub status: String,
    pub admin_notes: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct ApplicationEnvelope {
    pub message: String,
    pub application: RentalApplication,
}

// Respuesta de decisión: la solicitud más las entidades afectadas
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DecisionEnvelope {
    pub message: String,
    pub application: RentalApplication,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vehicle: Option<Vehicle>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub driver: Option<Driver>,
}
