//! DTOs de vehículos
//!
//! Requests tipadas y validadas antes de tocar la entidad; los campos
//! desconocidos se rechazan en vez de mezclarse silenciosamente.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::models::{Vehicle, VehicleStatus};

// Request para crear un vehículo
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct CreateVehicleRequest {
    #[validate(length(min = 1, message = "make is required"))]
    pub make: String,
    #[validate(length(min = 1, message = "model is required"))]
    pub model: String,
    #[validate(length(min = 1, message = "year is required"))]
    pub year: String,
    #[validate(length(min = 1, message = "license plate is required"))]
    pub license_plate: String,
    #[validate(length(min = 1, message = "vin is required"))]
    pub vin: String,
    pub color: Option<String>,
    pub vehicle_type: Option<String>,
    pub fuel_type: Option<String>,
    pub transmission: Option<String>,
    pub owner_name: Option<String>,
    pub next_service_date: Option<NaiveDate>,
    #[validate(range(min = 0))]
    pub bond_amount: Option<i64>,
    #[validate(range(min = 0))]
    pub rent_per_week: Option<i64>,
    #[validate(range(min = 0))]
    pub current_mileage: Option<i64>,
    #[validate(range(min = 0))]
    pub odo_meter: Option<i64>,
    pub status: Option<VehicleStatus>,
    pub photo_url: Option<String>,
}

// Request para actualizar un vehículo (el id del path manda)
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct UpdateVehicleRequest {
    /// Ignorado: el id de un vehículo es inmutable.
    pub id: Option<i64>,
    #[validate(length(min = 1, message = "make is required"))]
    pub make: String,
    #[validate(length(min = 1, message = "model is required"))]
    pub model: String,
    #[validate(length(min = 1, message = "year is required"))]
    pub year: String,
    #[validate(length(min = 1, message = "license plate is required"))]
    pub license_plate: String,
    #[validate(length(min = 1, message = "vin is required"))]
    pub vin: String,
    pub color: Option<String>,
    pub vehicle_type: Option<String>,
    pub fuel_type: Option<String>,
    pub transmission: Option<String>,
    pub owner_name: Option<String>,
    pub next_service_date: Option<NaiveDate>,
    #[validate(range(min = 0))]
    pub bond_amount: Option<i64>,
    #[validate(range(min = 0))]
    pub rent_per_week: Option<i64>,
    #[validate(range(min = 0))]
    pub current_mileage: Option<i64>,
    #[validate(range(min = 0))]
    pub odo_meter: Option<i64>,
    pub status: Option<VehicleStatus>,
    pub photo_url: Option<String>,
}

// Respuesta de mutación: eco de la entidad con mensaje
#[derive(Debug, Serialize)]
pub struct VehicleEnvelope {
    pub message: String,
    pub vehicle: Vehicle,
}
