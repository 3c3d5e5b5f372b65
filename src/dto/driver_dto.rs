//! DTOs de conductores

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::models::{Driver, DriverStatus, Vehicle};

// Request para crear un conductor (camino admin)
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct CreateDriverRequest {
    #[validate(length(min = 1, message = "first name is required"))]
    pub first_name: String,
    #[validate(length(min = 1, message = "last name is required"))]
    pub last_name: String,
    #[validate(email(message = "a valid email is required"))]
    pub email: String,
    #[validate(length(min = 1, message = "phone is required"))]
    pub phone: String,
    #[validate(length(min = 1, message = "license number is required"))]
    pub license_number: String,
    pub license_expiry: Option<NaiveDate>,
    pub address: Option<String>,
    pub emergency_contact: Option<String>,
    pub emergency_phone: Option<String>,
    pub selected_vehicle_id: Option<i64>,
    pub contract_start_date: Option<NaiveDate>,
    pub contract_end_date: Option<NaiveDate>,
    pub contract_period: Option<String>,
    #[validate(range(min = 0))]
    pub bond_amount: Option<i64>,
    #[validate(range(min = 0))]
    pub weekly_rent: Option<i64>,
    pub contract_signed: Option<bool>,
    pub payment_receipt_uploaded: Option<bool>,
    pub payment_receipt_url: Option<String>,
    #[validate(range(min = 0))]
    pub payment_amount: Option<i64>,
    pub status: Option<DriverStatus>,
}

// Request para actualizar un conductor.
//
// `selectedVehicleId` ausente significa "sin vehículo": la actualización
// siempre fija la selección al valor recibido.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct UpdateDriverRequest {
    /// Ignorado: el id del path manda.
    pub id: Option<i64>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    #[validate(email(message = "a valid email is required"))]
    pub email: Option<String>,
    pub phone: Option<String>,
    pub license_number: Option<String>,
    pub license_expiry: Option<NaiveDate>,
    pub address: Option<String>,
    pub emergency_contact: Option<String>,
    pub emergency_phone: Option<String>,
    pub selected_vehicle_id: Option<i64>,
    pub contract_start_date: Option<NaiveDate>,
    pub contract_end_date: Option<NaiveDate>,
    pub contract_period: Option<String>,
    #[validate(range(min = 0))]
    pub bond_amount: Option<i64>,
    #[validate(range(min = 0))]
    pub weekly_rent: Option<i64>,
    pub contract_signed: Option<bool>,
    pub payment_receipt_uploaded: Option<bool>,
    pub payment_receipt_url: Option<String>,
    #[validate(range(min = 0))]
    pub payment_amount: Option<i64>,
    pub status: Option<DriverStatus>,
}

// Actualización de contrato (POST /drivers/:id/contract)
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct ContractUpdateRequest {
    pub contract_signed: Option<bool>,
    pub contract_start_date: Option<NaiveDate>,
    pub contract_end_date: Option<NaiveDate>,
    pub contract_period: Option<String>,
}

// Actualización de comprobante de pago (POST /drivers/:id/payment)
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct PaymentUpdateRequest {
    pub payment_receipt_uploaded: Option<bool>,
    pub payment_receipt_url: Option<String>,
    pub payment_amount: Option<i64>,
}

/// Conductor con el detalle del vehículo seleccionado embebido,
/// tal como lo consumen las vistas de admin.
#[derive(Debug, Serialize)]
pub struct DriverWithVehicle {
    #[serde(flatten)]
    pub driver: Driver,
    pub vehicle: Option<Vehicle>,
}

#[derive(Debug, Serialize)]
pub struct DriverEnvelope {
    pub message: String,
    pub driver: DriverWithVehicle,
}
