//! Modelo de solicitud de alquiler
//!
//! La solicitud pública es una entidad propia, separada del perfil de
//! conductor, con su máquina de estados (`pending_approval` → `approved` |
//! `rejected`) y una referencia al conductor materializado tras la
//! aprobación.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ApplicationStatus {
    PendingApproval,
    Approved,
    Rejected,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RentalApplication {
    pub id: i64,
    pub vehicle_id: i64,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    pub license_number: String,
    pub license_expiry: NaiveDate,
    pub address: String,
    pub emergency_contact: String,
    pub emergency_phone: String,
    pub contract_period: String,
    pub contract_start_date: NaiveDate,
    pub contract_end_date: NaiveDate,
    pub bond_amount: i64,
    pub weekly_rent: i64,
    pub contract_signed: bool,
    pub license_card_url: String,
    pub car_photo_urls: Vec<String>,
    pub payment_receipt_url: String,
    pub status: ApplicationStatus,
    /// Conductor creado al aprobar la solicitud, si ya ocurrió.
    pub driver_id: Option<i64>,
    pub admin_notes: Option<String>,
    pub processed_at: Option<DateTime<Utc>>,
    pub processed_by: Option<String>,
    pub submitted_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
