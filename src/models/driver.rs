//! Modelo de conductor (perfil de flota administrado por el admin)
//!
//! Las solicitudes públicas de alquiler viven en su propia entidad
//! (`RentalApplication`); un conductor solo se materializa desde una
//! solicitud cuando el admin la aprueba.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::models::document::Document;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DriverStatus {
    Pending,
    Active,
    PendingPayment,
    Registered,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Driver {
    pub id: i64,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    pub license_number: String,
    #[serde(default)]
    pub license_expiry: Option<NaiveDate>,
    pub address: String,
    pub emergency_contact: String,
    pub emergency_phone: String,
    pub selected_vehicle_id: Option<i64>,
    #[serde(default)]
    pub contract_start_date: Option<NaiveDate>,
    #[serde(default)]
    pub contract_end_date: Option<NaiveDate>,
    pub contract_period: Option<String>,
    pub bond_amount: i64,
    pub weekly_rent: i64,
    pub contract_signed: bool,
    pub payment_receipt_uploaded: bool,
    pub payment_receipt_url: Option<String>,
    pub payment_amount: Option<i64>,
    pub status: DriverStatus,
    #[serde(default)]
    pub documents: Vec<Document>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Driver {
    /// Etiqueta legible usada en alertas ("FirstName LastName - Vehicle")
    pub fn display_name(&self) -> String {
        format!("{} {} - Vehicle", self.first_name, self.last_name)
    }

    pub fn touch(&mut self) {
        self.updated_at = Utc::now();
    }
}
