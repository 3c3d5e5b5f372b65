//! Documentos adjuntos a vehículos y conductores
//!
//! Un documento es un subregistro del vehículo o conductor que lo posee;
//! no tiene identidad propia fuera de su dueño.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// Tipos fijos admitidos para documentos de vehículo.
/// Los documentos de conductor aceptan tipos libres.
pub const VEHICLE_DOCUMENT_TYPES: &[(&str, &str)] = &[
    ("car_contract", "Car Contract"),
    ("red_book_inspection", "Red Book Inspection Report"),
    ("car_registration", "Car Registration"),
    ("car_insurance", "Car Insurance"),
    ("cpv_registration", "CPV Registration"),
];

pub fn is_vehicle_document_type(document_type: &str) -> bool {
    VEHICLE_DOCUMENT_TYPES
        .iter()
        .any(|(key, _)| *key == document_type)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DocumentStatus {
    Active,
    Inactive,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Document {
    pub id: i64,
    pub document_type: String,
    pub file_name: String,
    pub file_url: String,
    pub file_size: i64,
    pub mime_type: String,
    #[serde(default)]
    pub expiry_date: Option<NaiveDate>,
    pub uploaded_by: String,
    pub uploaded_at: DateTime<Utc>,
    pub status: DocumentStatus,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn vehicle_document_types_are_closed() {
        assert!(is_vehicle_document_type("car_insurance"));
        assert!(is_vehicle_document_type("cpv_registration"));
        assert!(!is_vehicle_document_type("driver_license"));
    }
}
