//! Modelo de vehículo de la flota

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::models::document::Document;

/// Estados posibles de un vehículo.
///
/// `available` es el único estado desde el que un conductor o una solicitud
/// puede reclamar el vehículo; todos los estados pueden volver a `available`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VehicleStatus {
    Available,
    Maintenance,
    Rented,
    Assigned,
    PendingApproval,
    OutOfService,
}

impl VehicleStatus {
    pub fn is_available(self) -> bool {
        self == VehicleStatus::Available
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Vehicle {
    pub id: i64,
    pub make: String,
    pub model: String,
    pub year: String,
    pub license_plate: String,
    pub vin: String,
    pub color: String,
    pub vehicle_type: String,
    pub fuel_type: String,
    pub transmission: String,
    pub owner_name: String,
    #[serde(default)]
    pub next_service_date: Option<NaiveDate>,
    pub bond_amount: i64,
    pub rent_per_week: i64,
    pub current_mileage: i64,
    pub odo_meter: i64,
    pub status: VehicleStatus,
    pub assigned_driver_id: Option<i64>,
    pub photo_url: Option<String>,
    #[serde(default)]
    pub documents: Vec<Document>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Vehicle {
    /// Etiqueta legible usada en alertas y logs ("Make Model")
    pub fn display_name(&self) -> String {
        format!("{} {}", self.make, self.model)
    }

    pub fn touch(&mut self) {
        self.updated_at = Utc::now();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_serializes_as_snake_case() {
        let json = serde_json::to_string(&VehicleStatus::PendingApproval).unwrap();
        assert_eq!(json, "\"pending_approval\"");
        let json = serde_json::to_string(&VehicleStatus::OutOfService).unwrap();
        assert_eq!(json, "\"out_of_service\"");
    }
}
