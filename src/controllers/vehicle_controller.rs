//! Controller de vehículos
//!
//! CRUD de la flota. La unicidad de patente y VIN se verifica contra el
//! store antes de escribir; los duplicados responden 400.

use axum::http::StatusCode;
use axum::Json;
use chrono::Utc;
use serde_json::{json, Value};
use tracing::info;
use validator::Validate;

use crate::dto::vehicle_dto::{CreateVehicleRequest, UpdateVehicleRequest, VehicleEnvelope};
use crate::models::{Vehicle, VehicleStatus};
use crate::repositories::WriteBatch;
use crate::state::AppState;
use crate::utils::errors::{not_found_error, AppError, AppResult};

pub struct VehicleController {
    state: AppState,
}

impl VehicleController {
    pub fn new(state: AppState) -> Self {
        Self { state }
    }

    pub async fn list(&self) -> AppResult<Json<Vec<Vehicle>>> {
        let vehicles = self.state.store.vehicles().await?;
        Ok(Json(vehicles))
    }

    pub async fn get(&self, id: i64) -> AppResult<Json<Vehicle>> {
        let vehicle = self
            .state
            .store
            .vehicle(id)
            .await?
            .ok_or_else(|| not_found_error("Vehicle"))?;
        Ok(Json(vehicle))
    }

    pub async fn create(
        &self,
        request: CreateVehicleRequest,
    ) -> AppResult<(StatusCode, Json<VehicleEnvelope>)> {
        request.validate()?;
        self.check_uniqueness(&request.license_plate, &request.vin, None)
            .await?;

        let now = Utc::now();
        let vehicle = Vehicle {
            id: self.state.ids.next_id(),
            make: request.make,
            model: request.model,
            year: request.year,
            license_plate: request.license_plate,
            vin: request.vin,
            color: request.color.unwrap_or_default(),
            vehicle_type: request.vehicle_type.unwrap_or_default(),
            fuel_type: request.fuel_type.unwrap_or_default(),
            transmission: request.transmission.unwrap_or_default(),
            owner_name: request.owner_name.unwrap_or_default(),
            next_service_date: request.next_service_date,
            bond_amount: request.bond_amount.unwrap_or(0),
            rent_per_week: request.rent_per_week.unwrap_or(0),
            current_mileage: request.current_mileage.unwrap_or(0),
            odo_meter: request.odo_meter.unwrap_or(0),
            status: request.status.unwrap_or(VehicleStatus::Available),
            assigned_driver_id: None,
            photo_url: request.photo_url,
            documents: Vec::new(),
            created_at: now,
            updated_at: now,
        };

        self.state
            .store
            .commit(WriteBatch::default().vehicle(vehicle.clone()))
            .await?;
        info!("🚗 Vehicle created: {} ({})", vehicle.display_name(), vehicle.id);

        Ok((
            StatusCode::CREATED,
            Json(VehicleEnvelope {
                message: "Vehicle created successfully".to_string(),
                vehicle,
            }),
        ))
    }

    pub async fn update(
        &self,
        id: i64,
        request: UpdateVehicleRequest,
    ) -> AppResult<Json<VehicleEnvelope>> {
        request.validate()?;
        let mut vehicle = self
            .state
            .store
            .vehicle(id)
            .await?
            .ok_or_else(|| not_found_error("Vehicle"))?;
        self.check_uniqueness(&request.license_plate, &request.vin, Some(id))
            .await?;

        vehicle.make = request.make;
        vehicle.model = request.model;
        vehicle.year = request.year;
        vehicle.license_plate = request.license_plate;
        vehicle.vin = request.vin;
        if let Some(color) = request.color {
            vehicle.color = color;
        }
        if let Some(vehicle_type) = request.vehicle_type {
            vehicle.vehicle_type = vehicle_type;
        }
        if let Some(fuel_type) = request.fuel_type {
            vehicle.fuel_type = fuel_type;
        }
        if let Some(transmission) = request.transmission {
            vehicle.transmission = transmission;
        }
        if let Some(owner_name) = request.owner_name {
            vehicle.owner_name = owner_name;
        }
        if let Some(next_service_date) = request.next_service_date {
            vehicle.next_service_date = Some(next_service_date);
        }
        if let Some(bond_amount) = request.bond_amount {
            vehicle.bond_amount = bond_amount;
        }
        if let Some(rent_per_week) = request.rent_per_week {
            vehicle.rent_per_week = rent_per_week;
        }
        if let Some(current_mileage) = request.current_mileage {
            vehicle.current_mileage = current_mileage;
        }
        if let Some(odo_meter) = request.odo_meter {
            vehicle.odo_meter = odo_meter;
        }
        if let Some(status) = request.status {
            vehicle.status = status;
        }
        if let Some(photo_url) = request.photo_url {
            vehicle.photo_url = Some(photo_url);
        }
        vehicle.touch();

        self.state
            .store
            .commit(WriteBatch::default().vehicle(vehicle.clone()))
            .await?;

        Ok(Json(VehicleEnvelope {
            message: "Vehicle updated successfully".to_string(),
            vehicle,
        }))
    }

    pub async fn delete(&self, id: i64) -> AppResult<Json<Value>> {
        let vehicle = self
            .state
            .store
            .vehicle(id)
            .await?
            .ok_or_else(|| not_found_error("Vehicle"))?;

        // Si un conductor tenía este vehículo seleccionado, la referencia se
        // limpia en el mismo commit para no dejarla colgando.
        let mut batch = WriteBatch::default().delete_vehicle(id);
        for mut driver in self.state.store.drivers().await? {
            if driver.selected_vehicle_id == Some(id) {
                driver.selected_vehicle_id = None;
                driver.touch();
                batch = batch.driver(driver);
            }
        }
        self.state.store.commit(batch).await?;
        info!("🗑️ Vehicle deleted: {} ({})", vehicle.display_name(), id);

        Ok(Json(json!({ "message": "Vehicle deleted successfully" })))
    }

    async fn check_uniqueness(
        &self,
        license_plate: &str,
        vin: &str,
        exclude_id: Option<i64>,
    ) -> AppResult<()> {
        let vehicles = self.state.store.vehicles().await?;
        let duplicate = vehicles.iter().any(|v| {
            Some(v.id) != exclude_id
                && (v.license_plate.eq_ignore_ascii_case(license_plate)
                    || v.vin.eq_ignore_ascii_case(vin))
        });
        if duplicate {
            return Err(AppError::Conflict(
                "Vehicle with this license plate or VIN already exists".to_string(),
            ));
        }
        Ok(())
    }
}
