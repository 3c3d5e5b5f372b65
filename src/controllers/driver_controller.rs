//! Controller de conductores
//!
//! Cada mutación que toca la selección de vehículo arma un único
//! `WriteBatch` con el conductor y los vehículos afectados, así el
//! acoplamiento conductor/vehículo nunca queda a medias.

use axum::http::StatusCode;
use axum::Json;
use chrono::Utc;
use serde_json::{json, Value};
use tracing::info;
use validator::Validate;

use crate::dto::driver_dto::{
    ContractUpdateRequest, CreateDriverRequest, DriverEnvelope, DriverWithVehicle,
    PaymentUpdateRequest, UpdateDriverRequest,
};
use crate::models::{Driver, DriverStatus, Vehicle};
use crate::repositories::WriteBatch;
use crate::services::lifecycle_service;
use crate::state::AppState;
use crate::utils::errors::{not_found_error, AppError, AppResult};

pub struct DriverController {
    state: AppState,
}

impl DriverController {
    pub fn new(state: AppState) -> Self {
        Self { state }
    }

    async fn with_vehicle(&self, driver: Driver) -> AppResult<DriverWithVehicle> {
        let vehicle = match driver.selected_vehicle_id {
            Some(vehicle_id) => self.state.store.vehicle(vehicle_id).await?,
            None => None,
        };
        Ok(DriverWithVehicle { driver, vehicle })
    }

    pub async fn list(&self) -> AppResult<Json<Vec<DriverWithVehicle>>> {
        let mut result = Vec::new();
        for driver in self.state.store.drivers().await? {
            result.push(self.with_vehicle(driver).await?);
        }
        Ok(Json(result))
    }

    pub async fn get(&self, id: i64) -> AppResult<Json<DriverWithVehicle>> {
        let driver = self
            .state
            .store
            .driver(id)
            .await?
            .ok_or_else(|| not_found_error("Driver"))?;
        Ok(Json(self.with_vehicle(driver).await?))
    }

    pub async fn create(
        &self,
        request: CreateDriverRequest,
    ) -> AppResult<(StatusCode, Json<DriverEnvelope>)> {
        request.validate()?;
        self.check_uniqueness(&request.email, &request.license_number, None)
            .await?;

        let now = Utc::now();
        let driver_id = self.state.ids.next_id();
        let mut batch = WriteBatch::default();

        // Reclamar el vehículo seleccionado antes de escribir nada.
        let mut claimed_vehicle = None;
        if let Some(vehicle_id) = request.selected_vehicle_id {
            let vehicle = self
                .state
                .store
                .vehicle(vehicle_id)
                .await?
                .ok_or_else(|| not_found_error("Vehicle"))?;
            let vehicle = lifecycle_service::claim_vehicle(vehicle, driver_id)?;
            claimed_vehicle = Some(vehicle.clone());
            batch = batch.vehicle(vehicle);
        }

        let driver = Driver {
            id: driver_id,
            first_name: request.first_name,
            last_name: request.last_name,
            email: request.email,
            phone: request.phone,
            license_number: request.license_number,
            license_expiry: request.license_expiry,
            address: request.address.unwrap_or_default(),
            emergency_contact: request.emergency_contact.unwrap_or_default(),
            emergency_phone: request.emergency_phone.unwrap_or_default(),
            selected_vehicle_id: request.selected_vehicle_id,
            contract_start_date: request.contract_start_date,
            contract_end_date: request.contract_end_date,
            contract_period: request.contract_period,
            bond_amount: request.bond_amount.unwrap_or(0),
            weekly_rent: request.weekly_rent.unwrap_or(0),
            contract_signed: request.contract_signed.unwrap_or(false),
            payment_receipt_uploaded: request.payment_receipt_uploaded.unwrap_or(false),
            payment_receipt_url: request.payment_receipt_url,
            payment_amount: request.payment_amount,
            status: request.status.unwrap_or(DriverStatus::Pending),
            documents: Vec::new(),
            created_at: now,
            updated_at: now,
        };

        self.state
            .store
            .commit(batch.driver(driver.clone()))
            .await?;
        info!("👤 Driver created: {} {} ({})", driver.first_name, driver.last_name, driver.id);

        Ok((
            StatusCode::CREATED,
            Json(DriverEnvelope {
                message: "Driver created successfully".to_string(),
                driver: DriverWithVehicle {
                    driver,
                    vehicle: claimed_vehicle,
                },
            }),
        ))
    }

    pub async fn update(
        &self,
        id: i64,
        request: UpdateDriverRequest,
    ) -> AppResult<Json<DriverEnvelope>> {
        request.validate()?;
        let mut driver = self
            .state
            .store
            .driver(id)
            .await?
            .ok_or_else(|| not_found_error("Driver"))?;

        if let Some(email) = &request.email {
            if !email.eq_ignore_ascii_case(&driver.email) {
                self.check_uniqueness(email, &driver.license_number, Some(id))
                    .await?;
            }
        }
        if let Some(license_number) = &request.license_number {
            if !license_number.eq_ignore_ascii_case(&driver.license_number) {
                self.check_uniqueness(&driver.email, license_number, Some(id))
                    .await?;
            }
        }

        // selectedVehicleId ausente en el body significa "sin vehículo".
        let old_vehicle_id = driver.selected_vehicle_id;
        let new_vehicle_id = request.selected_vehicle_id;
        let mut batch = WriteBatch::default();
        let mut embedded_vehicle: Option<Vehicle> = None;

        if old_vehicle_id != new_vehicle_id {
            if let Some(old_id) = old_vehicle_id {
                if let Some(old_vehicle) = self.state.store.vehicle(old_id).await? {
                    batch = batch.vehicle(lifecycle_service::release_vehicle(old_vehicle));
                }
            }
            if let Some(new_id) = new_vehicle_id {
                let new_vehicle = self
                    .state
                    .store
                    .vehicle(new_id)
                    .await?
                    .ok_or_else(|| not_found_error("Vehicle"))?;
                let assigned = lifecycle_service::assign_vehicle(new_vehicle, id);
                embedded_vehicle = Some(assigned.clone());
                batch = batch.vehicle(assigned);
            }
        } else if let Some(vehicle_id) = new_vehicle_id {
            embedded_vehicle = self.state.store.vehicle(vehicle_id).await?;
        }

        if let Some(first_name) = request.first_name {
            driver.first_name = first_name;
        }
        if let Some(last_name) = request.last_name {
            driver.last_name = last_name;
        }
        if let Some(email) = request.email {
            driver.email = email;
        }
        if let Some(phone) = request.phone {
            driver.phone = phone;
        }
        if let Some(license_number) = request.license_number {
            driver.license_number = license_number;
        }
        if let Some(license_expiry) = request.license_expiry {
            driver.license_expiry = Some(license_expiry);
        }
        if let Some(address) = request.address {
            driver.address = address;
        }
        if let Some(emergency_contact) = request.emergency_contact {
            driver.emergency_contact = emergency_contact;
        }
        if let Some(emergency_phone) = request.emergency_phone {
            driver.emergency_phone = emergency_phone;
        }
        if let Some(contract_start_date) = request.contract_start_date {
            driver.contract_start_date = Some(contract_start_date);
        }
        if let Some(contract_end_date) = request.contract_end_date {
            driver.contract_end_date = Some(contract_end_date);
        }
        if let Some(contract_period) = request.contract_period {
            driver.contract_period = Some(contract_period);
        }
        if let Some(bond_amount) = request.bond_amount {
            driver.bond_amount = bond_amount;
        }
        if let Some(weekly_rent) = request.weekly_rent {
            driver.weekly_rent = weekly_rent;
        }
        if let Some(contract_signed) = request.contract_signed {
            driver.contract_signed = contract_signed;
        }
        if let Some(payment_receipt_uploaded) = request.payment_receipt_uploaded {
            driver.payment_receipt_uploaded = payment_receipt_uploaded;
        }
        if let Some(payment_receipt_url) = request.payment_receipt_url {
            driver.payment_receipt_url = Some(payment_receipt_url);
        }
        if let Some(payment_amount) = request.payment_amount {
            driver.payment_amount = Some(payment_amount);
        }
        if let Some(status) = request.status {
            driver.status = status;
        }
        driver.selected_vehicle_id = new_vehicle_id;
        driver.touch();

        self.state
            .store
            .commit(batch.driver(driver.clone()))
            .await?;

        Ok(Json(DriverEnvelope {
            message: "Driver updated successfully".to_string(),
            driver: DriverWithVehicle {
                driver,
                vehicle: embedded_vehicle,
            },
        }))
    }

    pub async fn delete(&self, id: i64) -> AppResult<Json<Value>> {
        let driver = self
            .state
            .store
            .driver(id)
            .await?
            .ok_or_else(|| not_found_error("Driver"))?;

        let mut batch = WriteBatch::default().delete_driver(id);
        if let Some(vehicle_id) = driver.selected_vehicle_id {
            if let Some(vehicle) = self.state.store.vehicle(vehicle_id).await? {
                batch = batch.vehicle(lifecycle_service::release_vehicle(vehicle));
            }
        }
        self.state.store.commit(batch).await?;
        info!("🗑️ Driver deleted: {} {} ({})", driver.first_name, driver.last_name, id);

        Ok(Json(json!({ "message": "Driver deleted successfully" })))
    }

    pub async fn update_contract(
        &self,
        id: i64,
        request: ContractUpdateRequest,
    ) -> AppResult<Json<DriverEnvelope>> {
        let mut driver = self
            .state
            .store
            .driver(id)
            .await?
            .ok_or_else(|| not_found_error("Driver"))?;

        if let Some(contract_signed) = request.contract_signed {
            driver.contract_signed = contract_signed;
        }
        if let Some(contract_start_date) = request.contract_start_date {
            driver.contract_start_date = Some(contract_start_date);
        }
        if let Some(contract_end_date) = request.contract_end_date {
            driver.contract_end_date = Some(contract_end_date);
        }
        if let Some(contract_period) = request.contract_period {
            driver.contract_period = Some(contract_period);
        }
        driver.touch();

        self.state
            .store
            .commit(WriteBatch::default().driver(driver.clone()))
            .await?;

        Ok(Json(DriverEnvelope {
            message: "Contract updated successfully".to_string(),
            driver: self.with_vehicle(driver).await?,
        }))
    }

    pub async fn update_payment(
        &self,
        id: i64,
        request: PaymentUpdateRequest,
    ) -> AppResult<Json<DriverEnvelope>> {
        let mut driver = self
            .state
            .store
            .driver(id)
            .await?
            .ok_or_else(|| not_found_error("Driver"))?;

        if let Some(payment_receipt_uploaded) = request.payment_receipt_uploaded {
            driver.payment_receipt_uploaded = payment_receipt_uploaded;
        }
        if let Some(payment_receipt_url) = request.payment_receipt_url {
            driver.payment_receipt_url = Some(payment_receipt_url);
        }
        if let Some(payment_amount) = request.payment_amount {
            driver.payment_amount = Some(payment_amount);
        }
        driver.touch();

        self.state
            .store
            .commit(WriteBatch::default().driver(driver.clone()))
            .await?;

        Ok(Json(DriverEnvelope {
            message: "Payment details updated successfully".to_string(),
            driver: self.with_vehicle(driver).await?,
        }))
    }

    async fn check_uniqueness(
        &self,
        email: &str,
        license_number: &str,
        exclude_id: Option<i64>,
    ) -> AppResult<()> {
        let drivers = self.state.store.drivers().await?;
        let duplicate = drivers.iter().any(|d| {
            Some(d.id) != exclude_id
                && (d.email.eq_ignore_ascii_case(email)
                    || d.license_number.eq_ignore_ascii_case(license_number))
        });
        if duplicate {
            return Err(AppError::Conflict(
                "Driver with this email or license number already exists".to_string(),
            ));
        }
        Ok(())
    }
}
