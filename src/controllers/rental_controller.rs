//! Controller de solicitudes de alquiler
//!
//! El alta entra como multipart (datos del solicitante + licencia, fotos
//! del auto y comprobante de pago). Toda la validación corre antes de
//! persistir archivo alguno: una solicitud rechazada no deja ni archivos
//! ni estado a medias. La decisión del admin es un único commit idempotente.

use std::collections::HashMap;

use axum::extract::Multipart;
use axum::http::StatusCode;
use axum::Json;
use chrono::{NaiveDate, Utc};
use tracing::info;

use crate::dto::rental_dto::{ApplicationEnvelope, DecideApplicationRequest, DecisionEnvelope};
use crate::middleware::auth::AuthUser;
use crate::models::{
    ApplicationStatus, Driver, DriverStatus, RentalApplication, Vehicle,
};
use crate::repositories::WriteBatch;
use crate::services::file_service::{
    check_document_upload, check_photo_upload, check_receipt_upload,
};
use crate::services::lifecycle_service;
use crate::state::AppState;
use crate::utils::errors::{not_found_error, AppError, AppResult};

struct UploadPart {
    file_name: String,
    mime_type: String,
    bytes: Vec<u8>,
}

/// Formulario multipart ya parseado, antes de validar.
#[derive(Default)]
struct SubmissionForm {
    fields: HashMap<String, String>,
    license_card: Option<UploadPart>,
    car_photos: Vec<UploadPart>,
    payment_receipt: Option<UploadPart>,
}

impl SubmissionForm {
    async fn parse(mut multipart: Multipart) -> AppResult<Self> {
        let mut form = SubmissionForm::default();
        while let Some(field) = multipart.next_field().await? {
            let Some(name) = field.name().map(str::to_string) else {
                continue;
            };
            if field.file_name().is_some() {
                let part = UploadPart {
                    file_name: field
                        .file_name()
                        .map(str::to_string)
                        .unwrap_or_else(|| "upload".to_string()),
                    mime_type: field
                        .content_type()
                        .map(str::to_string)
                        .unwrap_or_else(|| "application/octet-stream".to_string()),
                    bytes: field.bytes().await?.to_vec(),
                };
                match name.as_str() {
                    "licenseCard" => form.license_card = Some(part),
                    "carPhotos" => form.car_photos.push(part),
                    "paymentReceipt" => form.payment_receipt = Some(part),
                    other => {
                        return Err(AppError::Validation(format!(
                            "Unexpected file field: {}",
                            other
                        )))
                    }
                }
            } else {
                form.fields.insert(name, field.text().await?);
            }
        }
        Ok(form)
    }

    fn require(&self, name: &str) -> AppResult<String> {
        match self.fields.get(name).filter(|value| !value.is_empty()) {
            Some(value) => Ok(value.clone()),
            None => Err(AppError::Validation(format!("{} is required", name))),
        }
    }
}

pub struct RentalController {
    state: AppState,
}

impl RentalController {
    pub fn new(state: AppState) -> Self {
        Self { state }
    }

    pub async fn list(&self) -> AppResult<Json<Vec<RentalApplication>>> {
        let applications = self.state.store.applications().await?;
        Ok(Json(applications))
    }

    pub async fn get(&self, id: i64) -> AppResult<Json<RentalApplication>> {
        let application = self
            .state
            .store
            .application(id)
            .await?
            .ok_or_else(|| not_found_error("Rental application"))?;
        Ok(Json(application))
    }

    pub async fn submit(
        &self,
        multipart: Multipart,
    ) -> AppResult<(StatusCode, Json<ApplicationEnvelope>)> {
        let form = SubmissionForm::parse(multipart).await?;

        let vehicle_id: i64 = form
            .require("vehicleId")?
            .parse()
            .map_err(|_| AppError::Validation("vehicleId must be a number".to_string()))?;
        let vehicle = self
            .state
            .store
            .vehicle(vehicle_id)
            .await?
            .ok_or_else(|| not_found_error("Vehicle"))?;
        if !vehicle.status.is_available() {
            return Err(AppError::Validation(
                "Vehicle is not available for rent".to_string(),
            ));
        }

        let first_name = form.require("firstName")?;
        let last_name = form.require("lastName")?;
        let email = form.require("email")?;
        let phone = form.require("phone")?;
        let license_number = form.require("licenseNumber")?;
        let license_expiry: NaiveDate = form
            .require("licenseExpiry")?
            .parse()
            .map_err(|_| AppError::Validation("licenseExpiry must be a date".to_string()))?;
        let address = form.require("address")?;
        let emergency_contact = form.require("emergencyContact")?;
        let emergency_phone = form.require("emergencyPhone")?;
        let contract_period = form.require("contractPeriod")?;

        let contract_signed = form
            .fields
            .get("contractSigned")
            .map(|value| value == "true")
            .unwrap_or(false);
        if !contract_signed {
            return Err(AppError::Validation(
                "Contract must be signed before submitting".to_string(),
            ));
        }

        let license_card = form
            .license_card
            .as_ref()
            .ok_or_else(|| AppError::Validation("License card upload is required".to_string()))?;
        check_document_upload(&license_card.mime_type, license_card.bytes.len())?;
        if form.car_photos.is_empty() {
            return Err(AppError::Validation(
                "At least one car photo is required".to_string(),
            ));
        }
        for photo in &form.car_photos {
            check_photo_upload(&photo.mime_type, photo.bytes.len())?;
        }
        let payment_receipt = form.payment_receipt.as_ref().ok_or_else(|| {
            AppError::Validation("Payment receipt upload is required".to_string())
        })?;
        check_receipt_upload(&payment_receipt.mime_type, payment_receipt.bytes.len())?;

        // Todo validado: recién ahora se persisten los archivos.
        let files = &self.state.files;
        let stored_license = files
            .store(
                "licenses",
                &license_card.file_name,
                &license_card.mime_type,
                license_card.bytes.clone(),
            )
            .await?;
        let mut car_photo_urls = Vec::with_capacity(form.car_photos.len());
        for photo in &form.car_photos {
            let stored = files
                .store("car-photos", &photo.file_name, &photo.mime_type, photo.bytes.clone())
                .await?;
            car_photo_urls.push(stored.file_url);
        }
        let stored_receipt = files
            .store(
                "payments",
                &payment_receipt.file_name,
                &payment_receipt.mime_type,
                payment_receipt.bytes.clone(),
            )
            .await?;

        let now = Utc::now();
        let start = now.date_naive();
        let application = RentalApplication {
            id: self.state.ids.next_id(),
            vehicle_id,
            first_name,
            last_name,
            email,
            phone,
            license_number,
            license_expiry,
            address,
            emergency_contact,
            emergency_phone,
            contract_end_date: lifecycle_service::contract_end_date(start, &contract_period),
            contract_period,
            contract_start_date: start,
            bond_amount: vehicle.bond_amount,
            weekly_rent: vehicle.rent_per_week,
            contract_signed,
            license_card_url: stored_license.file_url,
            car_photo_urls,
            payment_receipt_url: stored_receipt.file_url,
            status: ApplicationStatus::PendingApproval,
            driver_id: None,
            admin_notes: None,
            processed_at: None,
            processed_by: None,
            submitted_at: now,
            updated_at: now,
        };

        self.state
            .store
            .commit(WriteBatch::default().application(application.clone()))
            .await?;
        info!(
            "📋 Rental application submitted: {} {} for vehicle {}",
            application.first_name, application.last_name, vehicle_id
        );

        Ok((
            StatusCode::CREATED,
            Json(ApplicationEnvelope {
                message: "Rental application submitted successfully".to_string(),
                application,
            }),
        ))
    }

    pub async fn decide(
        &self,
        id: i64,
        auth: Option<AuthUser>,
        request: DecideApplicationRequest,
    ) -> AppResult<Json<DecisionEnvelope>> {
        let approved = match request.status.as_str() {
            "approved" => true,
            "rejected" => false,
            _ => {
                return Err(AppError::Validation(
                    "Status must be either approved or rejected".to_string(),
                ))
            }
        };

        let mut application = self
            .state
            .store
            .application(id)
            .await?
            .ok_or_else(|| not_found_error("Rental application"))?;
        let vehicle = self.state.store.vehicle(application.vehicle_id).await?;

        let now = Utc::now();
        let processed_by = auth
            .map(|user| user.email)
            .unwrap_or_else(|| "admin".to_string());

        let mut batch = WriteBatch::default();
        let mut decided_vehicle: Option<Vehicle> = None;
        let mut decided_driver: Option<Driver> = None;

        if approved {
            // Materializa (o refresca) el conductor; reintentar la misma
            // aprobación produce el mismo estado final.
            let driver = self.materialize_driver(&application, now).await?;
            if let Some(vehicle) = vehicle {
                let rented = lifecycle_service::rent_vehicle(vehicle, driver.id);
                decided_vehicle = Some(rented.clone());
                batch = batch.vehicle(rented);
            }
            application.status = ApplicationStatus::Approved;
            application.driver_id = Some(driver.id);
            decided_driver = Some(driver.clone());
            batch = batch.driver(driver);
        } else {
            if let Some(vehicle) = vehicle {
                let released = lifecycle_service::release_vehicle(vehicle);
                decided_vehicle = Some(released.clone());
                batch = batch.vehicle(released);
            }
            application.status = ApplicationStatus::Rejected;
        }

        application.admin_notes = request.admin_notes;
        application.processed_at = Some(now);
        application.processed_by = Some(processed_by);
        application.updated_at = now;

        self.state
            .store
            .commit(batch.application(application.clone()))
            .await?;
        info!(
            "⚖️ Rental application {} {}",
            id,
            if approved { "approved" } else { "rejected" }
        );

        Ok(Json(DecisionEnvelope {
            message: if approved {
                "Rental application approved successfully".to_string()
            } else {
                "Rental application rejected successfully".to_string()
            },
            application,
            vehicle: decided_vehicle,
            driver: decided_driver,
        }))
    }

    /// Crea el conductor a partir de la solicitud, o refresca el ya creado
    /// por una aprobación anterior.
    async fn materialize_driver(
        &self,
        application: &RentalApplication,
        now: chrono::DateTime<Utc>,
    ) -> AppResult<Driver> {
        let existing = match application.driver_id {
            Some(driver_id) => self.state.store.driver(driver_id).await?,
            None => None,
        };

        let mut driver = match existing {
            Some(driver) => driver,
            None => Driver {
                id: self.state.ids.next_id(),
                first_name: String::new(),
                last_name: String::new(),
                email: String::new(),
                phone: String::new(),
                license_number: String::new(),
                license_expiry: None,
                address: String::new(),
                emergency_contact: String::new(),
                emergency_phone: String::new(),
                selected_vehicle_id: None,
                contract_start_date: None,
                contract_end_date: None,
                contract_period: None,
                bond_amount: 0,
                weekly_rent: 0,
                contract_signed: false,
                payment_receipt_uploaded: false,
                payment_receipt_url: None,
                payment_amount: None,
                status: DriverStatus::Pending,
                documents: Vec::new(),
                created_at: now,
                updated_at: now,
            },
        };

        driver.first_name = application.first_name.clone();
        driver.last_name = application.last_name.clone();
        driver.email = application.email.clone();
        driver.phone = application.phone.clone();
        driver.license_number = application.license_number.clone();
        driver.license_expiry = Some(application.license_expiry);
        driver.address = application.address.clone();
        driver.emergency_contact = application.emergency_contact.clone();
        driver.emergency_phone = application.emergency_phone.clone();
        driver.selected_vehicle_id = Some(application.vehicle_id);
        driver.contract_start_date = Some(application.contract_start_date);
        driver.contract_end_date = Some(application.contract_end_date);
        driver.contract_period = Some(application.contract_period.clone());
        driver.bond_amount = application.bond_amount;
        driver.weekly_rent = application.weekly_rent;
        driver.contract_signed = application.contract_signed;
        driver.payment_receipt_uploaded = true;
        driver.payment_receipt_url = Some(application.payment_receipt_url.clone());
        driver.status = DriverStatus::Active;
        driver.updated_at = now;

        Ok(driver)
    }
}
