//! Abstracción de persistencia
//!
//! Los handlers nunca tocan un backend concreto: trabajan contra
//! `RentalStore`, con dos implementaciones intercambiables elegidas al
//! arrancar (PostgreSQL o memoria). Las mutaciones que tocan más de una
//! entidad (liberar un vehículo y guardar el conductor, aprobar una
//! solicitud) se expresan como un `WriteBatch` que el backend aplica de
//! forma atómica: ninguna decisión puede quedar escrita a medias.

use async_trait::async_trait;

use crate::models::{Driver, RentalApplication, User, VerificationToken, Vehicle};
use crate::utils::errors::AppResult;

/// Lote de escrituras aplicado de forma atómica por el backend.
#[derive(Debug, Default)]
pub struct WriteBatch {
    pub vehicles: Vec<Vehicle>,
    pub drivers: Vec<Driver>,
    pub applications: Vec<RentalApplication>,
    pub deleted_vehicles: Vec<i64>,
    pub deleted_drivers: Vec<i64>,
}

impl WriteBatch {
    pub fn vehicle(mut self, vehicle: Vehicle) -> Self {
        self.vehicles.push(vehicle);
        self
    }

    pub fn driver(mut self, driver: Driver) -> Self {
        self.drivers.push(driver);
        self
    }

    pub fn application(mut self, application: RentalApplication) -> Self {
        self.applications.push(application);
        self
    }

    pub fn delete_vehicle(mut self, id: i64) -> Self {
        self.deleted_vehicles.push(id);
        self
    }

    pub fn delete_driver(mut self, id: i64) -> Self {
        self.deleted_drivers.push(id);
        self
    }
}

#[async_trait]
pub trait RentalStore: Send + Sync {
    async fn vehicles(&self) -> AppResult<Vec<Vehicle>>;
    async fn vehicle(&self, id: i64) -> AppResult<Option<Vehicle>>;

    async fn drivers(&self) -> AppResult<Vec<Driver>>;
    async fn driver(&self, id: i64) -> AppResult<Option<Driver>>;

    async fn applications(&self) -> AppResult<Vec<RentalApplication>>;
    async fn application(&self, id: i64) -> AppResult<Option<RentalApplication>>;

    /// Aplica el lote completo o nada: primero los borrados, luego los
    /// upserts keyed por id.
    async fn commit(&self, batch: WriteBatch) -> AppResult<()>;

    async fn user(&self, email: &str) -> AppResult<Option<User>>;
    async fn save_user(&self, user: User) -> AppResult<()>;

    async fn verification(&self, token: &str) -> AppResult<Option<VerificationToken>>;
    async fn save_verification(&self, token: VerificationToken) -> AppResult<()>;
    async fn delete_verification(&self, token: &str) -> AppResult<()>;
}
