//! Backend de persistencia en memoria
//!
//! Se usa cuando no hay `DATABASE_URL` configurada y en los tests. Un único mutex
//! protege todas las colecciones, así un `WriteBatch` se aplica completo
//! sin intercalar escrituras de otra request.

use std::collections::{BTreeMap, HashMap};

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::models::{Driver, RentalApplication, User, VerificationToken, Vehicle};
use crate::repositories::store::{RentalStore, WriteBatch};
use crate::utils::errors::AppResult;

#[derive(Default)]
struct Collections {
    vehicles: BTreeMap<i64, Vehicle>,
    drivers: BTreeMap<i64, Driver>,
    applications: BTreeMap<i64, RentalApplication>,
    users: HashMap<String, User>,
    tokens: HashMap<String, VerificationToken>,
}

#[derive(Default)]
pub struct MemoryStore {
    inner: Mutex<Collections>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl RentalStore for MemoryStore {
    async fn vehicles(&self) -> AppResult<Vec<Vehicle>> {
        Ok(self.inner.lock().await.vehicles.values().cloned().collect())
    }

    async fn vehicle(&self, id: i64) -> AppResult<Option<Vehicle>> {
        Ok(self.inner.lock().await.vehicles.get(&id).cloned())
    }

    async fn drivers(&self) -> AppResult<Vec<Driver>> {
        Ok(self.inner.lock().await.drivers.values().cloned().collect())
    }

    async fn driver(&self, id: i64) -> AppResult<Option<Driver>> {
        Ok(self.inner.lock().await.drivers.get(&id).cloned())
    }

    async fn applications(&self) -> AppResult<Vec<RentalApplication>> {
        Ok(self
            .inner
            .lock()
            .await
            .applications
            .values()
            .cloned()
            .collect())
    }

    async fn application(&self, id: i64) -> AppResult<Option<RentalApplication>> {
        Ok(self.inner.lock().await.applications.get(&id).cloned())
    }

    async fn commit(&self, batch: WriteBatch) -> AppResult<()> {
        let mut inner = self.inner.lock().await;
        for id in &batch.deleted_drivers {
            inner.drivers.remove(id);
        }
        for id in &batch.deleted_vehicles {
            inner.vehicles.remove(id);
        }
        for vehicle in batch.vehicles {
            inner.vehicles.insert(vehicle.id, vehicle);
        }
        for driver in batch.drivers {
            inner.drivers.insert(driver.id, driver);
        }
        for application in batch.applications {
            inner.applications.insert(application.id, application);
        }
        Ok(())
    }

    async fn user(&self, email: &str) -> AppResult<Option<User>> {
        Ok(self.inner.lock().await.users.get(email).cloned())
    }

    async fn save_user(&self, user: User) -> AppResult<()> {
        self.inner
            .lock()
            .await
            .users
            .insert(user.email.clone(), user);
        Ok(())
    }

    async fn verification(&self, token: &str) -> AppResult<Option<VerificationToken>> {
        Ok(self.inner.lock().await.tokens.get(token).cloned())
    }

    async fn save_verification(&self, token: VerificationToken) -> AppResult<()> {
        self.inner
            .lock()
            .await
            .tokens
            .insert(token.token.clone(), token);
        Ok(())
    }

    async fn delete_verification(&self, token: &str) -> AppResult<()> {
        self.inner.lock().await.tokens.remove(token);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{DriverStatus, VehicleStatus};
    use chrono::Utc;

    fn sample_vehicle(id: i64) -> Vehicle {
        let now = Utc::now();
        Vehicle {
            id,
            make: "Toyota".to_string(),
            model: "Corolla".to_string(),
            year: "2022".to_string(),
            license_plate: format!("PLATE-{}", id),
            vin: format!("VIN-{}", id),
            color: "White".to_string(),
            vehicle_type: "sedan".to_string(),
            fuel_type: "petrol".to_string(),
            transmission: "automatic".to_string(),
            owner_name: String::new(),
            next_service_date: None,
            bond_amount: 1000,
            rent_per_week: 250,
            current_mileage: 0,
            odo_meter: 0,
            status: VehicleStatus::Available,
            assigned_driver_id: None,
            photo_url: None,
            documents: Vec::new(),
            created_at: now,
            updated_at: now,
        }
    }

    fn sample_driver(id: i64) -> Driver {
        let now = Utc::now();
        Driver {
            id,
            first_name: "Jane".to_string(),
            last_name: "Doe".to_string(),
            email: format!("jane{}@example.com", id),
            phone: "0400000000".to_string(),
            license_number: format!("LIC-{}", id),
            license_expiry: None,
            address: "1 Test St".to_string(),
            emergency_contact: "John".to_string(),
            emergency_phone: "0400000001".to_string(),
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
        }
    }

    #[tokio::test]
    async fn commit_applies_deletes_and_upserts_together() {
        let store = MemoryStore::new();
        store
            .commit(
                WriteBatch::default()
                    .vehicle(sample_vehicle(1))
                    .driver(sample_driver(10)),
            )
            .await
            .unwrap();

        let mut updated = sample_vehicle(1);
        updated.status = VehicleStatus::Assigned;
        store
            .commit(WriteBatch::default().vehicle(updated).delete_driver(10))
            .await
            .unwrap();

        let vehicle = store.vehicle(1).await.unwrap().unwrap();
        assert_eq!(vehicle.status, VehicleStatus::Assigned);
        assert!(store.driver(10).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn upsert_replaces_existing_entity() {
        let store = MemoryStore::new();
        store
            .commit(WriteBatch::default().vehicle(sample_vehicle(7)))
            .await
            .unwrap();

        let mut renamed = sample_vehicle(7);
        renamed.model = "Camry".to_string();
        store
            .commit(WriteBatch::default().vehicle(renamed))
            .await
            .unwrap();

        let vehicles = store.vehicles().await.unwrap();
        assert_eq!(vehicles.len(), 1);
        assert_eq!(vehicles[0].model, "Camry");
    }
}
