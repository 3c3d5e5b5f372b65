//! Backend de persistencia sobre PostgreSQL
//!
//! Las entidades se guardan como documentos JSONB keyed por id, así el
//! modelo de dominio es la única fuente de verdad del esquema. Un
//! `WriteBatch` se aplica dentro de una única transacción sqlx.

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::Serialize;
use sqlx::PgPool;

use crate::models::{Driver, RentalApplication, User, VerificationToken, Vehicle};
use crate::repositories::store::{RentalStore, WriteBatch};
use crate::utils::errors::AppResult;

pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Crear las tablas si no existen todavía.
    pub async fn init_schema(&self) -> AppResult<()> {
        const SCHEMA: &[&str] = &[
            "CREATE TABLE IF NOT EXISTS vehicles (id BIGINT PRIMARY KEY, data JSONB NOT NULL)",
            "CREATE TABLE IF NOT EXISTS drivers (id BIGINT PRIMARY KEY, data JSONB NOT NULL)",
            "CREATE TABLE IF NOT EXISTS rental_applications (id BIGINT PRIMARY KEY, data JSONB NOT NULL)",
            "CREATE TABLE IF NOT EXISTS users (email TEXT PRIMARY KEY, data JSONB NOT NULL)",
            "CREATE TABLE IF NOT EXISTS verification_tokens (token TEXT PRIMARY KEY, data JSONB NOT NULL)",
        ];
        for statement in SCHEMA {
            sqlx::query(statement).execute(&self.pool).await?;
        }
        Ok(())
    }

    async fn fetch_all<T: DeserializeOwned>(&self, table: &str) -> AppResult<Vec<T>> {
        let rows: Vec<serde_json::Value> =
            sqlx::query_scalar(&format!("SELECT data FROM {} ORDER BY id", table))
                .fetch_all(&self.pool)
                .await?;
        rows.into_iter()
            .map(|value| serde_json::from_value(value).map_err(Into::into))
            .collect()
    }

    async fn fetch_by_id<T: DeserializeOwned>(&self, table: &str, id: i64) -> AppResult<Option<T>> {
        let row: Option<serde_json::Value> =
            sqlx::query_scalar(&format!("SELECT data FROM {} WHERE id = $1", table))
                .bind(id)
                .fetch_optional(&self.pool)
                .await?;
        row.map(|value| serde_json::from_value(value).map_err(Into::into))
            .transpose()
    }
}

fn upsert_sql(table: &str) -> String {
    format!(
        "INSERT INTO {} (id, data) VALUES ($1, $2) \
         ON CONFLICT (id) DO UPDATE SET data = EXCLUDED.data",
        table
    )
}

fn to_json<T: Serialize>(entity: &T) -> AppResult<serde_json::Value> {
    serde_json::to_value(entity).map_err(Into::into)
}

#[async_trait]
impl RentalStore for PgStore {
    async fn vehicles(&self) -> AppResult<Vec<Vehicle>> {
        self.fetch_all("vehicles").await
    }

    async fn vehicle(&self, id: i64) -> AppResult<Option<Vehicle>> {
        self.fetch_by_id("vehicles", id).await
    }

    async fn drivers(&self) -> AppResult<Vec<Driver>> {
        self.fetch_all("drivers").await
    }

    async fn driver(&self, id: i64) -> AppResult<Option<Driver>> {
        self.fetch_by_id("drivers", id).await
    }

    async fn applications(&self) -> AppResult<Vec<RentalApplication>> {
        self.fetch_all("rental_applications").await
    }

    async fn application(&self, id: i64) -> AppResult<Option<RentalApplication>> {
        self.fetch_by_id("rental_applications", id).await
    }

    async fn commit(&self, batch: WriteBatch) -> AppResult<()> {
        let mut tx = self.pool.begin().await?;

        for id in &batch.deleted_drivers {
            sqlx::query("DELETE FROM drivers WHERE id = $1")
                .bind(id)
                .execute(&mut *tx)
                .await?;
        }
        for id in &batch.deleted_vehicles {
            sqlx::query("DELETE FROM vehicles WHERE id = $1")
                .bind(id)
                .execute(&mut *tx)
                .await?;
        }
        for vehicle in &batch.vehicles {
            sqlx::query(&upsert_sql("vehicles"))
                .bind(vehicle.id)
                .bind(to_json(vehicle)?)
                .execute(&mut *tx)
                .await?;
        }
        for driver in &batch.drivers {
            sqlx::query(&upsert_sql("drivers"))
                .bind(driver.id)
                .bind(to_json(driver)?)
                .execute(&mut *tx)
                .await?;
        }
        for application in &batch.applications {
            sqlx::query(&upsert_sql("rental_applications"))
                .bind(application.id)
                .bind(to_json(application)?)
                .execute(&mut *tx)
                .await?;
        }

        tx.commit().await?;
        Ok(())
    }

    async fn user(&self, email: &str) -> AppResult<Option<User>> {
        let row: Option<serde_json::Value> =
            sqlx::query_scalar("SELECT data FROM users WHERE email = $1")
                .bind(email)
                .fetch_optional(&self.pool)
                .await?;
        row.map(|value| serde_json::from_value(value).map_err(Into::into))
            .transpose()
    }

    async fn save_user(&self, user: User) -> AppResult<()> {
        // El hash de password se marca skip_serializing para las respuestas
        // HTTP, así que acá se persiste como columna aparte dentro del JSON.
        let mut data = to_json(&user)?;
        if let Some(object) = data.as_object_mut() {
            object.insert(
                "passwordHash".to_string(),
                serde_json::Value::String(user.password_hash.clone()),
            );
        }
        sqlx::query(
            "INSERT INTO users (email, data) VALUES ($1, $2) \
             ON CONFLICT (email) DO UPDATE SET data = EXCLUDED.data",
        )
        .bind(&user.email)
        .bind(data)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn verification(&self, token: &str) -> AppResult<Option<VerificationToken>> {
        let row: Option<serde_json::Value> =
            sqlx::query_scalar("SELECT data FROM verification_tokens WHERE token = $1")
                .bind(token)
                .fetch_optional(&self.pool)
                .await?;
        row.map(|value| serde_json::from_value(value).map_err(Into::into))
            .transpose()
    }

    async fn save_verification(&self, token: VerificationToken) -> AppResult<()> {
        sqlx::query(
            "INSERT INTO verification_tokens (token, data) VALUES ($1, $2) \
             ON CONFLICT (token) DO UPDATE SET data = EXCLUDED.data",
        )
        .bind(&token.token)
        .bind(to_json(&token)?)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn delete_verification(&self, token: &str) -> AppResult<()> {
        sqlx::query("DELETE FROM verification_tokens WHERE token = $1")
            .bind(token)
            .execute(&self.pool)
            .await?;
        Ok(())
    }
}
