//! Configuración de la aplicación
//!
//! Toda la configuración entra por variables de entorno (con `.env` en
//! desarrollo). Sin `DATABASE_URL` el servidor arranca con el store en
//! memoria; sin credenciales de email se loguea el enlace de verificación.

use anyhow::Context;
use std::env;

#[derive(Debug, Clone)]
pub struct EnvironmentConfig {
    pub host: String,
    pub port: u16,
    pub database_url: Option<String>,
    pub jwt_secret: String,
    pub jwt_expiration_hours: i64,
    pub upload_dir: String,
    pub frontend_url: String,
    pub email_api_url: Option<String>,
    pub email_api_key: Option<String>,
    pub email_sender: Option<String>,
    /// Cuenta admin sembrada al arrancar si ambas variables están presentes.
    pub admin_email: Option<String>,
    pub admin_password: Option<String>,
}

impl EnvironmentConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        let host = env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string());
        let port = env::var("PORT")
            .unwrap_or_else(|_| "3001".to_string())
            .parse::<u16>()
            .context("PORT must be a valid port number")?;

        let jwt_secret = env::var("JWT_SECRET")
            .unwrap_or_else(|_| "your-secret-key-change-in-production".to_string());
        let jwt_expiration_hours = env::var("JWT_EXPIRATION_HOURS")
            .unwrap_or_else(|_| "24".to_string())
            .parse::<i64>()
            .context("JWT_EXPIRATION_HOURS must be a number")?;

        Ok(Self {
            host,
            port,
            database_url: env::var("DATABASE_URL").ok().filter(|url| !url.is_empty()),
            jwt_secret,
            jwt_expiration_hours,
            upload_dir: env::var("UPLOAD_DIR").unwrap_or_else(|_| "uploads".to_string()),
            frontend_url: env::var("FRONTEND_URL")
                .unwrap_or_else(|_| "http://localhost:3000".to_string()),
            email_api_url: env::var("EMAIL_API_URL").ok().filter(|v| !v.is_empty()),
            email_api_key: env::var("EMAIL_API_KEY").ok().filter(|v| !v.is_empty()),
            email_sender: env::var("EMAIL_SENDER").ok().filter(|v| !v.is_empty()),
            admin_email: env::var("ADMIN_EMAIL").ok().filter(|v| !v.is_empty()),
            admin_password: env::var("ADMIN_PASSWORD").ok().filter(|v| !v.is_empty()),
        })
    }

    pub fn server_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
