//! Envío de emails de verificación
//!
//! El core solo necesita un booleano de éxito/fracaso; el transporte real
//! queda detrás del trait `Mailer`. `HttpMailer` habla con una API
//! transaccional vía HTTP; `LogMailer` solo registra el enlace y se usa en
//! desarrollo y tests.

use async_trait::async_trait;
use reqwest::Client;
use serde_json::json;
use tracing::{error, info};

use crate::utils::errors::AppResult;

#[async_trait]
pub trait Mailer: Send + Sync {
    /// Envía el enlace de verificación; devuelve `false` si el proveedor
    /// rechazó el envío (el caller decide cómo responder).
    async fn send_verification(&self, email: &str, token: &str) -> AppResult<bool>;
}

/// Mailer de desarrollo: registra el enlace en vez de enviarlo.
pub struct LogMailer {
    frontend_url: String,
}

impl LogMailer {
    pub fn new(frontend_url: String) -> Self {
        Self { frontend_url }
    }
}

#[async_trait]
impl Mailer for LogMailer {
    async fn send_verification(&self, email: &str, token: &str) -> AppResult<bool> {
        info!(
            "📧 Verification link for {}: {}/verify?token={}&email={}",
            email, self.frontend_url, token, email
        );
        Ok(true)
    }
}

/// Mailer de producción contra una API transaccional (estilo Brevo).
pub struct HttpMailer {
    client: Client,
    api_url: String,
    api_key: String,
    sender: String,
    frontend_url: String,
}

impl HttpMailer {
    pub fn new(api_url: String, api_key: String, sender: String, frontend_url: String) -> Self {
        Self {
            client: Client::new(),
            api_url,
            api_key,
            sender,
            frontend_url,
        }
    }
}

#[async_trait]
impl Mailer for HttpMailer {
    async fn send_verification(&self, email: &str, token: &str) -> AppResult<bool> {
        let verification_url = format!(
            "{}/verify?token={}&email={}",
            self.frontend_url, token, email
        );
        let payload = json!({
            "sender": { "email": self.sender },
            "to": [{ "email": email }],
            "subject": "Verify Your Email Address",
            "htmlContent": format!(
                "<h1>Email Verification</h1>\
                 <p>Please click the link below to verify your email address:</p>\
                 <a href=\"{}\">Verify Email</a>\
                 <p>This link will expire in 24 hours.</p>\
                 <p>If you didn't create an account, please ignore this email.</p>",
                verification_url
            ),
        });

        let response = self
            .client
            .post(&self.api_url)
            .header("api-key", &self.api_key)
            .json(&payload)
            .send()
            .await;

        match response {
            Ok(response) if response.status().is_success() => {
                info!("Verification email sent to {}", email);
                Ok(true)
            }
            Ok(response) => {
                error!(
                    "Email provider rejected the message for {}: {}",
                    email,
                    response.status()
                );
                Ok(false)
            }
            Err(e) => {
                error!("Error sending verification email to {}: {}", email, e);
                Ok(false)
            }
        }
    }
}
