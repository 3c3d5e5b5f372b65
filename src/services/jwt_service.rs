//! Servicio JWT
//!
//! Emite y valida los bearer tokens devueltos por el login. El core del
//! ciclo de vida confía en el rol que viene en el token sin re-validarlo.

use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

use crate::models::UserRole;
use crate::utils::errors::{AppError, AppResult};

#[derive(Debug, Serialize, Deserialize)]
pub struct JwtClaims {
    /// Email del usuario autenticado
    pub sub: String,
    pub role: UserRole,
    pub exp: i64,
    pub iat: i64,
}

#[derive(Clone)]
pub struct JwtService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    token_duration: Duration,
}

impl JwtService {
    pub fn new(secret: &str, expiration_hours: i64) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            token_duration: Duration::hours(expiration_hours),
        }
    }

    /// Genera un token de acceso para el usuario
    pub fn generate_token(&self, email: &str, role: UserRole) -> AppResult<String> {
        let now = Utc::now();
        let claims = JwtClaims {
            sub: email.to_string(),
            role,
            exp: (now + self.token_duration).timestamp(),
            iat: now.timestamp(),
        };

        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)
            .map_err(|e| AppError::Internal(format!("Error generating token: {}", e)))
    }

    /// Valida y decodifica un token
    pub fn validate_token(&self, token: &str) -> AppResult<JwtClaims> {
        let validation = Validation::new(Algorithm::HS256);
        decode::<JwtClaims>(token, &self.decoding_key, &validation)
            .map(|data| data.claims)
            .map_err(|e| AppError::Unauthorized(format!("Invalid token: {}", e)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_trip_preserves_identity_and_role() {
        let jwt = JwtService::new("test-secret", 24);
        let token = jwt.generate_token("admin@example.com", UserRole::Admin).unwrap();
        let claims = jwt.validate_token(&token).unwrap();
        assert_eq!(claims.sub, "admin@example.com");
        assert_eq!(claims.role, UserRole::Admin);
    }

    #[test]
    fn token_signed_with_other_secret_is_rejected() {
        let jwt = JwtService::new("secret-a", 24);
        let other = JwtService::new("secret-b", 24);
        let token = jwt.generate_token("user@example.com", UserRole::User).unwrap();
        assert!(other.validate_token(&token).is_err());
    }
}
