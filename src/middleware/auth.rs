//! Extractor de autenticación
//!
//! `AuthUser` valida el token Bearer contra el `JwtService` del estado.
//! Los handlers que aceptan `Option<AuthUser>` tratan la ausencia de token
//! como anónimo en vez de rechazar la request.

use axum::async_trait;
use axum::extract::FromRequestParts;
use axum::http::header::AUTHORIZATION;
use axum::http::request::Parts;

use crate::models::UserRole;
use crate::state::AppState;
use crate::utils::errors::AppError;

#[derive(Debug, Clone)]
pub struct AuthUser {
    pub email: String,
    pub role: UserRole,
}

#[async_trait]
impl FromRequestParts<AppState> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, AppError> {
        let header = parts
            .headers
            .get(AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .ok_or_else(|| AppError::Unauthorized("Missing authorization header".to_string()))?;

        let token = header
            .strip_prefix("Bearer ")
            .ok_or_else(|| AppError::Unauthorized("Invalid authorization header".to_string()))?;

        let claims = state.jwt.validate_token(token)?;
        Ok(AuthUser {
            email: claims.sub,
            role: claims.role,
        })
    }
}
