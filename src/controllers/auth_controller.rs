//! Controller de autenticación
//!
//! Registro con verificación de email por token de un solo uso (24 horas)
//! y login con JWT. Los usuarios se guardan keyed por email; el hash bcrypt
//! nunca sale en una respuesta.

use axum::http::StatusCode;
use axum::Json;
use chrono::{Duration, Utc};
use tracing::{info, warn};
use validator::Validate;

use crate::dto::auth_dto::{
    LoginRequest, LoginResponse, MessageResponse, PublicUser, ResendVerificationRequest,
    SignupRequest, SignupResponse, VerifyEmailRequest,
};
use crate::models::{User, UserRole, VerificationToken};
use crate::repositories::RentalStore;
use crate::state::AppState;
use crate::utils::errors::{AppError, AppResult};

const VERIFICATION_TOKEN_HOURS: i64 = 24;

fn generate_verification_token() -> String {
    let bytes: [u8; 32] = rand::random();
    bytes.iter().map(|b| format!("{:02x}", b)).collect()
}

/// Siembra la cuenta admin configurada por entorno (ADMIN_EMAIL /
/// ADMIN_PASSWORD). Idempotente: si la cuenta ya existe no la toca.
pub async fn ensure_admin_user(
    store: &dyn RentalStore,
    email: &str,
    password: &str,
) -> AppResult<()> {
    let email = email.to_lowercase();
    if store.user(&email).await?.is_some() {
        return Ok(());
    }

    let password_hash = bcrypt::hash(password, bcrypt::DEFAULT_COST)
        .map_err(|e| AppError::Internal(format!("Error hashing password: {}", e)))?;
    store
        .save_user(User {
            email: email.clone(),
            password_hash,
            role: UserRole::Admin,
            verified: true,
            created_at: Utc::now(),
        })
        .await?;
    info!("👑 Admin account seeded: {}", email);
    Ok(())
}

pub struct AuthController {
    state: AppState,
}

impl AuthController {
    pub fn new(state: AppState) -> Self {
        Self { state }
    }

    pub async fn signup(
        &self,
        request: SignupRequest,
    ) -> AppResult<(StatusCode, Json<SignupResponse>)> {
        request.validate()?;
        let email = request.email.to_lowercase();

        if self.state.store.user(&email).await?.is_some() {
            return Err(AppError::Conflict("User already exists".to_string()));
        }

        let password_hash = bcrypt::hash(&request.password, bcrypt::DEFAULT_COST)
            .map_err(|e| AppError::Internal(format!("Error hashing password: {}", e)))?;
        let user = User {
            email: email.clone(),
            password_hash,
            role: UserRole::User,
            verified: false,
            created_at: Utc::now(),
        };
        self.state.store.save_user(user.clone()).await?;

        self.issue_verification(&email).await?;
        info!("🆕 User signed up: {}", email);

        Ok((
            StatusCode::CREATED,
            Json(SignupResponse {
                message: "User created successfully. Please check your email to verify your account."
                    .to_string(),
                user: PublicUser::from(&user),
            }),
        ))
    }

    pub async fn login(&self, request: LoginRequest) -> AppResult<Json<LoginResponse>> {
        request.validate()?;
        let email = request.email.to_lowercase();

        let user = self
            .state
            .store
            .user(&email)
            .await?
            .ok_or_else(|| AppError::Unauthorized("Invalid credentials".to_string()))?;
        let valid = bcrypt::verify(&request.password, &user.password_hash)
            .map_err(|e| AppError::Internal(format!("Error verifying password: {}", e)))?;
        if !valid {
            return Err(AppError::Unauthorized("Invalid credentials".to_string()));
        }
        if !user.verified {
            return Err(AppError::VerificationRequired);
        }

        let token = self.state.jwt.generate_token(&user.email, user.role)?;
        info!("🔑 User logged in: {}", email);

        Ok(Json(LoginResponse {
            message: "Login successful".to_string(),
            token,
            user: PublicUser::from(&user),
        }))
    }

    pub async fn verify_email(
        &self,
        request: VerifyEmailRequest,
    ) -> AppResult<Json<MessageResponse>> {
        if request.token.is_empty() || request.email.is_empty() {
            return Err(AppError::Validation(
                "Token and email are required".to_string(),
            ));
        }
        let email = request.email.to_lowercase();

        let record = self
            .state
            .store
            .verification(&request.token)
            .await?
            .ok_or_else(|| {
                AppError::Validation("Invalid or expired verification token".to_string())
            })?;
        if !record.email.eq_ignore_ascii_case(&email) {
            return Err(AppError::Validation(
                "Invalid or expired verification token".to_string(),
            ));
        }
        if record.is_expired() {
            self.state.store.delete_verification(&request.token).await?;
            return Err(AppError::Validation(
                "Verification token has expired".to_string(),
            ));
        }

        let mut user = self
            .state
            .store
            .user(&record.email)
            .await?
            .ok_or_else(|| {
                AppError::Validation("Invalid or expired verification token".to_string())
            })?;
        user.verified = true;
        self.state.store.save_user(user).await?;
        self.state.store.delete_verification(&request.token).await?;
        info!("✅ Email verified: {}", email);

        Ok(Json(MessageResponse {
            message: "Email verified successfully".to_string(),
        }))
    }

    pub async fn resend_verification(
        &self,
        request: ResendVerificationRequest,
    ) -> AppResult<Json<MessageResponse>> {
        request.validate()?;
        let email = request.email.to_lowercase();

        let user = self
            .state
            .store
            .user(&email)
            .await?
            .ok_or_else(|| AppError::NotFound("User not found".to_string()))?;
        if user.verified {
            return Err(AppError::Validation(
                "Email is already verified".to_string(),
            ));
        }

        self.issue_verification(&email).await?;

        Ok(Json(MessageResponse {
            message: "Verification email sent".to_string(),
        }))
    }

    async fn issue_verification(&self, email: &str) -> AppResult<()> {
        let token = generate_verification_token();
        self.state
            .store
            .save_verification(VerificationToken {
                token: token.clone(),
                email: email.to_string(),
                expires_at: Utc::now() + Duration::hours(VERIFICATION_TOKEN_HOURS),
            })
            .await?;

        let sent = self.state.mailer.send_verification(email, &token).await?;
        if !sent {
            warn!("Verification email could not be delivered to {}", email);
            return Err(AppError::Internal(
                "Failed to send verification email".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn verification_tokens_are_hex_and_unique() {
        let a = generate_verification_token();
        let b = generate_verification_token();
        assert_eq!(a.len(), 64);
        assert!(a.chars().all(|c| c.is_ascii_hexdigit()));
        assert_ne!(a, b);
    }
}
