use secrecy::{ExposeSecret, Secret};
use service_core::error::AppError;
use service_core::utils::constant_time_eq;

use crate::config::AdminConfig;
use crate::dtos::{AdminLoginRequest, AdminLoginResponse};
use crate::services::jwt::{AdminClaims, AdminTokenService};

/// Checks the single admin credential pair and hands out admin tokens.
#[derive(Clone)]
pub struct AdminService {
    username: String,
    password: Secret<String>,
    tokens: AdminTokenService,
}

impl AdminService {
    pub fn new(config: &AdminConfig) -> Self {
        Self {
            username: config.username.clone(),
            password: config.password.clone(),
            tokens: AdminTokenService::new(&config.token_secret, config.token_ttl_minutes),
        }
    }

    /// Surrounding whitespace is ignored on both fields.
    pub fn verify(&self, username: &str, password: &str) -> bool {
        // Evaluate both so timing does not reveal which field was wrong.
        let username_ok = constant_time_eq(&self.username, username.trim());
        let password_ok = constant_time_eq(self.password.expose_secret(), password.trim());
        username_ok & password_ok
    }

    pub fn login(&self, req: &AdminLoginRequest) -> Result<AdminLoginResponse, AppError> {
        if !self.verify(&req.username, req.password.expose_secret()) {
            return Err(AppError::Unauthorized(anyhow::anyhow!("Invalid credentials")));
        }

        let token = self.tokens.issue(&self.username)?;

        Ok(AdminLoginResponse {
            success: true,
            message: "Login successful".to_string(),
            token,
            expires_in: self.tokens.ttl_seconds(),
        })
    }

    pub fn validate_token(&self, token: &str) -> Result<AdminClaims, AppError> {
        self.tokens.validate(token)
    }
}
