use std::env;

use secrecy::SecretString;

use crate::{
    errors::{AppError, AppResult},
    services::grading::GradingStrategy,
};

const DEV_JWT_SECRET: &str = "dev_secret_key_change_in_production";

#[derive(Clone, Debug)]
pub struct Config {
    pub jwt_secret: SecretString,
    pub jwt_expiration_hours: i64,
    pub grading_strategy: GradingStrategy,
    pub seed_demo_data: bool,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Self {
        Self {
            jwt_secret: SecretString::from(
                env::var("JWT_SECRET").unwrap_or_else(|_| DEV_JWT_SECRET.to_string()),
            ),
            jwt_expiration_hours: env::var("JWT_EXPIRATION_HOURS")
                .ok()
                .and_then(|h| h.parse().ok())
                .unwrap_or(24),
            grading_strategy: env::var("GRADING_STRATEGY")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or_default(),
            seed_demo_data: env::var("SEED_DEMO_DATA")
                .ok()
                .map(|v| parse_flag(&v))
                .unwrap_or(true),
            rust_log: env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
        }
    }

    /// Rejects configuration that still carries development secrets.
    pub fn validate_for_production(&self) -> AppResult<()> {
        use secrecy::ExposeSecret;

        let jwt_secret = self.jwt_secret.expose_secret();

        if jwt_secret == DEV_JWT_SECRET {
            return Err(AppError::InternalError(
                "JWT_SECRET is using the development default".to_string(),
            ));
        }

        if jwt_secret.len() < 32 {
            return Err(AppError::InternalError(format!(
                "JWT_SECRET is too short ({}), at least 32 characters are required",
                jwt_secret.len()
            )));
        }

        Ok(())
    }

    #[cfg(test)]
    pub fn test_config() -> Self {
        Self {
            jwt_secret: SecretString::from("test_jwt_secret_key".to_string()),
            jwt_expiration_hours: 1,
            grading_strategy: GradingStrategy::Exact,
            seed_demo_data: false,
            rust_log: "error".to_string(),
        }
    }
}

fn parse_flag(value: &str) -> bool {
    matches!(
        value.trim().to_lowercase().as_str(),
        "1" | "true" | "yes" | "on"
    )
}
