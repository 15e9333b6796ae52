//! Process configuration read once at start-up.

use std::env;
use std::str::FromStr;

use super::db::must_var;
use crate::error::AppError;
use crate::state::access_policy::AccessPolicy;

const DEFAULT_PORT: u16 = 4000;
const DEFAULT_PAYMENT_API_BASE: &str = "https://api.stripe.com";

/// Where documents are persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreBackend {
    Postgres,
    Memory,
}

impl FromStr for StoreBackend {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "postgres" | "postgresql" => Ok(StoreBackend::Postgres),
            "memory" => Ok(StoreBackend::Memory),
            other => Err(AppError::config(format!(
                "STORE_BACKEND must be 'postgres' or 'memory', got '{other}'"
            ))),
        }
    }
}

#[derive(Clone)]
pub struct PaymentConfig {
    pub secret_key: String,
    pub api_base: String,
}

impl std::fmt::Debug for PaymentConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PaymentConfig")
            .field("secret_key", &"[REDACTED]")
            .field("api_base", &self.api_base)
            .finish()
    }
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub token_secret: String,
    pub payment: PaymentConfig,
    pub store: StoreBackend,
    pub access: AccessPolicy,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, AppError> {
        let host = env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string());
        let port = match env::var("PORT").or_else(|_| env::var("port")) {
            Ok(raw) => raw
                .trim()
                .parse::<u16>()
                .map_err(|_| AppError::config(format!("PORT must be a port number, got '{raw}'")))?,
            Err(_) => DEFAULT_PORT,
        };

        let token_secret = must_var("TOKEN_SECRET")?;
        let payment = PaymentConfig {
            secret_key: must_var("PAYMENT_SECRET_KEY")?,
            api_base: env::var("PAYMENT_API_BASE")
                .map(|base| base.trim_end_matches('/').to_string())
                .unwrap_or_else(|_| DEFAULT_PAYMENT_API_BASE.to_string()),
        };

        let store = match env::var("STORE_BACKEND") {
            Ok(raw) => raw.parse()?,
            Err(_) => StoreBackend::Postgres,
        };
        let access = match env::var("ACCESS_POLICY") {
            Ok(raw) => raw.parse()?,
            Err(_) => AccessPolicy::default(),
        };

        Ok(Self {
            host,
            port,
            token_secret,
            payment,
            store,
            access,
        })
    }
}
