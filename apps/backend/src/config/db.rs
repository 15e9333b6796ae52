use std::env;

use crate::error::AppError;

/// Builds the Postgres URL for the document store from environment variables
pub fn db_url() -> Result<String, AppError> {
    let host = host();
    let port = port()?;
    let db_name = must_var("DB_NAME")?;
    let username = must_var("DB_USER")?;
    let password = must_var("DB_PASSWORD")?;

    Ok(format!(
        "postgresql://{username}:{password}@{host}:{port}/{db_name}"
    ))
}

/// Get database host from environment (defaults to localhost)
fn host() -> String {
    env::var("DB_HOST").unwrap_or_else(|_| "localhost".to_string())
}

/// Get database port from environment (defaults to 5432)
fn port() -> Result<u16, AppError> {
    match env::var("DB_PORT") {
        Ok(raw) => raw
            .trim()
            .parse::<u16>()
            .map_err(|_| AppError::config(format!("DB_PORT must be a port number, got '{raw}'"))),
        Err(_) => Ok(5432),
    }
}

/// Get required environment variable or return error
pub(crate) fn must_var(name: &str) -> Result<String, AppError> {
    match env::var(name) {
        Ok(value) if !value.trim().is_empty() => Ok(value),
        _ => Err(AppError::config(format!(
            "Required environment variable '{name}' is not set"
        ))),
    }
}
