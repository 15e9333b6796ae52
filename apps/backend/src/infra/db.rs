use migration::{migrate, MigrationCommand};
use sea_orm::{ConnectOptions, ConnectionTrait, Database, DatabaseConnection};
use tracing::info;

use crate::config::db::db_url;
use crate::error::AppError;

/// Connect to the configured Postgres database. Runs no migrations.
pub async fn connect_db() -> Result<DatabaseConnection, AppError> {
    let url = db_url()?;
    connect_url(&url).await
}

pub async fn connect_url(url: &str) -> Result<DatabaseConnection, AppError> {
    let mut options = ConnectOptions::new(url.to_string());
    options.sqlx_logging(false);
    Database::connect(options)
        .await
        .map_err(|e| AppError::config(format!("database connection failed: {e}")))
}

/// Connect and bring the schema up to date.
pub async fn bootstrap_db() -> Result<DatabaseConnection, AppError> {
    let conn = connect_db().await?;
    migrate(&conn, MigrationCommand::Up)
        .await
        .map_err(|e| AppError::config(format!("migrations failed: {e}")))?;
    info!(backend = ?conn.get_database_backend(), "database_ready");
    Ok(conn)
}
