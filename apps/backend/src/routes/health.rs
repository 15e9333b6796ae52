use actix_web::{web, HttpResponse};
use serde::Serialize;
use time::OffsetDateTime;

use crate::error::AppError;
use crate::state::app_state::AppState;

/// Liveness text. Clients only check for a 200.
pub async fn root() -> HttpResponse {
    HttpResponse::Ok()
        .content_type("text/plain; charset=utf-8")
        .body("Hello World")
}

/// Reported in place of the driver's error text, which stays in the logs.
const STORE_UNREACHABLE: &str = "store unreachable";

#[derive(Debug, Serialize)]
struct HealthResponse {
    status: &'static str,
    app_version: &'static str,
    store: &'static str,
    store_status: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    store_error: Option<&'static str>,
    migrations: String,
    access_policy: &'static str,
    time: String,
}

async fn health(app_state: web::Data<AppState>) -> Result<HttpResponse, AppError> {
    let time = OffsetDateTime::now_utc()
        .format(&time::format_description::well_known::Rfc3339)
        .unwrap_or_else(|_| "unknown".to_string());

    let store = &app_state.store;
    let (store_status, store_error, migrations) = match store.ping().await {
        Ok(()) => {
            let migrations = match store.schema_version().await {
                Ok(Some(version)) => version,
                Ok(None) => "none".to_string(),
                Err(_) => "unknown".to_string(),
            };
            ("ok", None, migrations)
        }
        Err(e) => {
            tracing::warn!(error = %e, "health_store_ping_failed");
            ("error", Some(STORE_UNREACHABLE), "unknown".to_string())
        }
    };

    let response = HealthResponse {
        status: if store_error.is_none() { "ok" } else { "degraded" },
        app_version: env!("CARGO_PKG_VERSION"),
        store: store.backend_name(),
        store_status,
        store_error,
        migrations,
        access_policy: app_state.access.as_str(),
        time,
    };

    Ok(HttpResponse::Ok().json(response))
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/", web::get().to(root))
        .route("/health", web::get().to(health));
}
