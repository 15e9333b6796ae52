use actix_web::{web, HttpResponse};

use crate::error::AppError;

pub mod admin;
pub mod auth;
pub mod carts;
pub mod health;
pub mod menu;
pub mod payments;
pub mod reviews;
pub mod users;

/// Register every route. Used by `main.rs` and by the test app builder so
/// both serve the same surface.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.app_data(
        web::QueryConfig::default()
            .error_handler(|_, _| AppError::bad_request("invalid query string").into()),
    )
    .app_data(
        web::PathConfig::default()
            .error_handler(|_, _| AppError::bad_request("invalid path").into()),
    );

    cfg.configure(health::configure_routes)
        .configure(auth::configure_routes)
        .configure(users::configure_routes)
        .configure(menu::configure_routes)
        .configure(reviews::configure_routes)
        .configure(carts::configure_routes)
        .configure(payments::configure_routes)
        .configure(admin::configure_routes);
}

/// Fallback for unknown routes.
pub async fn not_found() -> Result<HttpResponse, AppError> {
    Err(AppError::NotFound)
}
