use actix_web::{web, HttpResponse};

use crate::error::AppError;
use crate::extractors::Admin;
use crate::services::stats;
use crate::state::app_state::AppState;

async fn admin_stats(
    _admin: Admin,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    Ok(HttpResponse::Ok().json(stats::admin_stats(&app_state).await?))
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(web::resource("/adminstats").route(web::get().to(admin_stats)));
}
