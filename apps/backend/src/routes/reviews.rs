use actix_web::{web, HttpResponse};

use crate::error::AppError;
use crate::state::app_state::AppState;
use crate::store::Filter;

async fn list(app_state: web::Data<AppState>) -> Result<HttpResponse, AppError> {
    let reviews = app_state.reviews().find(&Filter::All).await?;
    Ok(HttpResponse::Ok().json(reviews))
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(web::resource("/reviews").route(web::get().to(list)));
}
