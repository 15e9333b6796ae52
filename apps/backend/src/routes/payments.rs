use actix_web::{web, HttpResponse};

use crate::error::AppError;
use crate::extractors::{Authenticated, ValidatedJson};
use crate::services::{checkout, intents};
use crate::state::app_state::AppState;
use crate::store::{Document, Filter};

async fn create_intent(
    _auth: Authenticated,
    body: ValidatedJson<Document>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let secret =
        intents::create_payment_intent(app_state.payments.as_ref(), body.get("price")).await?;
    Ok(HttpResponse::Ok().json(secret))
}

async fn record(
    body: ValidatedJson<Document>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let outcome = checkout::complete_payment(
        &app_state.payments_collection(),
        &app_state.carts(),
        body.into_inner(),
    )
    .await?;
    Ok(HttpResponse::Ok().json(outcome))
}

async fn list(
    _auth: Authenticated,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let payments = app_state.payments_collection().find(&Filter::All).await?;
    Ok(HttpResponse::Ok().json(payments))
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(web::resource("/create-payment-intent").route(web::post().to(create_intent)))
        .service(
            web::resource("/payments")
                .route(web::post().to(record))
                .route(web::get().to(list)),
        );
}
