use actix_web::{web, HttpResponse};

use crate::error::AppError;
use crate::extractors::{Admin, ValidatedJson};
use crate::services::{menu, parse_id};
use crate::state::app_state::AppState;
use crate::store::Document;

async fn list(app_state: web::Data<AppState>) -> Result<HttpResponse, AppError> {
    Ok(HttpResponse::Ok().json(menu::list(&app_state.menu()).await?))
}

/// Returns `null` when the item does not exist.
async fn get(
    id: web::Path<String>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let id = parse_id(&id)?;
    Ok(HttpResponse::Ok().json(menu::get(&app_state.menu(), &id).await?))
}

async fn insert(
    _admin: Admin,
    body: ValidatedJson<Document>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    Ok(HttpResponse::Ok().json(menu::insert(&app_state.menu(), body.into_inner()).await?))
}

async fn upsert(
    _admin: Admin,
    id: web::Path<String>,
    body: ValidatedJson<Document>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let id = parse_id(&id)?;
    Ok(HttpResponse::Ok().json(menu::upsert(&app_state.menu(), &id, &body).await?))
}

async fn delete(
    _admin: Admin,
    id: web::Path<String>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let id = parse_id(&id)?;
    Ok(HttpResponse::Ok().json(menu::delete(&app_state.menu(), &id).await?))
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::resource("/menu")
            .route(web::get().to(list))
            .route(web::post().to(insert)),
    )
    .service(
        web::resource("/menu/{id}")
            .route(web::get().to(get))
            .route(web::post().to(upsert))
            .route(web::delete().to(delete)),
    );
}
