use actix_web::{web, HttpResponse};
use serde::Deserialize;

use crate::error::AppError;
use crate::extractors::{Authenticated, PolicyAuth, ValidatedJson};
use crate::services::{carts, parse_id, users};
use crate::state::app_state::AppState;
use crate::store::Document;

#[derive(Debug, Deserialize)]
pub struct EmailQuery {
    pub email: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct IdQuery {
    pub id: Option<String>,
}

async fn add(
    body: ValidatedJson<Document>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    Ok(HttpResponse::Ok().json(carts::add(&app_state.carts(), body.into_inner()).await?))
}

/// Only the token's own email may be listed. No email lists nothing.
async fn list(
    auth: Authenticated,
    query: web::Query<EmailQuery>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let email = match query.email.as_deref() {
        None | Some("") => return Ok(HttpResponse::Ok().json(Vec::<Document>::new())),
        Some(email) => email,
    };
    if !auth.claims().is_for(email) {
        return Err(AppError::SelfOnlyMismatch);
    }
    Ok(HttpResponse::Ok().json(carts::list_for(&app_state.carts(), email).await?))
}

/// Under the uniform policy the caller must own the item or be an admin.
async fn delete(
    gate: PolicyAuth,
    query: web::Query<IdQuery>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let id = parse_id(query.id.as_deref().unwrap_or_default())?;
    let collection = app_state.carts();

    if let Some(claims) = gate.0 {
        if let Some(item) = carts::get(&collection, &id).await? {
            let caller = claims.email.as_deref().unwrap_or_default();
            let owns = carts::owner_of(&item).is_some_and(|owner| claims.is_for(owner));
            if !owns && !users::is_admin(&app_state.users(), caller).await? {
                carts::log_owner_mismatch(&id, caller);
                return Err(AppError::forbidden());
            }
        }
    }

    Ok(HttpResponse::Ok().json(carts::delete(&collection, &id).await?))
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::resource("/carts")
            .route(web::post().to(add))
            .route(web::get().to(list))
            .route(web::delete().to(delete)),
    );
}
