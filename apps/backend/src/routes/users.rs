use actix_web::{web, HttpResponse};
use serde::Deserialize;
use serde_json::json;

use crate::error::{AppError, UnauthorizedReason};
use crate::extractors::{Admin, Authenticated, PolicyAdmin, ValidatedJson};
use crate::services::{parse_id, users};
use crate::state::app_state::AppState;
use crate::store::Document;

#[derive(Debug, Deserialize)]
pub struct AdminFlag {
    pub admin: bool,
}

/// `{admin}` for the caller's own record, `{}` when no record exists.
async fn admin_status(
    auth: Authenticated,
    email: web::Path<String>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let email = email.into_inner();
    if !auth.claims().is_for(&email) {
        return Err(AppError::unauthorized(UnauthorizedReason::EmailMismatch));
    }

    let body = match users::admin_status(&app_state.users(), &email).await? {
        Some(admin) => json!({ "admin": admin }),
        None => json!({}),
    };
    Ok(HttpResponse::Ok().json(body))
}

async fn set_admin(
    _gate: PolicyAdmin,
    id: web::Path<String>,
    body: ValidatedJson<AdminFlag>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let id = parse_id(&id)?;
    let result = users::set_admin(&app_state.users(), &id, body.admin).await?;
    Ok(HttpResponse::Ok().json(result))
}

async fn list(_admin: Admin, app_state: web::Data<AppState>) -> Result<HttpResponse, AppError> {
    Ok(HttpResponse::Ok().json(users::list(&app_state.users()).await?))
}

async fn delete(
    _gate: PolicyAdmin,
    id: web::Path<String>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let id = parse_id(&id)?;
    Ok(HttpResponse::Ok().json(users::delete(&app_state.users(), &id).await?))
}

async fn register(
    body: ValidatedJson<Document>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let outcome = users::register(&app_state.users(), body.into_inner()).await?;
    Ok(HttpResponse::Ok().json(outcome))
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::resource("/users/admin/{key}")
            .route(web::get().to(admin_status))
            .route(web::patch().to(set_admin)),
    )
    .service(
        web::resource("/users")
            .route(web::get().to(list))
            .route(web::post().to(register)),
    )
    .service(web::resource("/users/{id}").route(web::delete().to(delete)));
}
