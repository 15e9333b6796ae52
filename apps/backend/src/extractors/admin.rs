use std::future::Future;
use std::pin::Pin;

use actix_web::dev::Payload;
use actix_web::{FromRequest, HttpRequest};
use futures_util::future::{ready, Ready};
use tracing::info;

use super::app_state;
use super::auth::authenticate;
use crate::auth::Claims;
use crate::error::AppError;
use crate::logging::pii::Redacted;
use crate::services::users;

/// An authenticated caller whose stored user record has a truthy `admin`
/// flag. The role is read from the store on every request, never from the
/// token.
#[derive(Debug, Clone)]
pub struct Admin(pub Claims);

async fn require_admin(req: HttpRequest) -> Result<Claims, AppError> {
    let claims = authenticate(&req)?;
    let state = app_state(&req)?;

    let Some(email) = claims.email.as_deref() else {
        info!("admin_denied_no_email");
        return Err(AppError::forbidden());
    };
    if !users::is_admin(&state.users(), email).await? {
        info!(email = %Redacted(email), "admin_denied");
        return Err(AppError::forbidden());
    }
    Ok(claims)
}

impl FromRequest for Admin {
    type Error = AppError;
    type Future = Pin<Box<dyn Future<Output = Result<Self, Self::Error>>>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let req = req.clone();
        Box::pin(async move { require_admin(req).await.map(Admin) })
    }
}

/// Admin gate that only applies under the uniform access policy.
/// `None` when the policy leaves the route open.
#[derive(Debug, Clone)]
pub struct PolicyAdmin(pub Option<Claims>);

impl FromRequest for PolicyAdmin {
    type Error = AppError;
    type Future = Pin<Box<dyn Future<Output = Result<Self, Self::Error>>>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let req = req.clone();
        Box::pin(async move {
            if app_state(&req)?.access.is_open() {
                return Ok(PolicyAdmin(None));
            }
            require_admin(req).await.map(|claims| PolicyAdmin(Some(claims)))
        })
    }
}

/// Authentication that only applies under the uniform access policy.
#[derive(Debug, Clone)]
pub struct PolicyAuth(pub Option<Claims>);

impl FromRequest for PolicyAuth {
    type Error = AppError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let outcome = app_state(req).and_then(|state| {
            if state.access.is_open() {
                Ok(PolicyAuth(None))
            } else {
                authenticate(req).map(|claims| PolicyAuth(Some(claims)))
            }
        });
        ready(outcome)
    }
}
