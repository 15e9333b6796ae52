use actix_web::dev::Payload;
use actix_web::http::header::AUTHORIZATION;
use actix_web::{FromRequest, HttpMessage, HttpRequest};
use futures_util::future::{ready, Ready};

use super::app_state;
use crate::auth::{verify_token, Claims};
use crate::error::{AppError, UnauthorizedReason};

/// A caller holding a valid, unexpired token.
#[derive(Debug, Clone)]
pub struct Authenticated(pub Claims);

impl Authenticated {
    pub fn claims(&self) -> &Claims {
        &self.0
    }

    pub fn email(&self) -> Option<&str> {
        self.0.email.as_deref()
    }
}

/// The token is the second field of `"<scheme> <token>"`. The scheme word
/// itself is not checked.
pub fn bearer_token(req: &HttpRequest) -> Result<&str, AppError> {
    let header = req
        .headers()
        .get(AUTHORIZATION)
        .ok_or(AppError::unauthorized(UnauthorizedReason::MissingHeader))?;
    let value = header
        .to_str()
        .map_err(|_| AppError::unauthorized(UnauthorizedReason::MalformedHeader))?;

    match value.split(' ').nth(1) {
        Some(token) if !token.is_empty() => Ok(token),
        _ => Err(AppError::unauthorized(UnauthorizedReason::MalformedHeader)),
    }
}

/// Verify the request's token once; later calls on the same request reuse
/// the claims stored in its extensions.
pub fn authenticate(req: &HttpRequest) -> Result<Claims, AppError> {
    if let Some(claims) = req.extensions().get::<Claims>() {
        return Ok(claims.clone());
    }

    let token = bearer_token(req)?;
    let state = app_state(req)?;
    let claims = verify_token(token, &state.security)?;

    req.extensions_mut().insert(claims.clone());
    Ok(claims)
}

impl FromRequest for Authenticated {
    type Error = AppError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        ready(authenticate(req).map(Authenticated))
    }
}
