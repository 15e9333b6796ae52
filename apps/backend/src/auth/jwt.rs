use std::time::{SystemTime, UNIX_EPOCH};

use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde_json::{Map, Value};

use super::claims::Claims;
use crate::error::{AppError, UnauthorizedReason};
use crate::state::security_config::SecurityConfig;

/// Access tokens live for 24 hours from issuance.
pub const TOKEN_TTL_SECS: i64 = 24 * 60 * 60;

/// Keys the server always sets itself.
const SERVER_CLAIMS: [&str; 2] = ["iat", "exp"];

/// Sign the caller-supplied claims with a 24-hour expiry.
///
/// Any `iat` / `exp` in `payload` is replaced. A present `email` must be a
/// string.
pub fn issue_token(
    mut payload: Map<String, Value>,
    now: SystemTime,
    security: &SecurityConfig,
) -> Result<String, AppError> {
    let iat = now
        .duration_since(UNIX_EPOCH)
        .map_err(|_| AppError::internal("Failed to get current time"))?
        .as_secs() as i64;

    for key in SERVER_CLAIMS {
        payload.remove(key);
    }

    let email = match payload.remove("email") {
        None | Some(Value::Null) => None,
        Some(Value::String(email)) => Some(email),
        Some(_) => return Err(AppError::bad_request("email claim must be a string")),
    };

    let claims = Claims {
        email,
        iat,
        exp: iat + TOKEN_TTL_SECS,
        extra: payload,
    };

    encode(
        &Header::new(security.algorithm),
        &claims,
        &EncodingKey::from_secret(&security.jwt_secret),
    )
    .map_err(|e| AppError::internal(format!("Failed to encode JWT: {e}")))
}

/// Verify a token and return its claims. Expiry is checked with no leeway.
pub fn verify_token(token: &str, security: &SecurityConfig) -> Result<Claims, AppError> {
    let mut validation = Validation::new(security.algorithm);
    validation.leeway = 0;
    validation.validate_aud = false;

    decode::<Claims>(
        token,
        &DecodingKey::from_secret(&security.jwt_secret),
        &validation,
    )
    .map(|data| data.claims)
    .map_err(|e| match e.kind() {
        ErrorKind::ExpiredSignature => AppError::unauthorized(UnauthorizedReason::ExpiredToken),
        ErrorKind::InvalidSignature => AppError::unauthorized(UnauthorizedReason::BadSignature),
        _ => AppError::unauthorized(UnauthorizedReason::InvalidToken),
    })
}
