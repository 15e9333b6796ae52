use std::time::SystemTime;

use actix_web::{web, HttpResponse};
use tracing::info;

use crate::auth::issue_token;
use crate::error::AppError;
use crate::extractors::ValidatedJson;
use crate::logging::pii::Redacted;
use crate::state::app_state::AppState;
use crate::store::Document;

/// Sign whatever claims the client sends; the token is returned as plain
/// text.
async fn issue(
    body: ValidatedJson<Document>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let claims = body.into_inner();
    let email = claims
        .get("email")
        .and_then(|v| v.as_str())
        .map(str::to_string);

    let token = issue_token(claims, SystemTime::now(), &app_state.security)?;

    info!(
        email = %Redacted(email.as_deref().unwrap_or("none")),
        "token_issued"
    );
    Ok(HttpResponse::Ok()
        .content_type("text/plain; charset=utf-8")
        .body(token))
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(web::resource("/jwt").route(web::post().to(issue)));
}
