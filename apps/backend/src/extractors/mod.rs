pub mod admin;
pub mod auth;
pub mod validated_json;

use actix_web::{web, HttpRequest};

pub use admin::{Admin, PolicyAdmin, PolicyAuth};
pub use auth::Authenticated;
pub use validated_json::ValidatedJson;

use crate::error::AppError;
use crate::state::app_state::AppState;

pub(crate) fn app_state(req: &HttpRequest) -> Result<web::Data<AppState>, AppError> {
    req.app_data::<web::Data<AppState>>()
        .cloned()
        .ok_or_else(|| AppError::internal("AppState not available"))
}
