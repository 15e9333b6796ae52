use actix_web::error::ResponseError;
use actix_web::http::StatusCode;
use actix_web::HttpResponse;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::payments::PaymentError;
use crate::store::StoreError;
use crate::trace_ctx;

/// Uniform error body returned for every failure.
#[derive(Debug, Serialize, Deserialize, PartialEq)]
pub struct ErrorBody {
    pub error: bool,
    pub message: String,
}

/// Why an authentication attempt failed. Logged, never sent to the client.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnauthorizedReason {
    MissingHeader,
    MalformedHeader,
    ExpiredToken,
    BadSignature,
    InvalidToken,
    EmailMismatch,
}

impl UnauthorizedReason {
    pub fn as_str(self) -> &'static str {
        match self {
            UnauthorizedReason::MissingHeader => "missing_header",
            UnauthorizedReason::MalformedHeader => "malformed_header",
            UnauthorizedReason::ExpiredToken => "token_expired",
            UnauthorizedReason::BadSignature => "invalid_signature",
            UnauthorizedReason::InvalidToken => "invalid_token",
            UnauthorizedReason::EmailMismatch => "email_mismatch",
        }
    }
}

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Unauthorized ({})", .0.as_str())]
    Unauthorized(UnauthorizedReason),
    /// Self-only resource requested for somebody else. Rendered as 401 with
    /// the "forbidden access" message; clients depend on that pairing.
    #[error("Self-only resource mismatch")]
    SelfOnlyMismatch,
    #[error("Forbidden")]
    Forbidden,
    #[error("Bad request: {detail}")]
    BadRequest { detail: String },
    #[error("Not found")]
    NotFound,
    #[error("Storage error: {detail}")]
    Storage { detail: String },
    #[error("Upstream error: {detail}")]
    Upstream { detail: String },
    #[error("Internal error: {detail}")]
    Internal { detail: String },
    #[error("Configuration error: {detail}")]
    Config { detail: String },
}

impl AppError {
    /// Get the HTTP status code for this error
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            AppError::SelfOnlyMismatch => StatusCode::UNAUTHORIZED,
            AppError::Forbidden => StatusCode::FORBIDDEN,
            AppError::BadRequest { .. } => StatusCode::BAD_REQUEST,
            AppError::NotFound => StatusCode::NOT_FOUND,
            AppError::Storage { .. } => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::Upstream { .. } => StatusCode::BAD_GATEWAY,
            AppError::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::Config { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Client-facing message. Server-side details stay in the logs.
    pub fn message(&self) -> String {
        match self {
            AppError::Unauthorized(_) => "unauthorized access".to_string(),
            AppError::SelfOnlyMismatch | AppError::Forbidden => "forbidden access".to_string(),
            AppError::BadRequest { detail } => detail.clone(),
            AppError::NotFound => "not found".to_string(),
            AppError::Upstream { .. } => "payment provider unavailable".to_string(),
            AppError::Storage { .. } | AppError::Internal { .. } | AppError::Config { .. } => {
                "internal server error".to_string()
            }
        }
    }

    pub fn unauthorized(reason: UnauthorizedReason) -> Self {
        Self::Unauthorized(reason)
    }

    pub fn forbidden() -> Self {
        Self::Forbidden
    }

    pub fn bad_request(detail: impl Into<String>) -> Self {
        Self::BadRequest {
            detail: detail.into(),
        }
    }

    pub fn internal(detail: impl Into<String>) -> Self {
        Self::Internal {
            detail: detail.into(),
        }
    }

    pub fn config(detail: impl Into<String>) -> Self {
        Self::Config {
            detail: detail.into(),
        }
    }
}

impl From<StoreError> for AppError {
    fn from(e: StoreError) -> Self {
        AppError::Storage {
            detail: e.to_string(),
        }
    }
}

impl From<PaymentError> for AppError {
    fn from(e: PaymentError) -> Self {
        AppError::Upstream {
            detail: e.to_string(),
        }
    }
}

impl From<std::env::VarError> for AppError {
    fn from(e: std::env::VarError) -> Self {
        AppError::config(format!("env var error: {e}"))
    }
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        self.status()
    }

    fn error_response(&self) -> HttpResponse {
        let status = self.status();
        let trace_id = trace_ctx::trace_id();

        if status.is_server_error() {
            tracing::error!(trace_id = %trace_id, error = %self, "request_failed");
        } else if let AppError::Unauthorized(reason) = self {
            tracing::debug!(trace_id = %trace_id, reason = reason.as_str(), "request_rejected");
        }

        HttpResponse::build(status)
            .insert_header(("x-trace-id", trace_id))
            .json(ErrorBody {
                error: true,
                message: self.message(),
            })
    }
}
