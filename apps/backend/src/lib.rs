#![deny(clippy::wildcard_imports)]
#![cfg_attr(test, allow(clippy::wildcard_imports))]

pub mod auth;
pub mod config;
pub mod domain;
pub mod entities;
pub mod error;
pub mod extractors;
pub mod infra;
pub mod logging;
pub mod middleware;
pub mod payments;
pub mod routes;
pub mod services;
pub mod state;
pub mod store;
pub mod trace_ctx;


// Re-exports for public API
pub use auth::{issue_token, verify_token, Claims};
pub use error::{AppError, ErrorBody};
pub use extractors::{Admin, Authenticated, PolicyAdmin, PolicyAuth, ValidatedJson};
pub use infra::db::connect_db;
pub use infra::state::{build_state, StateBuilder};
pub use middleware::{cors_middleware, RequestTrace, StructuredLogger, TraceSpan};
pub use payments::{IntentRequest, PaymentError, PaymentGateway, PaymentIntent};
pub use state::access_policy::AccessPolicy;
pub use state::app_state::AppState;
pub use state::security_config::SecurityConfig;
pub use store::{Collection, CollectionName, DocumentStore, MemoryStore, SeaDocumentStore};

// Auto-initialize logging for unit tests
#[cfg(test)]
#[ctor::ctor]
fn init_test_logging() {
    test_bootstrap::logging::init();
}
