use std::sync::Arc;

use crate::config::{AppConfig, StoreBackend};
use crate::error::AppError;
use crate::infra::db::bootstrap_db;
use crate::payments::{PaymentGateway, StripeGateway};
use crate::state::access_policy::AccessPolicy;
use crate::state::app_state::AppState;
use crate::state::security_config::SecurityConfig;
use crate::store::{DocumentStore, MemoryStore, SeaDocumentStore};

/// Builder for creating AppState instances (used in both tests and main)
#[derive(Default)]
pub struct StateBuilder {
    store: Option<Arc<dyn DocumentStore>>,
    backend: Option<StoreBackend>,
    payments: Option<Arc<dyn PaymentGateway>>,
    security: Option<SecurityConfig>,
    access: AccessPolicy,
}

impl StateBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Everything from process configuration. Explicit `with_*` calls made
    /// afterwards take precedence.
    pub fn from_config(config: &AppConfig) -> Self {
        Self {
            store: None,
            backend: Some(config.store),
            payments: Some(Arc::new(StripeGateway::new(&config.payment))),
            security: Some(SecurityConfig::new(config.token_secret.as_bytes())),
            access: config.access,
        }
    }

    pub fn with_store(mut self, store: Arc<dyn DocumentStore>) -> Self {
        self.store = Some(store);
        self
    }

    pub fn with_payments(mut self, payments: Arc<dyn PaymentGateway>) -> Self {
        self.payments = Some(payments);
        self
    }

    pub fn with_security(mut self, security: SecurityConfig) -> Self {
        self.security = Some(security);
        self
    }

    pub fn with_access(mut self, access: AccessPolicy) -> Self {
        self.access = access;
        self
    }

    pub async fn build(self) -> Result<AppState, AppError> {
        let security = self
            .security
            .ok_or_else(|| AppError::config("token secret not configured"))?;
        let payments = self
            .payments
            .ok_or_else(|| AppError::config("payment gateway not configured"))?;

        let store: Arc<dyn DocumentStore> = match (self.store, self.backend) {
            (Some(store), _) => store,
            (None, Some(StoreBackend::Postgres)) => {
                Arc::new(SeaDocumentStore::new(bootstrap_db().await?))
            }
            (None, Some(StoreBackend::Memory)) | (None, None) => Arc::new(MemoryStore::new()),
        };

        Ok(AppState::new(store, payments, security, self.access))
    }
}

pub fn build_state() -> StateBuilder {
    StateBuilder::new()
}
