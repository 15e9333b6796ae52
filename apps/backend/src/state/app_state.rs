use std::sync::Arc;

use super::access_policy::AccessPolicy;
use super::security_config::SecurityConfig;
use crate::payments::PaymentGateway;
use crate::store::{Collection, CollectionName, DocumentStore};

/// Application state containing shared resources
#[derive(Clone)]
pub struct AppState {
    /// Document store shared by every worker
    pub store: Arc<dyn DocumentStore>,
    /// Payment-intent provider
    pub payments: Arc<dyn PaymentGateway>,
    /// Security configuration including JWT settings
    pub security: SecurityConfig,
    /// Gating applied to user-administration and cart-deletion routes
    pub access: AccessPolicy,
}

impl AppState {
    pub fn new(
        store: Arc<dyn DocumentStore>,
        payments: Arc<dyn PaymentGateway>,
        security: SecurityConfig,
        access: AccessPolicy,
    ) -> Self {
        Self {
            store,
            payments,
            security,
            access,
        }
    }

    pub fn collection(&self, name: CollectionName) -> Collection {
        Collection::new(self.store.clone(), name)
    }

    pub fn users(&self) -> Collection {
        self.collection(CollectionName::Users)
    }

    pub fn menu(&self) -> Collection {
        self.collection(CollectionName::Menu)
    }

    pub fn reviews(&self) -> Collection {
        self.collection(CollectionName::Reviews)
    }

    pub fn carts(&self) -> Collection {
        self.collection(CollectionName::Carts)
    }

    pub fn payments_collection(&self) -> Collection {
        self.collection(CollectionName::Payments)
    }
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("store", &self.store.backend_name())
            .field("payments", &self.payments.provider_name())
            .field("security", &self.security)
            .field("access", &self.access)
            .finish()
    }
}
