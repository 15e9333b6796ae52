use std::sync::Arc;

use restaurant_backend::infra::state::build_state;
use restaurant_backend::state::access_policy::AccessPolicy;
use restaurant_backend::state::app_state::AppState;
use restaurant_backend::state::security_config::SecurityConfig;
use restaurant_backend::store::{CollectionName, DocumentStore, MemoryStore};
use serde_json::Value;

use super::fakes::RecordingGateway;

pub const TEST_SECRET: &[u8] = b"integration-test-secret-0123456789";

/// A state over an in-memory store plus handles to the doubles behind it.
pub struct TestContext {
    pub state: AppState,
    pub store: Arc<MemoryStore>,
    pub gateway: Arc<RecordingGateway>,
}

impl TestContext {
    pub fn security(&self) -> &SecurityConfig {
        &self.state.security
    }

    /// Seed documents straight into a collection.
    pub fn seed(&self, collection: CollectionName, docs: impl IntoIterator<Item = Value>) {
        self.store.seed(
            collection,
            docs.into_iter()
                .map(|v| v.as_object().cloned().expect("seed documents are objects")),
        );
    }

    /// Seed a user record with the given admin flag.
    pub fn seed_user(&self, email: &str, admin: bool) {
        self.seed(
            CollectionName::Users,
            [serde_json::json!({ "email": email, "name": email, "admin": admin })],
        );
    }
}

pub async fn test_context(access: AccessPolicy) -> TestContext {
    let store = Arc::new(MemoryStore::new());
    let gateway = Arc::new(RecordingGateway::default());
    let state = build_state()
        .with_store(store.clone())
        .with_payments(gateway.clone())
        .with_security(SecurityConfig::new(TEST_SECRET))
        .with_access(access)
        .build()
        .await
        .expect("test state should build");
    TestContext {
        state,
        store,
        gateway,
    }
}

/// A state whose store is `store`; the payment gateway still records.
pub async fn state_with_store(store: Arc<dyn DocumentStore>) -> AppState {
    build_state()
        .with_store(store)
        .with_payments(Arc::new(RecordingGateway::default()))
        .with_security(SecurityConfig::new(TEST_SECRET))
        .build()
        .await
        .expect("test state should build")
}
