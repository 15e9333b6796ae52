use std::sync::Arc;

use actix_web::http::StatusCode;
use actix_web::test;
use restaurant_backend::state::access_policy::AccessPolicy;
use restaurant_backend::store::MemoryStore;
use serde_json::Value;

use crate::support::fakes::{FailMode, FailingStore};
use crate::support::test_state::state_with_store;
use crate::support::{create_test_app, test_context};

#[actix_web::test]
async fn root_says_hello() {
    let ctx = test_context(AccessPolicy::Uniform).await;
    let app = create_test_app(ctx.state).with_prod_routes().build().await;

    let resp = test::call_service(&app, test::TestRequest::get().uri("/").to_request()).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body = test::read_body(resp).await;
    assert_eq!(body.as_ref(), b"Hello World");
}

#[actix_web::test]
async fn health_reports_store_and_policy() {
    let ctx = test_context(AccessPolicy::LegacyOpen).await;
    let app = create_test_app(ctx.state).with_prod_routes().build().await;

    let body: Value =
        test::call_and_read_body_json(&app, test::TestRequest::get().uri("/health").to_request())
            .await;
    assert_eq!(body["status"], "ok");
    assert_eq!(body["store"], "memory");
    assert_eq!(body["store_status"], "ok");
    assert_eq!(body["migrations"], "none");
    assert_eq!(body["access_policy"], "legacy-open");
    assert!(body.get("store_error").is_none());
    assert!(body["time"].as_str().is_some_and(|t| t.contains('T')));
}

#[actix_web::test]
async fn health_degrades_when_store_is_down() {
    let store = Arc::new(FailingStore::new(
        Arc::new(MemoryStore::new()),
        FailMode::Everything,
    ));
    let app = create_test_app(state_with_store(store).await)
        .with_prod_routes()
        .build()
        .await;

    let resp =
        test::call_service(&app, test::TestRequest::get().uri("/health").to_request()).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["status"], "degraded");
    assert_eq!(body["store_status"], "error");
    assert_eq!(body["store_error"], "store unreachable");
    assert!(!body.to_string().contains("connection refused"));
}
