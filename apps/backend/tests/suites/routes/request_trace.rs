use actix_web::test;
use restaurant_backend::state::access_policy::AccessPolicy;

use crate::support::{create_test_app, test_context};

#[actix_web::test]
async fn generates_request_id_when_absent() {
    let ctx = test_context(AccessPolicy::Uniform).await;
    let app = create_test_app(ctx.state).with_prod_routes().build().await;

    let resp = test::call_service(&app, test::TestRequest::get().uri("/").to_request()).await;
    let id = resp
        .headers()
        .get("x-request-id")
        .expect("x-request-id header")
        .to_str()
        .unwrap();
    assert_eq!(id.len(), 36, "uuid v4 expected, got {id}");
}

#[actix_web::test]
async fn echoes_sane_inbound_request_id() {
    let ctx = test_context(AccessPolicy::Uniform).await;
    let app = create_test_app(ctx.state).with_prod_routes().build().await;

    let req = test::TestRequest::get()
        .uri("/")
        .insert_header(("x-request-id", "client-abc_123"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.headers().get("x-request-id").unwrap(), "client-abc_123");
}

#[actix_web::test]
async fn replaces_unsafe_inbound_request_id() {
    let ctx = test_context(AccessPolicy::Uniform).await;
    let app = create_test_app(ctx.state).with_prod_routes().build().await;

    let req = test::TestRequest::get()
        .uri("/")
        .insert_header(("x-request-id", "bad id\twith spaces"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    let id = resp.headers().get("x-request-id").unwrap().to_str().unwrap();
    assert_ne!(id, "bad id\twith spaces");
}

#[actix_web::test]
async fn error_trace_id_matches_request_id() {
    let ctx = test_context(AccessPolicy::Uniform).await;
    let app = create_test_app(ctx.state).with_prod_routes().build().await;

    let req = test::TestRequest::get()
        .uri("/payments")
        .insert_header(("x-request-id", "trace-me-1"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.headers().get("x-trace-id").unwrap(), "trace-me-1");
    assert_eq!(resp.headers().get("x-request-id").unwrap(), "trace-me-1");
}
