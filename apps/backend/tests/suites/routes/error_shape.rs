use std::sync::Arc;

use actix_web::http::StatusCode;
use actix_web::test;
use backend_test_support::error_body::assert_error_response;
use restaurant_backend::state::access_policy::AccessPolicy;
use restaurant_backend::store::MemoryStore;
use serde_json::json;

use crate::support::fakes::{FailMode, FailingStore};
use crate::support::test_state::state_with_store;
use crate::support::{create_test_app, test_context};

#[actix_web::test]
async fn unknown_route_is_json_404() {
    let ctx = test_context(AccessPolicy::Uniform).await;
    let app = create_test_app(ctx.state).with_prod_routes().build().await;

    for uri in ["/nope", "/menu/a/b", "/api/users"] {
        let req = test::TestRequest::get().uri(uri).to_request();
        let resp = test::call_service(&app, req).await;
        assert_error_response(resp, StatusCode::NOT_FOUND, "not found").await;
    }
}

#[actix_web::test]
async fn storage_failure_is_generic_500() {
    let store = Arc::new(FailingStore::new(
        Arc::new(MemoryStore::new()),
        FailMode::Everything,
    ));
    let app = create_test_app(state_with_store(store).await)
        .with_prod_routes()
        .build()
        .await;

    for uri in ["/menu", "/reviews"] {
        let req = test::TestRequest::get().uri(uri).to_request();
        let resp = test::call_service(&app, req).await;
        assert_error_response(resp, StatusCode::INTERNAL_SERVER_ERROR, "internal server error")
            .await;
    }

    let req = test::TestRequest::post()
        .uri("/users")
        .set_json(json!({"email": "a@x.com"}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_error_response(resp, StatusCode::INTERNAL_SERVER_ERROR, "internal server error").await;
}

#[actix_web::test]
async fn malformed_json_body_is_400() {
    let ctx = test_context(AccessPolicy::Uniform).await;
    let app = create_test_app(ctx.state).with_prod_routes().build().await;

    let req = test::TestRequest::post()
        .uri("/users")
        .insert_header(("content-type", "application/json"))
        .set_payload("{\"email\": ")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let req = test::TestRequest::post()
        .uri("/carts")
        .insert_header(("content-type", "application/json"))
        .set_payload("[1, 2]")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}
