use actix_web::http::StatusCode;
use actix_web::test;
use backend_test_support::error_body::assert_error_response;
use restaurant_backend::state::access_policy::AccessPolicy;
use restaurant_backend::store::CollectionName;
use serde_json::{json, Value};

use crate::support::auth::bearer_header;
use crate::support::{create_test_app, test_context};

#[actix_web::test]
async fn stats_sum_coerced_prices() {
    let ctx = test_context(AccessPolicy::Uniform).await;
    ctx.seed_user("boss@example.com", true);
    ctx.seed_user("ann@example.com", false);
    ctx.seed(CollectionName::Menu, [json!({"name": "Soup"})]);
    ctx.seed(
        CollectionName::Payments,
        [json!({"price": 10}), json!({"price": "20"}), json!({"price": 5})],
    );
    let auth = bearer_header("boss@example.com", ctx.security());
    let app = create_test_app(ctx.state).with_prod_routes().build().await;

    let req = test::TestRequest::get()
        .uri("/adminstats")
        .insert_header(("Authorization", auth))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["users"], 2);
    assert_eq!(body["products"], 1);
    assert_eq!(body["orders"], 3);
    assert_eq!(body["revenue"], json!(35));
}

#[actix_web::test]
async fn unreadable_prices_are_skipped() {
    let ctx = test_context(AccessPolicy::Uniform).await;
    ctx.seed_user("boss@example.com", true);
    ctx.seed(
        CollectionName::Payments,
        [json!({"price": 4.5}), json!({"price": "n/a"}), json!({"email": "x"})],
    );
    let auth = bearer_header("boss@example.com", ctx.security());
    let app = create_test_app(ctx.state).with_prod_routes().build().await;

    let req = test::TestRequest::get()
        .uri("/adminstats")
        .insert_header(("Authorization", auth))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["orders"], 3);
    assert_eq!(body["revenue"].as_f64(), Some(4.5));
}

#[actix_web::test]
async fn empty_store_reports_zeros() {
    let ctx = test_context(AccessPolicy::Uniform).await;
    ctx.seed_user("boss@example.com", true);
    let auth = bearer_header("boss@example.com", ctx.security());
    let app = create_test_app(ctx.state).with_prod_routes().build().await;

    let req = test::TestRequest::get()
        .uri("/adminstats")
        .insert_header(("Authorization", auth))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["products"], 0);
    assert_eq!(body["orders"], 0);
    assert_eq!(body["revenue"], json!(0));
}

#[actix_web::test]
async fn non_admin_is_403() {
    let ctx = test_context(AccessPolicy::Uniform).await;
    ctx.seed_user("ann@example.com", false);
    let auth = bearer_header("ann@example.com", ctx.security());
    let app = create_test_app(ctx.state).with_prod_routes().build().await;

    let req = test::TestRequest::get()
        .uri("/adminstats")
        .insert_header(("Authorization", auth))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_error_response(resp, StatusCode::FORBIDDEN, "forbidden access").await;
}
