use actix_web::http::StatusCode;
use actix_web::test;
use backend_test_support::error_body::assert_error_response;
use restaurant_backend::state::access_policy::AccessPolicy;
use restaurant_backend::store::CollectionName;
use serde_json::{json, Value};

use crate::support::auth::bearer_header;
use crate::support::{create_test_app, test_context};

#[actix_web::test]
async fn list_and_reviews_are_public() {
    let ctx = test_context(AccessPolicy::Uniform).await;
    ctx.seed(
        CollectionName::Menu,
        [json!({"name": "Soup", "price": 4.5}), json!({"name": "Pie", "price": 6})],
    );
    ctx.seed(CollectionName::Reviews, [json!({"name": "Ann", "rating": 5})]);
    let app = create_test_app(ctx.state).with_prod_routes().build().await;

    let menu: Vec<Value> =
        test::call_and_read_body_json(&app, test::TestRequest::get().uri("/menu").to_request())
            .await;
    assert_eq!(menu.len(), 2);
    assert_eq!(menu[0]["name"], "Soup");

    let reviews: Vec<Value> =
        test::call_and_read_body_json(&app, test::TestRequest::get().uri("/reviews").to_request())
            .await;
    assert_eq!(reviews.len(), 1);
    assert_eq!(reviews[0]["rating"], 5);
}

#[actix_web::test]
async fn admin_inserts_then_anyone_reads() {
    let ctx = test_context(AccessPolicy::Uniform).await;
    ctx.seed_user("boss@example.com", true);
    let auth = bearer_header("boss@example.com", ctx.security());
    let app = create_test_app(ctx.state).with_prod_routes().build().await;

    let item = json!({"name": "Salad", "price": 7.25, "category": "salad", "recipe": "greens"});
    let req = test::TestRequest::post()
        .uri("/menu")
        .insert_header(("Authorization", auth))
        .set_json(&item)
        .to_request();
    let inserted: Value = test::call_and_read_body_json(&app, req).await;
    let id = inserted["insertedId"].as_str().unwrap().to_string();

    let req = test::TestRequest::get().uri(&format!("/menu/{id}")).to_request();
    let fetched: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(fetched["_id"], id.as_str());
    for field in ["name", "price", "category", "recipe"] {
        assert_eq!(fetched[field], item[field], "field {field}");
    }
}

#[actix_web::test]
async fn missing_item_is_null() {
    let ctx = test_context(AccessPolicy::Uniform).await;
    let app = create_test_app(ctx.state).with_prod_routes().build().await;

    let req = test::TestRequest::get()
        .uri("/menu/01ARZ3NDEKTSV4RRFFQ69G5FAV")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body, Value::Null);
}

#[actix_web::test]
async fn non_admin_cannot_write_menu() {
    let ctx = test_context(AccessPolicy::Uniform).await;
    ctx.seed_user("ann@example.com", false);
    let auth = bearer_header("ann@example.com", ctx.security());
    let app = create_test_app(ctx.state).with_prod_routes().build().await;

    let req = test::TestRequest::post()
        .uri("/menu")
        .insert_header(("Authorization", auth))
        .set_json(json!({"name": "Free lunch", "price": 0}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_error_response(resp, StatusCode::FORBIDDEN, "forbidden access").await;

    let req = test::TestRequest::post()
        .uri("/menu")
        .set_json(json!({"name": "Free lunch", "price": 0}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_error_response(resp, StatusCode::UNAUTHORIZED, "unauthorized access").await;
}

#[actix_web::test]
async fn upsert_creates_then_replaces_menu_fields() {
    let ctx = test_context(AccessPolicy::Uniform).await;
    ctx.seed_user("boss@example.com", true);
    let auth = bearer_header("boss@example.com", ctx.security());
    let app = create_test_app(ctx.state).with_prod_routes().build().await;
    let uri = "/menu/01ARZ3NDEKTSV4RRFFQ69G5FAV";

    let req = test::TestRequest::post()
        .uri(uri)
        .insert_header(("Authorization", auth.clone()))
        .set_json(json!({"name": "Pie", "price": 6, "image": "pie.png"}))
        .to_request();
    let created: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(created["upsertedCount"], 1);

    let req = test::TestRequest::post()
        .uri(uri)
        .insert_header(("Authorization", auth.clone()))
        .set_json(json!({"name": "Tart", "price": 7, "extra": "ignored"}))
        .to_request();
    let updated: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(updated["matchedCount"], 1);
    assert_eq!(updated["modifiedCount"], 1);

    let fetched: Value =
        test::call_and_read_body_json(&app, test::TestRequest::get().uri(uri).to_request()).await;
    assert_eq!(fetched["name"], "Tart");
    assert_eq!(fetched["image"], Value::Null);
    assert!(fetched.get("extra").is_none());

    let req = test::TestRequest::delete()
        .uri(uri)
        .insert_header(("Authorization", auth))
        .to_request();
    let deleted: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(deleted["deletedCount"], 1);
}
