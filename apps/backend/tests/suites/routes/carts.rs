use actix_web::http::StatusCode;
use actix_web::test;
use backend_test_support::error_body::assert_error_response;
use restaurant_backend::state::access_policy::AccessPolicy;
use restaurant_backend::store::{CollectionName, DocumentStore, Filter};
use serde_json::{json, Value};

use crate::support::auth::bearer_header;
use crate::support::{create_test_app, test_context};

#[actix_web::test]
async fn add_then_list_own_cart() {
    let ctx = test_context(AccessPolicy::Uniform).await;
    let auth = bearer_header("ann@example.com", ctx.security());
    let app = create_test_app(ctx.state).with_prod_routes().build().await;

    for (name, email) in [("Soup", "ann@example.com"), ("Pie", "bob@example.com")] {
        let req = test::TestRequest::post()
            .uri("/carts")
            .set_json(json!({"menuId": "m1", "name": name, "price": 5, "email": email}))
            .to_request();
        let res: Value = test::call_and_read_body_json(&app, req).await;
        assert!(res["insertedId"].is_string());
    }

    let req = test::TestRequest::get()
        .uri("/carts?email=ann@example.com")
        .insert_header(("Authorization", auth))
        .to_request();
    let items: Vec<Value> = test::call_and_read_body_json(&app, req).await;
    assert_eq!(items.len(), 1);
    assert_eq!(items[0]["name"], "Soup");
}

#[actix_web::test]
async fn listing_someone_elses_cart_is_401_forbidden_access() {
    let ctx = test_context(AccessPolicy::Uniform).await;
    let auth = bearer_header("a@x.com", ctx.security());
    let app = create_test_app(ctx.state).with_prod_routes().build().await;

    let req = test::TestRequest::get()
        .uri("/carts?email=b@x.com")
        .insert_header(("Authorization", auth))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_error_response(resp, StatusCode::UNAUTHORIZED, "forbidden access").await;
}

#[actix_web::test]
async fn listing_without_email_is_empty() {
    let ctx = test_context(AccessPolicy::Uniform).await;
    ctx.seed(CollectionName::Carts, [json!({"email": "a@x.com", "name": "Soup"})]);
    let auth = bearer_header("a@x.com", ctx.security());
    let app = create_test_app(ctx.state).with_prod_routes().build().await;

    for uri in ["/carts", "/carts?email="] {
        let req = test::TestRequest::get()
            .uri(uri)
            .insert_header(("Authorization", auth.clone()))
            .to_request();
        let items: Vec<Value> = test::call_and_read_body_json(&app, req).await;
        assert!(items.is_empty(), "{uri}");
    }
}

#[actix_web::test]
async fn listing_requires_token() {
    let ctx = test_context(AccessPolicy::Uniform).await;
    let app = create_test_app(ctx.state).with_prod_routes().build().await;

    let req = test::TestRequest::get().uri("/carts?email=a@x.com").to_request();
    let resp = test::call_service(&app, req).await;
    assert_error_response(resp, StatusCode::UNAUTHORIZED, "unauthorized access").await;
}

#[actix_web::test]
async fn owner_deletes_own_item() {
    let ctx = test_context(AccessPolicy::Uniform).await;
    ctx.seed(CollectionName::Carts, [json!({"email": "a@x.com", "name": "Soup"})]);
    let item = ctx
        .store
        .find_one(CollectionName::Carts, &Filter::All)
        .await
        .unwrap()
        .unwrap();
    let id = item["_id"].as_str().unwrap().to_string();
    let auth = bearer_header("a@x.com", ctx.security());
    let store = ctx.store.clone();
    let app = create_test_app(ctx.state).with_prod_routes().build().await;

    let req = test::TestRequest::delete()
        .uri(&format!("/carts?id={id}"))
        .insert_header(("Authorization", auth))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body, json!({"acknowledged": true, "deletedCount": 1}));
    assert_eq!(store.count(CollectionName::Carts).await.unwrap(), 0);
}

#[actix_web::test]
async fn stranger_cannot_delete_item_but_admin_can() {
    let ctx = test_context(AccessPolicy::Uniform).await;
    ctx.seed_user("boss@example.com", true);
    ctx.seed(CollectionName::Carts, [json!({"email": "a@x.com", "name": "Soup"})]);
    let item = ctx
        .store
        .find_one(CollectionName::Carts, &Filter::All)
        .await
        .unwrap()
        .unwrap();
    let uri = format!("/carts?id={}", item["_id"].as_str().unwrap());
    let stranger = bearer_header("b@x.com", ctx.security());
    let admin = bearer_header("boss@example.com", ctx.security());
    let app = create_test_app(ctx.state).with_prod_routes().build().await;

    let req = test::TestRequest::delete()
        .uri(&uri)
        .insert_header(("Authorization", stranger))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_error_response(resp, StatusCode::FORBIDDEN, "forbidden access").await;

    let req = test::TestRequest::delete()
        .uri(&uri)
        .insert_header(("Authorization", admin))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["deletedCount"], 1);
}

#[actix_web::test]
async fn deleting_missing_item_reports_zero() {
    let ctx = test_context(AccessPolicy::Uniform).await;
    let auth = bearer_header("a@x.com", ctx.security());
    let app = create_test_app(ctx.state).with_prod_routes().build().await;

    let req = test::TestRequest::delete()
        .uri("/carts?id=01ARZ3NDEKTSV4RRFFQ69G5FAV")
        .insert_header(("Authorization", auth))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["deletedCount"], 0);
}

#[actix_web::test]
async fn delete_with_bad_or_missing_id_is_400() {
    let ctx = test_context(AccessPolicy::Uniform).await;
    let auth = bearer_header("a@x.com", ctx.security());
    let app = create_test_app(ctx.state).with_prod_routes().build().await;

    for uri in ["/carts", "/carts?id=xyz"] {
        let req = test::TestRequest::delete()
            .uri(uri)
            .insert_header(("Authorization", auth.clone()))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_error_response(resp, StatusCode::BAD_REQUEST, "invalid id").await;
    }
}
