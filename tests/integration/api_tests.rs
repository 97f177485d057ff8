//! API endpoint integration tests

use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use catalog_service::api::routes::create_router;
use catalog_service::catalog::InMemoryStore;
use catalog_service::config::Settings;
use catalog_service::AppState;
use serde_json::{json, Value};
use std::sync::Arc;
use tower::ServiceExt;

fn create_test_app() -> Router {
    let state = AppState::new(Settings::default(), Arc::new(InMemoryStore::new()));
    create_router(Arc::new(state))
}

async fn send(app: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    let body = match body {
        Some(json) => {
            builder = builder.header("content-type", "application/json");
            Body::from(json.to_string())
        }
        None => Body::empty(),
    };

    let response = app.clone().oneshot(builder.body(body).unwrap()).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, value)
}

async fn create_category(app: &Router, name: &str) -> i64 {
    let (status, body) = send(app, "POST", "/categories", Some(json!({ "name": name }))).await;
    assert_eq!(status, StatusCode::CREATED);
    body["id"].as_i64().unwrap()
}

#[tokio::test]
async fn test_category_round_trip() {
    let app = create_test_app();

    let (status, created) = send(&app, "POST", "/categories", Some(json!({ "name": "Books" }))).await;
    assert_eq!(status, StatusCode::CREATED);
    let id = created["id"].as_i64().unwrap();

    let (status, fetched) = send(&app, "GET", &format!("/categories/{}", id), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(fetched, json!({ "id": id, "name": "Books" }));
}

#[tokio::test]
async fn test_category_id_is_read_only() {
    let app = create_test_app();

    let (status, created) = send(
        &app,
        "POST",
        "/categories",
        Some(json!({ "id": 99, "name": "Books" })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(created["id"], json!(1));
}

#[tokio::test]
async fn test_category_missing_name() {
    let app = create_test_app();

    let (status, body) = send(&app, "POST", "/categories", Some(json!({}))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, json!({ "name": ["This field is required."] }));

    let (status, body) = send(&app, "POST", "/categories", Some(json!({ "name": "  " }))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, json!({ "name": ["This field may not be blank."] }));
}

#[tokio::test]
async fn test_category_name_type_coercion() {
    let app = create_test_app();

    let (status, created) = send(&app, "POST", "/categories", Some(json!({ "name": 5 }))).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(created["name"], "5");

    let (status, body) = send(&app, "POST", "/categories", Some(json!({ "name": true }))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, json!({ "name": ["Not a valid string."] }));
}

#[tokio::test]
async fn test_product_round_trip() {
    let app = create_test_app();
    let books = create_category(&app, "Books").await;

    let (status, created) = send(
        &app,
        "POST",
        "/products",
        Some(json!({
            "name": "Novel",
            "description": "A book",
            "price": 9.99,
            "category_id": books,
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    let id = created["id"].as_i64().unwrap();

    let (status, fetched) = send(&app, "GET", &format!("/products/{}", id), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        fetched,
        json!({
            "id": id,
            "name": "Novel",
            "description": "A book",
            "price": "9.99",
            "category": "Books",
        })
    );
    assert!(fetched.get("category_id").is_none());
}

#[tokio::test]
async fn test_product_negative_price() {
    let app = create_test_app();
    let books = create_category(&app, "Books").await;

    let (status, body) = send(
        &app,
        "POST",
        "/products",
        Some(json!({
            "name": "Novel",
            "description": "A book",
            "price": -1,
            "category_id": books,
        })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        body,
        json!({ "price": ["Ensure this value is greater than or equal to 0."] })
    );

    let (_, listed) = send(&app, "GET", "/products", None).await;
    assert_eq!(listed, json!([]));
}

#[tokio::test]
async fn test_product_unknown_category() {
    let app = create_test_app();

    let (status, body) = send(
        &app,
        "POST",
        "/products",
        Some(json!({
            "name": "Novel",
            "description": "A book",
            "price": "1.50",
            "category_id": 42,
        })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        body,
        json!({ "category_id": ["Invalid pk \"42\" - object does not exist."] })
    );
}

#[tokio::test]
async fn test_product_reports_all_field_errors() {
    let app = create_test_app();

    let (status, body) = send(
        &app,
        "POST",
        "/products",
        Some(json!({ "price": "1.234", "category_id": "abc" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        body,
        json!({
            "name": ["This field is required."],
            "description": ["This field is required."],
            "price": ["Ensure that there are no more than 2 decimal places."],
            "category_id": ["Incorrect type. Expected pk value, received str."],
        })
    );
}

#[tokio::test]
async fn test_wrong_typed_fields_are_reported_per_field() {
    let app = create_test_app();
    let books = create_category(&app, "Books").await;

    let (status, body) = send(
        &app,
        "POST",
        "/products",
        Some(json!({
            "name": ["x"],
            "description": { "text": "A book" },
            "price": -1,
            "category_id": books,
        })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        body,
        json!({
            "name": ["Not a valid string."],
            "description": ["Not a valid string."],
            "price": ["Ensure this value is greater than or equal to 0."],
        })
    );
}

#[tokio::test]
async fn test_price_precision_messages() {
    let app = create_test_app();
    let books = create_category(&app, "Books").await;

    let cases = [
        (
            json!("123456789012345678901234567890"),
            "Ensure that there are no more than 10 digits in total.",
        ),
        (
            json!("-1.234"),
            "Ensure that there are no more than 2 decimal places.",
        ),
        (json!("abc"), "A valid number is required."),
    ];
    for (price, message) in cases {
        let (status, body) = send(
            &app,
            "POST",
            "/products",
            Some(json!({
                "name": "Novel",
                "description": "A book",
                "price": price,
                "category_id": books,
            })),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body, json!({ "price": [message] }));
    }
}

#[tokio::test]
async fn test_unknown_ids_are_not_found() {
    let app = create_test_app();

    for uri in ["/categories/1", "/products/1", "/products/abc"] {
        let (status, body) = send(&app, "GET", uri, None).await;
        assert_eq!(status, StatusCode::NOT_FOUND, "{}", uri);
        assert_eq!(body, json!({ "detail": "Not found." }));
    }

    let (status, _) = send(&app, "PUT", "/categories/7", Some(json!({ "name": "X" }))).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = send(&app, "DELETE", "/products/7", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_malformed_body() {
    let app = create_test_app();

    let request = Request::builder()
        .method("POST")
        .uri("/categories")
        .header("content-type", "application/json")
        .body(Body::from("{not json"))
        .unwrap();
    let response = app.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let request = Request::builder()
        .method("POST")
        .uri("/categories")
        .body(Body::from("name=Books"))
        .unwrap();
    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::UNSUPPORTED_MEDIA_TYPE);
}

#[tokio::test]
async fn test_api_root_lists_resources() {
    let app = create_test_app();

    let (status, body) = send(&app, "GET", "/", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!({ "categories": "/categories", "products": "/products" })
    );
}

#[tokio::test]
async fn test_health_reports_counts() {
    let app = create_test_app();
    create_category(&app, "Books").await;

    let (status, body) = send(&app, "GET", "/health", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["categories"], 1);
    assert_eq!(body["products"], 0);
}
