//! HTTP contract tests for the sellers module, driven through the full
//! router with an in-memory SQLite pool.

use axum::body::{to_bytes, Body};
use axum::http::{header, Request, StatusCode};
use axum::Router;
use serde_json::{json, Value};
use sqlx::sqlite::SqlitePoolOptions;
use sqlx::SqlitePool;
use tower::ServiceExt;

use bookstall_app::modules;
use bookstall_app::modules::sellers::models::{Book, NewSeller};
use bookstall_app::modules::sellers::store;
use bookstall_kernel::settings::Settings;
use bookstall_kernel::{InitCtx, ModuleRegistry};

async fn test_app() -> (Router, SqlitePool) {
    // One connection keeps the in-memory database alive and shared.
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect("sqlite::memory:")
        .await
        .unwrap();

    let mut registry = ModuleRegistry::new();
    modules::register_all(&mut registry);

    bookstall_db::apply_migrations(&pool, &registry.collect_migrations())
        .await
        .unwrap();

    let settings = Settings::default();
    let ctx = InitCtx {
        settings: &settings,
        db: &pool,
    };

    let app = bookstall_http::build_router(&registry, &ctx).unwrap();
    (app, pool)
}

async fn send(app: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let request = match body {
        Some(json_body) => Request::builder()
            .method(method)
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(json_body.to_string()))
            .unwrap(),
        None => Request::builder()
            .method(method)
            .uri(uri)
            .body(Body::empty())
            .unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };

    (status, value)
}

fn clean_code_book() -> Book {
    Book {
        id: 1,
        title: "Clean Code".to_string(),
        author: "Robert Martin".to_string(),
        count_pages: 111,
        year: 2017,
        seller_id: 1,
    }
}

fn seller_fixture(first_name: &str, email: &str) -> NewSeller {
    NewSeller {
        first_name: first_name.to_string(),
        last_name: "Ford".to_string(),
        email: email.to_string(),
        password: "abc123".to_string(),
        books_for_sale: vec![clean_code_book()],
    }
}

fn clean_code_json() -> Value {
    json!({
        "id": 1,
        "title": "Clean Code",
        "author": "Robert Martin",
        "count_pages": 111,
        "year": 2017,
        "seller_id": 1
    })
}

#[tokio::test]
async fn create_seller_returns_201_without_password() {
    let (app, _pool) = test_app().await;

    let payload = json!({
        "first_name": "Alex",
        "last_name": "Ford",
        "email": "a@gmail.com",
        "password": "abc123",
        "books_for_sale": [clean_code_json()]
    });

    let (status, body) = send(&app, "POST", "/api/v1/sellers/", Some(payload)).await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(
        body,
        json!({
            "id": 1,
            "first_name": "Alex",
            "last_name": "Ford",
            "email": "a@gmail.com",
            "books_for_sale": [clean_code_json()]
        })
    );
    assert!(body.get("password").is_none());
}

#[tokio::test]
async fn create_seller_rejects_missing_fields() {
    let (app, _pool) = test_app().await;

    let payload = json!({
        "first_name": "Alex",
        "last_name": "Ford",
        "email": "a@gmail.com",
        "books_for_sale": []
    });

    let (status, _body) = send(&app, "POST", "/api/v1/sellers/", Some(payload)).await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn list_returns_all_sellers_in_insertion_order() {
    let (app, pool) = test_app().await;

    store::insert(&pool, &seller_fixture("Alex", "a@gmail.com"))
        .await
        .unwrap();
    store::insert(&pool, &seller_fixture("Henry", "b@gmail.com"))
        .await
        .unwrap();

    let (status, body) = send(&app, "GET", "/api/v1/sellers/", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["sellers"].as_array().unwrap().len(), 2);
    assert_eq!(
        body,
        json!({
            "sellers": [
                {
                    "id": 1,
                    "first_name": "Alex",
                    "last_name": "Ford",
                    "email": "a@gmail.com",
                    "books_for_sale": [clean_code_json()]
                },
                {
                    "id": 2,
                    "first_name": "Henry",
                    "last_name": "Ford",
                    "email": "b@gmail.com",
                    "books_for_sale": [clean_code_json()]
                }
            ]
        })
    );
}

#[tokio::test]
async fn get_single_seller_by_id() {
    let (app, pool) = test_app().await;

    let created = store::insert(&pool, &seller_fixture("Alex", "a@gmail.com"))
        .await
        .unwrap();
    store::insert(&pool, &seller_fixture("Henry", "b@gmail.com"))
        .await
        .unwrap();

    let (status, body) = send(&app, "GET", &format!("/api/v1/sellers/{}", created.id), None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!({
            "id": created.id,
            "first_name": "Alex",
            "last_name": "Ford",
            "email": "a@gmail.com",
            "books_for_sale": [clean_code_json()]
        })
    );
}

#[tokio::test]
async fn get_missing_seller_returns_404() {
    let (app, _pool) = test_app().await;

    let (status, body) = send(&app, "GET", "/api/v1/sellers/999", None).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"]["code"], "not_found");
}

#[tokio::test]
async fn delete_seller_removes_it() {
    let (app, pool) = test_app().await;

    let created = store::insert(&pool, &seller_fixture("Alex", "a@gmail.com"))
        .await
        .unwrap();

    let (status, _body) = send(
        &app,
        "DELETE",
        &format!("/api/v1/sellers/{}", created.id),
        None,
    )
    .await;

    assert_eq!(status, StatusCode::NO_CONTENT);

    let remaining = store::list_all(&pool).await.unwrap();
    assert!(remaining.is_empty());
}

#[tokio::test]
async fn delete_missing_seller_is_idempotent() {
    let (app, _pool) = test_app().await;

    let (status, _body) = send(&app, "DELETE", "/api/v1/sellers/999", None).await;

    assert_eq!(status, StatusCode::NO_CONTENT);
}

#[tokio::test]
async fn update_seller_overwrites_fields_but_not_password() {
    let (app, pool) = test_app().await;

    let created = store::insert(&pool, &seller_fixture("Alex", "a@gmail.com"))
        .await
        .unwrap();

    let payload = json!({
        "first_name": "Henry",
        "last_name": "Fonda",
        "email": "h@gmail.com",
        "books_for_sale": [clean_code_json()]
    });

    let (status, body) = send(
        &app,
        "PUT",
        &format!("/api/v1/sellers/{}", created.id),
        Some(payload),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["first_name"], "Henry");
    assert_eq!(body["email"], "h@gmail.com");
    assert!(body.get("password").is_none());

    let stored = store::find(&pool, created.id).await.unwrap().unwrap();
    assert_eq!(stored.first_name, "Henry");
    assert_eq!(stored.last_name, "Fonda");
    assert_eq!(stored.email, "h@gmail.com");
    assert_eq!(stored.password, "abc123");
}

#[tokio::test]
async fn update_missing_seller_returns_404_without_mutation() {
    let (app, pool) = test_app().await;

    store::insert(&pool, &seller_fixture("Alex", "a@gmail.com"))
        .await
        .unwrap();

    let payload = json!({
        "first_name": "Henry",
        "last_name": "Fonda",
        "email": "h@gmail.com",
        "books_for_sale": []
    });

    let (status, body) = send(&app, "PUT", "/api/v1/sellers/999", Some(payload)).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"]["code"], "not_found");

    let all = store::list_all(&pool).await.unwrap();
    assert_eq!(all.len(), 1);
    assert_eq!(all[0].first_name, "Alex");
}

#[tokio::test]
async fn healthz_responds_ok() {
    let (app, _pool) = test_app().await;

    let request = Request::builder()
        .method("GET")
        .uri("/healthz")
        .body(Body::empty())
        .unwrap();

    let response = app.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}
