use axum::{
    body::Body,
    http::{header, Method, Request, StatusCode},
    Router,
};
use backend_api::{create_router, AppState, InMemoryLedgerRepository};
use serde_json::{json, Value};
use std::sync::Arc;
use tower::ServiceExt;
use utils::demo_database;

fn demo_app() -> Router {
    let repo = Arc::new(InMemoryLedgerRepository::new(demo_database()));
    create_router(AppState::new(repo), None)
}

async fn send(app: &Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, body)
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

fn get_with_token(uri: &str, token: &str) -> Request<Body> {
    Request::builder()
        .uri(uri)
        .header(header::AUTHORIZATION, format!("Bearer {}", token))
        .body(Body::empty())
        .unwrap()
}

fn post_json(uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

async fn login(app: &Router, path: &str, email: &str, password: &str) -> String {
    let (status, body) = send(
        app,
        post_json(path, json!({ "email": email, "password": password })),
    )
    .await;
    assert_eq!(status, StatusCode::OK, "login failed: {}", body);
    body["token"].as_str().unwrap().to_string()
}

#[tokio::test]
async fn test_health() {
    let app = demo_app();
    let (status, body) = send(&app, get("/health")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "status": "ok" }));
}

#[tokio::test]
async fn test_monthly_comparison_for_client() {
    let app = demo_app();
    let (status, body) = send(
        &app,
        get("/api/transactions/monthly?client_id=1&start=2025-01-01&end=2025-01-31"),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    let data = body["data"].as_array().unwrap();
    assert_eq!(data.len(), 1);
    assert_eq!(data[0]["label"], "2025-01");
    assert_eq!(data[0]["income"], 33000.0);
    assert_eq!(data[0]["expense"], 300000.0);
    assert_eq!(data[0]["net"], -267000.0);
}

#[tokio::test]
async fn test_monthly_comparison_is_chronological() {
    let app = demo_app();
    let (_, body) = send(&app, get("/api/transactions/monthly")).await;
    let labels: Vec<&str> = body["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|m| m["label"].as_str().unwrap())
        .collect();
    assert_eq!(labels, vec!["2025-01", "2025-02", "2025-03"]);
}

#[tokio::test]
async fn test_empty_params_mean_no_filter() {
    let app = demo_app();
    let (_, all) = send(&app, get("/api/transactions/monthly")).await;
    let (status, blank) = send(&app, get("/api/transactions/monthly?start=&end=&client_id=")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(all, blank);
}

#[tokio::test]
async fn test_invalid_date_is_bad_request() {
    let app = demo_app();
    let (status, body) = send(&app, get("/api/transactions/monthly?start=01/02/2025")).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Invalid start format. Use YYYY-MM-DD.");
}

#[tokio::test]
async fn test_invalid_client_id_is_bad_request() {
    let app = demo_app();
    let (status, _) = send(&app, get("/api/transactions/category-averages?client_id=abc")).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_category_averages() {
    let app = demo_app();
    let (status, body) = send(
        &app,
        get("/api/transactions/category-averages?client_id=2&start=2025-02-01"),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let data = body["data"].as_array().unwrap();
    assert_eq!(data.len(), 5);
    let netflix = data.iter().find(|c| c["category"] == "Netflix").unwrap();
    assert_eq!(netflix["average"], 5000.0);
}

#[tokio::test]
async fn test_client_login_and_score() {
    let app = demo_app();
    let token = login(&app, "/api/auth/client/login", "didier.fouda@example.com", "1234").await;

    let (status, body) = send(&app, get_with_token("/api/client/score", &token)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["client_id"], 3);
    assert_eq!(body["month_count"], 2);
    assert_eq!(body["avg_monthly_income"], 501500.0);
    assert_eq!(body["avg_monthly_expense"], 314500.0);
    assert_eq!(body["credit_score"], 5.5);
    assert_eq!(body["status"], "danger");
}

#[tokio::test]
async fn test_login_sets_session_cookie() {
    let app = demo_app();
    let response = app
        .clone()
        .oneshot(post_json(
            "/api/auth/client/login",
            json!({ "email": "paul.ngono@example.com", "password": "1980" }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let cookie = response
        .headers()
        .get(header::SET_COOKIE)
        .and_then(|v| v.to_str().ok())
        .unwrap();
    assert!(cookie.starts_with("bank_session="));
    assert!(cookie.contains("HttpOnly"));
}

#[tokio::test]
async fn test_wrong_password_is_unauthorized() {
    let app = demo_app();
    let (status, body) = send(
        &app,
        post_json(
            "/api/auth/client/login",
            json!({ "email": "paul.ngono@example.com", "password": "0000" }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"], "Invalid email or password");
}

#[tokio::test]
async fn test_client_routes_require_session() {
    let app = demo_app();
    let (status, _) = send(&app, get("/api/client/profile")).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, _) = send(&app, get_with_token("/api/client/profile", "not-a-token")).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_profile_masks_card_and_hides_cvv() {
    let app = demo_app();
    let token = login(&app, "/api/auth/client/login", "paul.ngono@example.com", "1980").await;

    let (status, body) = send(&app, get_with_token("/api/client/profile", &token)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["card_number"], "**** **** **** 8910");
    assert!(body.get("card_cvv").is_none());
    assert_eq!(body["balance"], 500000.0);
}

#[tokio::test]
async fn test_client_transactions_are_scoped_and_sorted() {
    let app = demo_app();
    let token = login(&app, "/api/auth/client/login", "clarisse.mbia@example.com", "1111").await;

    let (status, body) = send(&app, get_with_token("/api/client/transactions", &token)).await;
    assert_eq!(status, StatusCode::OK);
    let data = body["data"].as_array().unwrap();
    assert_eq!(data.len(), 11);
    assert!(data.iter().all(|t| t["client_id"] == 2));

    let dates: Vec<&str> = data.iter().map(|t| t["date"].as_str().unwrap()).collect();
    let mut sorted = dates.clone();
    sorted.sort();
    assert_eq!(dates, sorted);
}

#[tokio::test]
async fn test_client_cannot_reach_admin_routes() {
    let app = demo_app();
    let token = login(&app, "/api/auth/client/login", "paul.ngono@example.com", "1980").await;
    let (status, _) = send(&app, get_with_token("/api/admin/clients", &token)).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_admin_lists_clients_with_scores() {
    let app = demo_app();
    let token = login(&app, "/api/auth/admin/login", "admin1@bankapp.com", "0123").await;

    let (status, body) = send(&app, get_with_token("/api/admin/clients", &token)).await;
    assert_eq!(status, StatusCode::OK);
    let data = body["data"].as_array().unwrap();
    let ids: Vec<i64> = data.iter().map(|c| c["client_id"].as_i64().unwrap()).collect();
    assert_eq!(ids, vec![1, 2, 3]);
    assert_eq!(data[0]["name"], "Paul Ngono");
    assert!(data.iter().all(|c| c["status_label"].is_string()));
}

#[tokio::test]
async fn test_admin_unknown_client_is_not_found() {
    let app = demo_app();
    let token = login(&app, "/api/auth/admin/login", "admin2@bankapp.com", "0000").await;

    let (status, _) = send(&app, get_with_token("/api/admin/clients/42/score", &token)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = send(
        &app,
        get_with_token("/api/admin/clients/42/transactions", &token),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_admin_client_transactions_with_range() {
    let app = demo_app();
    let token = login(&app, "/api/auth/admin/login", "admin1@bankapp.com", "0123").await;

    let (status, body) = send(
        &app,
        get_with_token(
            "/api/admin/clients/3/transactions?start=2025-03-01&end=2025-03-31",
            &token,
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"].as_array().unwrap().len(), 6);
}

#[tokio::test]
async fn test_me_and_logout() {
    let app = demo_app();
    let token = login(&app, "/api/auth/admin/login", "admin1@bankapp.com", "0123").await;

    let (status, body) = send(&app, get_with_token("/api/auth/me", &token)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["role"], "admin");
    assert_eq!(body["admin_id"], 1);

    let logout = Request::builder()
        .method(Method::POST)
        .uri("/api/auth/logout")
        .header(header::AUTHORIZATION, format!("Bearer {}", token))
        .body(Body::empty())
        .unwrap();
    let (status, _) = send(&app, logout).await;
    assert_eq!(status, StatusCode::OK);

    let (status, _) = send(&app, get_with_token("/api/auth/me", &token)).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_chat_routes_by_keyword() {
    let app = demo_app();
    let (status, body) = send(
        &app,
        post_json("/api/chat", json!({ "message": "Quel est mon solde ?" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["topic"], "balance");
    assert!(body["reply"].as_str().is_some_and(|r| !r.is_empty()));
}

#[tokio::test]
async fn test_static_index_is_served() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("main.html"), "<h1>bank</h1>").unwrap();

    let repo = Arc::new(InMemoryLedgerRepository::new(demo_database()));
    let app = create_router(AppState::new(repo), Some(dir.path().to_path_buf()));

    let response = app.oneshot(get("/")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    assert_eq!(&bytes[..], b"<h1>bank</h1>");
}

#[tokio::test]
async fn test_client_zero_is_no_filter() {
    let app = demo_app();
    let (_, all) = send(&app, get("/api/transactions/monthly")).await;
    let (status, zero) = send(&app, get("/api/transactions/monthly?client_id=0")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(all, zero);
}

#[tokio::test]
async fn test_bad_path_id_is_json_bad_request() {
    let app = demo_app();
    let token = login(&app, "/api/auth/admin/login", "admin1@bankapp.com", "0123").await;

    let (status, body) = send(&app, get_with_token("/api/admin/clients/abc/score", &token)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().is_some_and(|e| e.contains("abc")));
}

#[tokio::test]
async fn test_login_missing_field_is_json_bad_request() {
    let app = demo_app();
    let (status, body) = send(
        &app,
        post_json("/api/auth/client/login", json!({ "email": "paul.ngono@example.com" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().is_some_and(|e| e.contains("password")));
}

#[tokio::test]
async fn test_chat_without_content_type_is_json_bad_request() {
    let app = demo_app();
    let request = Request::builder()
        .method(Method::POST)
        .uri("/api/chat")
        .body(Body::from(r#"{"message":"hello"}"#))
        .unwrap();

    let (status, body) = send(&app, request).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].is_string());
}
