//! Authentication, health and status catalog endpoints

mod common;

use axum::http::StatusCode;
use common::TestApp;
use gestor::core::JwtKeys;
use gestor::core::auth::ROLE_ADMIN;
use serde_json::{Value, json};

#[tokio::test]
async fn test_health_endpoints_are_public() {
    let app = TestApp::new();
    for path in ["/health", "/healthz"] {
        let response = app.server.get(path).await;
        response.assert_status_ok();
        let body: Value = response.json();
        assert_eq!(body["status"], "ok");
        assert_eq!(body["service"], "gestor");
    }
}

#[tokio::test]
async fn test_missing_and_forged_tokens_are_rejected() {
    let app = TestApp::new();
    app.server
        .get("/orders")
        .await
        .assert_status(StatusCode::UNAUTHORIZED);

    let response = app
        .server
        .get("/orders")
        .authorization_bearer("not-a-token")
        .await;
    response.assert_status(StatusCode::UNAUTHORIZED);
    let body: Value = response.json();
    assert_eq!(body["code"], "UNAUTHORIZED");
}

#[tokio::test]
async fn test_token_signed_with_another_secret_is_rejected() {
    let app = TestApp::new();
    let other = TestApp::with_env(&[("JWT_SECRET", "otro-secreto-de-pruebas")]);
    app.server
        .get("/orders")
        .authorization_bearer(other.user_token())
        .await
        .assert_status(StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_me_reports_the_caller() {
    let app = TestApp::new();
    let response = app
        .server
        .get("/auth/me")
        .authorization_bearer(app.admin_token())
        .await;
    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["userId"], "admin-1");
    assert_eq!(body["name"], "Usuario de prueba");
    assert_eq!(body["roles"], json!([ROLE_ADMIN]));
}

#[tokio::test]
async fn test_refresh_issues_a_new_pair() {
    let app = TestApp::new();
    let keys = JwtKeys::new(&app.config.jwt);
    let pair = keys
        .issue_pair("user-9", Some("Ana"), &[ROLE_ADMIN.to_string()])
        .unwrap();

    let response = app
        .server
        .post("/auth/refresh")
        .json(&json!({ "refreshToken": pair.refresh_token }))
        .await;
    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["tokenType"], "Bearer");
    assert_eq!(body["expiresIn"], 24 * 3600);

    let access = body["accessToken"].as_str().unwrap().to_string();
    let me: Value = app
        .server
        .get("/auth/me")
        .authorization_bearer(access)
        .await
        .json();
    assert_eq!(me["userId"], "user-9");

    // An access token cannot be used to refresh
    app.server
        .post("/auth/refresh")
        .json(&json!({ "refreshToken": pair.access_token }))
        .await
        .assert_status(StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_status_catalog() {
    let app = TestApp::new();
    let body: Value = app
        .server
        .get("/statuses")
        .authorization_bearer(app.user_token())
        .await
        .json();
    let order = body["orderStatus"].as_array().unwrap();
    assert_eq!(order.len(), 5);
    assert_eq!(body["expenseOrderStatus"].as_array().unwrap().len(), 4);
    assert_eq!(body["workOrderStatus"].as_array().unwrap().len(), 5);
    assert_eq!(body["editRequestStatus"].as_array().unwrap().len(), 3);
}

#[tokio::test]
async fn test_malformed_ids_and_bodies() {
    let app = TestApp::new();

    let response = app
        .server
        .get("/orders/no-es-uuid")
        .authorization_bearer(app.user_token())
        .await;
    response.assert_status(StatusCode::BAD_REQUEST);
    let body: Value = response.json();
    assert_eq!(body["code"], "VALIDATION_ERROR");

    let response = app
        .server
        .post("/areas")
        .authorization_bearer(app.user_token())
        .json(&json!({ "name": "Bodega", "color": "rojo" }))
        .await;
    response.assert_status(StatusCode::BAD_REQUEST);
    let body: Value = response.json();
    assert_eq!(body["details"]["reason"], "INVALID_BODY");

    app.server
        .get(&format!("/areas/{}", uuid::Uuid::new_v4()))
        .authorization_bearer(app.user_token())
        .await
        .assert_status(StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_cors_preflight_for_configured_origin() {
    use axum::http::{HeaderValue, Method, header};

    let app = TestApp::with_env(&[("FRONTEND_URL", "https://app.gestor.co/")]);
    let response = app
        .server
        .method(Method::OPTIONS, "/orders")
        .add_header(header::ORIGIN, HeaderValue::from_static("https://app.gestor.co"))
        .add_header(
            header::ACCESS_CONTROL_REQUEST_METHOD,
            HeaderValue::from_static("POST"),
        )
        .await;
    response.assert_status_ok();
    assert_eq!(
        response.header(header::ACCESS_CONTROL_ALLOW_ORIGIN),
        "https://app.gestor.co"
    );
    assert_eq!(
        response.header(header::ACCESS_CONTROL_ALLOW_CREDENTIALS),
        "true"
    );
}
