//! Token exchange and bearer authentication.

mod helpers;

use axum::body::Body;
use http::{Request, StatusCode};
use tower::ServiceExt;

use helpers::{PASSWORD, TestApp};

#[tokio::test]
async fn test_obtain_token_with_json_credentials() {
    let app = TestApp::new();
    app.create_user("alice@example.com").await;

    let body = serde_json::json!({ "email": "alice@example.com", "password": PASSWORD });
    let response = app.request("POST", "/api/auth-token", Some(body), None).await;

    assert_eq!(response.status, StatusCode::OK);
    assert!(response.body["token"].as_str().is_some_and(|t| !t.is_empty()));
    assert!(response.body["expires_at"].is_string());
}

#[tokio::test]
async fn test_obtain_token_with_form_credentials_and_trailing_slash() {
    let app = TestApp::new();
    app.create_user("form@example.com").await;

    let req = Request::builder()
        .method("POST")
        .uri("/api/auth-token/")
        .header("Content-Type", "application/x-www-form-urlencoded")
        .body(Body::from(format!(
            "username=form%40example.com&password={PASSWORD}"
        )))
        .unwrap();
    let response = app.router.clone().oneshot(req).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_email_is_case_insensitive() {
    let app = TestApp::new();
    app.create_user("Mixed@Example.com").await;

    let token = app.login("mixed@example.com").await;
    assert!(!token.is_empty());
}

#[tokio::test]
async fn test_wrong_password_is_rejected() {
    let app = TestApp::new();
    app.create_user("bob@example.com").await;

    let body = serde_json::json!({ "email": "bob@example.com", "password": "not-the-password" });
    let response = app.request("POST", "/api/auth-token", Some(body), None).await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(
        response.error(),
        "Unable to log in with provided credentials."
    );
    assert!(response.body.get("token").is_none());
}

#[tokio::test]
async fn test_unknown_email_matches_wrong_password() {
    let app = TestApp::new();

    let body = serde_json::json!({ "email": "ghost@example.com", "password": PASSWORD });
    let response = app.request("POST", "/api/auth-token", Some(body), None).await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(
        response.error(),
        "Unable to log in with provided credentials."
    );
}

#[tokio::test]
async fn test_missing_password_is_validation_error() {
    let app = TestApp::new();

    let body = serde_json::json!({ "email": "carol@example.com" });
    let response = app.request("POST", "/api/auth-token", Some(body), None).await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.body["code"], "VALIDATION");
}

#[tokio::test]
async fn test_protected_routes_require_credentials() {
    let app = TestApp::new();

    for path in [
        "/api/file_versions/",
        "/api/files/download/?parent_url=/doc.txt",
        "/api/file_versions/00000000-0000-0000-0000-000000000000",
    ] {
        let response = app.get(path, None).await;
        assert_eq!(response.status, StatusCode::UNAUTHORIZED, "{path}");
        assert_eq!(
            response.error(),
            "Authentication credentials were not provided."
        );
    }
}

#[tokio::test]
async fn test_garbage_token_is_unauthorized() {
    let app = TestApp::new();

    let response = app.get("/api/file_versions/", Some("not.a.jwt")).await;
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_token_scheme_is_accepted() {
    let app = TestApp::new();
    let (_, token) = app.user_with_token("scheme@example.com").await;

    let req = Request::builder()
        .method("GET")
        .uri("/api/file_versions/")
        .header("Authorization", format!("Token {token}"))
        .body(Body::empty())
        .unwrap();
    let response = app.router.clone().oneshot(req).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_health_is_public() {
    let app = TestApp::new();

    let response = app.get("/api/health", None).await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["status"], "ok");
    assert_eq!(response.body["database"], true);
    assert_eq!(response.body["storage"], true);
}
