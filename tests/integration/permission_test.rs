//! Read and write flags on stored versions.

mod helpers;

use http::StatusCode;
use uuid::Uuid;

use helpers::TestApp;

fn version_id(body: &serde_json::Value) -> Uuid {
    body["id"]
        .as_str()
        .and_then(|s| Uuid::parse_str(s).ok())
        .expect("response should carry a version id")
}

#[tokio::test]
async fn test_write_disabled_on_latest_blocks_upload() {
    let app = TestApp::new();
    let (_, token) = app.user_with_token("alice@example.com").await;

    let v0 = app.upload(&token, "/doc.txt", "doc.txt", b"v0").await;
    app.set_permissions(version_id(&v0.body), None, Some(false))
        .await;

    let response = app.upload(&token, "/doc.txt", "doc.txt", b"v1").await;
    assert_eq!(response.status, StatusCode::FORBIDDEN);
    assert_eq!(
        response.error(),
        "You do not have write permission for this file."
    );

    let listed = app
        .get("/api/file_versions/?parent_url=/doc.txt", Some(&token))
        .await;
    assert_eq!(listed.body.as_array().map(Vec::len), Some(1));
}

#[tokio::test]
async fn test_write_flag_on_older_version_is_ignored() {
    let app = TestApp::new();
    let (_, token) = app.user_with_token("alice@example.com").await;

    let v0 = app.upload(&token, "/doc.txt", "doc.txt", b"v0").await;
    app.upload(&token, "/doc.txt", "doc.txt", b"v1").await;
    app.set_permissions(version_id(&v0.body), None, Some(false))
        .await;

    let response = app.upload(&token, "/doc.txt", "doc.txt", b"v2").await;
    assert_eq!(response.status, StatusCode::CREATED);
    assert_eq!(response.body["version_number"], 2);
}

#[tokio::test]
async fn test_read_disabled_blocks_download_of_that_revision() {
    let app = TestApp::new();
    let (_, token) = app.user_with_token("alice@example.com").await;

    let v0 = app.upload(&token, "/doc.txt", "doc.txt", b"v0").await;
    app.upload(&token, "/doc.txt", "doc.txt", b"v1").await;
    app.set_permissions(version_id(&v0.body), Some(false), None)
        .await;

    let blocked = app
        .get("/api/files/download/?parent_url=/doc.txt&revision=0", Some(&token))
        .await;
    assert_eq!(blocked.status, StatusCode::FORBIDDEN);
    assert_eq!(
        blocked.error(),
        "You do not have read permission for this file."
    );

    let latest = app
        .get("/api/files/download/?parent_url=/doc.txt", Some(&token))
        .await;
    assert_eq!(latest.status, StatusCode::OK);
    assert_eq!(&latest.bytes[..], b"v1");
}

#[tokio::test]
async fn test_read_disabled_still_lists_metadata() {
    let app = TestApp::new();
    let (_, token) = app.user_with_token("alice@example.com").await;

    let v0 = app.upload(&token, "/doc.txt", "doc.txt", b"v0").await;
    let id = version_id(&v0.body);
    app.set_permissions(id, Some(false), None).await;

    let response = app
        .get(&format!("/api/file_versions/{id}/"), Some(&token))
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["can_read"], false);
}

#[tokio::test]
async fn test_reenabling_write_allows_upload_again() {
    let app = TestApp::new();
    let (_, token) = app.user_with_token("alice@example.com").await;

    let v0 = app.upload(&token, "/doc.txt", "doc.txt", b"v0").await;
    let id = version_id(&v0.body);
    app.set_permissions(id, None, Some(false)).await;
    assert_eq!(
        app.upload(&token, "/doc.txt", "doc.txt", b"v1").await.status,
        StatusCode::FORBIDDEN
    );

    app.set_permissions(id, None, Some(true)).await;
    let response = app.upload(&token, "/doc.txt", "doc.txt", b"v1").await;
    assert_eq!(response.status, StatusCode::CREATED);
    assert_eq!(response.body["version_number"], 1);
}
