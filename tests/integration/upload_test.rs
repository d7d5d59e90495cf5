//! Uploading new versions.

mod helpers;

use http::StatusCode;

use helpers::{TestApp, multipart_body};

const HELLO_SHA256: &str = "2cf24dba5fb0a30e26e83b2ac5b9e29e1b161e5c1fa7425e73043362938b9824";

#[tokio::test]
async fn test_first_upload_is_version_zero() {
    let app = TestApp::new();
    let (_, token) = app.user_with_token("alice@example.com").await;

    let response = app.upload(&token, "/doc.txt", "doc.txt", b"hello").await;

    assert_eq!(response.status, StatusCode::CREATED);
    assert_eq!(response.body["version_number"], 0);
    assert_eq!(response.body["parent_url"], "/doc.txt");
    assert_eq!(response.body["file_name"], "doc.txt");
    assert_eq!(response.body["content_hash"], HELLO_SHA256);
    assert_eq!(response.body["size_bytes"], 5);
    assert_eq!(response.body["can_read"], true);
    assert_eq!(response.body["can_write"], true);
}

#[tokio::test]
async fn test_versions_increment_per_lineage() {
    let app = TestApp::new();
    let (_, token) = app.user_with_token("alice@example.com").await;

    for expected in 0..3 {
        let response = app
            .upload(&token, "/doc.txt", "doc.txt", format!("v{expected}").as_bytes())
            .await;
        assert_eq!(response.status, StatusCode::CREATED);
        assert_eq!(response.body["version_number"], expected);
    }

    let other = app.upload(&token, "/other.txt", "other.txt", b"x").await;
    assert_eq!(other.body["version_number"], 0);
}

#[tokio::test]
async fn test_identical_content_still_creates_a_version() {
    let app = TestApp::new();
    let (_, token) = app.user_with_token("alice@example.com").await;

    let first = app.upload(&token, "/doc.txt", "doc.txt", b"same").await;
    let second = app.upload(&token, "/doc.txt", "doc.txt", b"same").await;

    assert_eq!(second.status, StatusCode::CREATED);
    assert_eq!(second.body["version_number"], 1);
    assert_eq!(first.body["content_hash"], second.body["content_hash"]);
    assert_ne!(first.body["id"], second.body["id"]);
}

#[tokio::test]
async fn test_lineages_are_per_owner() {
    let app = TestApp::new();
    let (_, alice) = app.user_with_token("alice@example.com").await;
    let (_, bob) = app.user_with_token("bob@example.com").await;

    app.upload(&alice, "/doc.txt", "doc.txt", b"a0").await;
    app.upload(&alice, "/doc.txt", "doc.txt", b"a1").await;
    let response = app.upload(&bob, "/doc.txt", "doc.txt", b"b0").await;

    assert_eq!(response.status, StatusCode::CREATED);
    assert_eq!(response.body["version_number"], 0);
}

#[tokio::test]
async fn test_missing_parent_url_is_bad_request() {
    let app = TestApp::new();
    let (_, token) = app.user_with_token("alice@example.com").await;

    let body = multipart_body(None, Some(("doc.txt", b"hello")));
    let response = app.upload_raw(Some(&token), body).await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.error(), "parent_url and file are required.");
}

#[tokio::test]
async fn test_missing_file_is_bad_request() {
    let app = TestApp::new();
    let (_, token) = app.user_with_token("alice@example.com").await;

    let body = multipart_body(Some("/doc.txt"), None);
    let response = app.upload_raw(Some(&token), body).await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.error(), "parent_url and file are required.");
}

#[tokio::test]
async fn test_unauthenticated_upload_is_rejected_before_validation() {
    let app = TestApp::new();

    let body = multipart_body(None, None);
    let response = app.upload_raw(None, body).await;

    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_upload_without_filename_uses_last_path_segment() {
    let app = TestApp::new();
    let (_, token) = app.user_with_token("alice@example.com").await;

    let response = app.upload(&token, "/reports/q3.csv", "", b"a,b\n").await;

    assert_eq!(response.status, StatusCode::CREATED);
    assert_eq!(response.body["file_name"], "q3.csv");
}

#[tokio::test]
async fn test_oversized_upload_is_rejected() {
    let mut config = docstore_core::config::AppConfig::default();
    config.database.backend = docstore_core::config::DatabaseBackend::Memory;
    config.storage.backend = docstore_core::config::StorageBackend::Memory;
    config.storage.max_upload_size_bytes = 8;
    let app = TestApp::with_config(config);
    let (_, token) = app.user_with_token("alice@example.com").await;

    let response = app
        .upload(&token, "/big.bin", "big.bin", b"0123456789")
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    let listed = app.get("/api/file_versions/", Some(&token)).await;
    assert_eq!(listed.body.as_array().map(Vec::len), Some(0));
}

#[tokio::test]
async fn test_directory_components_are_stripped_from_file_name() {
    let app = TestApp::new();
    let (_, token) = app.user_with_token("alice@example.com").await;

    let response = app
        .upload(&token, "/etc.txt", "../../etc/passwd", b"root:x:0:0")
        .await;
    assert_eq!(response.status, StatusCode::CREATED);
    assert_eq!(response.body["file_name"], "passwd");

    let response = app.upload(&token, "/notes.txt", "..", b"n").await;
    assert_eq!(response.body["file_name"], "notes.txt");
}
