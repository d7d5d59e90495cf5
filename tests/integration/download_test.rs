//! Downloading a lineage's content.

mod helpers;

use http::StatusCode;
use percent_encoding::percent_decode_str;

use helpers::TestApp;

#[tokio::test]
async fn test_download_latest_and_specific_revision() {
    let app = TestApp::new();
    let (_, token) = app.user_with_token("alice@example.com").await;

    app.upload(&token, "/doc.txt", "doc.txt", b"first").await;
    app.upload(&token, "/doc.txt", "doc.txt", b"second").await;

    let latest = app
        .get("/api/files/download/?parent_url=/doc.txt", Some(&token))
        .await;
    assert_eq!(latest.status, StatusCode::OK);
    assert_eq!(&latest.bytes[..], b"second");

    let first = app
        .get("/api/files/download/?parent_url=/doc.txt&revision=0", Some(&token))
        .await;
    assert_eq!(first.status, StatusCode::OK);
    assert_eq!(&first.bytes[..], b"first");
}

#[tokio::test]
async fn test_download_headers() {
    let app = TestApp::new();
    let (_, token) = app.user_with_token("alice@example.com").await;

    let uploaded = app.upload(&token, "/doc.txt", "doc.txt", b"hello").await;
    let response = app
        .get("/api/files/download?parent_url=/doc.txt", Some(&token))
        .await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.header("content-type"), Some("text/plain"));
    assert_eq!(
        response.header("content-disposition"),
        Some("attachment; filename=\"doc.txt\"; filename*=UTF-8''doc.txt")
    );
    let etag = format!(
        "\"{}\"",
        uploaded.body["content_hash"].as_str().unwrap_or_default()
    );
    assert_eq!(response.header("etag"), Some(etag.as_str()));
}

#[tokio::test]
async fn test_non_ascii_file_name_survives_download() {
    let app = TestApp::new();
    let (_, token) = app.user_with_token("alice@example.com").await;

    let uploaded = app
        .upload(&token, "/cv/résumé.txt", "résumé.txt", b"cv")
        .await;
    assert_eq!(uploaded.body["file_name"], "résumé.txt");

    let response = app
        .get("/api/files/download/?parent_url=/cv/r%C3%A9sum%C3%A9.txt", Some(&token))
        .await;
    assert_eq!(response.status, StatusCode::OK);

    let disposition = response
        .header("content-disposition")
        .expect("Content-Disposition should be visible ASCII");
    assert!(disposition.starts_with("attachment; filename=\"r_sum_.txt\";"));

    let encoded = disposition
        .split("filename*=UTF-8''")
        .nth(1)
        .expect("filename* parameter should be present");
    let decoded = percent_decode_str(encoded)
        .decode_utf8()
        .expect("filename* should decode as UTF-8");
    assert_eq!(decoded, "résumé.txt");
}

#[tokio::test]
async fn test_missing_revision_is_not_found() {
    let app = TestApp::new();
    let (_, token) = app.user_with_token("alice@example.com").await;

    app.upload(&token, "/doc.txt", "doc.txt", b"hello").await;

    let response = app
        .get("/api/files/download/?parent_url=/doc.txt&revision=7", Some(&token))
        .await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);

    let unknown = app
        .get("/api/files/download/?parent_url=/nope.txt", Some(&token))
        .await;
    assert_eq!(unknown.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_other_owner_cannot_download() {
    let app = TestApp::new();
    let (_, alice) = app.user_with_token("alice@example.com").await;
    let (_, bob) = app.user_with_token("bob@example.com").await;

    app.upload(&alice, "/secret.txt", "secret.txt", b"alice only").await;

    let response = app
        .get("/api/files/download/?parent_url=/secret.txt", Some(&bob))
        .await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_download_requires_parent_url() {
    let app = TestApp::new();
    let (_, token) = app.user_with_token("alice@example.com").await;

    let response = app.get("/api/files/download/", Some(&token)).await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.error(), "parent_url is required.");
}

#[tokio::test]
async fn test_non_integer_revision_is_bad_request() {
    let app = TestApp::new();
    let (_, token) = app.user_with_token("alice@example.com").await;

    app.upload(&token, "/doc.txt", "doc.txt", b"hello").await;

    for revision in ["abc", "", "1.5"] {
        let response = app
            .get(
                &format!("/api/files/download/?parent_url=/doc.txt&revision={revision}"),
                Some(&token),
            )
            .await;
        assert_eq!(response.status, StatusCode::BAD_REQUEST, "revision={revision:?}");
    }
}
