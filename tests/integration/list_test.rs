//! Listing and fetching version metadata.

mod helpers;

use http::StatusCode;

use helpers::TestApp;

#[tokio::test]
async fn test_list_returns_own_versions_in_upload_order() {
    let app = TestApp::new();
    let (_, alice) = app.user_with_token("alice@example.com").await;
    let (_, bob) = app.user_with_token("bob@example.com").await;

    app.upload(&alice, "/a.txt", "a.txt", b"a0").await;
    app.upload(&bob, "/a.txt", "a.txt", b"b0").await;
    app.upload(&alice, "/b.txt", "b.txt", b"b0").await;
    app.upload(&alice, "/a.txt", "a.txt", b"a1").await;

    let response = app.get("/api/file_versions/", Some(&alice)).await;
    assert_eq!(response.status, StatusCode::OK);

    let items = response.body.as_array().cloned().unwrap_or_default();
    let seen: Vec<(String, i64)> = items
        .iter()
        .map(|v| {
            (
                v["parent_url"].as_str().unwrap_or_default().to_string(),
                v["version_number"].as_i64().unwrap_or(-1),
            )
        })
        .collect();
    assert_eq!(
        seen,
        vec![
            ("/a.txt".to_string(), 0),
            ("/b.txt".to_string(), 0),
            ("/a.txt".to_string(), 1),
        ]
    );
}

#[tokio::test]
async fn test_list_filters_by_parent_url_and_revision() {
    let app = TestApp::new();
    let (_, token) = app.user_with_token("alice@example.com").await;

    app.upload(&token, "/a.txt", "a.txt", b"a0").await;
    app.upload(&token, "/a.txt", "a.txt", b"a1").await;
    app.upload(&token, "/b.txt", "b.txt", b"b0").await;

    let by_url = app
        .get("/api/file_versions/?parent_url=/a.txt", Some(&token))
        .await;
    assert_eq!(by_url.body.as_array().map(Vec::len), Some(2));

    let by_both = app
        .get("/api/file_versions?parent_url=/a.txt&revision=1", Some(&token))
        .await;
    let items = by_both.body.as_array().cloned().unwrap_or_default();
    assert_eq!(items.len(), 1);
    assert_eq!(items[0]["version_number"], 1);

    let by_revision = app
        .get("/api/file_versions/?revision=0", Some(&token))
        .await;
    assert_eq!(by_revision.body.as_array().map(Vec::len), Some(2));
}

#[tokio::test]
async fn test_empty_list_for_new_user() {
    let app = TestApp::new();
    let (_, token) = app.user_with_token("alice@example.com").await;

    let response = app.get("/api/file_versions/", Some(&token)).await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body, serde_json::json!([]));
}

#[tokio::test]
async fn test_get_by_id_is_owner_scoped() {
    let app = TestApp::new();
    let (_, alice) = app.user_with_token("alice@example.com").await;
    let (_, bob) = app.user_with_token("bob@example.com").await;

    let uploaded = app.upload(&alice, "/doc.txt", "doc.txt", b"hello").await;
    let id = uploaded.body["id"].as_str().unwrap_or_default().to_string();

    let own = app
        .get(&format!("/api/file_versions/{id}"), Some(&alice))
        .await;
    assert_eq!(own.status, StatusCode::OK);
    assert_eq!(own.body["id"], uploaded.body["id"]);
    assert_eq!(own.body["content_hash"], uploaded.body["content_hash"]);

    let foreign = app
        .get(&format!("/api/file_versions/{id}/"), Some(&bob))
        .await;
    assert_eq!(foreign.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_malformed_id_is_not_found() {
    let app = TestApp::new();
    let (_, token) = app.user_with_token("alice@example.com").await;

    let response = app
        .get("/api/file_versions/not-a-uuid/", Some(&token))
        .await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_bad_revision_filter_is_bad_request() {
    let app = TestApp::new();
    let (_, token) = app.user_with_token("alice@example.com").await;

    let response = app
        .get("/api/file_versions/?revision=latest", Some(&token))
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
}
