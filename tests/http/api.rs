use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use wiremock::matchers::{body_string_contains, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use crate::common::*;

#[tokio::test]
async fn test_status_unconfigured() {
    let app = TestApp::default().build(None);
    let resp = get(&app, "/api/status").await;
    assert_status(&resp, StatusCode::OK);
    let body = body_json(resp).await;
    assert_eq!(body["status"], "operational");
    assert_eq!(body["configured"], false);
    assert_eq!(body["kv_enabled"], false);
    assert_eq!(body["version"], env!("CARGO_PKG_VERSION"));
    assert_eq!(body["endpoints"].as_array().unwrap().len(), 5);
}

#[tokio::test]
async fn test_status_configured() {
    let app = TestApp::configured().build(None);
    let body = body_json(get(&app, "/api/status").await).await;
    assert_eq!(body["configured"], true);
    assert_eq!(body["kv_enabled"], true);
}

#[tokio::test]
async fn test_tokens_store_not_configured() {
    let app = TestApp::default().build(None);
    let resp = get(&app, "/tokens").await;
    assert_status(&resp, StatusCode::NOT_IMPLEMENTED);
    assert_eq!(
        body_json(resp).await,
        serde_json::json!({"error": "Token store not configured"})
    );
}

#[tokio::test]
async fn test_tokens_empty_store() {
    let app = TestApp::configured().build(None);
    let resp = get(&app, "/tokens").await;
    assert_status(&resp, StatusCode::NOT_FOUND);
    assert_eq!(body_json(resp).await, serde_json::json!({"error": "No tokens found"}));
}

#[tokio::test]
async fn test_refresh_requires_token() {
    let app = TestApp::configured().build(None);
    let resp = post_json(&app, "/refresh", "{}").await;
    assert_status(&resp, StatusCode::BAD_REQUEST);
    assert_eq!(
        body_json(resp).await,
        serde_json::json!({"error": "refresh_token required"})
    );

    let resp = post_json(&app, "/refresh", r#"{"refresh_token": ""}"#).await;
    assert_status(&resp, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_refresh_invalid_json() {
    let app = TestApp::configured().build(None);
    let resp = post_json(&app, "/refresh", "not json").await;
    assert_status(&resp, StatusCode::BAD_REQUEST);
    assert_eq!(body_json(resp).await, serde_json::json!({"error": "Invalid JSON body"}));
}

#[tokio::test]
async fn test_refresh_wrong_method() {
    let app = TestApp::configured().build(None);
    let resp = get(&app, "/refresh").await;
    assert_status(&resp, StatusCode::METHOD_NOT_ALLOWED);
    assert_eq!(body_string(resp).await, "Method not allowed");
}

#[tokio::test]
async fn test_refresh_without_credentials() {
    let app = TestApp::default().build(None);
    let resp = post_json(&app, "/refresh", r#"{"refresh_token": "R"}"#).await;
    assert_status(&resp, StatusCode::INTERNAL_SERVER_ERROR);
    let body = body_json(resp).await;
    assert!(body["error"].as_str().unwrap().contains("TIKTOK_CLIENT_KEY"));
}

#[tokio::test]
async fn test_refresh_relays_provider_body() {
    let server = MockServer::start().await;
    let provider_body = serde_json::json!({
        "access_token": "A2",
        "refresh_token": "R2",
        "expires_in": 86400,
        "open_id": "U1",
        "scope": "user.info.basic",
        "token_type": "Bearer"
    });
    Mock::given(method("POST"))
        .and(path(TOKEN_PATH))
        .and(body_string_contains("grant_type=refresh_token"))
        .and(body_string_contains("refresh_token=R"))
        .respond_with(ResponseTemplate::new(200).set_body_json(provider_body.clone()))
        .expect(1)
        .mount(&server)
        .await;

    let app = TestApp::configured().build(Some(&server));
    let resp = post_json(&app, "/refresh", r#"{"refresh_token": "R"}"#).await;
    assert_status(&resp, StatusCode::OK);
    assert_eq!(body_json(resp).await, provider_body);
}

#[tokio::test]
async fn test_refresh_relays_provider_error_body() {
    let server = MockServer::start().await;
    let provider_body = serde_json::json!({
        "error": "invalid_grant",
        "error_description": "Refresh token is invalid or expired."
    });
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(400).set_body_json(provider_body.clone()))
        .mount(&server)
        .await;

    let app = TestApp::configured().build(Some(&server));
    let resp = post_json(&app, "/refresh", r#"{"refresh_token": "stale"}"#).await;
    assert_status(&resp, StatusCode::OK);
    assert_eq!(body_json(resp).await, provider_body);
}

#[tokio::test]
async fn test_refresh_non_json_provider_body_is_bad_gateway() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(502).set_body_string("<html>upstream down</html>"))
        .mount(&server)
        .await;
    let app = TestApp::configured().build(Some(&server));

    let resp = post_json(&app, "/refresh", r#"{"refresh_token": "R"}"#).await;
    assert_status(&resp, StatusCode::BAD_GATEWAY);
    assert!(body_json(resp).await["error"].is_string());
}

#[tokio::test]
async fn test_options_preflight_any_path() {
    let app = TestApp::default().build(None);
    for uri in ["/refresh", "/tokens", "/nowhere"] {
        let resp = send(
            &app,
            Request::builder()
                .method("OPTIONS")
                .uri(uri)
                .body(Body::empty())
                .unwrap(),
        )
        .await;
        assert_status(&resp, StatusCode::OK);
        assert_eq!(resp.headers()[header::ACCESS_CONTROL_ALLOW_ORIGIN], "*");
        assert_eq!(
            resp.headers()[header::ACCESS_CONTROL_ALLOW_METHODS],
            "GET, POST, OPTIONS"
        );
        assert_eq!(resp.headers()[header::ACCESS_CONTROL_ALLOW_HEADERS], "Content-Type");
        assert!(body_string(resp).await.is_empty());
    }
}

#[tokio::test]
async fn test_cors_headers_on_json_errors() {
    let app = TestApp::default().build(None);
    let resp = get(&app, "/tokens").await;
    assert_eq!(resp.headers()[header::ACCESS_CONTROL_ALLOW_ORIGIN], "*");
}
