use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use chrono::{DateTime, Utc};
use wiremock::matchers::{body_string_contains, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use crate::common::*;

async fn mock_exchange_success(server: &MockServer) {
    Mock::given(method("POST"))
        .and(path(TOKEN_PATH))
        .and(body_string_contains("grant_type=authorization_code"))
        .and(body_string_contains("code=abc"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "access_token": "A",
            "refresh_token": "R",
            "open_id": "U1",
            "expires_in": 3600,
            "scope": "s1",
            "token_type": "Bearer"
        })))
        .expect(1)
        .mount(server)
        .await;
}

#[tokio::test]
async fn test_callback_success_persists_token() {
    let server = MockServer::start().await;
    mock_exchange_success(&server).await;
    let app = TestApp::configured().build(Some(&server));

    let resp = get(&app, "/callback?code=abc&state=xyz").await;
    assert_status(&resp, StatusCode::OK);
    let html = body_string(resp).await;
    assert!(html.contains("Authorization Successful!"));
    assert!(html.contains("U1"));
    assert!(html.contains("1 hours"));

    let resp = get(&app, "/tokens").await;
    assert_status(&resp, StatusCode::OK);
    let raw = body_string(resp).await;
    assert!(raw.contains("\n  \""), "expected pretty-printed JSON");
    let record: serde_json::Value = serde_json::from_str(&raw).unwrap();
    assert_eq!(record["access_token"], "A");
    assert_eq!(record["refresh_token"], "R");
    assert_eq!(record["open_id"], "U1");
    assert_eq!(record["expires_in"], 3600);
    assert_eq!(record["scope"], "s1");
    assert_eq!(record["token_type"], "Bearer");

    let created: DateTime<Utc> = record["created_at"].as_str().unwrap().parse().unwrap();
    let expires: DateTime<Utc> = record["expires_at"].as_str().unwrap().parse().unwrap();
    assert_eq!((expires - created).num_seconds(), 3600);
}

#[tokio::test]
async fn test_callback_success_without_store() {
    let server = MockServer::start().await;
    mock_exchange_success(&server).await;
    let app = TestApp {
        credentials: true,
        ..Default::default()
    }
    .build(Some(&server));

    let resp = get(&app, "/callback?code=abc").await;
    assert_status(&resp, StatusCode::OK);
    assert!(body_string(resp).await.contains("Authorization Successful!"));
}

#[tokio::test]
async fn test_callback_exchange_failure() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(TOKEN_PATH))
        .respond_with(ResponseTemplate::new(400).set_body_json(serde_json::json!({
            "error": "invalid_grant",
            "error_description": "expired code"
        })))
        .mount(&server)
        .await;
    let app = TestApp::configured().build(Some(&server));

    let resp = get(&app, "/callback?code=abc").await;
    assert_status(&resp, StatusCode::BAD_REQUEST);
    let html = body_string(resp).await;
    assert!(html.contains("Token Exchange Failed"));
    assert!(html.contains("expired code"));

    // Nothing was stored.
    assert_status(&get(&app, "/tokens").await, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_callback_out_of_range_lifetime_renders_error_page() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(TOKEN_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "access_token": "A",
            "refresh_token": "R",
            "open_id": "U1",
            "expires_in": 10_000_000_000_000_i64,
            "scope": "s1"
        })))
        .expect(1)
        .mount(&server)
        .await;
    let app = TestApp::configured().build(Some(&server));

    let resp = get(&app, "/callback?code=abc").await;
    assert_status(&resp, StatusCode::BAD_REQUEST);
    assert!(
        resp.headers()[header::CONTENT_TYPE]
            .to_str()
            .unwrap()
            .starts_with("text/html")
    );
    let html = body_string(resp).await;
    assert!(html.contains("Token Exchange Failed"));
    assert!(html.contains("lifetime out of range"));

    assert_status(&get(&app, "/tokens").await, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_callback_provider_error_param() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;
    let app = TestApp::configured().build(Some(&server));

    let resp = get(
        &app,
        "/callback?error=access_denied&error_description=User%20cancelled",
    )
    .await;
    assert_status(&resp, StatusCode::BAD_REQUEST);
    let html = body_string(resp).await;
    assert!(html.contains("access_denied"));
    assert!(html.contains("User cancelled"));
}

#[tokio::test]
async fn test_callback_missing_code() {
    let app = TestApp::configured().build(None);
    let resp = get(&app, "/callback").await;
    assert_status(&resp, StatusCode::BAD_REQUEST);
    let html = body_string(resp).await;
    assert!(html.contains("No Code"));
    assert!(html.contains("Authorization code not received from TikTok"));
}

#[tokio::test]
async fn test_callback_unconfigured_renders_config_page() {
    let app = TestApp::default().build(None);
    let resp = get(&app, "/callback?code=abc").await;
    assert_status(&resp, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(body_string(resp).await.contains("TIKTOK_CLIENT_SECRET"));
}

#[tokio::test]
async fn test_callback_rejects_state_mismatch_when_verifying() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;
    let app = TestApp {
        verify_state: true,
        ..TestApp::configured()
    }
    .build(Some(&server));

    // No cookie at all.
    let resp = get(&app, "/callback?code=abc&state=xyz").await;
    assert_status(&resp, StatusCode::BAD_REQUEST);
    assert!(body_string(resp).await.contains("Invalid State"));

    // Cookie present but different.
    let resp = send(
        &app,
        Request::builder()
            .uri("/callback?code=abc&state=xyz")
            .header(header::COOKIE, "tokgate_oauth_state=other")
            .body(Body::empty())
            .unwrap(),
    )
    .await;
    assert_status(&resp, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_state_round_trip_when_verifying() {
    let server = MockServer::start().await;
    mock_exchange_success(&server).await;
    let app = TestApp {
        verify_state: true,
        ..TestApp::configured()
    }
    .build(Some(&server));

    let landing = get(&app, "/").await;
    assert_status(&landing, StatusCode::OK);
    let set_cookie = landing.headers()[header::SET_COOKIE]
        .to_str()
        .unwrap()
        .to_string();
    let pair = set_cookie.split(';').next().unwrap().to_string();
    let nonce = pair.strip_prefix("tokgate_oauth_state=").unwrap().to_string();
    assert_eq!(nonce.len(), 32);
    assert!(body_string(landing).await.contains(&format!("state={nonce}")));

    let resp = send(
        &app,
        Request::builder()
            .uri(format!("/callback?code=abc&state={nonce}"))
            .header(header::COOKIE, pair)
            .body(Body::empty())
            .unwrap(),
    )
    .await;
    assert_status(&resp, StatusCode::OK);
    let cleared = resp.headers()[header::SET_COOKIE].to_str().unwrap();
    assert!(cleared.contains("Max-Age=0"));
}
