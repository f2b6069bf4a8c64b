use axum::http::{StatusCode, header};

use crate::common::*;

#[tokio::test]
async fn test_landing_unconfigured() {
    let app = TestApp::default().build(None);
    let resp = get(&app, "/").await;
    assert_status(&resp, StatusCode::INTERNAL_SERVER_ERROR);
    let html = body_string(resp).await;
    assert!(html.contains("Configuration Required"));
    assert!(html.contains("TIKTOK_CLIENT_KEY"));
}

#[tokio::test]
async fn test_landing_links_to_authorize() {
    let app = TestApp::configured().build(None);
    for uri in ["/", "/auth"] {
        let resp = get(&app, uri).await;
        assert_status(&resp, StatusCode::OK);
        assert!(resp.headers().get(header::SET_COOKIE).is_none());
        assert!(
            resp.headers()[header::CONTENT_TYPE]
                .to_str()
                .unwrap()
                .starts_with("text/html")
        );
        let html = body_string(resp).await;
        // Interpolated URLs are HTML-escaped, `/` included.
        assert!(html.contains("www.tiktok.com"));
        assert!(html.contains("?client_key=ck"));
        assert!(html.contains("scope=video.upload%2Cuser.info.basic"));
        assert!(html.contains("response_type=code"));
        assert!(html.contains("redirect_uri=https%3A%2F%2Fbot.boringrats.dev%2Fcallback"));
    }
}

#[tokio::test]
async fn test_landing_state_changes_per_request() {
    let app = TestApp::configured().build(None);
    let first = body_string(get(&app, "/").await).await;
    let second = body_string(get(&app, "/").await).await;
    assert_ne!(first, second);
}

#[tokio::test]
async fn test_styles() {
    let app = TestApp::default().build(None);
    let resp = get(&app, "/styles.css").await;
    assert_status(&resp, StatusCode::OK);
    assert_eq!(resp.headers()[header::CONTENT_TYPE], "text/css");
    assert!(body_string(resp).await.contains(".card"));
}

#[tokio::test]
async fn test_unknown_path_is_404_html() {
    let app = TestApp::configured().build(None);
    let resp = get(&app, "/does-not-exist").await;
    assert_status(&resp, StatusCode::NOT_FOUND);
    assert_eq!(resp.headers()[header::ACCESS_CONTROL_ALLOW_ORIGIN], "*");
    let html = body_string(resp).await;
    assert!(html.contains("Page Not Found"));
}

#[tokio::test]
async fn test_responses_carry_request_id() {
    let app = TestApp::default().build(None);
    let resp = get(&app, "/api/status").await;
    assert!(resp.headers().contains_key("x-request-id"));
}
