use std::sync::Arc;

use axum::Router;
use axum::body::{Body, to_bytes};
use axum::http::{Request, Response, StatusCode};
use tower::ServiceExt;
use wiremock::MockServer;

use tokgate::AppState;
use tokgate::config::Config;
use tokgate::oauth::{ClientCredentials, ProviderEndpoints};
use tokgate::server::build_app;
use tokgate::store::{MemoryKvStore, TokenStore};

pub const TOKEN_PATH: &str = "/v2/oauth/token/";

/// Knobs for a test application.
#[derive(Default)]
pub struct TestApp {
    pub credentials: bool,
    pub store: bool,
    pub verify_state: bool,
}

impl TestApp {
    pub fn configured() -> Self {
        Self {
            credentials: true,
            store: true,
            verify_state: false,
        }
    }

    /// Build the router, pointing the token client at `server` when given.
    pub fn build(self, server: Option<&MockServer>) -> Router {
        let mut config = Config::default();
        config.tiktok.verify_state = self.verify_state;
        if self.credentials {
            config.tiktok.client_key = Some("ck".into());
            config.tiktok.client_secret = Some("cs".into());
        }

        let credentials = self
            .credentials
            .then(|| ClientCredentials::new("ck", "cs"));

        let endpoints = match server {
            Some(s) => ProviderEndpoints::default().with_token_url(format!("{}{TOKEN_PATH}", s.uri())),
            None => ProviderEndpoints::default(),
        };

        let tokens = if self.store {
            TokenStore::new(Some(Arc::new(MemoryKvStore::new())))
        } else {
            TokenStore::disabled()
        };

        build_app(AppState::new(config, credentials, endpoints, tokens))
    }
}

pub async fn send(app: &Router, req: Request<Body>) -> Response<Body> {
    app.clone().oneshot(req).await.unwrap()
}

pub async fn get(app: &Router, uri: &str) -> Response<Body> {
    send(app, Request::builder().uri(uri).body(Body::empty()).unwrap()).await
}

pub async fn post_json(app: &Router, uri: &str, body: &str) -> Response<Body> {
    send(
        app,
        Request::builder()
            .method("POST")
            .uri(uri)
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
    )
    .await
}

pub async fn body_string(resp: Response<Body>) -> String {
    let bytes = to_bytes(resp.into_body(), usize::MAX).await.unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
}

pub async fn body_json(resp: Response<Body>) -> serde_json::Value {
    serde_json::from_str(&body_string(resp).await).unwrap()
}

pub fn assert_status(resp: &Response<Body>, expected: StatusCode) {
    assert_eq!(resp.status(), expected, "unexpected status for response");
}
