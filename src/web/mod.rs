//! Browser-facing pages of the authorization flow.
//!
//! The landing page links to TikTok's consent screen, the callback exchanges
//! the returned code and shows the tokens. Everything is rendered from
//! embedded templates via minijinja.

pub mod state_cookie;
pub mod templates;

use axum::Router;
use axum::extract::{Query, State};
use axum::http::{HeaderMap, StatusCode, header};
use axum::response::{Html, IntoResponse, Response};
use axum::routing::get;
use minijinja::{Environment, context};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::AppState;
use crate::error::AppError;
use crate::oauth::{OAuthError, ProviderEndpoints, TokenRecord, build_authorize_url, generate_state};
use crate::store::PutOutcome;

// ---------------------------------------------------------------------------
// Template engine
// ---------------------------------------------------------------------------

/// Build a minijinja environment with all embedded templates registered.
fn template_env() -> Result<Environment<'static>, minijinja::Error> {
    let mut env = Environment::new();
    env.add_template("layout.html", templates::LAYOUT)?;
    env.add_template("landing.html", templates::LANDING)?;
    env.add_template("success.html", templates::SUCCESS)?;
    env.add_template("error.html", templates::ERROR)?;
    env.add_template("config_error.html", templates::CONFIG_ERROR)?;
    env.add_template("not_found.html", templates::NOT_FOUND)?;
    Ok(env)
}

/// Render a template by name with the given status and minijinja context.
fn render(status: StatusCode, template_name: &str, ctx: minijinja::Value) -> Response {
    let rendered = template_env().and_then(|env| {
        let tmpl = env.get_template(template_name)?;
        tmpl.render(ctx)
    });
    match rendered {
        Ok(html) => (status, Html(html)).into_response(),
        Err(err) => {
            tracing::error!(template = template_name, error = %err, "Template render error");
            AppError::Internal("Failed to render page".to_string()).into_response()
        }
    }
}

// ---------------------------------------------------------------------------
// Public router builder
// ---------------------------------------------------------------------------

/// Build the page routes. The 404 page is installed as the global fallback
/// by [`crate::server::build_app`].
pub fn build_web_router() -> Router<AppState> {
    Router::new()
        .route("/", get(landing_page))
        .route("/auth", get(landing_page))
        .route("/callback", get(oauth_callback))
        .route("/styles.css", get(styles))
}

/// One row of the endpoint table on the landing page.
#[derive(Debug, Serialize)]
struct EndpointDoc {
    method: &'static str,
    path: &'static str,
    description: &'static str,
}

const ENDPOINT_DOCS: &[EndpointDoc] = &[
    EndpointDoc { method: "GET", path: "/", description: "Landing page" },
    EndpointDoc { method: "GET", path: "/callback", description: "OAuth callback" },
    EndpointDoc { method: "GET", path: "/tokens", description: "Get stored tokens" },
    EndpointDoc { method: "POST", path: "/refresh", description: "Refresh access token" },
    EndpointDoc { method: "GET", path: "/api/status", description: "Service status" },
];

// ---------------------------------------------------------------------------
// Page handlers
// ---------------------------------------------------------------------------

/// `GET /` and `GET /auth`.
async fn landing_page(State(state): State<AppState>) -> Response {
    let Some(client_key) = state.config.tiktok.client_key() else {
        warn!("Landing page requested but TIKTOK_CLIENT_KEY is not set");
        return config_error_page();
    };

    let nonce = match generate_state() {
        Ok(nonce) => nonce,
        Err(e) => return AppError::from(e).into_response(),
    };

    let endpoints = state.oauth.endpoints();
    let auth_url = build_authorize_url(endpoints, client_key, &nonce);

    let mut response = render(
        StatusCode::OK,
        "landing.html",
        context! {
            auth_url => auth_url,
            redirect_uri => &endpoints.redirect_uri,
            scopes => &endpoints.scopes,
            endpoints => ENDPOINT_DOCS,
            version => env!("CARGO_PKG_VERSION"),
        },
    );

    if state.config.tiktok.verify_state {
        if let Some(cookie) = state_cookie::set_cookie(&nonce) {
            response.headers_mut().append(header::SET_COOKIE, cookie);
        }
    }
    response
}

/// Query parameters TikTok appends to the redirect URI.
#[derive(Debug, Default, Deserialize)]
struct CallbackQuery {
    code: Option<String>,
    state: Option<String>,
    error: Option<String>,
    error_description: Option<String>,
}

/// `GET /callback`.
async fn oauth_callback(
    State(state): State<AppState>,
    headers: HeaderMap,
    Query(params): Query<CallbackQuery>,
) -> Response {
    let endpoints = state.oauth.endpoints();

    if let Some(error) = params.error.as_deref().filter(|e| !e.is_empty()) {
        let description = params
            .error_description
            .as_deref()
            .unwrap_or("No description provided");
        warn!(%error, "Provider returned an authorization error");
        return error_page(endpoints, error, description);
    }

    let Some(code) = params.code.as_deref().filter(|c| !c.is_empty()) else {
        return error_page(
            endpoints,
            "No Code",
            "Authorization code not received from TikTok",
        );
    };

    if state.config.tiktok.verify_state {
        let expected = state_cookie::extract(&headers);
        if !state_cookie::matches(expected.as_deref(), params.state.as_deref()) {
            warn!(cookie_present = expected.is_some(), "Callback state mismatch");
            return error_page(
                endpoints,
                "Invalid State",
                "The authorization state does not match this browser session. Start again from the home page.",
            );
        }
    }

    let Some(credentials) = state.credentials() else {
        warn!("Callback received but client credentials are not configured");
        return config_error_page();
    };

    let exchanged = state
        .oauth
        .exchange_code(code, Some(credentials))
        .await
        .and_then(TokenRecord::issued_now);

    match exchanged {
        Ok(record) => {
            match state.tokens.put(&record).await {
                PutOutcome::Stored => debug!("Latest token persisted"),
                PutOutcome::Skipped => {}
                PutOutcome::Failed(_) => warn!("Token shown to user but not persisted"),
            }
            info!(open_id = %record.open_id, "Authorization completed");

            let mut response = success_page(&record);
            if state.config.tiktok.verify_state {
                response
                    .headers_mut()
                    .append(header::SET_COOKIE, state_cookie::clear_cookie());
            }
            response
        }
        Err(OAuthError::MissingCredentials) => config_error_page(),
        Err(e) => error_page(endpoints, "Token Exchange Failed", &e.to_string()),
    }
}

/// `GET /styles.css`.
async fn styles() -> impl IntoResponse {
    ([(header::CONTENT_TYPE, "text/css")], templates::STYLES)
}

/// Fallback for unknown paths.
pub async fn not_found() -> Response {
    render(StatusCode::NOT_FOUND, "not_found.html", context! {})
}

// ---------------------------------------------------------------------------
// Page builders
// ---------------------------------------------------------------------------

fn success_page(record: &TokenRecord) -> Response {
    render(
        StatusCode::OK,
        "success.html",
        context! {
            record => record,
            expires_in_hours => record.expires_in_hours(),
            expires_at => record.expires_at.format("%Y-%m-%d %H:%M:%S UTC").to_string(),
        },
    )
}

fn error_page(endpoints: &ProviderEndpoints, title: &str, description: &str) -> Response {
    render(
        StatusCode::BAD_REQUEST,
        "error.html",
        context! {
            title => title,
            description => description,
            redirect_uri => &endpoints.redirect_uri,
        },
    )
}

fn config_error_page() -> Response {
    render(StatusCode::INTERNAL_SERVER_ERROR, "config_error.html", context! {})
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
