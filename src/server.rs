//! Router assembly and the global middleware stack.

use std::any::Any;

use axum::Router;
use axum::extract::Request;
use axum::http::{HeaderName, HeaderValue, Method, StatusCode, header};
use axum::middleware::{self, Next};
use axum::response::{IntoResponse, Response};
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::set_header::SetResponseHeaderLayer;
use tower_http::trace::TraceLayer;

use crate::AppState;
use crate::error::AppError;
use crate::{api, web};

/// Headers attached to every response.
fn cors_headers() -> [(HeaderName, &'static str); 3] {
    [
        (header::ACCESS_CONTROL_ALLOW_ORIGIN, "*"),
        (header::ACCESS_CONTROL_ALLOW_METHODS, "GET, POST, OPTIONS"),
        (header::ACCESS_CONTROL_ALLOW_HEADERS, "Content-Type"),
    ]
}

/// Build the combined application router with all middleware layers.
pub fn build_app(state: AppState) -> Router {
    let routes = Router::new()
        .merge(web::build_web_router())
        .merge(api::build_api_router())
        .fallback(web::not_found);

    apply_middleware(routes).with_state(state)
}

/// Global middleware stack, outermost last.
fn apply_middleware<S>(router: Router<S>) -> Router<S>
where
    S: Clone + Send + Sync + 'static,
{
    // -- Request ID layer (X-Request-ID) --------------------------------------
    let request_id = SetRequestIdLayer::x_request_id(MakeRequestUuid);
    let propagate_id = PropagateRequestIdLayer::x_request_id();

    // -- Tracing layer --------------------------------------------------------
    let trace = TraceLayer::new_for_http();

    let mut router = router
        .layer(CatchPanicLayer::custom(handle_panic))
        .layer(middleware::from_fn(short_circuit_preflight))
        .layer(propagate_id)
        .layer(request_id)
        .layer(trace);

    // -- CORS headers ---------------------------------------------------------
    for (name, value) in cors_headers() {
        router = router.layer(SetResponseHeaderLayer::overriding(
            name,
            HeaderValue::from_static(value),
        ));
    }
    router
}

/// Answer every `OPTIONS` request with an empty 200, whatever the path.
async fn short_circuit_preflight(req: Request, next: Next) -> Response {
    if req.method() == Method::OPTIONS {
        return StatusCode::OK.into_response();
    }
    next.run(req).await
}

/// Render a handler panic as the generic 500 body. The payload is logged,
/// never sent to the client.
fn handle_panic(err: Box<dyn Any + Send + 'static>) -> Response {
    let detail = err
        .downcast_ref::<String>()
        .map(String::as_str)
        .or_else(|| err.downcast_ref::<&str>().copied())
        .unwrap_or("unknown panic");
    tracing::error!(panic = detail, "Handler panicked");
    AppError::Internal("Unexpected error while handling the request".to_string()).into_response()
}
