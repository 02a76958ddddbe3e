//! HTTP route handlers for storefront.
//!
//! # Route Structure
//!
//! Every page route lives under the configured base path (`{base}`).
//!
//! ```text
//! GET  /health                 - Liveness check
//! GET  /health/ready           - Readiness check
//!
//! GET  {base}/                 - Current page (home, catalog or cart)
//! POST {base}/navigate         - Take a navigation action
//!
//! # Cart (HTMX fragments when HX-Request is set, otherwise 303 to {base}/)
//! POST {base}/cart/add         - Add one unit of a product
//! POST {base}/cart/update      - Set a quantity (0 or less removes)
//! GET  {base}/cart/count       - Cart count badge (fragment)
//!
//! GET  {base}/static/*         - Static assets
//! ```

pub mod cart;
pub mod home;
pub mod pages;
pub mod products;

use axum::{
    Router,
    extract::State,
    http::{HeaderMap, StatusCode},
    middleware,
    routing::{get, post},
};
use tower_http::{services::ServeDir, trace::TraceLayer};

use crate::middleware::{
    create_session_layer, csp_nonce_middleware, request_id_middleware,
    security_headers_middleware,
};
use crate::state::AppState;

/// Header htmx sets on every request it makes.
const HX_REQUEST_HEADER: &str = "hx-request";

/// Returns `true` if the request was made by htmx.
pub(crate) fn is_htmx(headers: &HeaderMap) -> bool {
    headers
        .get(HX_REQUEST_HEADER)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|v| v.eq_ignore_ascii_case("true"))
}

/// Create the storefront routes, mounted under the base path.
///
/// Paths are built from [`crate::config::BasePath::href`] rather than nested so that both
/// `{base}` and `{base}/` reach the page.
pub fn routes(state: &AppState) -> Router<AppState> {
    let base = state.base_path();

    let mut router = Router::new()
        .route(&base.href("/"), get(pages::show))
        .route(&base.href("/navigate"), post(pages::navigate))
        .route(&base.href("/cart/add"), post(cart::add))
        .route(&base.href("/cart/update"), post(cart::update))
        .route(&base.href("/cart/count"), get(cart::count))
        .nest_service(
            &base.href("/static"),
            ServeDir::new(&state.config().static_dir),
        );

    if !base.is_root() {
        router = router.route(base.as_str(), get(pages::show));
    }

    router
}

/// Build the complete application: health checks, storefront routes and the
/// middleware stack.
///
/// Sentry layers are added by the binary.
pub fn app(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/health/ready", get(readiness))
        .merge(routes(&state))
        .layer(create_session_layer(state.config()))
        .layer(middleware::from_fn(csp_nonce_middleware))
        .layer(middleware::from_fn(security_headers_middleware))
        .layer(middleware::from_fn(request_id_middleware))
        .layer(
            TraceLayer::new_for_http().make_span_with(|request: &axum::http::Request<_>| {
                tracing::info_span!(
                    "request",
                    method = %request.method(),
                    uri = %request.uri(),
                    request_id = tracing::field::Empty,
                )
            }),
        )
        .with_state(state)
}

/// Liveness health check endpoint.
///
/// Returns "ok" if the server is running.
async fn health() -> &'static str {
    "ok"
}

/// Readiness health check endpoint.
///
/// The storefront has no external dependencies; it is ready once the
/// catalog is loaded.
async fn readiness(State(state): State<AppState>) -> StatusCode {
    if state.catalog().is_empty() {
        StatusCode::SERVICE_UNAVAILABLE
    } else {
        StatusCode::OK
    }
}
