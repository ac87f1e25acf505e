//! Route table and middleware stack.

use axum::{
    body::Body,
    http::{Request, Uri},
    routing::get,
    Router,
};
use tower::{
    util::{MapRequest, MapRequestLayer},
    Layer,
};
use tower_http::{catch_panic::CatchPanicLayer, trace::TraceLayer};

use crate::web::error::panic_response;
use crate::web::handlers::{
    add_order, delete_order, get_order, health, list_orders, method_not_allowed, not_found,
    update_order, AppState,
};

/// First path segments of the route table, in their canonical casing.
const ROUTE_ROOTS: [&str; 2] = ["Health", "Order"];

/// The router behind case-insensitive route matching.
pub type OrdersApp = MapRequest<Router, fn(Request<Body>) -> Request<Body>>;

/// Build the application router.
///
/// Paths are matched exactly. Serve [`build_app`] to accept any casing of
/// the route roots.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/Health", get(health).fallback(method_not_allowed))
        .route(
            "/Order",
            get(list_orders)
                .post(add_order)
                .put(update_order)
                .fallback(method_not_allowed),
        )
        .route(
            "/Order/:id",
            get(get_order)
                .delete(delete_order)
                .fallback(method_not_allowed),
        )
        .fallback(not_found)
        .layer(CatchPanicLayer::custom(panic_response))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Build the served application: `/health`, `/HEALTH` and `/order/1` reach
/// the same handlers as `/Health` and `/Order/1`.
///
/// The path is rewritten before routing, which a `Router::layer` cannot do.
pub fn build_app(state: AppState) -> OrdersApp {
    MapRequestLayer::new(canonicalize_path as fn(Request<Body>) -> Request<Body>)
        .layer(build_router(state))
}

fn canonicalize_path(mut request: Request<Body>) -> Request<Body> {
    if let Some(uri) = canonical_uri(request.uri()) {
        *request.uri_mut() = uri;
    }
    request
}

/// Rewrite the first path segment to its canonical casing. `None` when the
/// path is already canonical or names no known route.
fn canonical_uri(uri: &Uri) -> Option<Uri> {
    let trimmed = uri.path().strip_prefix('/')?;
    let (head, tail) = match trimmed.split_once('/') {
        Some((head, tail)) => (head, Some(tail)),
        None => (trimmed, None),
    };

    let root = ROUTE_ROOTS
        .iter()
        .find(|root| root.eq_ignore_ascii_case(head))?;
    if *root == head {
        return None;
    }

    let mut rebuilt = format!("/{root}");
    if let Some(tail) = tail {
        rebuilt.push('/');
        rebuilt.push_str(tail);
    }
    if let Some(query) = uri.query() {
        rebuilt.push('?');
        rebuilt.push_str(query);
    }

    let mut parts = uri.clone().into_parts();
    parts.path_and_query = Some(rebuilt.parse().ok()?);
    Uri::from_parts(parts).ok()
}
