use std::sync::Arc;

use axum::{Router, middleware};
use tower_http::trace::TraceLayer;

use crate::state::AppState;

use super::{catch_panic_layer, html_error_middleware, views};

pub fn router(state: Arc<AppState>) -> Router {
    Router::new().merge(views::router(state))
}

/// The router with the error page, panic and tracing layers the server runs.
pub fn app(state: Arc<AppState>) -> Router {
    router(state)
        .layer(middleware::from_fn(html_error_middleware))
        .layer(catch_panic_layer())
        .layer(TraceLayer::new_for_http())
}
