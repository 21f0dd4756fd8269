// src/api/http/router.rs
// HTTP router composition

use axum::{
    middleware,
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::trace::TraceLayer;

use super::{
    handlers::{api_not_found, practice_handler, root_handler},
    rate_limit::rate_limit_middleware,
};
use crate::state::AppState;

/// Routes nested under `/api`. The limiter also counts unmatched paths.
pub fn api_router(app_state: Arc<AppState>) -> Router<Arc<AppState>> {
    Router::new()
        .route("/practice", post(practice_handler))
        .fallback(api_not_found)
        .layer(middleware::from_fn_with_state(
            app_state.limiter.clone(),
            rate_limit_middleware,
        ))
}

/// Full application router
pub fn create_router(app_state: AppState) -> Router {
    let app_state = Arc::new(app_state);

    Router::new()
        // Liveness, never rate limited
        .route("/", get(root_handler))
        .nest("/api", api_router(app_state.clone()))
        .layer(TraceLayer::new_for_http())
        .with_state(app_state)
}
