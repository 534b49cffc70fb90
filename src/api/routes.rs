use axum::{
    middleware,
    routing::{get, post},
    Router,
};
use tower::ServiceBuilder;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use crate::middleware::request_id::{make_span_with_request_id, request_id_middleware};

use super::handlers;
use super::AppState;

/// Creates the application router with all routes
pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/health", get(handlers::health_check))
        // Nesting "/" only matches "/api", so the trailing-slash form is registered separately
        .route("/api/", get(handlers::root))
        .nest("/api", api_routes())
        .layer(
            ServiceBuilder::new()
                .layer(middleware::from_fn(request_id_middleware))
                .layer(TraceLayer::new_for_http().make_span_with(make_span_with_request_id))
                .layer(cors),
        )
        .with_state(state)
}

/// API routes under /api
fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(handlers::root))
        .route("/generate_prompt", post(handlers::generate_prompt))
        .route("/get_available_genres", get(handlers::get_available_genres))
}
