use axum::Router;
use axum::extract::DefaultBodyLimit;
use axum::middleware;
use axum::routing::{get, post};
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::Level;

use crate::infrastructure::observability::request_id_middleware;
use crate::presentation::cors::cors_middleware;
use crate::presentation::handlers::{
    assess_handler, grade_handler, health_handler, judge_handler, method_not_allowed_handler,
};
use crate::presentation::state::AppState;

pub fn create_router(state: AppState) -> Router {
    let trace_layer = TraceLayer::new_for_http()
        .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
        .on_response(DefaultOnResponse::new().level(Level::INFO));

    let body_limit = DefaultBodyLimit::max(state.max_upload_bytes);

    Router::new()
        .route("/health", get(health_handler))
        .route(
            "/api/grade",
            post(grade_handler).fallback(method_not_allowed_handler),
        )
        .route(
            "/api/judge",
            post(judge_handler).fallback(method_not_allowed_handler),
        )
        .route(
            "/api/assess",
            post(assess_handler).fallback(method_not_allowed_handler),
        )
        .layer(body_limit)
        .layer(middleware::from_fn(request_id_middleware))
        .layer(trace_layer)
        .layer(middleware::from_fn(cors_middleware))
        .with_state(state)
}
