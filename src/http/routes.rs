use super::handlers;
use super::state::AppState;
use axum::{
    routing::{get, post},
    Router,
};
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

/// Create the HTTP router with all routes
pub fn create_router(state: AppState) -> Router {
    Router::new()
        // Health check
        .route("/health", get(handlers::health_check))
        // Session lifecycle
        .route("/sessions", post(handlers::create_session))
        .route(
            "/sessions/:session_id/finalize",
            post(handlers::finalize_session),
        )
        .route(
            "/sessions/:session_id/cancel",
            post(handlers::cancel_session),
        )
        .route(
            "/sessions/:session_id/next-question",
            post(handlers::next_question),
        )
        // Streaming events
        .route("/sessions/:session_id/frame", post(handlers::submit_frame))
        .route("/sessions/:session_id/audio", post(handlers::submit_audio))
        // Queries
        .route(
            "/sessions/:session_id/snapshot",
            get(handlers::get_snapshot),
        )
        // Request logging, then CORS for browser clients
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(CorsLayer::permissive()),
        )
        .with_state(state)
}
