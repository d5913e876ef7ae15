//! Route tables and the assembled application router.

pub mod chat;
pub mod ops;
pub mod students;

pub use chat::chat_routes;
pub use ops::ops_routes;
pub use students::student_routes;

use crate::state::AppState;
use axum::{extract::DefaultBodyLimit, Router};
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

pub const MAX_BODY_BYTES: usize = 1024 * 1024;

/// Full application: health/readiness, `/api/students`, `/api/chatgpt`. Any origin may call it.
pub fn app(state: AppState) -> Router {
    let api = Router::new()
        .merge(student_routes(state.clone()))
        .merge(chat_routes(state.clone()));

    Router::new()
        .merge(ops_routes(state))
        .nest("/api", api)
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(CorsLayer::permissive())
                .layer(DefaultBodyLimit::max(MAX_BODY_BYTES)),
        )
}
