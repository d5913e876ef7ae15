use crate::handlers::chat::generate;
use crate::state::AppState;
use axum::{routing::post, Router};

pub fn chat_routes(state: AppState) -> Router {
    Router::new()
        .route("/chatgpt", post(generate))
        .with_state(state)
}
