//! Student CRUD routes.

use crate::handlers::students::{create, delete as delete_handler, list, patch, read, replace};
use crate::state::AppState;
use axum::{routing::get, Router};

pub fn student_routes(state: AppState) -> Router {
    Router::new()
        .route("/students", get(list).post(create))
        .route(
            "/students/:id",
            get(read).put(replace).patch(patch).delete(delete_handler),
        )
        .with_state(state)
}
