//! Operational endpoints for load balancers and deploy tooling.

use crate::state::AppState;
use axum::{extract::State, http::StatusCode, routing::get, Json, Router};
use serde::Serialize;

/// Liveness and readiness share one shape; `database` is only reported by `/ready`.
#[derive(Serialize)]
struct Status {
    status: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    database: Option<&'static str>,
}

#[derive(Serialize)]
struct Build {
    name: &'static str,
    version: &'static str,
}

async fn alive() -> Json<Status> {
    Json(Status {
        status: "ok",
        database: None,
    })
}

async fn ready(State(state): State<AppState>) -> (StatusCode, Json<Status>) {
    match state.students.ping().await {
        Ok(()) => (
            StatusCode::OK,
            Json(Status {
                status: "ok",
                database: Some("ok"),
            }),
        ),
        Err(e) => {
            tracing::warn!(error = %e, "database unreachable during readiness check");
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(Status {
                    status: "degraded",
                    database: Some("unavailable"),
                }),
            )
        }
    }
}

async fn build() -> Json<Build> {
    Json(Build {
        name: env!("CARGO_PKG_NAME"),
        version: env!("CARGO_PKG_VERSION"),
    })
}

/// `GET /health`, `GET /ready` and `GET /version`. Only `/ready` touches the database.
pub fn ops_routes(state: AppState) -> Router {
    Router::new()
        .route("/health", get(alive))
        .route("/version", get(build))
        .route("/ready", get(ready))
        .with_state(state)
}
