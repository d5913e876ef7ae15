//! Text-generation relay handler.

use crate::error::AppError;
use crate::extractors::JsonPayload;
use crate::response::message_ok;
use crate::service::GenerateRequest;
use crate::state::AppState;
use axum::{extract::State, response::IntoResponse};

/// POST /api/chatgpt: forwards `prompt` and returns the first completion as `message`.
pub async fn generate(
    State(state): State<AppState>,
    JsonPayload(body): JsonPayload,
) -> Result<impl IntoResponse, AppError> {
    let request = GenerateRequest::from_body(body)?;
    tracing::info!(prompt = %request.prompt, "received prompt");
    let message = state.generator.generate(&request.prompt).await?;
    Ok(message_ok(message))
}
