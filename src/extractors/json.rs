//! Extract an optional JSON body. Handlers decide what a missing body means.

use crate::error::AppError;
use async_trait::async_trait;
use axum::{
    body::Bytes,
    extract::{FromRequest, Request},
    http::StatusCode,
};
use serde_json::Value;

/// Request body parsed as JSON; `None` when the body is empty. Malformed JSON is a 400,
/// a body over the router's limit a 413.
#[derive(Clone, Debug)]
pub struct JsonPayload(pub Option<Value>);

#[async_trait]
impl<S> FromRequest<S> for JsonPayload
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let bytes = Bytes::from_request(req, state)
            .await
            .map_err(|e| {
                let message = format!("Failed to read request body: {}", e);
                if e.status() == StatusCode::PAYLOAD_TOO_LARGE {
                    AppError::PayloadTooLarge(message)
                } else {
                    AppError::BadRequest(message)
                }
            })?;
        if bytes.iter().all(u8::is_ascii_whitespace) {
            return Ok(JsonPayload(None));
        }
        let value = serde_json::from_slice(&bytes)
            .map_err(|e| AppError::BadRequest(format!("Invalid JSON body: {}", e)))?;
        Ok(JsonPayload(Some(value)))
    }
}
