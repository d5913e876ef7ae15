//! JSON success bodies.

use axum::{http::StatusCode, Json};
use serde::Serialize;

#[derive(Serialize, Debug)]
pub struct MessageBody {
    pub message: String,
}

#[derive(Serialize, Debug)]
pub struct CreatedBody {
    pub message: String,
    pub id: i32,
}

pub fn message_ok(message: impl Into<String>) -> (StatusCode, Json<MessageBody>) {
    (
        StatusCode::OK,
        Json(MessageBody {
            message: message.into(),
        }),
    )
}

pub fn created(message: impl Into<String>, id: i32) -> (StatusCode, Json<CreatedBody>) {
    (
        StatusCode::CREATED,
        Json(CreatedBody {
            message: message.into(),
            id,
        }),
    )
}
