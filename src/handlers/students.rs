//! Student CRUD handlers: list, read, create, replace, patch, delete.

use crate::error::AppError;
use crate::extractors::JsonPayload;
use crate::response::{created, message_ok};
use crate::service::{Student, StudentInput, StudentPatch};
use crate::state::AppState;
use axum::{
    extract::{Path, State},
    response::IntoResponse,
    Json,
};

/// Ids are plain decimal digits that fit an `i32`; anything else can never match a row.
fn parse_id(id_str: &str) -> Result<i32, AppError> {
    if id_str.is_empty() || !id_str.bytes().all(|b| b.is_ascii_digit()) {
        return Err(AppError::student_not_found(id_str));
    }
    id_str
        .parse::<i32>()
        .map_err(|_| AppError::student_not_found(id_str))
}

pub async fn list(State(state): State<AppState>) -> Result<Json<Vec<Student>>, AppError> {
    let students = state
        .students
        .list()
        .await
        .map_err(AppError::storage("Error fetching students"))?;
    if students.is_empty() {
        return Err(AppError::NotFound("No students found".into()));
    }
    Ok(Json(students))
}

pub async fn read(
    State(state): State<AppState>,
    Path(id_str): Path<String>,
) -> Result<Json<Student>, AppError> {
    let id = parse_id(&id_str)?;
    let student = state
        .students
        .get(id)
        .await
        .map_err(AppError::storage("Error fetching student"))?
        .ok_or_else(|| AppError::student_not_found(id))?;
    Ok(Json(student))
}

pub async fn create(
    State(state): State<AppState>,
    JsonPayload(body): JsonPayload,
) -> Result<impl IntoResponse, AppError> {
    let input = StudentInput::from_body(body)?;
    let id = state
        .students
        .create(&input)
        .await
        .map_err(AppError::storage("Error adding student"))?;
    tracing::info!(id, "student created");
    Ok(created("Student added successfully", id))
}

pub async fn replace(
    State(state): State<AppState>,
    Path(id_str): Path<String>,
    JsonPayload(body): JsonPayload,
) -> Result<impl IntoResponse, AppError> {
    let id = parse_id(&id_str)?;
    let input = StudentInput::from_body(body)?;
    let matched = state
        .students
        .replace(id, &input)
        .await
        .map_err(AppError::storage("Error updating student"))?;
    if !matched {
        return Err(AppError::student_not_found(id));
    }
    Ok(message_ok(format!("Student with ID {} updated successfully!", id)))
}

pub async fn patch(
    State(state): State<AppState>,
    Path(id_str): Path<String>,
    JsonPayload(body): JsonPayload,
) -> Result<impl IntoResponse, AppError> {
    let id = parse_id(&id_str)?;
    let patch = StudentPatch::from_body(body)?;
    let matched = state
        .students
        .update(id, &patch)
        .await
        .map_err(AppError::storage("Error updating student"))?;
    if !matched {
        return Err(AppError::student_not_found(id));
    }
    Ok(message_ok(format!("Student with ID {} updated successfully", id)))
}

pub async fn delete(
    State(state): State<AppState>,
    Path(id_str): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let id = parse_id(&id_str)?;
    let matched = state
        .students
        .delete(id)
        .await
        .map_err(AppError::storage("Error deleting student"))?;
    if !matched {
        return Err(AppError::student_not_found(id));
    }
    tracing::info!(id, "student deleted");
    Ok(message_ok(format!("Student with ID {} deleted successfully", id)))
}
