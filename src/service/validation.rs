//! Request payload validation: loose JSON bodies in, typed inputs out.

use crate::error::AppError;
use serde::{Deserialize, Deserializer};
use serde_json::Value;

pub const MISSING_STUDENT_FIELDS: &str = "Missing required fields: name or grade";
pub const NO_UPDATE_DATA: &str = "No data provided for update";
pub const NO_UPDATE_FIELDS: &str = "No fields provided for update";
pub const NO_JSON_DATA: &str = "No JSON data received";
pub const MISSING_PROMPT: &str = "Missing required field: prompt";

/// A body field that distinguishes a missing key from an explicit `null`.
/// Use with `#[serde(default)]` so missing keys become `Absent`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Field<T> {
    Absent,
    Null,
    Value(T),
}

impl<T> Default for Field<T> {
    fn default() -> Self {
        Field::Absent
    }
}

impl<'de, T: Deserialize<'de>> Deserialize<'de> for Field<T> {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        Ok(match Option::<T>::deserialize(deserializer)? {
            Some(v) => Field::Value(v),
            None => Field::Null,
        })
    }
}

impl<T> Field<T> {
    pub fn is_absent(&self) -> bool {
        matches!(self, Field::Absent)
    }
}

#[derive(Deserialize, Debug, Default)]
struct StudentBody {
    #[serde(default)]
    name: Field<String>,
    #[serde(default)]
    grade: Field<Value>,
}

/// Grades are stored as text; JSON numbers are kept in their literal form.
fn grade_text(grade: Value) -> Result<String, AppError> {
    match grade {
        Value::String(s) => Ok(s),
        Value::Number(n) => Ok(n.to_string()),
        _ => Err(AppError::BadRequest("grade must be a string or a number".into())),
    }
}

/// Parse an object body into `StudentBody`. `Ok(None)` when there is no body or it is not an object.
fn student_body(body: Option<Value>) -> Result<Option<(StudentBody, bool)>, AppError> {
    let map = match body {
        Some(Value::Object(m)) => m,
        _ => return Ok(None),
    };
    let was_empty = map.is_empty();
    let parsed: StudentBody = serde_json::from_value(Value::Object(map))
        .map_err(|e| AppError::BadRequest(format!("Invalid student payload: {}", e)))?;
    Ok(Some((parsed, was_empty)))
}

fn checked_name(name: String) -> Result<String, AppError> {
    if name.is_empty() {
        return Err(AppError::BadRequest("name must not be empty".into()));
    }
    Ok(name)
}

/// Complete student fields, as required by create and full replace.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StudentInput {
    pub name: String,
    /// Stored verbatim; an empty grade is accepted.
    pub grade: String,
}

impl StudentInput {
    pub fn from_body(body: Option<Value>) -> Result<Self, AppError> {
        let (body, _) = student_body(body)?
            .ok_or_else(|| AppError::BadRequest(MISSING_STUDENT_FIELDS.into()))?;
        match (body.name, body.grade) {
            (Field::Value(name), Field::Value(grade)) => Ok(StudentInput {
                name: checked_name(name)?,
                grade: grade_text(grade)?,
            }),
            _ => Err(AppError::BadRequest(MISSING_STUDENT_FIELDS.into())),
        }
    }
}

/// A partial update. Always touches at least one column.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StudentPatch {
    Name(String),
    Grade(String),
    Both { name: String, grade: String },
}

impl StudentPatch {
    pub fn from_body(body: Option<Value>) -> Result<Self, AppError> {
        let (body, was_empty) = student_body(body)?
            .ok_or_else(|| AppError::BadRequest(NO_UPDATE_DATA.into()))?;
        if was_empty {
            return Err(AppError::BadRequest(NO_UPDATE_DATA.into()));
        }
        let name = match body.name {
            Field::Absent => None,
            Field::Null => return Err(AppError::BadRequest("name must not be null".into())),
            Field::Value(n) => Some(checked_name(n)?),
        };
        let grade = match body.grade {
            Field::Absent => None,
            Field::Null => return Err(AppError::BadRequest("grade must not be null".into())),
            Field::Value(g) => Some(grade_text(g)?),
        };
        match (name, grade) {
            (Some(name), Some(grade)) => Ok(StudentPatch::Both { name, grade }),
            (Some(name), None) => Ok(StudentPatch::Name(name)),
            (None, Some(grade)) => Ok(StudentPatch::Grade(grade)),
            (None, None) => Err(AppError::BadRequest(NO_UPDATE_FIELDS.into())),
        }
    }

    pub fn name(&self) -> Option<&str> {
        match self {
            StudentPatch::Name(n) | StudentPatch::Both { name: n, .. } => Some(n.as_str()),
            StudentPatch::Grade(_) => None,
        }
    }

    pub fn grade(&self) -> Option<&str> {
        match self {
            StudentPatch::Grade(g) | StudentPatch::Both { grade: g, .. } => Some(g.as_str()),
            StudentPatch::Name(_) => None,
        }
    }
}

#[derive(Deserialize, Debug, Default)]
struct PromptBody {
    #[serde(default)]
    prompt: Field<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerateRequest {
    pub prompt: String,
}

impl GenerateRequest {
    pub fn from_body(body: Option<Value>) -> Result<Self, AppError> {
        let map = match body {
            None | Some(Value::Null) => return Err(AppError::BadRequest(NO_JSON_DATA.into())),
            Some(Value::Object(m)) if m.is_empty() => {
                return Err(AppError::BadRequest(NO_JSON_DATA.into()))
            }
            Some(Value::Object(m)) => m,
            Some(_) => return Err(AppError::BadRequest(MISSING_PROMPT.into())),
        };
        let parsed: PromptBody = serde_json::from_value(Value::Object(map))
            .map_err(|e| AppError::BadRequest(format!("Invalid request payload: {}", e)))?;
        match parsed.prompt {
            Field::Value(prompt) => Ok(GenerateRequest { prompt }),
            Field::Absent | Field::Null => Err(AppError::BadRequest(MISSING_PROMPT.into())),
        }
    }
}
