//! HTTP handlers for students and the text-generation relay.

pub mod chat;
pub mod students;
