//! Shared application state for all routes. Built once at startup; nothing in it is mutated afterwards.

use crate::service::{StudentRepository, TextGenerator};
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub students: Arc<dyn StudentRepository>,
    pub generator: Arc<dyn TextGenerator>,
}

impl AppState {
    pub fn new(students: Arc<dyn StudentRepository>, generator: Arc<dyn TextGenerator>) -> Self {
        AppState {
            students,
            generator,
        }
    }
}
