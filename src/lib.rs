//! Student records REST backend over PostgreSQL, plus a relay to a text-generation service.

pub mod config;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod response;
pub mod routes;
pub mod service;
pub mod sql;
pub mod state;
pub mod store;

pub use config::{Config, DatabaseConfig, GenerationConfig};
pub use error::{AppError, ConfigError, GenerationError, StoreError};
pub use routes::{app, chat_routes, ops_routes, student_routes};
pub use service::{
    OpenAiGenerator, PgStudentRepository, Student, StudentInput, StudentPatch, StudentRepository,
    TextGenerator,
};
pub use state::AppState;
pub use store::{connect_pool, ensure_database_exists, ensure_students_table};
