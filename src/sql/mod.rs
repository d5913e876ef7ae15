//! Parameterized SQL for the students table: identifiers are fixed, values are parameters.

mod builder;
pub use builder::*;
