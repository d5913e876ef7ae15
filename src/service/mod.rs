pub mod generation;
pub mod students;
pub mod validation;

pub use generation::*;
pub use students::*;
pub use validation::*;
