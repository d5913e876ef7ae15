pub mod json;

pub use json::JsonPayload;
