//! Orchestration of the whole login pipeline.

mod errors;
mod handler;

pub use errors::LoginError;
pub use handler::LoginHandler;
