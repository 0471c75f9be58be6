//! Login flow records and their lifecycle.

mod errors;
mod manager;
mod types;

pub use errors::FlowError;
pub(crate) use manager::FlowManager;
pub use types::{FlowMethods, FlowMode, FlowState, LoginFlow, PasswordMethod};
