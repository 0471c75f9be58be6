//! Session issuance for completed logins.

mod errors;
mod types;

pub use errors::SessionError;
pub use types::{Session, SessionIssuer, TokenSessionIssuer};
