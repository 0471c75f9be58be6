//! Decoding of credential submissions.
//!
//! A submission arrives either as a JSON object (API flows) or as
//! URL-encoded form data (browser flows). Decoding is tolerant of the
//! encoding mode but strict on field types; absence and empty string are
//! kept apart so validation can tell them apart later.

mod decode;
mod errors;

pub(crate) use decode::{decode_body, form_csrf_token};
pub use errors::DecodeError;

/// A decoded credential submission. `None` means the field was absent
/// from the payload, `Some("")` that it was present but empty.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoginSubmission {
    pub identifier: Option<String>,
    pub password: Option<String>,
    pub csrf_token: Option<String>,
}
