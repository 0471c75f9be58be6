//! Anti-forgery checks for credential submissions.
//!
//! Browser flows carry a token bound to the flow at creation; the
//! submitted copy must match. API flows have no ambient cookie jar to
//! protect, so the token is not enforced there. Instead, API requests are
//! rejected when they carry headers that only a browser context would
//! send, with a message naming the offending header so operators can tell
//! this apart from a wrong token.

use http::HeaderMap;
use http::header::{COOKIE, ORIGIN};
use subtle::ConstantTimeEq;
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CsrfError {
    #[error(
        "The request was rejected to protect you from Cross-Site-Request-Forgery (CSRF) \
         which could cause you to lose your account access."
    )]
    TokenMismatch,

    #[error("The HTTP Request Header included the \"{0}\" key")]
    DisallowedHeader(String),
}

/// Verify a browser submission's token against the flow's bound token.
/// The comparison is constant-time; a missing token fails like a wrong one.
pub(crate) fn verify_browser_token(
    expected: &str,
    submitted: Option<&str>,
) -> Result<(), CsrfError> {
    let submitted = submitted.unwrap_or_default();
    let matches: bool = expected
        .as_bytes()
        .ct_eq(submitted.as_bytes())
        .into();
    if matches {
        Ok(())
    } else {
        tracing::debug!("CSRF token mismatch on browser submission");
        Err(CsrfError::TokenMismatch)
    }
}

/// Reject API requests that carry ambient browser headers.
pub(crate) fn check_api_headers(headers: &HeaderMap) -> Result<(), CsrfError> {
    for key in [COOKIE, ORIGIN] {
        if headers.contains_key(&key) {
            let name = canonical_name(key.as_str());
            tracing::debug!(header = %name, "rejecting API submission with browser header");
            return Err(CsrfError::DisallowedHeader(name));
        }
    }
    Ok(())
}

fn canonical_name(lower: &str) -> String {
    // Header names come back lowercased; surface them in canonical form.
    let mut out = String::with_capacity(lower.len());
    let mut upper_next = true;
    for c in lower.chars() {
        if upper_next {
            out.extend(c.to_uppercase());
        } else {
            out.push(c);
        }
        upper_next = c == '-';
    }
    out
}
