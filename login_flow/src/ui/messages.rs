//! User-visible message texts.
//!
//! The exact wording of several of these is pinned by conformance tests;
//! change them only together with the test-suite.

use chrono::Duration;

use super::types::UiText;

pub(crate) fn missing_property(name: &str) -> UiText {
    UiText::error(format!("Property {name} is missing."))
}

pub(crate) fn empty_value() -> UiText {
    UiText::error("length must be >= 1, but got 0")
}

/// One generic text for every credential failure. Whether the identifier
/// was unknown or the password wrong must not be distinguishable.
pub(crate) fn invalid_credentials() -> UiText {
    UiText::error(
        "The provided credentials are invalid, check for spelling mistakes \
         in your password or username, email address, or phone number.",
    )
}

pub(crate) fn csrf_violation() -> UiText {
    UiText::error(
        "The request was rejected to protect you from Cross-Site-Request-Forgery (CSRF) \
         which could cause you to lose your account access.",
    )
}

pub(crate) fn flow_expired(ago: Duration) -> UiText {
    let minutes = ago.num_milliseconds() as f64 / 60_000.0;
    UiText::error(format!(
        "The login flow expired {minutes:.2} minutes ago, please try again."
    ))
}
