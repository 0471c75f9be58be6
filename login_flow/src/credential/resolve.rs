use std::sync::Arc;

use crate::credential::hasher::PasswordHasher;
use crate::credential::types::{CredentialStore, Identity};
use crate::storage::StorageError;
use crate::submission::LoginSubmission;
use crate::ui::messages;
use crate::ui::schema::{FIELD_IDENTIFIER, FIELD_PASSWORD};
use crate::ui::UiText;

/// Per-field validation of a decoded submission. Absent fields and empty
/// fields get different messages; both block credential resolution.
pub(crate) fn validate_required_fields(
    submission: &LoginSubmission,
) -> Vec<(&'static str, UiText)> {
    let mut errors = Vec::new();
    for (name, value) in [
        (FIELD_IDENTIFIER, &submission.identifier),
        (FIELD_PASSWORD, &submission.password),
    ] {
        match value {
            None => errors.push((name, messages::missing_property(name))),
            Some(v) if v.is_empty() => errors.push((name, messages::empty_value())),
            Some(_) => {}
        }
    }
    errors
}

/// Look up the identifier and verify the password.
///
/// Returns `(identity, ok)` where `ok` says whether login may proceed.
/// The two failure causes, unknown identifier and wrong password, are
/// deliberately collapsed: both return `(None, false)` resp.
/// `(Some(_), false)`, and a dummy hash verification is run for unknown
/// identifiers so the response time does not leak which one it was.
pub(crate) async fn resolve_credentials(
    store: &Arc<dyn CredentialStore>,
    hasher: &Arc<dyn PasswordHasher>,
    identifier: &str,
    password: &str,
) -> Result<(Option<Identity>, bool), StorageError> {
    let identity = store.find_by_identifier(identifier).await?;

    match identity {
        Some(identity) => {
            let ok = hasher
                .verify(password, &identity.credential.hashed_password)
                .unwrap_or(false);
            Ok((Some(identity), ok))
        }
        None => {
            hasher.verify_dummy(password);
            Ok((None, false))
        }
    }
}
