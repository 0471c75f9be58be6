//! Identities, password credentials and their verification.

mod errors;
mod hasher;
mod resolve;
mod store;
mod types;

pub use errors::CredentialError;
pub use hasher::{Pbkdf2Hasher, PasswordHasher};
pub(crate) use resolve::{resolve_credentials, validate_required_fields};
pub use store::InMemoryCredentialStore;
pub use types::{CredentialStore, Identity, PasswordCredential};
