use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

use crate::storage::StorageError;

/// The password credential attached to an identity.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PasswordCredential {
    /// Login identifiers (e-mail addresses, usernames). Matching is
    /// case-insensitive; the stored values are never rewritten.
    pub identifiers: Vec<String>,
    pub hashed_password: String,
}

/// An identity as seen by the login flow engine.
///
/// The credential is never serialized: responses carry only the id and
/// the traits document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Identity {
    pub id: String,
    pub traits: Value,
    #[serde(skip_serializing, default)]
    pub credential: PasswordCredential,
}

impl Identity {
    pub fn new(traits: Value, credential: PasswordCredential) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            traits,
            credential,
        }
    }

    /// The identifier used to pre-fill the form on forced re-authentication.
    pub(crate) fn default_identifier(&self) -> Option<&str> {
        self.credential.identifiers.first().map(String::as_str)
    }
}

/// Lookup of identities by login identifier.
#[async_trait]
pub trait CredentialStore: Send + Sync + 'static {
    /// Initialize the store. This is called when the store is created.
    async fn init(&self) -> Result<(), StorageError>;

    /// Find the identity owning the given identifier, matched
    /// case-insensitively.
    async fn find_by_identifier(&self, identifier: &str)
    -> Result<Option<Identity>, StorageError>;

    /// Insert or replace an identity.
    async fn upsert_identity(&self, identity: Identity) -> Result<(), StorageError>;
}
