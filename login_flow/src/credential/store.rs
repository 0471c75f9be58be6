use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::credential::types::{CredentialStore, Identity};
use crate::storage::StorageError;

/// In-memory identity store. Suitable for tests and demos.
#[derive(Default)]
pub struct InMemoryCredentialStore {
    identities: RwLock<Vec<Identity>>,
}

impl InMemoryCredentialStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl CredentialStore for InMemoryCredentialStore {
    async fn init(&self) -> Result<(), StorageError> {
        Ok(())
    }

    async fn find_by_identifier(
        &self,
        identifier: &str,
    ) -> Result<Option<Identity>, StorageError> {
        let needle = identifier.to_lowercase();
        let identities = self.identities.read().await;
        Ok(identities
            .iter()
            .find(|identity| {
                identity
                    .credential
                    .identifiers
                    .iter()
                    .any(|id| id.to_lowercase() == needle)
            })
            .cloned())
    }

    async fn upsert_identity(&self, identity: Identity) -> Result<(), StorageError> {
        let mut identities = self.identities.write().await;
        if let Some(existing) = identities.iter_mut().find(|i| i.id == identity.id) {
            *existing = identity;
        } else {
            identities.push(identity);
        }
        Ok(())
    }
}
