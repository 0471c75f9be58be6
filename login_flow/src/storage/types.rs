use async_trait::async_trait;

use crate::flow::LoginFlow;
use crate::storage::errors::StorageError;

/// Keyed storage for [`LoginFlow`] records.
///
/// Garbage collection of completed or expired flows is the backend's
/// responsibility; the engine never deletes a flow on its own.
#[async_trait]
pub trait FlowStore: Send + Sync + 'static {
    /// Initialize the store. This is called when the store is created.
    async fn init(&self) -> Result<(), StorageError>;

    /// Get a flow by id.
    async fn get(&self, id: &str) -> Result<Option<LoginFlow>, StorageError>;

    /// Insert or replace a flow.
    async fn upsert(&self, flow: LoginFlow) -> Result<(), StorageError>;

    /// Remove a flow. Removing an unknown id is not an error.
    async fn delete(&self, id: &str) -> Result<(), StorageError>;
}
