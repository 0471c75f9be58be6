use async_trait::async_trait;
use std::collections::HashMap;
use tokio::sync::RwLock;

use crate::flow::LoginFlow;
use crate::storage::errors::StorageError;
use crate::storage::types::FlowStore;

/// In-memory flow store. Flows are kept as serialized JSON so that the
/// store round-trips records exactly like an external backend would.
pub struct InMemoryFlowStore {
    entries: RwLock<HashMap<String, String>>,
}

impl InMemoryFlowStore {
    pub fn new() -> Self {
        tracing::info!("Creating new in-memory flow store");
        Self {
            entries: RwLock::new(HashMap::new()),
        }
    }
}

impl Default for InMemoryFlowStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl FlowStore for InMemoryFlowStore {
    async fn init(&self) -> Result<(), StorageError> {
        Ok(()) // Nothing to initialize for in-memory store
    }

    async fn get(&self, id: &str) -> Result<Option<LoginFlow>, StorageError> {
        let entries = self.entries.read().await;
        entries
            .get(id)
            .map(|raw| serde_json::from_str(raw).map_err(|e| StorageError::Serde(e.to_string())))
            .transpose()
    }

    async fn upsert(&self, flow: LoginFlow) -> Result<(), StorageError> {
        let raw = serde_json::to_string(&flow).map_err(|e| StorageError::Serde(e.to_string()))?;
        let mut entries = self.entries.write().await;
        entries.insert(flow.id.clone(), raw);
        Ok(())
    }

    async fn delete(&self, id: &str) -> Result<(), StorageError> {
        let mut entries = self.entries.write().await;
        entries.remove(id);
        Ok(())
    }
}
