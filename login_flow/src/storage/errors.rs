use thiserror::Error;

#[derive(Debug, Error, Clone)]
pub enum StorageError {
    #[error("Storage error: {0}")]
    Backend(String),

    #[error("Serialization error: {0}")]
    Serde(String),
}
