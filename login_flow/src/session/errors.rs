use thiserror::Error;

#[derive(Debug, Error, Clone)]
pub enum SessionError {
    #[error("Crypto error: {0}")]
    Crypto(String),
}
