use thiserror::Error;

#[derive(Debug, Error, Clone)]
pub enum CredentialError {
    #[error("Crypto error: {0}")]
    Crypto(String),

    #[error("Malformed password hash: {0}")]
    MalformedHash(String),
}
