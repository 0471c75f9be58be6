use thiserror::Error;

use crate::flow::LoginFlow;

#[derive(Debug, Error)]
pub enum FlowError {
    #[error("Unable to locate the resource")]
    NotFound,

    /// The flow outlived its lifespan. A replacement flow has already been
    /// created and persisted; the expired id stays unusable.
    #[error("The login flow expired, use the newly issued flow instead")]
    Expired { replacement: Box<LoginFlow> },

    #[error("Crypto error: {0}")]
    Crypto(String),

    #[error("Storage error: {0}")]
    Storage(String),
}
