use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::credential::Identity;
use crate::session::errors::SessionError;
use crate::utils::gen_random_string;

/// An authenticated session issued after a successful login.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Session {
    pub id: String,
    pub identity: Identity,
    pub authenticated_at: DateTime<Utc>,
    /// Bearer token for API clients, cookie value for browser clients.
    /// Not part of the serialized session record.
    #[serde(skip_serializing, default)]
    pub token: String,
}

/// Issues a session for an identity that has just proven its credentials.
pub trait SessionIssuer: Send + Sync + 'static {
    fn issue(&self, identity: Identity) -> Result<Session, SessionError>;
}

/// Default issuer: uuid session id, random bearer token.
#[derive(Default)]
pub struct TokenSessionIssuer;

impl SessionIssuer for TokenSessionIssuer {
    fn issue(&self, identity: Identity) -> Result<Session, SessionError> {
        let token = gen_random_string(32).map_err(|e| SessionError::Crypto(e.to_string()))?;
        Ok(Session {
            id: Uuid::new_v4().to_string(),
            identity,
            authenticated_at: Utc::now(),
            token,
        })
    }
}
