//! Shared fixtures for colocated tests.

use std::sync::Arc;

use chrono::Duration;
use serde_json::json;

use crate::config::LoginConfig;
use crate::credential::{
    CredentialStore, Identity, InMemoryCredentialStore, PasswordCredential, PasswordHasher,
    Pbkdf2Hasher,
};
use crate::login::LoginHandler;
use crate::session::TokenSessionIssuer;
use crate::storage::InMemoryFlowStore;

pub(crate) const TEST_IDENTIFIER: &str = "alice@example.org";
pub(crate) const TEST_PASSWORD: &str = "correct-horse-battery";

pub(crate) fn test_config(flow_lifespan: Duration) -> LoginConfig {
    LoginConfig {
        flow_lifespan,
        public_base_url: "http://x.test".to_string(),
        login_ui_url: "http://x.test/login".to_string(),
        error_ui_url: "http://x.test/error".to_string(),
        default_return_to: "http://x.test/".to_string(),
        session_cookie_name: "login_session".to_string(),
    }
}

/// Fully in-memory handler with one registered identity
/// (`TEST_IDENTIFIER` / `TEST_PASSWORD`).
pub(crate) async fn seeded_handler(flow_lifespan: Duration) -> LoginHandler {
    let hasher = Pbkdf2Hasher::new();
    let credentials = InMemoryCredentialStore::new();
    let identity = Identity::new(
        json!({"subject": TEST_IDENTIFIER}),
        PasswordCredential {
            identifiers: vec![TEST_IDENTIFIER.to_string()],
            hashed_password: hasher.hash(TEST_PASSWORD).expect("hashing test password"),
        },
    );
    credentials
        .upsert_identity(identity)
        .await
        .expect("seeding test identity");

    LoginHandler::new(
        test_config(flow_lifespan),
        Arc::new(InMemoryFlowStore::new()),
        Arc::new(credentials),
        Arc::new(hasher),
        Arc::new(TokenSessionIssuer),
    )
}
