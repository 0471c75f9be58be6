//! Self-service password login flow engine.
//!
//! Turns an anonymous HTTP request into either an authenticated session
//! or a precisely annotated, re-submittable login form, for two client
//! modes behind one code path:
//!
//! - **Browser**: form posts, CSRF tokens, cookies and redirects.
//! - **API**: JSON bodies, bearer session tokens, no redirects.
//!
//! The crate is framework-free: [`LoginHandler`] consumes `http` types
//! and returns [`FlowResponse`] descriptions which an integration layer
//! (see the companion axum crate) turns into real HTTP responses.
//! Persistent storage, password hashing and session issuance are
//! capability traits with in-memory defaults.
//!
//! ```no_run
//! use std::sync::Arc;
//! use login_flow::{
//!     InMemoryCredentialStore, InMemoryFlowStore, LoginConfig, LoginHandler,
//!     Pbkdf2Hasher, TokenSessionIssuer,
//! };
//!
//! let handler = LoginHandler::new(
//!     LoginConfig::from_env(),
//!     Arc::new(InMemoryFlowStore::new()),
//!     Arc::new(InMemoryCredentialStore::new()),
//!     Arc::new(Pbkdf2Hasher::new()),
//!     Arc::new(TokenSessionIssuer),
//! );
//! ```

mod config;
mod credential;
mod csrf;
mod flow;
mod login;
mod response;
mod session;
mod storage;
mod submission;
#[cfg(test)]
mod test_utils;
mod ui;
mod utils;

pub use config::{
    LoginConfig, ROUTE_GET_FLOW, ROUTE_INIT_API, ROUTE_INIT_BROWSER, ROUTE_SUBMIT,
};
pub use credential::{
    CredentialError, CredentialStore, Identity, InMemoryCredentialStore, PasswordCredential,
    PasswordHasher, Pbkdf2Hasher,
};
pub use flow::{FlowError, FlowMethods, FlowMode, FlowState, LoginFlow, PasswordMethod};
pub use login::{LoginError, LoginHandler};
pub use response::{FlowResponse, ResponseKind};
pub use session::{Session, SessionError, SessionIssuer, TokenSessionIssuer};
pub use storage::{FlowStore, InMemoryFlowStore, StorageError};
pub use submission::LoginSubmission;
pub use ui::{Field, FieldType, TextKind, UiContainer, UiText};
