//! Axum integration for the `login-flow` password login engine.
//!
//! Mount [`login_flow_router`] into an application and the self-service
//! login endpoints come alive:
//!
//! - `GET  /self-service/login/browser` — browser flow init (redirects)
//! - `GET  /self-service/login/api` — API flow init (JSON)
//! - `GET  /self-service/login/flows?id=<id>` — fetch a flow as JSON
//! - `POST /self-service/login/methods/password?flow=<id>` — submit
//!
//! The router carries an `Arc<LoginHandler>` as state; build one with
//! the stores of your choice and hand it over.

mod error;
mod handlers;
mod render;
mod router;

pub use error::IntoResponseError;
pub use render::login_form;
pub use router::login_flow_router;

// Convenience re-exports so integrators need only this crate.
pub use login_flow::{
    FlowMode, InMemoryCredentialStore, InMemoryFlowStore, LoginConfig, LoginError, LoginHandler,
    Pbkdf2Hasher, TokenSessionIssuer,
};
