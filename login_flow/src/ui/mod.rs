//! Renderable form state for the password method.
//!
//! The field set is driven by a single declared schema
//! ([`schema::PASSWORD_METHOD_FIELDS`]) consumed by both the submission
//! decoder and the renderer, so the two cannot drift apart.

mod merge;
pub(crate) mod messages;
pub(crate) mod schema;
mod types;

pub(crate) use merge::next_container;
pub use types::{Field, FieldType, TextKind, UiContainer, UiText};
