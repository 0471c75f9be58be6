//! Durable keyed storage for login flow records.
//!
//! The engine only ever talks to the [`FlowStore`] trait; deployments plug
//! in their own backend. [`InMemoryFlowStore`] is the reference
//! implementation used by the demo and the test-suite.

mod errors;
mod memory;
mod types;

pub use errors::StorageError;
pub use memory::InMemoryFlowStore;
pub use types::FlowStore;
