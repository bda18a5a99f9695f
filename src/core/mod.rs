//! Core logic - framework-agnostic sentence storage and command handling.

/// Command parsing, dispatch and reply formatting
pub mod handler;
/// Per-guild sentence store with JSON persistence
pub mod store;

pub use handler::{Command, handle};
pub use store::SentenceStore;
