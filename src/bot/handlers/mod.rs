//! Discord event handlers
//!
//! Handlers for gateway events that are not command invocations.

/// Slash command registration on ready and on guild join
pub mod registration;
