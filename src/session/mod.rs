//! Stateful engine API.

/// Engine mode state and draw entry points.
pub mod engine;
