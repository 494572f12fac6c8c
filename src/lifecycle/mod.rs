//! Orchestration: starting the query actor, mounting the extension and shutting down.

pub mod extension_system;
pub mod tracing;

pub use extension_system::*;
pub use self::tracing::setup_tracing;
