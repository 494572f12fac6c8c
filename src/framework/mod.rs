//! Generic query plumbing between the extension and the storefront.
//!
//! # Main Components
//!
//! - [`QueryBackend`] - Trait a remote data source implements
//! - [`QueryActor`] - Server loop dispatching requests to the backend
//! - [`QueryClient`] - Cloneable client used by the typed wrappers in [`crate::clients`]
//! - [`FrameworkError`] - Common error type
//!
//! # Testing
//!
//! See [`mock`] module for utilities to test callers without a real backend.

pub mod core;
pub mod mock;

// Re-export core types for convenience
pub use self::core::*;
