//! Storefront backends implementing [`QueryBackend`](crate::framework::QueryBackend).
//!
//! Only an in-memory fixture backend ships with the crate; a network client would implement the
//! same trait.

pub mod memory;

pub use memory::*;

use thiserror::Error;

/// Errors reported by a storefront backend.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum StorefrontError {
    /// The query was answered with an error payload instead of data.
    #[error("Storefront returned errors: {}", .0.join("; "))]
    ErrorPayload(Vec<String>),
}
