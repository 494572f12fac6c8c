//! Error types for the typed query clients.

use crate::framework::FrameworkError;
use thiserror::Error;

/// Errors a typed client can report.
///
/// A missing resource is never an error; clients answer with an empty collection or `None`.
#[derive(Debug, Error)]
pub enum FetchError {
    /// The request could not be delivered or the backend reported a failure.
    #[error("Query transport error: {0}")]
    Transport(#[from] FrameworkError),
}
