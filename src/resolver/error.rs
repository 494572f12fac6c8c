//! Error types for field resolution.

use crate::model::ResourceKind;
use thiserror::Error;

/// A resource reference too malformed to resolve against.
///
/// Missing data is not an error (it resolves to `None`); these are references whose identifying
/// information is present but unusable.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum ResolveError {
    /// The reference carries an id that is empty or whitespace.
    #[error("{kind} reference has a blank id")]
    BlankId { kind: ResourceKind },

    /// A variant names an owning product whose id is empty or whitespace.
    #[error("variant {variant_id} has a blank owning product id")]
    BlankOwner { variant_id: String },
}
