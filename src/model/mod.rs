//! Pure data structures: resources, fields, rules, identities and content records.

pub mod field;
pub mod identity;
pub mod metaobject;
pub(crate) mod raw;
pub mod resource;
pub mod rule;
pub mod snapshot;

pub use field::*;
pub use identity::*;
pub use metaobject::*;
pub use resource::*;
pub use rule::*;
pub use snapshot::*;
