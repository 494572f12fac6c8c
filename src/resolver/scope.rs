use std::collections::HashMap;

use crate::model::{FieldIdentifier, FieldValue, ResourceKind};

/// Identity of one remote resolution attempt.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub(crate) struct FetchKey {
    pub kind: ResourceKind,
    pub id: String,
    pub field: FieldIdentifier,
}

/// Memo of remote resolutions for a single rule evaluation.
///
/// Shared by every resolve call of one `decide` run so a `(kind, id, field)` triple is fetched
/// at most once; failed fetches are remembered as `None`. A new scope is created per run, so
/// nothing is cached across evaluations.
#[derive(Debug, Default)]
pub struct ResolutionScope {
    resolved: HashMap<FetchKey, FieldValue>,
}

impl ResolutionScope {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of distinct remote resolutions attempted in this scope.
    pub fn fetch_count(&self) -> usize {
        self.resolved.len()
    }

    pub(crate) fn lookup(&self, key: &FetchKey) -> Option<&FieldValue> {
        self.resolved.get(key)
    }

    pub(crate) fn record(&mut self, key: FetchKey, value: FieldValue) {
        self.resolved.insert(key, value);
    }
}
