//! # Fields & Identifiers
//!
//! Every resource (product, variant, customer, order) carries a *field collection*: a list of
//! `namespace` / `key` / `value` triples defined by the merchant. This module holds the canonical
//! shape those collections are normalized into, plus the [`FieldIdentifier`] used to look a field up.
//!
//! ## Lookup Rules
//!
//! A configured identifier matches a field when it equals, in this order:
//! 1. the field's `key`
//! 2. the field's `namespace`
//! 3. the `namespace.key` composite
//!
//! All three comparisons are exact and case-sensitive.

use serde::{Deserialize, Serialize};
use std::fmt::Display;

/// A resolved field value.
///
/// `None` means the field was not found anywhere. `Some(String::new())` is a found-but-empty
/// value and is kept distinct from absence.
pub type FieldValue = Option<String>;

/// Identifier of a field as configured by the merchant: `namespace.key` or a bare name.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FieldIdentifier(String);

impl FieldIdentifier {
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into().trim().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Splits the identifier into `(namespace, key)` at the first dot.
    ///
    /// A bare name (or a trailing dot) uses the name for both parts, which is what the
    /// remote identifier query expects.
    pub fn parts(&self) -> (&str, &str) {
        match self.0.split_once('.') {
            Some((namespace, key)) if !key.is_empty() => (namespace, key),
            Some((namespace, _)) => (namespace, namespace),
            None => (&self.0, &self.0),
        }
    }

    /// True when the identifier names the standard product-type attribute rather than a custom field.
    pub fn is_product_type_alias(&self) -> bool {
        let lowered = self.0.to_lowercase();
        lowered == "product_type" || lowered == "producttype"
    }
}

impl Display for FieldIdentifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for FieldIdentifier {
    fn from(raw: &str) -> Self {
        Self::new(raw)
    }
}

/// One entry of a field collection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Field {
    pub namespace: String,
    pub key: String,
    pub value: FieldValue,
}

impl Field {
    /// Creates a field with a present value.
    pub fn new(namespace: impl Into<String>, key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            namespace: namespace.into(),
            key: key.into(),
            value: Some(value.into()),
        }
    }

    /// The `namespace.key` form, or just the key when the namespace is empty.
    pub fn composite(&self) -> String {
        if self.namespace.is_empty() {
            self.key.clone()
        } else {
            format!("{}.{}", self.namespace, self.key)
        }
    }

    /// Checks key, then namespace, then the composite against `identifier`.
    pub fn matches(&self, identifier: &FieldIdentifier) -> bool {
        let wanted = identifier.as_str();
        self.key == wanted || self.namespace == wanted || self.composite() == wanted
    }
}

/// Ordered collection of fields attached to a resource.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FieldCollection(Vec<Field>);

impl FieldCollection {
    pub fn new(fields: Vec<Field>) -> Self {
        Self(fields)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Field> {
        self.0.iter()
    }

    /// First field matching `identifier`, in collection order.
    pub fn find(&self, identifier: &FieldIdentifier) -> Option<&Field> {
        self.0.iter().find(|field| field.matches(identifier))
    }

    pub(crate) fn truncated(mut self, first: usize) -> Self {
        self.0.truncate(first);
        self
    }
}

impl From<Vec<Field>> for FieldCollection {
    fn from(fields: Vec<Field>) -> Self {
        Self(fields)
    }
}

impl FromIterator<Field> for FieldCollection {
    fn from_iter<I: IntoIterator<Item = Field>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}
