use std::collections::{HashMap, HashSet};

use async_trait::async_trait;
use tracing::debug;

use super::StorefrontError;
use crate::framework::QueryBackend;
use crate::model::{Field, FieldCollection, FieldIdentifier, MetaObject, ResourceKind};

/// A storefront held entirely in memory.
///
/// Built fluently from fixtures; ids registered with [`InMemoryStorefront::fail_on`] answer every
/// query touching them with an error payload.
#[derive(Debug, Clone, Default)]
pub struct InMemoryStorefront {
    fields: HashMap<(ResourceKind, String), FieldCollection>,
    owners: HashMap<String, String>,
    variants: HashMap<String, Vec<String>>,
    metaobjects: Vec<MetaObject>,
    failing: HashSet<String>,
}

impl InMemoryStorefront {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_product(mut self, id: impl Into<String>, fields: Vec<Field>) -> Self {
        self.fields.insert((ResourceKind::Product, id.into()), fields.into());
        self
    }

    /// Registers a variant under `product_id`, appending it to the product's variant list.
    pub fn with_variant(mut self, id: impl Into<String>, product_id: impl Into<String>, fields: Vec<Field>) -> Self {
        let id = id.into();
        let product_id = product_id.into();
        self.variants.entry(product_id.clone()).or_default().push(id.clone());
        self.owners.insert(id.clone(), product_id);
        self.fields.insert((ResourceKind::Variant, id), fields.into());
        self
    }

    pub fn with_customer(mut self, id: impl Into<String>, fields: Vec<Field>) -> Self {
        self.fields.insert((ResourceKind::Customer, id.into()), fields.into());
        self
    }

    pub fn with_order(mut self, id: impl Into<String>, fields: Vec<Field>) -> Self {
        self.fields.insert((ResourceKind::Order, id.into()), fields.into());
        self
    }

    pub fn with_metaobject(mut self, object: MetaObject) -> Self {
        self.metaobjects.push(object);
        self
    }

    /// Makes every query for `id` (a resource id or MetaObject type) fail.
    pub fn fail_on(mut self, id: impl Into<String>) -> Self {
        self.failing.insert(id.into());
        self
    }

    fn check(&self, id: &str) -> Result<(), StorefrontError> {
        if self.failing.contains(id) {
            debug!(id, "Answering with error payload");
            return Err(StorefrontError::ErrorPayload(vec![format!("Access denied for {id}")]));
        }
        Ok(())
    }

    fn stored(&self, kind: ResourceKind, id: &str) -> FieldCollection {
        self.fields
            .get(&(kind, id.to_string()))
            .cloned()
            .unwrap_or_default()
    }
}

#[async_trait]
impl QueryBackend for InMemoryStorefront {
    type Error = StorefrontError;

    async fn resource_fields(&self, kind: ResourceKind, id: &str, first: u32) -> Result<FieldCollection, StorefrontError> {
        self.check(id)?;
        Ok(self.stored(kind, id).truncated(first as usize))
    }

    async fn variant_owner(&self, variant_id: &str) -> Result<Option<String>, StorefrontError> {
        self.check(variant_id)?;
        Ok(self.owners.get(variant_id).cloned())
    }

    async fn product_variants(&self, product_id: &str, first: u32) -> Result<Vec<String>, StorefrontError> {
        self.check(product_id)?;
        let mut ids = self.variants.get(product_id).cloned().unwrap_or_default();
        ids.truncate(first as usize);
        Ok(ids)
    }

    async fn variant_fields(
        &self,
        variant_id: &str,
        identifiers: &[FieldIdentifier],
    ) -> Result<FieldCollection, StorefrontError> {
        self.check(variant_id)?;
        let selected = self
            .stored(ResourceKind::Variant, variant_id)
            .iter()
            .filter(|field| {
                identifiers
                    .iter()
                    .any(|identifier| identifier.parts() == (field.namespace.as_str(), field.key.as_str()))
            })
            .cloned()
            .collect();
        Ok(selected)
    }

    async fn metaobjects(&self, kind: &str, first: u32) -> Result<Vec<MetaObject>, StorefrontError> {
        self.check(kind)?;
        Ok(self
            .metaobjects
            .iter()
            .filter(|object| object.kind == kind)
            .take(first as usize)
            .cloned()
            .collect())
    }
}
