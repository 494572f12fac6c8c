//! # Field Resolver
//!
//! Turns a `(resource, field identifier)` pair into a [`FieldValue`].
//!
//! ## Resolution Order
//!
//! 1. **Standard attribute**: identifiers aliasing a built-in attribute (`product_type`) read it
//!    directly, shadowing any custom field of the same name.
//! 2. **Local fields**: the collection the checkout already holds (key, namespace, composite).
//! 3. **Remote fallback**: when there is no local collection or no match, and the resource has an
//!    id, one query fetches its fields and the same lookup runs on the result.
//!
//! Variants take a longer remote path: owning product (from the reference, else a lookup hop),
//! then the product's variant ids, then the field by identifier on the matching variant.
//!
//! ## Failure Handling
//!
//! Transport failures are logged and degrade to `None`. Only malformed references produce a
//! [`ResolveError`].

pub mod error;
pub mod scope;

pub use error::*;
pub use scope::*;

use tracing::{debug, instrument, warn};

use crate::clients::{FetchError, FieldClient, ResourceClients};
use crate::model::{FieldIdentifier, FieldValue, ResourceKind, ResourceReference, VariantRef};
use scope::FetchKey;

/// Resolves field values for visibility rules.
#[derive(Clone, Debug)]
pub struct FieldResolver {
    clients: ResourceClients,
}

impl FieldResolver {
    pub fn new(clients: ResourceClients) -> Self {
        Self { clients }
    }

    /// Resolves one field with a fresh, single-use memo.
    pub async fn resolve(
        &self,
        resource: &ResourceReference,
        field: &FieldIdentifier,
    ) -> Result<FieldValue, ResolveError> {
        let mut scope = ResolutionScope::new();
        self.resolve_in(resource, field, &mut scope).await
    }

    /// Resolves one field, sharing remote results through `scope`.
    #[instrument(skip(self, resource, scope), fields(kind = %resource.kind(), id = ?resource.id()))]
    pub async fn resolve_in(
        &self,
        resource: &ResourceReference,
        field: &FieldIdentifier,
        scope: &mut ResolutionScope,
    ) -> Result<FieldValue, ResolveError> {
        validate(resource)?;

        if let Some(value) = resource.standard_attribute(field) {
            debug!("Standard attribute");
            return Ok(Some(value.to_string()));
        }

        if let Some(found) = resource.local_fields().and_then(|fields| fields.find(field)) {
            debug!("Local field");
            return Ok(found.value.clone());
        }

        let Some(id) = resource.id() else {
            debug!("No id, skipping remote fallback");
            return Ok(None);
        };

        let key = FetchKey {
            kind: resource.kind(),
            id: id.to_string(),
            field: field.clone(),
        };
        if let Some(value) = scope.lookup(&key) {
            debug!("Already resolved in this run");
            return Ok(value.clone());
        }

        let value = match resource {
            ResourceReference::Product(_) => self.fetch_fields(&self.clients.product, id, field).await,
            ResourceReference::Customer(_) => self.fetch_fields(&self.clients.customer, id, field).await,
            ResourceReference::Order(_) => self.fetch_fields(&self.clients.order, id, field).await,
            ResourceReference::Variant(variant) => self.fetch_variant_field(variant, id, field).await,
        };
        scope.record(key, value.clone());
        Ok(value)
    }

    async fn fetch_fields<C: FieldClient>(&self, client: &C, id: &str, field: &FieldIdentifier) -> FieldValue {
        let fields = degrade(client.fields(id).await, C::KIND, id, field)?;
        fields.find(field).and_then(|found| found.value.clone())
    }

    async fn fetch_variant_field(&self, variant: &VariantRef, variant_id: &str, field: &FieldIdentifier) -> FieldValue {
        let kind = ResourceKind::Variant;
        let product_id = match variant.product_id() {
            Some(product_id) => product_id.to_string(),
            None => {
                let owner = self.clients.variant.owner_product(variant_id).await;
                degrade(owner, kind, variant_id, field)??
            }
        };

        let siblings = self.clients.product.variant_ids(&product_id).await;
        let siblings = degrade(siblings, ResourceKind::Product, &product_id, field)?;
        if !siblings.iter().any(|sibling| sibling == variant_id) {
            debug!(%product_id, "Variant not listed under its product");
            return None;
        }

        let fields = self.clients.variant.fields_by_identifier(variant_id, field).await;
        let fields = degrade(fields, kind, variant_id, field)?;
        fields.find(field).and_then(|found| found.value.clone())
    }
}

/// Logs a transport failure and degrades it to "no value".
fn degrade<T>(result: Result<T, FetchError>, kind: ResourceKind, id: &str, field: &FieldIdentifier) -> Option<T> {
    match result {
        Ok(value) => Some(value),
        Err(e) => {
            warn!(%kind, id, %field, error = %e, "Remote field fetch failed");
            None
        }
    }
}

fn validate(resource: &ResourceReference) -> Result<(), ResolveError> {
    let blank = |value: Option<&str>| value.is_some_and(|v| v.trim().is_empty());
    if blank(resource.id()) {
        return Err(ResolveError::BlankId { kind: resource.kind() });
    }
    if let ResourceReference::Variant(variant) = resource {
        if blank(variant.product_id()) {
            return Err(ResolveError::BlankOwner {
                variant_id: variant.id.clone().unwrap_or_default(),
            });
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::framework::mock::MockQueryClient;
    use crate::framework::FrameworkError;
    use crate::model::{CustomerRef, Field, OrderRef, ProductRef};

    fn resolver(mock: &MockQueryClient) -> FieldResolver {
        FieldResolver::new(ResourceClients::new(mock.client()))
    }

    #[tokio::test]
    async fn test_standard_attribute_shadows_custom_field() {
        let mock = MockQueryClient::new();
        let product = ResourceReference::from(
            ProductRef::new("p1")
                .with_product_type("shoes")
                .with_fields(vec![Field::new("custom", "product_type", "hats")]),
        );

        let value = resolver(&mock).resolve(&product, &"product_type".into()).await.unwrap();
        assert_eq!(value.as_deref(), Some("shoes"));
        mock.verify();
    }

    #[tokio::test]
    async fn test_local_field_needs_no_remote_query() {
        let mock = MockQueryClient::new();
        let customer = ResourceReference::from(
            CustomerRef::new("c1").with_fields(vec![Field::new("loyalty", "tier", "gold")]),
        );

        let value = resolver(&mock).resolve(&customer, &"loyalty.tier".into()).await.unwrap();
        assert_eq!(value.as_deref(), Some("gold"));
        mock.verify();
    }

    #[tokio::test]
    async fn test_remote_fallback_when_no_local_fields() {
        let mut mock = MockQueryClient::new();
        mock.expect_resource_fields(ResourceKind::Product, "123")
            .return_ok(vec![Field::new("custom", "tier", "gold")].into());

        let product = ResourceReference::from(ProductRef::new("123"));
        let value = resolver(&mock).resolve(&product, &"tier".into()).await.unwrap();
        assert_eq!(value.as_deref(), Some("gold"));
        mock.verify();
    }

    #[tokio::test]
    async fn test_remote_fallback_when_local_miss() {
        let mut mock = MockQueryClient::new();
        mock.expect_resource_fields(ResourceKind::Customer, "c1")
            .return_ok(vec![Field::new("custom", "tier", "silver")].into());

        let customer = ResourceReference::from(
            CustomerRef::new("c1").with_fields(vec![Field::new("custom", "nickname", "ace")]),
        );
        let value = resolver(&mock).resolve(&customer, &"tier".into()).await.unwrap();
        assert_eq!(value.as_deref(), Some("silver"));
        mock.verify();
    }

    #[tokio::test]
    async fn test_transport_failure_degrades_to_none() {
        let mut mock = MockQueryClient::new();
        mock.expect_resource_fields(ResourceKind::Order, "o1")
            .return_err(FrameworkError::ActorDropped);

        let order = ResourceReference::from(OrderRef {
            id: Some("o1".into()),
            ..OrderRef::default()
        });
        let value = resolver(&mock).resolve(&order, &"gift".into()).await.unwrap();
        assert_eq!(value, None);
        mock.verify();
    }

    #[tokio::test]
    async fn test_resource_without_id_is_not_fetched() {
        let mock = MockQueryClient::new();
        let product = ResourceReference::from(ProductRef::default());

        let value = resolver(&mock).resolve(&product, &"tier".into()).await.unwrap();
        assert_eq!(value, None);
        mock.verify();
    }

    #[tokio::test]
    async fn test_variant_path_looks_up_owner_then_siblings() {
        let mut mock = MockQueryClient::new();
        mock.expect_variant_owner("v1").return_ok(Some("p1".into()));
        mock.expect_product_variants("p1")
            .return_ok(vec!["v0".into(), "v1".into()]);
        mock.expect_variant_fields("v1")
            .return_ok(vec![Field::new("custom", "color", "red")].into());

        let variant = ResourceReference::from(VariantRef::new("v1"));
        let value = resolver(&mock).resolve(&variant, &"custom.color".into()).await.unwrap();
        assert_eq!(value.as_deref(), Some("red"));
        mock.verify();
    }

    #[tokio::test]
    async fn test_variant_with_known_product_skips_owner_lookup() {
        let mut mock = MockQueryClient::new();
        mock.expect_product_variants("p1").return_ok(vec!["v1".into()]);
        mock.expect_variant_fields("v1")
            .return_ok(vec![Field::new("custom", "size", "xl")].into());

        let variant = ResourceReference::from(VariantRef::new("v1").with_product(ProductRef::new("p1")));
        let value = resolver(&mock).resolve(&variant, &"custom.size".into()).await.unwrap();
        assert_eq!(value.as_deref(), Some("xl"));
        mock.verify();
    }

    #[tokio::test]
    async fn test_variant_missing_from_product_resolves_none() {
        let mut mock = MockQueryClient::new();
        mock.expect_variant_owner("v9").return_ok(Some("p1".into()));
        mock.expect_product_variants("p1").return_ok(vec!["v1".into()]);

        let variant = ResourceReference::from(VariantRef::new("v9"));
        let value = resolver(&mock).resolve(&variant, &"custom.size".into()).await.unwrap();
        assert_eq!(value, None);
        mock.verify();
    }

    #[tokio::test]
    async fn test_unknown_variant_owner_resolves_none() {
        let mut mock = MockQueryClient::new();
        mock.expect_variant_owner("v1").return_ok(None);

        let variant = ResourceReference::from(VariantRef::new("v1"));
        let value = resolver(&mock).resolve(&variant, &"custom.size".into()).await.unwrap();
        assert_eq!(value, None);
        mock.verify();
    }

    #[tokio::test]
    async fn test_scope_fetches_each_pair_once() {
        let mut mock = MockQueryClient::new();
        mock.expect_resource_fields(ResourceKind::Product, "p1")
            .return_ok(vec![Field::new("custom", "tier", "gold")].into());

        let resolver = resolver(&mock);
        let product = ResourceReference::from(ProductRef::new("p1"));
        let mut scope = ResolutionScope::new();
        for _ in 0..3 {
            let value = resolver.resolve_in(&product, &"tier".into(), &mut scope).await.unwrap();
            assert_eq!(value.as_deref(), Some("gold"));
        }
        assert_eq!(scope.fetch_count(), 1);
        mock.verify();
    }

    #[tokio::test]
    async fn test_blank_ids_are_malformed() {
        let mock = MockQueryClient::new();
        let resolver = resolver(&mock);

        let product = ResourceReference::from(ProductRef::new("   "));
        let result = resolver.resolve(&product, &"tier".into()).await;
        assert_eq!(result, Err(ResolveError::BlankId { kind: ResourceKind::Product }));

        let variant = ResourceReference::from(VariantRef::new("v1").with_product(ProductRef::new("")));
        let result = resolver.resolve(&variant, &"tier".into()).await;
        assert_eq!(
            result,
            Err(ResolveError::BlankOwner {
                variant_id: "v1".into()
            })
        );
        mock.verify();
    }
}
