//! A point-in-time view of the checkout: cart lines, buyer and order-level fields.
//!
//! The snapshot is passed explicitly into every component; nothing reads checkout state from
//! an ambient global.

use super::field::FieldCollection;
use super::identity::{Identity, PurchasingCompany};
use super::raw::RawCheckout;
use super::resource::{CustomerRef, OrderRef, ResourceKind, ResourceReference, VariantRef};

/// One line of the cart. The merchandise is the variant being bought.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CartLine {
    pub merchandise: VariantRef,
}

/// The logged-in customer, if any.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CustomerSnapshot {
    pub id: Option<String>,
    pub fields: Option<FieldCollection>,
    pub purchasing_company: Option<PurchasingCompany>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct CheckoutSnapshot {
    pub lines: Vec<CartLine>,
    pub customer: Option<CustomerSnapshot>,
    pub order: OrderRef,
}

impl CheckoutSnapshot {
    /// Parses and normalizes a loosely shaped checkout JSON document.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        let raw: RawCheckout = serde_json::from_str(json)?;
        Ok(raw.into())
    }

    pub fn with_line(mut self, merchandise: VariantRef) -> Self {
        self.lines.push(CartLine { merchandise });
        self
    }

    pub fn with_customer(mut self, customer: CustomerSnapshot) -> Self {
        self.customer = Some(customer);
        self
    }

    /// Identity of the buyer, `None` for guest checkouts.
    pub fn identity(&self) -> Option<Identity> {
        self.customer.as_ref().map(|customer| Identity {
            customer_id: customer.id.clone(),
            purchasing_company: customer.purchasing_company.clone(),
        })
    }

    /// Ordered resource list a rule targeting `kind` is evaluated against.
    ///
    /// An unknown resource type (`None`) yields an empty list.
    pub fn resources_for(&self, kind: Option<ResourceKind>) -> Vec<ResourceReference> {
        match kind {
            Some(ResourceKind::Product) => self
                .lines
                .iter()
                .map(|line| line.merchandise.product.clone().unwrap_or_default().into())
                .collect(),
            Some(ResourceKind::Variant) => self
                .lines
                .iter()
                .map(|line| line.merchandise.clone().into())
                .collect(),
            Some(ResourceKind::Customer) => self
                .customer
                .iter()
                .map(|customer| {
                    CustomerRef {
                        id: customer.id.clone(),
                        fields: customer.fields.clone(),
                    }
                    .into()
                })
                .collect(),
            Some(ResourceKind::Order) => vec![self.order.clone().into()],
            None => Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::ProductRef;

    fn snapshot() -> CheckoutSnapshot {
        CheckoutSnapshot::default()
            .with_line(VariantRef::new("v1").with_product(ProductRef::new("p1")))
            .with_line(VariantRef::new("v2").with_product(ProductRef::new("p2")))
    }

    #[test]
    fn test_resources_for_products_follow_line_order() {
        let resources = snapshot().resources_for(ResourceKind::parse("Product"));
        let ids: Vec<_> = resources.iter().map(|r| r.id()).collect();
        assert_eq!(ids, vec![Some("p1"), Some("p2")]);
    }

    #[test]
    fn test_resources_for_variants() {
        let resources = snapshot().resources_for(Some(ResourceKind::Variant));
        assert!(resources.iter().all(|r| r.kind() == ResourceKind::Variant));
        assert_eq!(resources.len(), 2);
    }

    #[test]
    fn test_guest_checkout_has_no_customer_resource() {
        assert!(snapshot().resources_for(Some(ResourceKind::Customer)).is_empty());
        assert!(snapshot().identity().is_none());
    }

    #[test]
    fn test_customer_resource_and_identity() {
        let snapshot = snapshot().with_customer(CustomerSnapshot {
            id: Some("c1".into()),
            fields: None,
            purchasing_company: None,
        });
        let resources = snapshot.resources_for(Some(ResourceKind::Customer));
        assert_eq!(resources, vec![ResourceReference::from(CustomerRef::new("c1"))]);
        assert_eq!(snapshot.identity().unwrap().customer_id.as_deref(), Some("c1"));
    }

    #[test]
    fn test_unknown_resource_type_is_empty() {
        assert!(snapshot().resources_for(ResourceKind::parse("collection")).is_empty());
    }
}
