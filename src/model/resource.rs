//! Resources whose fields a visibility rule can interrogate.
//!
//! A [`ResourceReference`] is a read-only view of what the checkout already knows about a
//! product, variant, customer or order: an optional identifier (needed for the remote fallback)
//! and an optional, already-loaded [`FieldCollection`].
use serde::{Deserialize, Serialize};

use std::fmt::Display;

use super::field::{FieldCollection, FieldIdentifier};

/// The four resource types a rule can target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResourceKind {
    Product,
    Variant,
    Customer,
    Order,
}

impl ResourceKind {
    /// Parses a free-text selector (trimmed, case-folded). Unknown selectors yield `None`.
    pub fn parse(selector: &str) -> Option<Self> {
        match selector.trim().to_lowercase().as_str() {
            "product" => Some(Self::Product),
            "variant" => Some(Self::Variant),
            "customer" => Some(Self::Customer),
            "order" => Some(Self::Order),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Product => "product",
            Self::Variant => "variant",
            Self::Customer => "customer",
            Self::Order => "order",
        }
    }
}

impl Display for ResourceKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A product as seen from a cart line.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProductRef {
    pub id: Option<String>,
    /// Standard (non-custom) product category attribute.
    pub product_type: Option<String>,
    pub fields: Option<FieldCollection>,
}

impl ProductRef {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: Some(id.into()),
            ..Self::default()
        }
    }

    pub fn with_product_type(mut self, product_type: impl Into<String>) -> Self {
        self.product_type = Some(product_type.into());
        self
    }

    pub fn with_fields(mut self, fields: impl Into<FieldCollection>) -> Self {
        self.fields = Some(fields.into());
        self
    }
}

/// A product variant (the merchandise of a cart line).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct VariantRef {
    pub id: Option<String>,
    pub product_type: Option<String>,
    /// The owning product, when the checkout exposes it.
    pub product: Option<ProductRef>,
    pub fields: Option<FieldCollection>,
}

impl VariantRef {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: Some(id.into()),
            ..Self::default()
        }
    }

    pub fn with_product(mut self, product: ProductRef) -> Self {
        self.product = Some(product);
        self
    }

    pub fn with_product_type(mut self, product_type: impl Into<String>) -> Self {
        self.product_type = Some(product_type.into());
        self
    }

    pub fn with_fields(mut self, fields: impl Into<FieldCollection>) -> Self {
        self.fields = Some(fields.into());
        self
    }

    /// Id of the owning product, if known locally.
    pub fn product_id(&self) -> Option<&str> {
        self.product.as_ref().and_then(|p| p.id.as_deref())
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct CustomerRef {
    pub id: Option<String>,
    pub fields: Option<FieldCollection>,
}

impl CustomerRef {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: Some(id.into()),
            fields: None,
        }
    }

    pub fn with_fields(mut self, fields: impl Into<FieldCollection>) -> Self {
        self.fields = Some(fields.into());
        self
    }
}

/// The order being checked out. Checkout-level fields take precedence over cart-level ones.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct OrderRef {
    pub id: Option<String>,
    pub checkout_fields: Option<FieldCollection>,
    pub cart_fields: Option<FieldCollection>,
}

impl OrderRef {
    pub fn with_checkout_fields(mut self, fields: impl Into<FieldCollection>) -> Self {
        self.checkout_fields = Some(fields.into());
        self
    }

    pub fn with_cart_fields(mut self, fields: impl Into<FieldCollection>) -> Self {
        self.cart_fields = Some(fields.into());
        self
    }
}

/// Tagged reference to one resource instance.
#[derive(Debug, Clone, PartialEq)]
pub enum ResourceReference {
    Product(ProductRef),
    Variant(VariantRef),
    Customer(CustomerRef),
    Order(OrderRef),
}

impl ResourceReference {
    pub fn kind(&self) -> ResourceKind {
        match self {
            Self::Product(_) => ResourceKind::Product,
            Self::Variant(_) => ResourceKind::Variant,
            Self::Customer(_) => ResourceKind::Customer,
            Self::Order(_) => ResourceKind::Order,
        }
    }

    pub fn id(&self) -> Option<&str> {
        match self {
            Self::Product(p) => p.id.as_deref(),
            Self::Variant(v) => v.id.as_deref(),
            Self::Customer(c) => c.id.as_deref(),
            Self::Order(o) => o.id.as_deref(),
        }
    }

    /// The locally available field collection.
    ///
    /// For orders the checkout-level source is probed before the cart-level one and the
    /// first non-empty collection wins.
    pub fn local_fields(&self) -> Option<&FieldCollection> {
        match self {
            Self::Product(p) => p.fields.as_ref(),
            Self::Variant(v) => v.fields.as_ref(),
            Self::Customer(c) => c.fields.as_ref(),
            Self::Order(o) => [o.checkout_fields.as_ref(), o.cart_fields.as_ref()]
                .into_iter()
                .flatten()
                .find(|fields| !fields.is_empty()),
        }
    }

    /// Value of a standard attribute aliased by `field`, if this resource type has one.
    ///
    /// Currently only the product type, for products and variants. A variant reads its
    /// owning product's type first, then its own.
    pub fn standard_attribute(&self, field: &FieldIdentifier) -> Option<&str> {
        if !field.is_product_type_alias() {
            return None;
        }
        fn non_empty(value: &Option<String>) -> Option<&str> {
            value.as_deref().filter(|v| !v.is_empty())
        }
        match self {
            Self::Product(p) => non_empty(&p.product_type),
            Self::Variant(v) => v
                .product
                .as_ref()
                .and_then(|p| non_empty(&p.product_type))
                .or_else(|| non_empty(&v.product_type)),
            Self::Customer(_) | Self::Order(_) => None,
        }
    }
}

impl From<ProductRef> for ResourceReference {
    fn from(product: ProductRef) -> Self {
        Self::Product(product)
    }
}

impl From<VariantRef> for ResourceReference {
    fn from(variant: VariantRef) -> Self {
        Self::Variant(variant)
    }
}

impl From<CustomerRef> for ResourceReference {
    fn from(customer: CustomerRef) -> Self {
        Self::Customer(customer)
    }
}

impl From<OrderRef> for ResourceReference {
    fn from(order: OrderRef) -> Self {
        Self::Order(order)
    }
}
