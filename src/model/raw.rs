//! Raw ingress shapes.
//!
//! Checkout data arrives loosely shaped: field keys may be called `key` or `name`, a namespace
//! may be a string or an object, and field lists hide under several property names. Everything
//! here is deserialized with `serde` and immediately folded into the canonical model types, so
//! the rest of the crate never looks at the raw shape.

use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::Value;

use super::field::{Field, FieldCollection};
use super::identity::{CompanyLocation, PurchasingCompany};
use super::resource::{OrderRef, ProductRef, VariantRef};
use super::snapshot::{CartLine, CheckoutSnapshot, CustomerSnapshot};

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RawNamespace {
    Plain(String),
    Keyed {
        #[serde(alias = "name")]
        key: String,
    },
    /// Anything else reads as "no namespace".
    Other(Value),
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct RawField {
    #[serde(default)]
    key: Option<String>,
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    namespace: Option<RawNamespace>,
    #[serde(default)]
    value: Option<Value>,
    #[serde(default)]
    values: Option<Vec<Value>>,
}

fn scalar(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) => Some(s.clone()),
        other => Some(other.to_string()),
    }
}

impl From<RawField> for Field {
    fn from(raw: RawField) -> Self {
        let namespace = match raw.namespace {
            Some(RawNamespace::Plain(namespace)) => namespace,
            Some(RawNamespace::Keyed { key }) => key,
            Some(RawNamespace::Other(_)) | None => String::new(),
        };
        let value = raw.value.as_ref().and_then(scalar).or_else(|| {
            raw.values
                .as_ref()
                .and_then(|values| values.first())
                .and_then(scalar)
        });
        Field {
            namespace,
            key: raw.key.or(raw.name).unwrap_or_default(),
            value,
        }
    }
}

/// Folds one entry, dropping it when it doesn't have the expected shape.
fn lenient<T: DeserializeOwned>(value: Value) -> Option<T> {
    serde_json::from_value(value).ok()
}

/// Entries of a list that may be a bare array or a connection (`edges[].node` / `nodes`).
fn entries(list: Value) -> Vec<Value> {
    match list {
        Value::Array(items) => items,
        Value::Object(mut connection) => match (connection.remove("edges"), connection.remove("nodes")) {
            (Some(Value::Array(edges)), _) => edges
                .into_iter()
                .filter_map(|mut edge| edge.get_mut("node").map(Value::take))
                .collect(),
            (_, Some(Value::Array(nodes))) => nodes,
            _ => Vec::new(),
        },
        _ => Vec::new(),
    }
}

fn fields_in(list: Option<Value>) -> impl Iterator<Item = RawField> {
    list.into_iter().flat_map(entries).filter_map(lenient)
}

/// Every place a resource may carry fields, concatenated in this order.
///
/// Sources are kept as raw JSON and folded entry by entry, so one malformed entry costs that
/// entry only.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct RawFieldSources {
    #[serde(default)]
    metafields: Option<Value>,
    #[serde(default)]
    custom_metafields: Option<Value>,
    #[serde(default)]
    custom: Option<Value>,
    #[serde(default)]
    metafield: Option<Value>,
}

impl RawFieldSources {
    fn into_collection(self) -> Option<FieldCollection> {
        let custom = self
            .custom
            .and_then(|mut custom| custom.get_mut("metafields").map(Value::take));
        let fields: FieldCollection = fields_in(self.metafields)
            .chain(fields_in(self.custom_metafields))
            .chain(fields_in(custom))
            .chain(self.metafield.and_then(lenient::<RawField>))
            .map(Field::from)
            .collect();
        (!fields.is_empty()).then_some(fields)
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawProduct {
    #[serde(default)]
    id: Option<String>,
    #[serde(default)]
    product_type: Option<String>,
    #[serde(flatten)]
    sources: RawFieldSources,
}

impl From<RawProduct> for ProductRef {
    fn from(raw: RawProduct) -> Self {
        Self {
            id: raw.id,
            product_type: raw.product_type,
            fields: raw.sources.into_collection(),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawVariant {
    #[serde(default)]
    id: Option<String>,
    #[serde(default)]
    product_type: Option<String>,
    #[serde(default)]
    product: Option<RawProduct>,
    #[serde(flatten)]
    sources: RawFieldSources,
}

impl From<RawVariant> for VariantRef {
    fn from(raw: RawVariant) -> Self {
        Self {
            id: raw.id,
            product_type: raw.product_type,
            product: raw.product.map(ProductRef::from),
            fields: raw.sources.into_collection(),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
struct RawLine {
    #[serde(default)]
    merchandise: Option<RawVariant>,
}

/// Cart lines come as a bare list, wrapped in `{ "v": [...] }`, or as a connection.
fn lines_in(lines: Option<Value>) -> Vec<RawLine> {
    let lines = match lines {
        Some(Value::Object(mut wrapper)) if wrapper.contains_key("v") => wrapper.remove("v"),
        other => other,
    };
    lines.into_iter().flat_map(entries).filter_map(lenient).collect()
}

#[derive(Debug, Default, Deserialize)]
struct RawLocation {
    #[serde(default)]
    name: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawCompany {
    #[serde(default)]
    location: Option<RawLocation>,
    #[serde(default)]
    current_location: Option<RawLocation>,
}

impl From<RawCompany> for PurchasingCompany {
    fn from(raw: RawCompany) -> Self {
        let location = |raw: Option<RawLocation>| raw.map(|l| CompanyLocation { name: l.name });
        Self {
            location: location(raw.location),
            current_location: location(raw.current_location),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawCustomer {
    #[serde(default)]
    id: Option<String>,
    #[serde(default)]
    purchasing_company: Option<RawCompany>,
    #[serde(default)]
    company: Option<RawCompany>,
    #[serde(flatten)]
    sources: RawFieldSources,
}

#[derive(Debug, Default, Deserialize)]
struct RawOrderSource {
    #[serde(default)]
    id: Option<String>,
    #[serde(flatten)]
    sources: RawFieldSources,
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct RawCheckout {
    #[serde(default)]
    lines: Option<Value>,
    #[serde(default)]
    customer: Option<RawCustomer>,
    #[serde(default)]
    checkout: Option<RawOrderSource>,
    #[serde(default)]
    cart: Option<RawOrderSource>,
}

impl From<RawCheckout> for CheckoutSnapshot {
    fn from(raw: RawCheckout) -> Self {
        let lines = lines_in(raw.lines)
            .into_iter()
            .map(|line| CartLine {
                merchandise: line.merchandise.map(VariantRef::from).unwrap_or_default(),
            })
            .collect();

        let customer = raw.customer.map(|customer| CustomerSnapshot {
            id: customer.id,
            purchasing_company: customer
                .purchasing_company
                .or(customer.company)
                .map(PurchasingCompany::from),
            fields: customer.sources.into_collection(),
        });

        let (checkout_id, checkout_fields) = raw
            .checkout
            .map(|c| (c.id, c.sources.into_collection()))
            .unwrap_or_default();
        let (cart_id, cart_fields) = raw
            .cart
            .map(|c| (c.id, c.sources.into_collection()))
            .unwrap_or_default();

        Self {
            lines,
            customer,
            order: OrderRef {
                id: checkout_id.or(cart_id),
                checkout_fields,
                cart_fields,
            },
        }
    }
}
