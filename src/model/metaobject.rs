//! A merchant-defined structured content record.
//!
//! MetaObjects are what the extension renders once the visibility rule lets content through.
//! They are fetched by type and optionally narrowed down by handle
//! (see [`ContentLoader`](crate::content::ContentLoader)).
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MetaObjectField {
    pub key: String,
    #[serde(default)]
    pub value: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MetaObject {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub handle: Option<String>,
    #[serde(default)]
    pub fields: Vec<MetaObjectField>,
    #[serde(default)]
    pub updated_at: Option<String>,
}

impl MetaObject {
    /// Creates a MetaObject with no fields.
    ///
    /// # Arguments
    /// * `id` - Global id of the record
    /// * `kind` - MetaObject type (e.g. `global_site_data`)
    /// * `handle` - Merchant-facing handle
    pub fn new(id: impl Into<String>, kind: impl Into<String>, handle: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            kind: kind.into(),
            handle: Some(handle.into()),
            fields: Vec::new(),
            updated_at: None,
        }
    }

    pub fn with_field(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.fields.push(MetaObjectField {
            key: key.into(),
            value: Some(value.into()),
        });
        self
    }
}
