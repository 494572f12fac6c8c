//! # Extension Settings
//!
//! Merchant configuration arrives as a flat bag of free-text strings. [`SettingsProvider`] is the
//! seam to wherever those live; [`ExtensionSettings`] is the parsed, explicit form handed to each
//! component at construction.

use std::collections::HashMap;

use serde::Deserialize;

use crate::gate::{AccessGate, DEFAULT_REQUIRED_LOCATION};
use crate::model::{MatchMode, MatchRule, RuleAction};

/// Setting keys.
pub mod keys {
    pub const RESOURCE_TYPE: &str = "conditional_resource_type";
    pub const FIELD_NAME: &str = "conditional_metafield_name";
    pub const FIELD_VALUE: &str = "conditional_metafield_value";
    pub const MATCH_TYPE: &str = "conditional_match_type";
    pub const ACTION: &str = "conditional_action";
    pub const METAOBJECT_TYPE: &str = "metaobject_type";
    pub const METAOBJECT_HANDLES: &str = "metaobject_handles";
    pub const REQUIRED_LOCATION: &str = "required_location_name";
}

/// Match mode used when none is configured.
pub const DEFAULT_MATCH_TYPE: &str = "exact match";

/// Source of named configuration strings.
pub trait SettingsProvider {
    fn get(&self, key: &str) -> Option<String>;
}

impl SettingsProvider for HashMap<String, String> {
    fn get(&self, key: &str) -> Option<String> {
        HashMap::get(self, key).cloned()
    }
}

/// Parsed extension configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ExtensionSettings {
    pub conditional_resource_type: String,
    pub conditional_metafield_name: String,
    pub conditional_metafield_value: String,
    pub conditional_match_type: String,
    pub conditional_action: String,
    pub metaobject_type: String,
    /// One handle per line.
    pub metaobject_handles: String,
    pub required_location_name: String,
}

impl Default for ExtensionSettings {
    fn default() -> Self {
        Self {
            conditional_resource_type: String::new(),
            conditional_metafield_name: String::new(),
            conditional_metafield_value: String::new(),
            conditional_match_type: DEFAULT_MATCH_TYPE.to_string(),
            conditional_action: String::new(),
            metaobject_type: String::new(),
            metaobject_handles: String::new(),
            required_location_name: DEFAULT_REQUIRED_LOCATION.to_string(),
        }
    }
}

impl ExtensionSettings {
    /// Reads every key from `provider`, keeping defaults for absent or blank ones.
    pub fn from_provider(provider: &impl SettingsProvider) -> Self {
        let defaults = Self::default();
        let read = |key: &str, default: String| {
            provider
                .get(key)
                .filter(|value| !value.trim().is_empty())
                .unwrap_or(default)
        };
        Self {
            conditional_resource_type: read(keys::RESOURCE_TYPE, defaults.conditional_resource_type),
            conditional_metafield_name: read(keys::FIELD_NAME, defaults.conditional_metafield_name),
            conditional_metafield_value: read(keys::FIELD_VALUE, defaults.conditional_metafield_value),
            conditional_match_type: read(keys::MATCH_TYPE, defaults.conditional_match_type),
            conditional_action: read(keys::ACTION, defaults.conditional_action),
            metaobject_type: read(keys::METAOBJECT_TYPE, defaults.metaobject_type),
            metaobject_handles: read(keys::METAOBJECT_HANDLES, defaults.metaobject_handles),
            required_location_name: read(keys::REQUIRED_LOCATION, defaults.required_location_name),
        }
    }

    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// The visibility rule described by the `conditional_*` keys.
    pub fn match_rule(&self) -> MatchRule {
        MatchRule::new(
            &self.conditional_resource_type,
            &self.conditional_metafield_name,
            &self.conditional_metafield_value,
        )
        .with_mode(MatchMode::parse(&self.conditional_match_type))
        .with_action(RuleAction::parse(&self.conditional_action))
    }

    /// Configured MetaObject type, `None` when blank.
    pub fn metaobject_type(&self) -> Option<&str> {
        Some(self.metaobject_type.trim()).filter(|kind| !kind.is_empty())
    }

    /// Configured handles: one per line, trimmed, blank lines dropped.
    pub fn handles(&self) -> Vec<String> {
        self.metaobject_handles
            .lines()
            .map(str::trim)
            .filter(|handle| !handle.is_empty())
            .map(str::to_string)
            .collect()
    }

    pub fn access_gate(&self) -> AccessGate {
        match self.required_location_name.trim() {
            "" => AccessGate::default(),
            name => AccessGate::new(name),
        }
    }
}
