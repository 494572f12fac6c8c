//! Merchant-configured visibility rule.

use serde::{Deserialize, Serialize};

use super::field::FieldIdentifier;
use super::resource::ResourceKind;

/// Normalizes a free-text selector: trimmed, lower-cased, with `-` and `_` read as spaces.
fn normalize_selector(selector: &str) -> String {
    selector
        .trim()
        .to_lowercase()
        .replace(['-', '_'], " ")
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

/// How a resolved value is compared against the expected value.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum MatchMode {
    #[default]
    Exact,
    NotExact,
    Contains,
    NotContains,
    StartsWith,
    EndsWith,
}

impl MatchMode {
    /// Parses a match-mode selector. Unrecognized selectors fall back to [`MatchMode::Exact`].
    pub fn parse(selector: &str) -> Self {
        match normalize_selector(selector).as_str() {
            "exact match" | "exact" => Self::Exact,
            "not exact match" | "not exact" | "exact negated" => Self::NotExact,
            "contains" => Self::Contains,
            "not contains" => Self::NotContains,
            "starts with" => Self::StartsWith,
            "ends with" => Self::EndsWith,
            _ => Self::Exact,
        }
    }
}

/// What the rule does with the match result.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum RuleAction {
    ShowWhen,
    HideWhen,
    /// No (or an unknown) action configured: content is always shown.
    #[default]
    Always,
}

impl RuleAction {
    pub fn parse(selector: &str) -> Self {
        match normalize_selector(selector).as_str() {
            "show when" => Self::ShowWhen,
            "hide when" => Self::HideWhen,
            _ => Self::Always,
        }
    }

    /// Turns a match result into a show (`true`) / hide (`false`) decision.
    pub fn apply(&self, matched: bool) -> bool {
        match self {
            Self::ShowWhen => matched,
            Self::HideWhen => !matched,
            Self::Always => true,
        }
    }
}

/// A single visibility rule.
#[derive(Debug, Clone, PartialEq)]
pub struct MatchRule {
    /// Free-text resource type selector, already trimmed and case-folded.
    pub resource_type: String,
    pub field: FieldIdentifier,
    pub expected: String,
    pub mode: MatchMode,
    pub action: RuleAction,
}

impl MatchRule {
    pub fn new(
        resource_type: impl Into<String>,
        field: impl Into<String>,
        expected: impl Into<String>,
    ) -> Self {
        Self {
            resource_type: resource_type.into().trim().to_lowercase(),
            field: FieldIdentifier::new(field),
            expected: expected.into().trim().to_string(),
            mode: MatchMode::default(),
            action: RuleAction::default(),
        }
    }

    pub fn with_mode(mut self, mode: MatchMode) -> Self {
        self.mode = mode;
        self
    }

    pub fn with_action(mut self, action: RuleAction) -> Self {
        self.action = action;
        self
    }

    /// A rule missing its resource type, field or expected value never hides anything.
    pub fn is_inert(&self) -> bool {
        self.resource_type.is_empty() || self.field.is_empty() || self.expected.is_empty()
    }

    pub fn resource_kind(&self) -> Option<ResourceKind> {
        ResourceKind::parse(&self.resource_type)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_match_mode_parse_accepts_spellings() {
        assert_eq!(MatchMode::parse("exact match"), MatchMode::Exact);
        assert_eq!(MatchMode::parse(" Not Exact Match "), MatchMode::NotExact);
        assert_eq!(MatchMode::parse("exact-negated"), MatchMode::NotExact);
        assert_eq!(MatchMode::parse("not_contains"), MatchMode::NotContains);
        assert_eq!(MatchMode::parse("starts-with"), MatchMode::StartsWith);
        assert_eq!(MatchMode::parse("ends with"), MatchMode::EndsWith);
        assert_eq!(MatchMode::parse("contains"), MatchMode::Contains);
    }

    #[test]
    fn test_unknown_match_mode_falls_back_to_exact() {
        assert_eq!(MatchMode::parse("fuzzy"), MatchMode::Exact);
        assert_eq!(MatchMode::parse(""), MatchMode::Exact);
    }

    #[test]
    fn test_action_apply() {
        assert!(RuleAction::ShowWhen.apply(true));
        assert!(!RuleAction::ShowWhen.apply(false));
        assert!(!RuleAction::HideWhen.apply(true));
        assert!(RuleAction::HideWhen.apply(false));
        assert!(RuleAction::Always.apply(false));
        assert_eq!(RuleAction::parse("Hide When"), RuleAction::HideWhen);
        assert_eq!(RuleAction::parse("toggle"), RuleAction::Always);
    }

    #[test]
    fn test_resource_kind_from_selector() {
        assert_eq!(MatchRule::new(" Variant ", "tier", "gold").resource_kind(), Some(ResourceKind::Variant));
        assert_eq!(MatchRule::new("collection", "tier", "gold").resource_kind(), None);
    }

    #[test]
    fn test_inert_rules() {
        assert!(MatchRule::new("", "tier", "gold").is_inert());
        assert!(MatchRule::new("product", "  ", "gold").is_inert());
        assert!(MatchRule::new("product", "tier", "").is_inert());
        assert!(!MatchRule::new("product", "tier", "gold").is_inert());
    }
}
