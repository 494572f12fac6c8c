//! Match Evaluator: compares a resolved value against the expected value.

use crate::model::MatchMode;

/// Evaluates `value` against `expected` under `mode`.
///
/// Both sides are trimmed and lower-cased first. A missing value compares as the empty string.
pub fn matches(value: Option<&str>, expected: &str, mode: MatchMode) -> bool {
    let value = value.unwrap_or_default().trim().to_lowercase();
    let expected = expected.trim().to_lowercase();

    match mode {
        MatchMode::Exact => value == expected,
        MatchMode::NotExact => value != expected,
        MatchMode::Contains => value.contains(&expected),
        MatchMode::NotContains => !value.contains(&expected),
        MatchMode::StartsWith => value.starts_with(&expected),
        MatchMode::EndsWith => value.ends_with(&expected),
    }
}
