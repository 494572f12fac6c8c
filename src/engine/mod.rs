//! # Visibility Rule Engine
//!
//! Decides whether a content block is shown for a [`MatchRule`] and an ordered resource list.
//!
//! ## Decision Procedure
//!
//! 1. An inert rule (missing resource type, field or expected value) shows immediately.
//! 2. Every resource is resolved in order. The first non-null value is retained; later resources
//!    are still resolved but never overwrite it.
//! 3. The retained value (empty string when none) goes through the
//!    [Match Evaluator](crate::matcher::matches) and the rule's action turns the result into a
//!    decision.
//!
//! Any [`ResolveError`] raised during the scan fails open: the content is shown.

use tracing::{debug, info, instrument, warn};

use crate::matcher::matches;
use crate::model::{FieldValue, MatchRule, ResourceReference};
use crate::resolver::{FieldResolver, ResolutionScope, ResolveError};

#[derive(Clone, Debug)]
pub struct VisibilityEngine {
    resolver: FieldResolver,
}

impl VisibilityEngine {
    pub fn new(resolver: FieldResolver) -> Self {
        Self { resolver }
    }

    /// Returns `true` to show the content, `false` to hide it.
    #[instrument(skip(self, rule, resources), fields(resource_type = %rule.resource_type, field = %rule.field, resources = resources.len()))]
    pub async fn decide(&self, rule: &MatchRule, resources: &[ResourceReference]) -> bool {
        if rule.is_inert() {
            debug!("Inert rule, showing content");
            return true;
        }

        match self.scan(rule, resources).await {
            Ok(value) => {
                let matched = matches(value.as_deref(), &rule.expected, rule.mode);
                let show = rule.action.apply(matched);
                info!(?value, matched, show, "Decided");
                show
            }
            Err(e) => {
                warn!(error = %e, "Evaluation failed, showing content");
                true
            }
        }
    }

    async fn scan(&self, rule: &MatchRule, resources: &[ResourceReference]) -> Result<FieldValue, ResolveError> {
        let mut scope = ResolutionScope::new();
        let mut retained: FieldValue = None;
        for resource in resources {
            let value = self.resolver.resolve_in(resource, &rule.field, &mut scope).await?;
            if retained.is_none() {
                retained = value;
            }
        }
        debug!(fetches = scope.fetch_count(), "Scan complete");
        Ok(retained)
    }
}
