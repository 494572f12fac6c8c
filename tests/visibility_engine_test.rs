use checkout_visibility::clients::ResourceClients;
use checkout_visibility::engine::VisibilityEngine;
use checkout_visibility::framework::mock::MockQueryClient;
use checkout_visibility::framework::FrameworkError;
use checkout_visibility::model::{
    CheckoutSnapshot, Field, MatchMode, MatchRule, ProductRef, ResourceKind, RuleAction, VariantRef,
};
use checkout_visibility::resolver::FieldResolver;

/// Real engine and resolver with a mocked storefront.
/// Asserts the exact remote traffic a decision produces.
#[tokio::test]
async fn test_engine_with_mocked_storefront() {
    let mut mock = MockQueryClient::new();

    // Line 1 resolves locally; line 2 and its duplicate share one remote fetch.
    mock.expect_resource_fields(ResourceKind::Product, "p2")
        .return_ok(vec![Field::new("custom", "tier", "silver")].into());

    let snapshot = CheckoutSnapshot::default()
        .with_line(VariantRef::new("v1").with_product(ProductRef::new("p1").with_fields(vec![Field::new(
            "custom", "tier", "gold",
        )])))
        .with_line(VariantRef::new("v2").with_product(ProductRef::new("p2")))
        .with_line(VariantRef::new("v3").with_product(ProductRef::new("p2")));

    let engine = VisibilityEngine::new(FieldResolver::new(ResourceClients::new(mock.client())));
    let rule = MatchRule::new("product", "custom.tier", "gold")
        .with_mode(MatchMode::Exact)
        .with_action(RuleAction::ShowWhen);

    let show = engine.decide(&rule, &snapshot.resources_for(rule.resource_kind())).await;

    assert!(show);
    mock.verify();
}

#[tokio::test]
async fn test_engine_variant_chain_with_failure() {
    let mut mock = MockQueryClient::new();
    mock.expect_variant_owner("v1").return_ok(Some("p1".into()));
    mock.expect_product_variants("p1")
        .return_err(FrameworkError::ActorClosed);

    let snapshot = CheckoutSnapshot::default().with_line(VariantRef::new("v1"));
    let engine = VisibilityEngine::new(FieldResolver::new(ResourceClients::new(mock.client())));
    let rule = MatchRule::new("variant", "custom.size", "xl").with_action(RuleAction::HideWhen);

    // Failed sibling lookup: no value, no match, hide-when shows.
    assert!(engine.decide(&rule, &snapshot.resources_for(rule.resource_kind())).await);
    mock.verify();
}
