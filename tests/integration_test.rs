use checkout_visibility::gate::LOGIN_REQUIRED_MESSAGE;
use checkout_visibility::lifecycle::{ContentState, ExtensionSystem, ViewState};
use checkout_visibility::model::{CheckoutSnapshot, Field, MetaObject};
use checkout_visibility::settings::ExtensionSettings;
use checkout_visibility::storefront::InMemoryStorefront;

fn storefront() -> InMemoryStorefront {
    InMemoryStorefront::new()
        .with_customer("gid://shopify/Customer/7", vec![Field::new("loyalty", "tier", "gold")])
        .with_product("gid://shopify/Product/1", vec![Field::new("custom", "season", "winter")])
        .with_variant(
            "gid://shopify/ProductVariant/11",
            "gid://shopify/Product/1",
            vec![Field::new("custom", "color", "Midnight Blue")],
        )
        .with_metaobject(MetaObject::new("gid://shopify/Metaobject/1", "global_site_data", "gold-perks"))
        .with_metaobject(MetaObject::new("gid://shopify/Metaobject/2", "global_site_data", "winter-sale"))
        .fail_on("gid://shopify/Customer/13")
}

fn settings(resource_type: &str, field: &str, expected: &str, mode: &str, action: &str) -> ExtensionSettings {
    ExtensionSettings {
        conditional_resource_type: resource_type.into(),
        conditional_metafield_name: field.into(),
        conditional_metafield_value: expected.into(),
        conditional_match_type: mode.into(),
        conditional_action: action.into(),
        metaobject_type: "global_site_data".into(),
        ..ExtensionSettings::default()
    }
}

async fn mount(settings: &ExtensionSettings, checkout: &str) -> ViewState {
    let system = ExtensionSystem::new(storefront());
    let snapshot = CheckoutSnapshot::from_json(checkout).expect("Invalid checkout fixture");
    let view = system
        .mount(settings, &snapshot)
        .settle()
        .await
        .expect("Mounted tasks failed");
    system.shutdown().await.expect("Shutdown failed");
    view
}

const MEMBER_CHECKOUT: &str = r#"{
    "lines": [
        {"merchandise": {"id": "gid://shopify/ProductVariant/11", "product": {"id": "gid://shopify/Product/1", "productType": "Shoes"}}}
    ],
    "customer": {
        "id": "gid://shopify/Customer/7",
        "purchasingCompany": {"location": {"name": "Location Admins"}}
    },
    "checkout": {"id": "gid://shopify/Checkout/42", "metafields": [{"namespace": "custom", "key": "gift", "value": "yes"}]},
    "cart": {"metafields": [{"namespace": "custom", "key": "gift", "value": "no"}]}
}"#;

/// Full end-to-end test: remote customer field, gate and content all through real components.
#[tokio::test]
async fn test_full_mount_for_member() {
    let mut settings = settings("Customer", "loyalty.tier", "GOLD", "exact match", "show when");
    settings.metaobject_handles = "Gold-Perks".into();

    let view = mount(&settings, MEMBER_CHECKOUT).await;

    assert!(view.show_content);
    assert_eq!(view.validation_message, None);
    match view.content {
        ContentState::Loaded(objects) => {
            assert_eq!(objects.len(), 1);
            assert_eq!(objects[0].handle.as_deref(), Some("gold-perks"));
        }
        other => panic!("Expected loaded content, got {other:?}"),
    }
}

#[tokio::test]
async fn test_product_type_attribute() {
    let view = mount(
        &settings("product", "productType", "shoe", "starts with", "hide when"),
        MEMBER_CHECKOUT,
    )
    .await;
    assert!(!view.show_content);
}

#[tokio::test]
async fn test_variant_field_through_lookup_chain() {
    let checkout = r#"{"lines": [{"merchandise": {"id": "gid://shopify/ProductVariant/11"}}]}"#;
    let view = mount(
        &settings("variant", "custom.color", "blue", "ends-with", "show-when"),
        checkout,
    )
    .await;
    assert!(view.show_content);

    let view = mount(
        &settings("variant", "custom.color", "blue", "not contains", "show when"),
        checkout,
    )
    .await;
    assert!(!view.show_content);
}

#[tokio::test]
async fn test_order_prefers_checkout_level_fields() {
    let view = mount(&settings("order", "gift", "yes", "exact", "show when"), MEMBER_CHECKOUT).await;
    assert!(view.show_content);

    let view = mount(&settings("order", "gift", "no", "exact", "show when"), MEMBER_CHECKOUT).await;
    assert!(!view.show_content);
}

#[tokio::test]
async fn test_transport_failure_degrades_to_empty_value() {
    let checkout = r#"{"customer": {"id": "gid://shopify/Customer/13"}}"#;

    let view = mount(&settings("customer", "tier", "gold", "exact", "show when"), checkout).await;
    assert!(!view.show_content);

    let view = mount(&settings("customer", "tier", "gold", "exact", "hide when"), checkout).await;
    assert!(view.show_content);
}

#[tokio::test]
async fn test_malformed_resource_fails_open() {
    let checkout = r#"{"lines": [{"merchandise": {"id": "  "}}]}"#;
    let view = mount(&settings("variant", "custom.color", "red", "exact", "show when"), checkout).await;
    assert!(view.show_content);
}

#[tokio::test]
async fn test_guest_checkout_is_blocked() {
    let checkout = r#"{"lines": []}"#;
    let view = mount(&settings("customer", "tier", "gold", "exact", "show when"), checkout).await;

    assert_eq!(view.validation_message.as_deref(), Some(LOGIN_REQUIRED_MESSAGE));
    // No customer resource: the value is empty and show-when hides.
    assert!(!view.show_content);
    assert!(matches!(view.content, ContentState::Loaded(ref objects) if objects.len() == 2));
}

#[tokio::test]
async fn test_wrong_location_and_missing_handles() {
    let checkout = r#"{"customer": {"id": "gid://shopify/Customer/7", "company": {"location": {"name": "Warehouse"}}}}"#;
    let mut settings = settings("", "", "", "", "");
    settings.metaobject_handles = "spring-sale".into();

    let view = mount(&settings, checkout).await;

    assert!(view.show_content);
    let message = view.validation_message.expect("Expected a location message");
    assert!(message.contains("'Location Admins'"));
    assert_eq!(
        view.content,
        ContentState::Failed(
            "No MetaObjects found with configured handles \"spring-sale\". Available handles: gold-perks, winter-sale"
                .to_string()
        )
    );
}
