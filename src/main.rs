//! # Checkout Visibility Demo
//!
//! Mounts the extension once against an in-memory storefront:
//! 1.  Setting up the [`ExtensionSystem`].
//! 2.  Loading settings and a checkout snapshot from JSON.
//! 3.  Logging the settled view (visibility, validation banner, content).

use checkout_visibility::lifecycle::{setup_tracing, ContentState, ExtensionSystem};
use checkout_visibility::model::{CheckoutSnapshot, Field, MetaObject};
use checkout_visibility::settings::ExtensionSettings;
use checkout_visibility::storefront::InMemoryStorefront;
use tracing::{info, warn, Instrument};

const SETTINGS: &str = r#"{
    "conditional_resource_type": "customer",
    "conditional_metafield_name": "loyalty.tier",
    "conditional_metafield_value": "Gold",
    "conditional_match_type": "exact match",
    "conditional_action": "show when",
    "metaobject_type": "global_site_data",
    "metaobject_handles": "gold-perks"
}"#;

const CHECKOUT: &str = r#"{
    "lines": [
        {"merchandise": {"id": "gid://shopify/ProductVariant/11", "product": {"id": "gid://shopify/Product/1", "productType": "Shoes"}}}
    ],
    "customer": {
        "id": "gid://shopify/Customer/7",
        "purchasingCompany": {"location": {"name": "Location Admins"}}
    },
    "checkout": {"id": "gid://shopify/Checkout/42"}
}"#;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Setup tracing once for the entire application
    setup_tracing();

    info!("Starting checkout extension demo");

    let storefront = InMemoryStorefront::new()
        .with_customer(
            "gid://shopify/Customer/7",
            vec![Field::new("loyalty", "tier", "gold")],
        )
        .with_metaobject(
            MetaObject::new("gid://shopify/Metaobject/1", "global_site_data", "gold-perks")
                .with_field("heading", "Free shipping for Gold members"),
        );
    let system = ExtensionSystem::new(storefront);

    let settings = ExtensionSettings::from_json(SETTINGS)?;
    let snapshot = CheckoutSnapshot::from_json(CHECKOUT)?;

    let span = tracing::info_span!("checkout");
    let view = async {
        info!("Mounting extension");
        system.mount(&settings, &snapshot).settle().await
    }
    .instrument(span)
    .await?;

    info!(show_content = view.show_content, "Visibility decided");
    if let Some(message) = &view.validation_message {
        warn!(%message, "Checkout blocked");
    }
    match &view.content {
        ContentState::Loaded(objects) => info!(count = objects.len(), "Content ready"),
        ContentState::Failed(reason) => warn!(%reason, "No content"),
        ContentState::Loading => warn!("Content still loading"),
    }

    system.shutdown().await?;

    info!("Demo completed successfully");
    Ok(())
}
