//! Type-safe wrappers around [`QueryClient`](crate::framework::QueryClient).
//!
//! Each wrapper covers one resource type. They share a single [`QueryClient`], so cloning the
//! bundle is cheap and every request ends up at the same [`QueryActor`](crate::framework::QueryActor).

pub mod customer_client;
pub mod error;
pub mod field_client;
pub mod metaobject_client;
pub mod order_client;
pub mod product_client;
pub mod variant_client;

pub use customer_client::*;
pub use error::*;
pub use field_client::*;
pub use metaobject_client::*;
pub use order_client::*;
pub use product_client::*;
pub use variant_client::*;

use crate::framework::QueryClient;

/// The per-resource clients the field resolver needs.
#[derive(Clone, Debug)]
pub struct ResourceClients {
    pub product: ProductClient,
    pub variant: VariantClient,
    pub customer: CustomerClient,
    pub order: OrderClient,
}

impl ResourceClients {
    pub fn new(client: QueryClient) -> Self {
        Self {
            product: ProductClient::new(client.clone()),
            variant: VariantClient::new(client.clone()),
            customer: CustomerClient::new(client.clone()),
            order: OrderClient::new(client),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::framework::mock::{
        create_mock_client, expect_metaobjects, expect_resource_fields, expect_variant_fields, MockQueryClient,
    };
    use crate::framework::{FrameworkError, PAGE_SIZE};
    use crate::model::{Field, FieldIdentifier, MetaObject, ResourceKind};

    #[tokio::test]
    async fn test_field_client_requests_first_page() {
        let (client, mut receiver) = create_mock_client(10);
        let customers = CustomerClient::new(client);

        let task = tokio::spawn(async move { customers.fields("gid://customer/1").await });

        let (kind, id, first, responder) = expect_resource_fields(&mut receiver).await.unwrap();
        assert_eq!(kind, ResourceKind::Customer);
        assert_eq!(id, "gid://customer/1");
        assert_eq!(first, PAGE_SIZE);
        responder
            .send(Ok(vec![Field::new("custom", "tier", "gold")].into()))
            .unwrap();

        let fields = task.await.unwrap().unwrap();
        assert_eq!(fields.find(&"tier".into()).unwrap().value.as_deref(), Some("gold"));
    }

    #[tokio::test]
    async fn test_variant_client_sends_single_identifier() {
        let (client, mut receiver) = create_mock_client(10);
        let variants = VariantClient::new(client);

        let task = tokio::spawn(async move {
            variants
                .fields_by_identifier("v1", &FieldIdentifier::new("custom.color"))
                .await
        });

        let (variant_id, identifiers, responder) = expect_variant_fields(&mut receiver).await.unwrap();
        assert_eq!(variant_id, "v1");
        assert_eq!(identifiers, vec![FieldIdentifier::new("custom.color")]);
        responder.send(Ok(Default::default())).unwrap();

        assert!(task.await.unwrap().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_metaobject_client_passes_type_and_page_size() {
        let (client, mut receiver) = create_mock_client(10);
        let content = MetaObjectClient::new(client);

        let task = tokio::spawn(async move { content.list_by_type("global_site_data", 25).await });

        let (kind, first, responder) = expect_metaobjects(&mut receiver).await.unwrap();
        assert_eq!(kind, "global_site_data");
        assert_eq!(first, 25);
        responder
            .send(Ok(vec![MetaObject::new("m1", "global_site_data", "hero")]))
            .unwrap();

        let objects = task.await.unwrap().unwrap();
        assert_eq!(objects[0].handle.as_deref(), Some("hero"));
    }

    #[tokio::test]
    async fn test_transport_errors_are_wrapped() {
        let mut mock = MockQueryClient::new();
        mock.expect_product_variants("p1")
            .return_err(FrameworkError::ActorClosed);
        mock.expect_metaobjects("banner")
            .return_ok(vec![MetaObject::new("m1", "banner", "hero")]);

        let products = ProductClient::new(mock.client());
        let result = products.variant_ids("p1").await;
        assert!(matches!(result, Err(FetchError::Transport(FrameworkError::ActorClosed))));

        let content = MetaObjectClient::new(mock.client());
        let objects = content.list_by_type("banner", 10).await.unwrap();
        assert_eq!(objects.len(), 1);

        mock.verify();
    }
}
