use crate::clients::{FetchError, FieldClient};
use crate::framework::{QueryClient, PAGE_SIZE};
use crate::model::ResourceKind;
use tracing::{debug, instrument};

/// Client for product queries.
#[derive(Clone, Debug)]
pub struct ProductClient {
    inner: QueryClient,
}

impl ProductClient {
    pub fn new(inner: QueryClient) -> Self {
        Self { inner }
    }

    /// Ids of the product's variants (first page).
    #[instrument(skip(self))]
    pub async fn variant_ids(&self, product_id: &str) -> Result<Vec<String>, FetchError> {
        debug!("Sending request");
        let ids = self
            .inner
            .product_variants(product_id.to_string(), PAGE_SIZE)
            .await?;
        Ok(ids)
    }
}

impl FieldClient for ProductClient {
    const KIND: ResourceKind = ResourceKind::Product;

    fn inner(&self) -> &QueryClient {
        &self.inner
    }
}
