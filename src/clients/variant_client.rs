use crate::clients::FetchError;
use crate::framework::QueryClient;
use crate::model::{FieldCollection, FieldIdentifier};
use tracing::{debug, instrument};

/// Client for variant queries.
///
/// Variants have no generic field listing; their fields are selected by identifier.
#[derive(Clone, Debug)]
pub struct VariantClient {
    inner: QueryClient,
}

impl VariantClient {
    pub fn new(inner: QueryClient) -> Self {
        Self { inner }
    }

    /// Id of the product owning the variant, `None` when the variant is unknown.
    #[instrument(skip(self))]
    pub async fn owner_product(&self, variant_id: &str) -> Result<Option<String>, FetchError> {
        debug!("Sending request");
        Ok(self.inner.variant_owner(variant_id.to_string()).await?)
    }

    /// Fields of the variant selected by `identifier`'s namespace/key parts.
    #[instrument(skip(self))]
    pub async fn fields_by_identifier(
        &self,
        variant_id: &str,
        identifier: &FieldIdentifier,
    ) -> Result<FieldCollection, FetchError> {
        debug!("Sending request");
        let fields = self
            .inner
            .variant_fields(variant_id.to_string(), vec![identifier.clone()])
            .await?;
        Ok(fields)
    }
}
