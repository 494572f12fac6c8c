use crate::clients::FetchError;
use crate::framework::{QueryClient, PAGE_SIZE};
use crate::model::{FieldCollection, ResourceKind};
use async_trait::async_trait;

/// Trait for resource-specific clients to inherit the standard field fetch.
///
/// Implementors only name their [`ResourceKind`] and hand out the shared [`QueryClient`].
#[async_trait]
pub trait FieldClient: Send + Sync {
    /// The resource type this client queries.
    const KIND: ResourceKind;

    /// Access the inner generic QueryClient.
    fn inner(&self) -> &QueryClient;

    /// Fetch the first page of custom fields of a resource.
    #[tracing::instrument(skip(self))]
    async fn fields(&self, id: &str) -> Result<FieldCollection, FetchError> {
        tracing::debug!(kind = %Self::KIND, "Sending request");
        let fields = self
            .inner()
            .resource_fields(Self::KIND, id.to_string(), PAGE_SIZE)
            .await?;
        Ok(fields)
    }
}
