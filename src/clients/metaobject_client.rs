use crate::clients::FetchError;
use crate::framework::QueryClient;
use crate::model::MetaObject;
use tracing::{debug, instrument};

/// Client for MetaObject content listings.
#[derive(Clone, Debug)]
pub struct MetaObjectClient {
    inner: QueryClient,
}

impl MetaObjectClient {
    pub fn new(inner: QueryClient) -> Self {
        Self { inner }
    }

    /// Up to `first` MetaObjects of type `kind`.
    #[instrument(skip(self))]
    pub async fn list_by_type(&self, kind: &str, first: u32) -> Result<Vec<MetaObject>, FetchError> {
        debug!("Sending request");
        Ok(self.inner.metaobjects(kind.to_string(), first).await?)
    }
}
