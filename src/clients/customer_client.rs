use crate::clients::FieldClient;
use crate::framework::QueryClient;
use crate::model::ResourceKind;

/// Client for customer queries.
#[derive(Clone, Debug)]
pub struct CustomerClient {
    inner: QueryClient,
}

impl CustomerClient {
    pub fn new(inner: QueryClient) -> Self {
        Self { inner }
    }
}

impl FieldClient for CustomerClient {
    const KIND: ResourceKind = ResourceKind::Customer;

    fn inner(&self) -> &QueryClient {
        &self.inner
    }
}
