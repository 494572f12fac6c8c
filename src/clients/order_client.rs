use crate::clients::FieldClient;
use crate::framework::QueryClient;
use crate::model::ResourceKind;

/// Client for order queries.
#[derive(Clone, Debug)]
pub struct OrderClient {
    inner: QueryClient,
}

impl OrderClient {
    pub fn new(inner: QueryClient) -> Self {
        Self { inner }
    }
}

impl FieldClient for OrderClient {
    const KIND: ResourceKind = ResourceKind::Order;

    fn inner(&self) -> &QueryClient {
        &self.inner
    }
}
