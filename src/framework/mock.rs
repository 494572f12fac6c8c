//! # Mock Framework
//!
//! Utilities for testing query callers (clients, resolver, engine) without a backend.
//!
//! ## When to use Mocks vs a Real Backend
//!
//! | Feature | MockQueryClient | QueryActor + InMemoryStorefront |
//! |---------|-----------------|----------------------------------|
//! | **Determinism** | Exact request sequence asserted | Subject to scheduler |
//! | **Error Injection** | Easy (`return_err`) | Only via configured failures |
//! | **Use Case** | Unit testing logic *around* the client | Full mount / integration flows |
//!
//! ## Usage
//!
//! Use [`MockQueryClient`] for a fluent expectation queue, or [`create_mock_client`] together
//! with helpers like [`expect_resource_fields`] to answer requests by hand.
//!
//! ```ignore
//! let mut mock = MockQueryClient::new();
//! mock.expect_resource_fields(ResourceKind::Product, "123")
//!     .return_ok(vec![Field::new("custom", "tier", "gold")].into());
//!
//! let resolver = FieldResolver::new(ResourceClients::new(mock.client()));
//! // ... exercise the resolver ...
//! mock.verify(); // Ensures all expectations were met, in order
//! ```

use crate::framework::{FrameworkError, QueryClient, QueryRequest, Response};
use crate::model::{FieldCollection, FieldIdentifier, MetaObject, ResourceKind};
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use tokio::sync::mpsc;

// =============================================================================
// EXPECTATION BUILDER API
// =============================================================================

/// An expected request and the response to give it.
enum Expectation {
    ResourceFields {
        kind: ResourceKind,
        id: String,
        response: Result<FieldCollection, FrameworkError>,
    },
    VariantOwner {
        variant_id: String,
        response: Result<Option<String>, FrameworkError>,
    },
    ProductVariants {
        product_id: String,
        response: Result<Vec<String>, FrameworkError>,
    },
    VariantFields {
        variant_id: String,
        response: Result<FieldCollection, FrameworkError>,
    },
    MetaObjects {
        kind: String,
        response: Result<Vec<MetaObject>, FrameworkError>,
    },
}

impl Expectation {
    fn describe(&self) -> String {
        match self {
            Self::ResourceFields { kind, id, .. } => format!("ResourceFields({kind}, {id})"),
            Self::VariantOwner { variant_id, .. } => format!("VariantOwner({variant_id})"),
            Self::ProductVariants { product_id, .. } => format!("ProductVariants({product_id})"),
            Self::VariantFields { variant_id, .. } => format!("VariantFields({variant_id})"),
            Self::MetaObjects { kind, .. } => format!("MetaObjects({kind})"),
        }
    }
}

fn describe_request(request: &QueryRequest) -> String {
    match request {
        QueryRequest::ResourceFields { kind, id, .. } => format!("ResourceFields({kind}, {id})"),
        QueryRequest::VariantOwner { variant_id, .. } => format!("VariantOwner({variant_id})"),
        QueryRequest::ProductVariants { product_id, .. } => format!("ProductVariants({product_id})"),
        QueryRequest::VariantFields { variant_id, .. } => format!("VariantFields({variant_id})"),
        QueryRequest::MetaObjects { kind, .. } => format!("MetaObjects({kind})"),
    }
}

type Expectations = Arc<Mutex<VecDeque<Expectation>>>;

/// A mock client with an ordered expectation queue.
///
/// Requests are matched against expectations in FIFO order. A request that doesn't match
/// (wrong operation, kind or id) is recorded as a failure and its response channel is dropped,
/// so the caller sees [`FrameworkError::ActorDropped`]. [`MockQueryClient::verify`] reports both
/// mismatches and unmet expectations.
pub struct MockQueryClient {
    client: QueryClient,
    expectations: Expectations,
    failures: Arc<Mutex<Vec<String>>>,
    _handle: tokio::task::JoinHandle<()>,
}

impl Default for MockQueryClient {
    fn default() -> Self {
        Self::new()
    }
}

impl MockQueryClient {
    /// Creates a new mock client with no expectations.
    pub fn new() -> Self {
        let (sender, mut receiver) = mpsc::channel::<QueryRequest>(100);
        let expectations: Expectations = Arc::new(Mutex::new(VecDeque::new()));
        let failures = Arc::new(Mutex::new(Vec::new()));
        let expectations_clone = expectations.clone();
        let failures_clone = failures.clone();

        // Spawn background task to handle requests
        let handle = tokio::spawn(async move {
            while let Some(request) = receiver.recv().await {
                let expectation = expectations_clone.lock().unwrap().pop_front();

                match (request, expectation) {
                    (
                        QueryRequest::ResourceFields {
                            kind,
                            id,
                            respond_to,
                            ..
                        },
                        Some(Expectation::ResourceFields {
                            kind: want_kind,
                            id: want_id,
                            response,
                        }),
                    ) if kind == want_kind && id == want_id => {
                        let _ = respond_to.send(response);
                    }
                    (
                        QueryRequest::VariantOwner {
                            variant_id,
                            respond_to,
                        },
                        Some(Expectation::VariantOwner {
                            variant_id: want,
                            response,
                        }),
                    ) if variant_id == want => {
                        let _ = respond_to.send(response);
                    }
                    (
                        QueryRequest::ProductVariants {
                            product_id,
                            respond_to,
                            ..
                        },
                        Some(Expectation::ProductVariants {
                            product_id: want,
                            response,
                        }),
                    ) if product_id == want => {
                        let _ = respond_to.send(response);
                    }
                    (
                        QueryRequest::VariantFields {
                            variant_id,
                            respond_to,
                            ..
                        },
                        Some(Expectation::VariantFields {
                            variant_id: want,
                            response,
                        }),
                    ) if variant_id == want => {
                        let _ = respond_to.send(response);
                    }
                    (
                        QueryRequest::MetaObjects {
                            kind, respond_to, ..
                        },
                        Some(Expectation::MetaObjects {
                            kind: want,
                            response,
                        }),
                    ) if kind == want => {
                        let _ = respond_to.send(response);
                    }
                    (request, expectation) => {
                        let expected = expectation
                            .map(|e| e.describe())
                            .unwrap_or_else(|| "nothing".to_string());
                        failures_clone.lock().unwrap().push(format!(
                            "unexpected {} (expected {expected})",
                            describe_request(&request)
                        ));
                    }
                }
            }
        });

        Self {
            client: QueryClient::new(sender),
            expectations,
            failures,
            _handle: handle,
        }
    }

    /// Returns the client for use in tests.
    pub fn client(&self) -> QueryClient {
        self.client.clone()
    }

    /// Expects a fields query for one resource.
    pub fn expect_resource_fields(
        &mut self,
        kind: ResourceKind,
        id: impl Into<String>,
    ) -> ExpectationBuilder<FieldCollection> {
        let id = id.into();
        self.builder(move |response| Expectation::ResourceFields { kind, id, response })
    }

    /// Expects a variant owner lookup.
    pub fn expect_variant_owner(&mut self, variant_id: impl Into<String>) -> ExpectationBuilder<Option<String>> {
        let variant_id = variant_id.into();
        self.builder(move |response| Expectation::VariantOwner {
            variant_id,
            response,
        })
    }

    /// Expects a product variants listing.
    pub fn expect_product_variants(&mut self, product_id: impl Into<String>) -> ExpectationBuilder<Vec<String>> {
        let product_id = product_id.into();
        self.builder(move |response| Expectation::ProductVariants {
            product_id,
            response,
        })
    }

    /// Expects a variant fields-by-identifier query.
    pub fn expect_variant_fields(&mut self, variant_id: impl Into<String>) -> ExpectationBuilder<FieldCollection> {
        let variant_id = variant_id.into();
        self.builder(move |response| Expectation::VariantFields {
            variant_id,
            response,
        })
    }

    /// Expects a MetaObjects listing.
    pub fn expect_metaobjects(&mut self, kind: impl Into<String>) -> ExpectationBuilder<Vec<MetaObject>> {
        let kind = kind.into();
        self.builder(move |response| Expectation::MetaObjects { kind, response })
    }

    fn builder<T>(
        &self,
        build: impl FnOnce(Result<T, FrameworkError>) -> Expectation + Send + 'static,
    ) -> ExpectationBuilder<T> {
        ExpectationBuilder {
            expectations: self.expectations.clone(),
            build: Box::new(build),
        }
    }

    /// Verifies that every expectation was met and no unexpected request arrived.
    pub fn verify(&self) {
        let failures = self.failures.lock().unwrap();
        if !failures.is_empty() {
            panic!("Mock received unexpected requests: {}", failures.join("; "));
        }
        let exps = self.expectations.lock().unwrap();
        if !exps.is_empty() {
            panic!("Not all expectations were met. {} remaining", exps.len());
        }
    }
}

/// Builder completing an expectation with its response.
pub struct ExpectationBuilder<T> {
    expectations: Expectations,
    build: Box<dyn FnOnce(Result<T, FrameworkError>) -> Expectation + Send>,
}

impl<T> ExpectationBuilder<T> {
    /// Sets the expectation to return a successful result.
    pub fn return_ok(self, value: T) {
        self.push(Ok(value));
    }

    /// Sets the expectation to return an error.
    pub fn return_err(self, error: FrameworkError) {
        self.push(Err(error));
    }

    fn push(self, response: Result<T, FrameworkError>) {
        let expectation = (self.build)(response);
        self.expectations.lock().unwrap().push_back(expectation);
    }
}

// =============================================================================
// LOW-LEVEL HELPERS
// =============================================================================

/// Creates a client and the receiver its requests arrive on.
///
/// # Testing Strategy
/// Instead of queueing canned responses, the test pulls each request off `receiver`, inspects
/// it, and answers through the embedded responder. Useful to assert request payloads.
pub fn create_mock_client(buffer_size: usize) -> (QueryClient, mpsc::Receiver<QueryRequest>) {
    let (sender, receiver) = mpsc::channel(buffer_size);
    (QueryClient::new(sender), receiver)
}

/// Helper to verify that the next message is a ResourceFields request
pub async fn expect_resource_fields(
    receiver: &mut mpsc::Receiver<QueryRequest>,
) -> Option<(ResourceKind, String, u32, Response<FieldCollection>)> {
    match receiver.recv().await {
        Some(QueryRequest::ResourceFields {
            kind,
            id,
            first,
            respond_to,
        }) => Some((kind, id, first, respond_to)),
        _ => None,
    }
}

/// Helper to verify that the next message is a VariantFields request
pub async fn expect_variant_fields(
    receiver: &mut mpsc::Receiver<QueryRequest>,
) -> Option<(String, Vec<FieldIdentifier>, Response<FieldCollection>)> {
    match receiver.recv().await {
        Some(QueryRequest::VariantFields {
            variant_id,
            identifiers,
            respond_to,
        }) => Some((variant_id, identifiers, respond_to)),
        _ => None,
    }
}

/// Helper to verify that the next message is a MetaObjects request
pub async fn expect_metaobjects(
    receiver: &mut mpsc::Receiver<QueryRequest>,
) -> Option<(String, u32, Response<Vec<MetaObject>>)> {
    match receiver.recv().await {
        Some(QueryRequest::MetaObjects {
            kind,
            first,
            respond_to,
        }) => Some((kind, first, respond_to)),
        _ => None,
    }
}
