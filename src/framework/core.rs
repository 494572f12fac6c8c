//! # Query Framework Core
//!
//! This module defines the generic plumbing between the extension and the remote storefront API.
//!
//! ## Key Types
//!
//! - [`QueryBackend`]: The trait a remote data source implements (the wire format lives behind it).
//! - [`QueryActor`]: The server loop that receives requests and dispatches them to the backend.
//! - [`QueryClient`]: The cloneable client that sends requests and awaits replies.
//! - [`FrameworkError`]: Common errors (channel closed, backend failure).

use std::fmt::Debug;
use std::sync::Arc;
use tokio::sync::{mpsc, oneshot};
use tracing::{debug, info, warn};

use async_trait::async_trait;

use crate::model::{FieldCollection, FieldIdentifier, MetaObject, ResourceKind};

/// Page size used for every list query.
pub const PAGE_SIZE: u32 = 250;

// =============================================================================
// 1. THE ABSTRACTION
// =============================================================================

/// A remote data source able to answer storefront queries.
///
/// # Architecture Note
/// The extension never talks to the network directly. Everything it needs from the storefront
/// is expressed as one of the operations below, so a real API client, an in-memory fixture
/// and a test double are interchangeable.
///
/// "Not found" is not an error: a missing resource answers with an empty collection (or `None`).
#[async_trait]
pub trait QueryBackend: Send + Sync + 'static {
    /// Transport or error-payload failure.
    type Error: std::error::Error + Send + Sync + 'static;

    /// Up to `first` custom fields of a resource.
    async fn resource_fields(
        &self,
        kind: ResourceKind,
        id: &str,
        first: u32,
    ) -> Result<FieldCollection, Self::Error>;

    /// Id of the product owning `variant_id`.
    async fn variant_owner(&self, variant_id: &str) -> Result<Option<String>, Self::Error>;

    /// Ids of up to `first` variants of a product.
    async fn product_variants(&self, product_id: &str, first: u32) -> Result<Vec<String>, Self::Error>;

    /// Fields of a variant selected by `(namespace, key)` identifiers.
    async fn variant_fields(
        &self,
        variant_id: &str,
        identifiers: &[FieldIdentifier],
    ) -> Result<FieldCollection, Self::Error>;

    /// Up to `first` MetaObjects of the given type.
    async fn metaobjects(&self, kind: &str, first: u32) -> Result<Vec<MetaObject>, Self::Error>;
}

// =============================================================================
// 2. THE MESSAGES & ERRORS
// =============================================================================

/// Errors that can occur within the query framework itself.
#[derive(Debug, thiserror::Error)]
pub enum FrameworkError {
    #[error("Query actor closed")]
    ActorClosed,
    #[error("Query actor dropped response channel")]
    ActorDropped,
    #[error("Backend error: {0}")]
    BackendError(Box<dyn std::error::Error + Send + Sync>),
}

/// Type alias for the one-shot response channel used by the actor.
pub type Response<T> = oneshot::Sender<Result<T, FrameworkError>>;

/// Message sent to the [`QueryActor`], one variant per [`QueryBackend`] operation.
#[derive(Debug)]
pub enum QueryRequest {
    ResourceFields {
        kind: ResourceKind,
        id: String,
        first: u32,
        respond_to: Response<FieldCollection>,
    },
    VariantOwner {
        variant_id: String,
        respond_to: Response<Option<String>>,
    },
    ProductVariants {
        product_id: String,
        first: u32,
        respond_to: Response<Vec<String>>,
    },
    VariantFields {
        variant_id: String,
        identifiers: Vec<FieldIdentifier>,
        respond_to: Response<FieldCollection>,
    },
    MetaObjects {
        kind: String,
        first: u32,
        respond_to: Response<Vec<MetaObject>>,
    },
}

// =============================================================================
// 3. THE ACTOR SERVER
// =============================================================================

/// The server half: owns the receiver and dispatches every request to the backend.
///
/// **Concurrency Model**:
/// Each request is served in its own task, so in-flight fetches are independent and complete in
/// no particular order. A slow fetch only delays the caller waiting on it. Nothing is cancelled:
/// a reply whose caller has gone away is dropped.
pub struct QueryActor {
    receiver: mpsc::Receiver<QueryRequest>,
}

impl QueryActor {
    /// Creates the actor and its client. `buffer_size` bounds the request channel.
    pub fn new(buffer_size: usize) -> (Self, QueryClient) {
        let (sender, receiver) = mpsc::channel(buffer_size);
        (Self { receiver }, QueryClient::new(sender))
    }

    /// Runs the dispatch loop until every client is dropped.
    ///
    /// # Context Injection
    /// The backend is injected here rather than in [`QueryActor::new`], so clients can be handed
    /// out before the data source is wired.
    pub async fn run<B: QueryBackend>(mut self, backend: B) {
        // Extract just the type name (e.g., "InMemoryStorefront")
        let backend_name = std::any::type_name::<B>()
            .split("::")
            .last()
            .unwrap_or("Unknown");
        info!(backend = backend_name, "Query actor started");

        let backend = Arc::new(backend);
        let mut served = 0usize;
        while let Some(request) = self.receiver.recv().await {
            served += 1;
            let backend = Arc::clone(&backend);
            tokio::spawn(async move { serve(backend.as_ref(), request).await });
        }

        info!(backend = backend_name, served, "Shutdown");
    }
}

fn backend_error<E: std::error::Error + Send + Sync + 'static>(e: E) -> FrameworkError {
    FrameworkError::BackendError(Box::new(e))
}

fn log_outcome<T>(operation: &'static str, result: &Result<T, FrameworkError>) {
    match result {
        Ok(_) => debug!(operation, "Query ok"),
        Err(e) => warn!(operation, error = %e, "Query failed"),
    }
}

fn reply<T>(operation: &'static str, respond_to: Response<T>, result: Result<T, FrameworkError>) {
    log_outcome(operation, &result);
    let _ = respond_to.send(result);
}

async fn serve<B: QueryBackend>(backend: &B, request: QueryRequest) {
    match request {
        QueryRequest::ResourceFields {
            kind,
            id,
            first,
            respond_to,
        } => {
            debug!(%kind, %id, "ResourceFields");
            let result = backend
                .resource_fields(kind, &id, first)
                .await
                .map_err(backend_error);
            reply("ResourceFields", respond_to, result);
        }
        QueryRequest::VariantOwner {
            variant_id,
            respond_to,
        } => {
            debug!(%variant_id, "VariantOwner");
            let result = backend.variant_owner(&variant_id).await.map_err(backend_error);
            reply("VariantOwner", respond_to, result);
        }
        QueryRequest::ProductVariants {
            product_id,
            first,
            respond_to,
        } => {
            debug!(%product_id, "ProductVariants");
            let result = backend
                .product_variants(&product_id, first)
                .await
                .map_err(backend_error);
            reply("ProductVariants", respond_to, result);
        }
        QueryRequest::VariantFields {
            variant_id,
            identifiers,
            respond_to,
        } => {
            debug!(%variant_id, ?identifiers, "VariantFields");
            let result = backend
                .variant_fields(&variant_id, &identifiers)
                .await
                .map_err(backend_error);
            reply("VariantFields", respond_to, result);
        }
        QueryRequest::MetaObjects {
            kind,
            first,
            respond_to,
        } => {
            debug!(%kind, first, "MetaObjects");
            let result = backend.metaobjects(&kind, first).await.map_err(backend_error);
            reply("MetaObjects", respond_to, result);
        }
    }
}

// =============================================================================
// 4. THE CLIENT
// =============================================================================

/// A cheap-to-clone client for the [`QueryActor`].
#[derive(Clone, Debug)]
pub struct QueryClient {
    sender: mpsc::Sender<QueryRequest>,
}

impl QueryClient {
    pub fn new(sender: mpsc::Sender<QueryRequest>) -> Self {
        Self { sender }
    }

    async fn request<T>(
        &self,
        build: impl FnOnce(Response<T>) -> QueryRequest,
    ) -> Result<T, FrameworkError> {
        let (respond_to, response) = oneshot::channel();
        self.sender
            .send(build(respond_to))
            .await
            .map_err(|_| FrameworkError::ActorClosed)?;
        response.await.map_err(|_| FrameworkError::ActorDropped)?
    }

    pub async fn resource_fields(
        &self,
        kind: ResourceKind,
        id: String,
        first: u32,
    ) -> Result<FieldCollection, FrameworkError> {
        self.request(|respond_to| QueryRequest::ResourceFields {
            kind,
            id,
            first,
            respond_to,
        })
        .await
    }

    pub async fn variant_owner(&self, variant_id: String) -> Result<Option<String>, FrameworkError> {
        self.request(|respond_to| QueryRequest::VariantOwner {
            variant_id,
            respond_to,
        })
        .await
    }

    pub async fn product_variants(
        &self,
        product_id: String,
        first: u32,
    ) -> Result<Vec<String>, FrameworkError> {
        self.request(|respond_to| QueryRequest::ProductVariants {
            product_id,
            first,
            respond_to,
        })
        .await
    }

    pub async fn variant_fields(
        &self,
        variant_id: String,
        identifiers: Vec<FieldIdentifier>,
    ) -> Result<FieldCollection, FrameworkError> {
        self.request(|respond_to| QueryRequest::VariantFields {
            variant_id,
            identifiers,
            respond_to,
        })
        .await
    }

    pub async fn metaobjects(&self, kind: String, first: u32) -> Result<Vec<MetaObject>, FrameworkError> {
        self.request(|respond_to| QueryRequest::MetaObjects {
            kind,
            first,
            respond_to,
        })
        .await
    }
}

// =============================================================================
// 5. EXAMPLE USAGE (Test)
// =============================================================================
