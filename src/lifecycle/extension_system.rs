use std::sync::Arc;

use thiserror::Error;
use tokio::sync::watch;
use tokio::task::{JoinError, JoinHandle};
use tracing::{error, info, instrument, Instrument};

use crate::clients::{MetaObjectClient, ResourceClients};
use crate::content::ContentLoader;
use crate::engine::VisibilityEngine;
use crate::framework::{QueryActor, QueryBackend, QueryClient};
use crate::model::{CheckoutSnapshot, MetaObject};
use crate::resolver::FieldResolver;
use crate::settings::ExtensionSettings;

/// Errors raised while driving the extension's background tasks.
#[derive(Debug, Error)]
pub enum LifecycleError {
    #[error("Task failed: {0}")]
    TaskFailed(#[from] JoinError),
}

/// Progress of the MetaObject content load.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContentState {
    Loading,
    Loaded(Vec<MetaObject>),
    /// Merchant-facing error text.
    Failed(String),
}

/// Everything the rendering surface needs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewState {
    /// Gate for the content subtree. Starts out `true` until the rule is decided.
    pub show_content: bool,
    /// Warning banner text, `None` when checkout may proceed.
    pub validation_message: Option<String>,
    pub content: ContentState,
}

/// The runtime orchestrator for the checkout extension.
///
/// `ExtensionSystem` is responsible for:
/// - **Lifecycle Management**: Starting and stopping the query actor
/// - **Dependency Wiring**: Handing each component the clients it needs
/// - **Mounting**: Running the visibility decision and content load for a checkout
///
/// # Example
///
/// ```ignore
/// let system = ExtensionSystem::new(InMemoryStorefront::new());
/// let mounted = system.mount(&settings, &snapshot);
/// let view = mounted.settle().await?;
/// system.shutdown().await?;
/// ```
pub struct ExtensionSystem {
    query_client: QueryClient,
    handle: JoinHandle<()>,
}

impl ExtensionSystem {
    /// Spawns the query actor over `backend`.
    pub fn new<B: QueryBackend>(backend: B) -> Self {
        let (actor, query_client) = QueryActor::new(32);
        let handle = tokio::spawn(actor.run(backend));
        Self { query_client, handle }
    }

    pub fn query_client(&self) -> QueryClient {
        self.query_client.clone()
    }

    /// Mounts the extension for one checkout.
    ///
    /// The access gate is evaluated here, once, against `snapshot`; it is not re-evaluated if
    /// identity data changes later. The visibility decision and the content load run as
    /// independent tasks and write into the view as they finish, last write winning. Nothing is
    /// cancelled.
    #[instrument(skip_all, fields(resource_type = %settings.conditional_resource_type))]
    pub fn mount(&self, settings: &ExtensionSettings, snapshot: &CheckoutSnapshot) -> MountedExtension {
        let validation_message = settings.access_gate().check(snapshot.identity().as_ref());
        info!(blocked = validation_message.is_some(), "Access gate evaluated");

        let (sender, view) = watch::channel(ViewState {
            show_content: true,
            validation_message,
            content: ContentState::Loading,
        });
        let sender = Arc::new(sender);

        let rule = settings.match_rule();
        let resources = snapshot.resources_for(rule.resource_kind());
        let engine = VisibilityEngine::new(FieldResolver::new(ResourceClients::new(self.query_client())));
        let decision = tokio::spawn(
            async move { engine.decide(&rule, &resources).await }.in_current_span(),
        );
        let decision_sender = Arc::clone(&sender);
        let apply_decision = tokio::spawn(async move {
            let show = show_or_fail_open(decision.await);
            decision_sender.send_modify(|state| state.show_content = show);
        });

        let loader = ContentLoader::new(MetaObjectClient::new(self.query_client()));
        let settings = settings.clone();
        let load_content = tokio::spawn(
            async move {
                let content = match loader.load(&settings).await {
                    Ok(objects) => ContentState::Loaded(objects),
                    Err(e) => ContentState::Failed(e.to_string()),
                };
                sender.send_modify(|state| state.content = content);
            }
            .in_current_span(),
        );

        MountedExtension {
            view,
            tasks: vec![apply_decision, load_content],
        }
    }

    /// Gracefully shuts down the query actor.
    ///
    /// Dropping the system's client closes the request channel once every mounted task has
    /// released its clones; the actor then drains and exits.
    pub async fn shutdown(self) -> Result<(), LifecycleError> {
        info!("Shutting down extension...");
        drop(self.query_client);

        if let Err(e) = self.handle.await {
            error!("Query actor failed: {:?}", e);
            return Err(e.into());
        }

        info!("Extension shutdown complete.");
        Ok(())
    }
}

/// A panicked decision task counts as an evaluation failure and shows the content.
fn show_or_fail_open(result: Result<bool, JoinError>) -> bool {
    result.unwrap_or_else(|e| {
        error!(error = %e, "Visibility decision task failed, showing content");
        true
    })
}

/// Handle to one mounted extension.
pub struct MountedExtension {
    view: watch::Receiver<ViewState>,
    tasks: Vec<JoinHandle<()>>,
}

impl MountedExtension {
    /// The view as of now.
    pub fn current(&self) -> ViewState {
        self.view.borrow().clone()
    }

    /// A receiver notified on every view change.
    pub fn subscribe(&self) -> watch::Receiver<ViewState> {
        self.view.clone()
    }

    /// Waits for the decision and the content load, then returns the final view.
    pub async fn settle(self) -> Result<ViewState, LifecycleError> {
        for task in self.tasks {
            task.await?;
        }
        Ok(self.view.borrow().clone())
    }
}
