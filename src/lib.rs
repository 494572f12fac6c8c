//! # Checkout Visibility
//!
//! > **Conditional content for storefront checkouts.**
//!
//! This crate decides whether a merchant-configured content block is shown at checkout. A rule
//! names a resource type (product, variant, customer, order), a field and an expected value; the
//! engine resolves that field across the checkout's resources, falling back to the storefront API
//! when the checkout doesn't already hold it, and shows or hides the content accordingly.
//!
//! ## 🏗️ Design Philosophy
//!
//! ### Fail Open
//! Hiding merchant content by accident is worse than showing it by accident. Every failure path
//! (transport errors, malformed resources, a panicked decision task) ends in "show".
//!
//! ### Explicit Context
//! Settings, the checkout snapshot and the query client are passed into each component. Nothing
//! reads from ambient global state.
//!
//! ## 👩‍💻 Architecture Notes
//!
//! ### 1. Type-Safe Error Handling
//! Each layer defines its own error type (`FetchError`, `ResolveError`, `ContentError`, ...) and
//! documents where it degrades into a default value.
//!
//! ### 2. Async Context Injection
//! The storefront backend is injected into the [`QueryActor`](framework::QueryActor) when it is
//! run, not when it is created, so clients can be handed out first.
//!
//! ### 3. Concurrency Model
//! Remote queries are independent tasks with no ordering between them, except where the resolver
//! sequences them (variant owner before variant fields). Results are applied to a `watch` channel,
//! last write wins, and nothing is cancelled.
//!
//! ### 4. Observability
//! `tracing` everywhere, with structured fields. See [`lifecycle::tracing`].
//!
//! ## 🗺️ Module Tour
//!
//! ### 1. The Plumbing ([`framework`], [`clients`], [`storefront`])
//! - **Role**: Typed queries against a [`QueryBackend`](framework::QueryBackend).
//! - **Key items**: [`QueryClient`](framework::QueryClient), [`ResourceClients`](clients::ResourceClients),
//!   [`InMemoryStorefront`](storefront::InMemoryStorefront).
//!
//! ### 2. The Rule Engine ([`resolver`], [`matcher`], [`engine`])
//! - **Role**: Resolve a field, compare it, decide.
//! - **Key items**: [`FieldResolver`](resolver::FieldResolver), [`matches`](matcher::matches),
//!   [`VisibilityEngine`](engine::VisibilityEngine).
//!
//! ### 3. The Rest of the Extension ([`gate`], [`content`], [`settings`])
//! - **Role**: Login/location gate, MetaObject loading, configuration parsing.
//!
//! ### 4. The Orchestrator ([`lifecycle`])
//! - **Role**: Spins up the query actor and mounts the extension for a checkout.
//! - **Key items**: [`ExtensionSystem`](lifecycle::ExtensionSystem), [`ViewState`](lifecycle::ViewState).
//!
//! ## 🚀 Quick Start
//!
//! ```bash
//! # Run the demo with info logs
//! RUST_LOG=info cargo run
//!
//! # Run the tests
//! cargo test
//! ```

pub mod clients;
pub mod content;
pub mod engine;
pub mod framework;
pub mod gate;
pub mod lifecycle;
pub mod matcher;
pub mod model;
pub mod resolver;
pub mod settings;
pub mod storefront;
