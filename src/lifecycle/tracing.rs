//! # Observability & Tracing
//!
//! The [`setup_tracing`] function initializes structured logging with the `tracing` crate.
//!
//! ## Configuration
//!
//! Compact format, no module prefix (`with_target(false)`), level filtered by `RUST_LOG`.
//!
//! ## What Gets Traced
//!
//! - **Actor Lifecycle**: Query actor start and shutdown, with the number of requests served
//! - **Client Requests**: One span per typed client call (`product_id`, `variant_id`, ...)
//! - **Resolution**: Which tier answered (standard attribute, local, memo, remote)
//! - **Degradation**: Transport failures and fail-open decisions at `warn`
//!
//! ## Usage Examples
//!
//! ```bash
//! # Decisions and lifecycle only
//! RUST_LOG=info cargo run
//!
//! # Every query and resolution step
//! RUST_LOG=debug cargo run
//!
//! # Filter to the resolver
//! RUST_LOG=checkout_visibility::resolver=debug cargo run
//! ```
//!
//! ## Workflow Trace Example
//!
//! **With `RUST_LOG=info`**:
//!
//! ```text
//! INFO mount: Access gate evaluated blocked=false
//! INFO Query actor started backend="InMemoryStorefront"
//! INFO mount:decide: Decided value=Some("gold") matched=true show=true
//! INFO mount:load_type: Loaded count=1
//! ```
//!
//! **With `RUST_LOG=debug`** the resolver shows where each value came from:
//!
//! ```text
//! DEBUG mount:decide:resolve_in: Local field kind=product id=Some("p1")
//! DEBUG mount:decide:resolve_in:fields: Sending request kind=customer
//! DEBUG ResourceFields kind=customer id="c1"
//! ```
pub fn setup_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_target(false) // Module paths add noise; spans carry the context
        .compact() // Compact format shows spans inline (e.g., "mount:decide")
        .init();
}
