//! Screenspec Runtime
//!
//! This crate provides the specification interpreter for screenspec. It
//! resolves the active screen, runs event-triggered rule chains, validates
//! fields, interpolates text templates and drives navigation between screens.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                          Session                            │
//! │  - owns RuntimeState (active screen, values, errors)        │
//! │  - on_field_change / on_action_triggered / handle(request)  │
//! │  - snapshot() → render-ready view                           │
//! └─────────────────────────────────────────────────────────────┘
//!                               │
//!                               ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │                         RuleEngine                          │
//! │  - handle_event(state, event) → EventOutcome                │
//! │  - guards, validate_fields, start_operation                 │
//! └─────────────────────────────────────────────────────────────┘
//!                               │
//!                               ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │   validate_field · evaluate_condition · navigate            │
//! │   pure functions over the locked Specification              │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! Everything runs to completion on the caller's thread. Operations started
//! by rules are handed to an [`OperationDispatcher`] and never awaited.

mod asset;
mod condition;
mod dispatch;
mod engine;
mod error;
mod navigation;
mod session;
mod state;
mod template;
mod validate;
mod view;

pub use asset::AssetRegistry;
pub use condition::{evaluate_all, evaluate_condition};
pub use dispatch::{ChannelDispatcher, NoopDispatcher, OperationDispatcher, OperationRequest};
pub use engine::{EventOutcome, RuleEngine};
pub use error::RuntimeError;
pub use navigation::{navigate, resolve_transition};
pub use session::{Request, Session, SessionConfig};
pub use state::{Errors, RuntimeState, Values};
pub use template::interpolate;
pub use validate::validate_field;
pub use view::{ComponentView, Snapshot};
