//! Operation dispatch.
//!
//! `start_operation` steps hand their operation to an
//! [`OperationDispatcher`] and move on. The interpreter never waits for the
//! result; only the step's `success_event` is wired to navigation.

use serde::{Deserialize, Serialize};
use tokio::sync::mpsc;

/// An operation requested by a rule.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OperationRequest {
  /// Screen that was active when the rule ran.
  pub screen_id: String,
  /// Rule that requested the operation.
  pub rule_id: String,
  pub operation: String,
  pub params: serde_json::Map<String, serde_json::Value>,
  pub success_event: Option<String>,
  pub error_event: Option<String>,
}

/// Trait for receiving operation requests.
///
/// Implementations must not block: `dispatch` is called from inside a rule
/// chain.
pub trait OperationDispatcher: Send + Sync {
  fn dispatch(&self, request: OperationRequest);
}

/// A dispatcher that discards every request.
#[derive(Debug, Clone, Default)]
pub struct NoopDispatcher;

impl OperationDispatcher for NoopDispatcher {
  fn dispatch(&self, _request: OperationRequest) {}
}

/// A dispatcher that forwards requests to an unbounded channel, for hosts
/// that execute operations on their own task.
#[derive(Debug, Clone)]
pub struct ChannelDispatcher {
  sender: mpsc::UnboundedSender<OperationRequest>,
}

impl ChannelDispatcher {
  pub fn new(sender: mpsc::UnboundedSender<OperationRequest>) -> Self {
    Self { sender }
  }
}

impl OperationDispatcher for ChannelDispatcher {
  fn dispatch(&self, request: OperationRequest) {
    // Receiver may have been dropped
    let _ = self.sender.send(request);
  }
}
