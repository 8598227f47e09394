//! Tool invocation records and their lifecycle states.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;
use uigen_core::InvocationId;
use uigen_tools::{ErrorPayload, ToolCallRequest, ToolOutput};

/// Lifecycle state of an invocation.
///
/// ```text
/// Received ──► Executing ──► Succeeded
///     │            │
///     └────────────┴──────► Failed
/// ```
///
/// # Examples
///
/// ```
/// use uigen_runtime::InvocationState;
///
/// assert!(InvocationState::Received.can_transition_to(InvocationState::Executing));
/// assert!(InvocationState::Received.can_transition_to(InvocationState::Failed));
/// assert!(!InvocationState::Received.can_transition_to(InvocationState::Succeeded));
/// assert!(!InvocationState::Succeeded.can_transition_to(InvocationState::Failed));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InvocationState {
    /// Arguments may still be streaming in
    Received,
    /// Arguments are final and the command is running
    Executing,
    /// Completed with a result
    Succeeded,
    /// Completed with an error
    Failed,
}

impl InvocationState {
    /// Returns the state name as it appears on the wire.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Received => "received",
            Self::Executing => "executing",
            Self::Succeeded => "succeeded",
            Self::Failed => "failed",
        }
    }

    /// Returns `true` for `Succeeded` and `Failed`.
    #[must_use]
    pub const fn is_terminal(&self) -> bool {
        matches!(self, Self::Succeeded | Self::Failed)
    }

    /// Returns `true` if moving from `self` to `next` is allowed.
    #[must_use]
    pub const fn can_transition_to(&self, next: Self) -> bool {
        matches!(
            (self, next),
            (Self::Received, Self::Executing | Self::Failed)
                | (Self::Executing, Self::Succeeded | Self::Failed)
        )
    }
}

impl fmt::Display for InvocationState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One tool call and its lifecycle.
///
/// Records are created and mutated only by the
/// [`InvocationTracker`](crate::InvocationTracker); callers see clones.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ToolInvocation {
    pub(crate) id: InvocationId,
    pub(crate) request: ToolCallRequest,
    pub(crate) label: String,
    pub(crate) state: InvocationState,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub(crate) result: Option<ToolOutput>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub(crate) error: Option<ErrorPayload>,
    pub(crate) created_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub(crate) completed_at: Option<DateTime<Utc>>,
}

impl ToolInvocation {
    pub(crate) fn new(request: ToolCallRequest) -> Self {
        Self {
            id: InvocationId::new(),
            label: request.label(),
            request,
            state: InvocationState::Received,
            result: None,
            error: None,
            created_at: Utc::now(),
            completed_at: None,
        }
    }

    /// Unique id of the invocation.
    #[must_use]
    pub const fn id(&self) -> InvocationId {
        self.id
    }

    /// Request as currently known, including streamed arguments.
    #[must_use]
    pub const fn request(&self) -> &ToolCallRequest {
        &self.request
    }

    /// Tool name as sent by the agent.
    #[must_use]
    pub fn tool_name(&self) -> &str {
        &self.request.tool_name
    }

    /// Effective command name, if any.
    #[must_use]
    pub fn command(&self) -> Option<&str> {
        self.request.command_name()
    }

    /// Argument bag.
    #[must_use]
    pub const fn args(&self) -> &Map<String, Value> {
        &self.request.args
    }

    /// Human-readable description, e.g. "Editing App.jsx".
    #[must_use]
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Current state.
    #[must_use]
    pub const fn state(&self) -> InvocationState {
        self.state
    }

    /// Result, present once `Succeeded`.
    #[must_use]
    pub const fn result(&self) -> Option<&ToolOutput> {
        self.result.as_ref()
    }

    /// Error, present once `Failed`.
    #[must_use]
    pub const fn error(&self) -> Option<&ErrorPayload> {
        self.error.as_ref()
    }

    /// When the invocation was received.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// When the invocation reached a terminal state.
    #[must_use]
    pub const fn completed_at(&self) -> Option<DateTime<Utc>> {
        self.completed_at
    }

    /// Returns `true` once the invocation has succeeded or failed.
    #[must_use]
    pub const fn is_terminal(&self) -> bool {
        self.state.is_terminal()
    }

    /// Wire-format result for the agent transport.
    #[must_use]
    pub fn to_result(&self) -> ToolCallResult {
        ToolCallResult {
            invocation_id: self.id,
            state: self.state,
            result_payload: self.result.clone(),
            error: self.error.clone(),
        }
    }
}

/// Result of a tool call as returned to the agent transport.
///
/// # Examples
///
/// ```
/// use uigen_runtime::{InvocationState, ToolCallResult};
/// use uigen_core::InvocationId;
///
/// let result = ToolCallResult {
///     invocation_id: InvocationId::new(),
///     state: InvocationState::Executing,
///     result_payload: None,
///     error: None,
/// };
///
/// let json = serde_json::to_value(&result).unwrap();
/// assert_eq!(json["state"], "executing");
/// assert!(json.get("resultPayload").is_none());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ToolCallResult {
    /// Invocation the result belongs to
    pub invocation_id: InvocationId,
    /// State at the time the result was taken
    pub state: InvocationState,
    /// Output on success
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub result_payload: Option<ToolOutput>,
    /// Error on failure
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<ErrorPayload>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_new_invocation_is_received() {
        let invocation =
            ToolInvocation::new(ToolCallRequest::editor("view", json!({"path": "/App.jsx"})));
        assert_eq!(invocation.state(), InvocationState::Received);
        assert_eq!(invocation.label(), "Viewing App.jsx");
        assert_eq!(invocation.command(), Some("view"));
        assert!(invocation.completed_at().is_none());
    }

    #[test]
    fn test_terminal_states_have_no_exits() {
        for terminal in [InvocationState::Succeeded, InvocationState::Failed] {
            for next in [
                InvocationState::Received,
                InvocationState::Executing,
                InvocationState::Succeeded,
                InvocationState::Failed,
            ] {
                assert!(!terminal.can_transition_to(next));
            }
        }
    }

    #[test]
    fn test_no_backwards_transitions() {
        assert!(!InvocationState::Executing.can_transition_to(InvocationState::Received));
        assert!(!InvocationState::Received.can_transition_to(InvocationState::Received));
    }

    #[test]
    fn test_result_wire_shape() {
        let invocation =
            ToolInvocation::new(ToolCallRequest::path_manager("delete", json!({"path": "/a"})));
        let json = serde_json::to_value(invocation.to_result()).unwrap();
        assert_eq!(json["state"], "received");
        assert_eq!(json["invocationId"], invocation.id().to_string());
        assert!(json.get("error").is_none());
    }
}
