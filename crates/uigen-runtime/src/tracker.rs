//! Invocation lifecycle tracking.
//!
//! The tracker owns every [`ToolInvocation`] record, enforces the state
//! machine, and notifies observers of each transition. Records are kept for
//! the tracker's lifetime and form the audit trail returned by
//! [`InvocationTracker::history`].
//!
//! # Examples
//!
//! ```
//! use serde_json::json;
//! use uigen_files::{FilePath, FileTree};
//! use uigen_runtime::{InvocationState, InvocationTracker};
//! use uigen_tools::{ToolCallRequest, ToolInterpreter};
//!
//! let mut tracker = InvocationTracker::new();
//! let mut tree = FileTree::new();
//! let interpreter = ToolInterpreter::default();
//!
//! let id = tracker.receive(ToolCallRequest::editor("create", json!({"path": "/App.jsx"})));
//! tracker
//!     .update_args(id, json!({"content": "export default 1"}).as_object().unwrap().clone())
//!     .unwrap();
//!
//! let request = tracker.start(id).unwrap().request().clone();
//! let output = interpreter.execute(&mut tree, &request).unwrap();
//! let done = tracker.succeed(id, output).unwrap();
//!
//! assert_eq!(done.state(), InvocationState::Succeeded);
//! assert_eq!(tree.read_file(&FilePath::new("/App.jsx").unwrap()).unwrap(), "export default 1");
//! ```

use crate::invocation::{InvocationState, ToolInvocation};
use crate::observer::{InvocationObserver, SubscriptionId, TransitionEvent};
use crate::stats::TrackerStats;
use chrono::Utc;
use indexmap::IndexMap;
use serde_json::{Map, Value};
use std::fmt;
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, info};
use uigen_core::InvocationId;
use uigen_tools::{ToolError, ToolOutput};

/// Errors from tracker operations.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TrackerError {
    /// No invocation with this id
    #[error("Unknown invocation: {id}")]
    UnknownInvocation {
        /// Requested id
        id: InvocationId,
    },

    /// The state machine does not allow this transition
    #[error("Invocation {id} cannot move from {from} to {to}")]
    IllegalTransition {
        /// Invocation id
        id: InvocationId,
        /// Current state
        from: InvocationState,
        /// Requested state
        to: InvocationState,
    },

    /// Arguments can only change while the invocation is `Received`
    #[error("Arguments of invocation {id} are final (state: {state})")]
    ArgsFinalized {
        /// Invocation id
        id: InvocationId,
        /// Current state
        state: InvocationState,
    },
}

impl TrackerError {
    /// Returns `true` if the invocation id is unknown.
    #[must_use]
    pub const fn is_unknown_invocation(&self) -> bool {
        matches!(self, Self::UnknownInvocation { .. })
    }

    /// Returns `true` if a transition was rejected.
    #[must_use]
    pub const fn is_illegal_transition(&self) -> bool {
        matches!(self, Self::IllegalTransition { .. })
    }

    /// Returns `true` if an argument update came too late.
    #[must_use]
    pub const fn is_args_finalized(&self) -> bool {
        matches!(self, Self::ArgsFinalized { .. })
    }
}

/// Type alias for tracker results.
pub type Result<T> = std::result::Result<T, TrackerError>;

/// Registry of invocations and their observers.
#[derive(Default)]
pub struct InvocationTracker {
    invocations: IndexMap<InvocationId, ToolInvocation>,
    observers: Vec<(SubscriptionId, Arc<dyn InvocationObserver>)>,
    next_subscription: u64,
}

impl InvocationTracker {
    /// Creates an empty tracker.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a new invocation in the `Received` state.
    pub fn receive(&mut self, request: uigen_tools::ToolCallRequest) -> InvocationId {
        let invocation = ToolInvocation::new(request);
        let id = invocation.id;
        debug!(invocation = %id, label = %invocation.label, "invocation received");

        self.notify(&invocation, None);
        self.invocations.insert(id, invocation);
        id
    }

    /// Merges streamed arguments into a `Received` invocation.
    ///
    /// The label is recomputed from the merged arguments.
    ///
    /// # Errors
    ///
    /// - `UnknownInvocation` if `id` is not tracked
    /// - `ArgsFinalized` once the invocation has left `Received`
    pub fn update_args(&mut self, id: InvocationId, args: Map<String, Value>) -> Result<()> {
        let invocation = self
            .invocations
            .get_mut(&id)
            .ok_or(TrackerError::UnknownInvocation { id })?;
        if invocation.state != InvocationState::Received {
            return Err(TrackerError::ArgsFinalized {
                id,
                state: invocation.state,
            });
        }
        invocation.request.merge_args(args);
        invocation.label = invocation.request.label();
        Ok(())
    }

    /// Moves a `Received` invocation to `Executing`.
    ///
    /// # Errors
    ///
    /// `UnknownInvocation` or `IllegalTransition`.
    pub fn start(&mut self, id: InvocationId) -> Result<&ToolInvocation> {
        self.transition(id, InvocationState::Executing, |_| {})
    }

    /// Moves an `Executing` invocation to `Succeeded`.
    ///
    /// # Errors
    ///
    /// `UnknownInvocation` or `IllegalTransition`.
    pub fn succeed(&mut self, id: InvocationId, output: ToolOutput) -> Result<&ToolInvocation> {
        self.transition(id, InvocationState::Succeeded, |invocation| {
            invocation.result = Some(output);
        })
    }

    /// Moves a non-terminal invocation to `Failed`.
    ///
    /// # Errors
    ///
    /// `UnknownInvocation` or `IllegalTransition`.
    pub fn fail(&mut self, id: InvocationId, error: &ToolError) -> Result<&ToolInvocation> {
        let payload = error.to_payload();
        self.transition(id, InvocationState::Failed, |invocation| {
            invocation.error = Some(payload);
        })
    }

    /// Fails a non-terminal invocation with `Cancelled`.
    ///
    /// # Errors
    ///
    /// `UnknownInvocation`, or `IllegalTransition` if already terminal.
    pub fn cancel(&mut self, id: InvocationId) -> Result<&ToolInvocation> {
        self.fail(id, &ToolError::Cancelled)
    }

    /// Current record of an invocation.
    #[must_use]
    pub fn get(&self, id: InvocationId) -> Option<&ToolInvocation> {
        self.invocations.get(&id)
    }

    /// Every invocation in the order received.
    pub fn history(&self) -> impl Iterator<Item = &ToolInvocation> {
        self.invocations.values()
    }

    /// Number of tracked invocations.
    #[must_use]
    pub fn len(&self) -> usize {
        self.invocations.len()
    }

    /// Returns `true` if nothing has been received yet.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.invocations.is_empty()
    }

    /// Counts of invocations by state.
    #[must_use]
    pub fn stats(&self) -> TrackerStats {
        self.invocations
            .values()
            .fold(TrackerStats::default(), |mut stats, invocation| {
                stats.record(invocation.state);
                stats
            })
    }

    /// Attaches an observer; it sees every later transition.
    pub fn subscribe(&mut self, observer: Arc<dyn InvocationObserver>) -> SubscriptionId {
        let id = SubscriptionId::new(self.next_subscription);
        self.next_subscription += 1;
        self.observers.push((id, observer));
        id
    }

    /// Detaches an observer. Returns `false` if it was not attached.
    pub fn unsubscribe(&mut self, subscription: SubscriptionId) -> bool {
        let before = self.observers.len();
        self.observers.retain(|(id, _)| *id != subscription);
        self.observers.len() != before
    }

    /// Number of attached observers.
    #[must_use]
    pub fn observer_count(&self) -> usize {
        self.observers.len()
    }

    fn transition(
        &mut self,
        id: InvocationId,
        next: InvocationState,
        apply: impl FnOnce(&mut ToolInvocation),
    ) -> Result<&ToolInvocation> {
        let invocation = self
            .invocations
            .get_mut(&id)
            .ok_or(TrackerError::UnknownInvocation { id })?;
        let previous = invocation.state;
        if !previous.can_transition_to(next) {
            return Err(TrackerError::IllegalTransition {
                id,
                from: previous,
                to: next,
            });
        }

        invocation.state = next;
        if next.is_terminal() {
            invocation.completed_at = Some(Utc::now());
        }
        apply(invocation);

        if next.is_terminal() {
            info!(
                invocation = %id,
                label = %invocation.label,
                state = %next,
                "invocation finished"
            );
        } else {
            debug!(invocation = %id, state = %next, "invocation transitioned");
        }

        let snapshot = invocation.clone();
        self.notify(&snapshot, Some(previous));
        self.invocations
            .get(&id)
            .ok_or(TrackerError::UnknownInvocation { id })
    }

    fn notify(&self, invocation: &ToolInvocation, previous: Option<InvocationState>) {
        if self.observers.is_empty() {
            return;
        }
        let event = TransitionEvent {
            invocation: invocation.clone(),
            previous,
            at: Utc::now(),
        };
        for (_, observer) in &self.observers {
            observer.on_transition(&event);
        }
    }
}

impl fmt::Debug for InvocationTracker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("InvocationTracker")
            .field("invocations", &self.invocations.len())
            .field("observers", &self.observers.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::observer::{ChannelObserver, FnObserver};
    use serde_json::json;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use uigen_files::FilePath;
    use uigen_tools::{ErrorKind, ToolCallRequest};

    fn view_request() -> ToolCallRequest {
        ToolCallRequest::editor("view", json!({"path": "/App.jsx"}))
    }

    fn created() -> ToolOutput {
        ToolOutput::Created {
            path: FilePath::new("/App.jsx").unwrap(),
        }
    }

    #[test]
    fn test_full_lifecycle_emits_three_events() {
        let (observer, mut events) = ChannelObserver::new();
        let mut tracker = InvocationTracker::new();
        tracker.subscribe(Arc::new(observer));

        let id = tracker.receive(view_request());
        tracker.start(id).unwrap();
        tracker.succeed(id, created()).unwrap();

        let states: Vec<_> = std::iter::from_fn(|| events.try_recv().ok())
            .map(|event| (event.previous, event.state()))
            .collect();
        assert_eq!(
            states,
            vec![
                (None, InvocationState::Received),
                (Some(InvocationState::Received), InvocationState::Executing),
                (Some(InvocationState::Executing), InvocationState::Succeeded),
            ]
        );

        let record = tracker.get(id).unwrap();
        assert!(record.completed_at().is_some());
        assert_eq!(record.result(), Some(&created()));
    }

    #[test]
    fn test_terminal_state_is_immutable() {
        let mut tracker = InvocationTracker::new();
        let id = tracker.receive(view_request());
        tracker.start(id).unwrap();
        tracker.succeed(id, created()).unwrap();

        let err = tracker.fail(id, &ToolError::Cancelled).unwrap_err();
        assert!(err.is_illegal_transition());
        assert_eq!(tracker.get(id).unwrap().state(), InvocationState::Succeeded);
        assert!(tracker.get(id).unwrap().error().is_none());
    }

    #[test]
    fn test_cancel_while_executing_discards_late_completion() {
        let mut tracker = InvocationTracker::new();
        let id = tracker.receive(view_request());
        tracker.start(id).unwrap();

        let cancelled = tracker.cancel(id).unwrap();
        assert_eq!(cancelled.state(), InvocationState::Failed);

        let err = tracker.succeed(id, created()).unwrap_err();
        assert_eq!(
            err,
            TrackerError::IllegalTransition {
                id,
                from: InvocationState::Failed,
                to: InvocationState::Succeeded
            }
        );

        let record = tracker.get(id).unwrap();
        assert_eq!(record.state(), InvocationState::Failed);
        assert_eq!(record.error().unwrap().kind, ErrorKind::Cancelled);
        assert!(record.result().is_none());
        assert_eq!(tracker.stats().failed, 1);
    }

    #[test]
    fn test_received_cannot_succeed_directly() {
        let mut tracker = InvocationTracker::new();
        let id = tracker.receive(view_request());
        let err = tracker.succeed(id, created()).unwrap_err();
        assert_eq!(
            err,
            TrackerError::IllegalTransition {
                id,
                from: InvocationState::Received,
                to: InvocationState::Succeeded
            }
        );
    }

    #[test]
    fn test_cancel_received_invocation() {
        let mut tracker = InvocationTracker::new();
        let id = tracker.receive(view_request());
        let record = tracker.cancel(id).unwrap();
        assert_eq!(record.state(), InvocationState::Failed);
        assert_eq!(record.error().unwrap().kind, ErrorKind::Cancelled);
    }

    #[test]
    fn test_update_args_only_while_received() {
        let mut tracker = InvocationTracker::new();
        let id = tracker.receive(ToolCallRequest::editor("create", json!({})));
        assert_eq!(tracker.get(id).unwrap().label(), "Creating ");

        let args = json!({"path": "/components/Card.jsx"});
        tracker
            .update_args(id, args.as_object().unwrap().clone())
            .unwrap();
        assert_eq!(tracker.get(id).unwrap().label(), "Creating Card.jsx");

        tracker.start(id).unwrap();
        let err = tracker.update_args(id, Map::new()).unwrap_err();
        assert!(err.is_args_finalized());
    }

    #[test]
    fn test_unknown_invocation() {
        let mut tracker = InvocationTracker::new();
        let err = tracker.start(InvocationId::new()).unwrap_err();
        assert!(err.is_unknown_invocation());
    }

    #[test]
    fn test_late_subscriber_gets_no_replay() {
        let mut tracker = InvocationTracker::new();
        let id = tracker.receive(view_request());
        tracker.start(id).unwrap();

        let seen = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&seen);
        tracker.subscribe(Arc::new(FnObserver::new(move |_| {
            counter.fetch_add(1, Ordering::SeqCst);
        })));
        assert_eq!(seen.load(Ordering::SeqCst), 0);

        tracker.succeed(id, created()).unwrap();
        assert_eq!(seen.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_unsubscribe_stops_delivery() {
        let seen = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&seen);
        let mut tracker = InvocationTracker::new();
        let subscription = tracker.subscribe(Arc::new(FnObserver::new(move |_| {
            counter.fetch_add(1, Ordering::SeqCst);
        })));

        tracker.receive(view_request());
        assert!(tracker.unsubscribe(subscription));
        assert!(!tracker.unsubscribe(subscription));
        tracker.receive(view_request());

        assert_eq!(seen.load(Ordering::SeqCst), 1);
        assert_eq!(tracker.observer_count(), 0);
    }

    #[test]
    fn test_illegal_transition_emits_nothing() {
        let (observer, mut events) = ChannelObserver::new();
        let mut tracker = InvocationTracker::new();
        let id = tracker.receive(view_request());
        tracker.subscribe(Arc::new(observer));

        assert!(tracker.succeed(id, created()).is_err());
        assert!(events.try_recv().is_err());
    }

    #[test]
    fn test_history_and_stats() {
        let mut tracker = InvocationTracker::new();
        let first = tracker.receive(view_request());
        let second = tracker.receive(view_request());
        let third = tracker.receive(view_request());

        tracker.start(first).unwrap();
        tracker.succeed(first, created()).unwrap();
        tracker.cancel(second).unwrap();

        let order: Vec<_> = tracker.history().map(ToolInvocation::id).collect();
        assert_eq!(order, vec![first, second, third]);

        let stats = tracker.stats();
        assert_eq!(stats.total, 3);
        assert_eq!(stats.succeeded, 1);
        assert_eq!(stats.failed, 1);
        assert_eq!(stats.received, 1);
    }
}
