//! Observers of invocation state transitions.
//!
//! Observers are notified synchronously, in subscription order, for every
//! transition that happens while they are subscribed. There is no replay:
//! an observer that subscribes late sees only later transitions and can
//! query the tracker for current state.

use crate::invocation::{InvocationState, ToolInvocation};
use chrono::{DateTime, Utc};
use std::fmt;
use tokio::sync::mpsc;

/// A single state transition.
#[derive(Debug, Clone, PartialEq)]
pub struct TransitionEvent {
    /// The invocation as of this transition
    pub invocation: ToolInvocation,
    /// State before the transition; `None` when the invocation was created
    pub previous: Option<InvocationState>,
    /// When the transition happened
    pub at: DateTime<Utc>,
}

impl TransitionEvent {
    /// State after the transition.
    #[must_use]
    pub const fn state(&self) -> InvocationState {
        self.invocation.state
    }
}

/// Receives transition events.
///
/// Implementations must not block: they run while the tracker is locked.
pub trait InvocationObserver: Send + Sync {
    /// Called once per transition.
    fn on_transition(&self, event: &TransitionEvent);
}

/// Handle returned by `subscribe`, used to unsubscribe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SubscriptionId(u64);

impl SubscriptionId {
    pub(crate) const fn new(id: u64) -> Self {
        Self(id)
    }

    /// Returns the raw id value.
    #[must_use]
    pub const fn as_u64(self) -> u64 {
        self.0
    }
}

/// Forwards events to an unbounded channel for async consumers.
///
/// # Examples
///
/// ```
/// use uigen_runtime::{ChannelObserver, InvocationTracker};
/// use uigen_tools::ToolCallRequest;
/// use serde_json::json;
/// use std::sync::Arc;
///
/// let (observer, mut events) = ChannelObserver::new();
/// let mut tracker = InvocationTracker::new();
/// tracker.subscribe(Arc::new(observer));
///
/// tracker.receive(ToolCallRequest::editor("view", json!({"path": "/"})));
/// assert!(events.try_recv().is_ok());
/// ```
#[derive(Debug, Clone)]
pub struct ChannelObserver {
    sender: mpsc::UnboundedSender<TransitionEvent>,
}

impl ChannelObserver {
    /// Creates an observer and the receiving end of its channel.
    #[must_use]
    pub fn new() -> (Self, mpsc::UnboundedReceiver<TransitionEvent>) {
        let (sender, receiver) = mpsc::unbounded_channel();
        (Self { sender }, receiver)
    }
}

impl InvocationObserver for ChannelObserver {
    fn on_transition(&self, event: &TransitionEvent) {
        // Receiver gone: nothing left to notify.
        let _ = self.sender.send(event.clone());
    }
}

/// Wraps a closure as an observer.
pub struct FnObserver<F>(F);

impl<F> FnObserver<F>
where
    F: Fn(&TransitionEvent) + Send + Sync,
{
    /// Creates an observer from a closure.
    pub const fn new(callback: F) -> Self {
        Self(callback)
    }
}

impl<F> InvocationObserver for FnObserver<F>
where
    F: Fn(&TransitionEvent) + Send + Sync,
{
    fn on_transition(&self, event: &TransitionEvent) {
        (self.0)(event);
    }
}

impl<F> fmt::Debug for FnObserver<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FnObserver").finish_non_exhaustive()
    }
}
