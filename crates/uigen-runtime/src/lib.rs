//! Invocation lifecycle tracking and serialized execution for UIGen tools.
//!
//! # Architecture
//!
//! - [`InvocationTracker`]: owns invocation records, enforces the
//!   `Received → Executing → Succeeded | Failed` state machine, and notifies
//!   [`InvocationObserver`]s of every transition
//! - [`ProjectSession`]: one worker task per project that owns the project's
//!   file tree and runs jobs strictly in arrival order
//! - [`ProjectRegistry`]: maps project ids to sessions so distinct projects
//!   run concurrently
//!
//! # Examples
//!
//! ```
//! use serde_json::json;
//! use std::sync::Arc;
//! use uigen_core::{ProjectId, RuntimeConfig};
//! use uigen_runtime::{ChannelObserver, InvocationState, ProjectRegistry};
//! use uigen_tools::ToolCallRequest;
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() {
//! let registry = ProjectRegistry::new(RuntimeConfig::default());
//! let session = registry.get_or_open(&ProjectId::new("demo")).await;
//!
//! let (observer, mut events) = ChannelObserver::new();
//! session.subscribe(Arc::new(observer)).await;
//!
//! let record = session
//!     .execute(ToolCallRequest::editor("view", json!({"path": "/"})))
//!     .await
//!     .unwrap();
//! assert_eq!(record.state(), InvocationState::Succeeded);
//!
//! let first = events.recv().await.unwrap();
//! assert_eq!(first.state(), InvocationState::Received);
//! # }
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs, missing_debug_implementations)]

mod invocation;
mod observer;
mod registry;
mod session;
mod stats;
mod tracker;

pub use invocation::{InvocationState, ToolCallResult, ToolInvocation};
pub use observer::{ChannelObserver, FnObserver, InvocationObserver, SubscriptionId, TransitionEvent};
pub use registry::ProjectRegistry;
pub use session::{ProjectSession, SessionError};
pub use stats::TrackerStats;
pub use tracker::{InvocationTracker, TrackerError};
