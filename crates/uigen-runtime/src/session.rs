//! Per-project serialized execution.
//!
//! A [`ProjectSession`] owns one project's [`FileTree`] inside a worker task.
//! Every job (tool execution, snapshot, tree replacement) travels through a
//! bounded queue and runs in arrival order, so the tree has a single writer
//! and reads never observe a half-applied command. Separate projects have
//! separate workers and run concurrently.
//!
//! # Examples
//!
//! ```
//! use serde_json::json;
//! use uigen_core::{ProjectId, RuntimeConfig};
//! use uigen_files::FileTree;
//! use uigen_runtime::{InvocationState, ProjectSession};
//! use uigen_tools::ToolCallRequest;
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() {
//! let session = ProjectSession::spawn(
//!     ProjectId::new("demo"),
//!     FileTree::new(),
//!     &RuntimeConfig::default(),
//! );
//!
//! let record = session
//!     .execute(ToolCallRequest::editor(
//!         "create",
//!         json!({"path": "/App.jsx", "content": "export default 1"}),
//!     ))
//!     .await
//!     .unwrap();
//! assert_eq!(record.state(), InvocationState::Succeeded);
//!
//! let snapshot = session.snapshot().await.unwrap();
//! assert_eq!(snapshot.get("/App.jsx"), Some("export default 1"));
//! session.shutdown().await.unwrap();
//! # }
//! ```

use crate::invocation::{InvocationState, ToolInvocation};
use crate::observer::{InvocationObserver, SubscriptionId};
use crate::stats::TrackerStats;
use crate::tracker::{InvocationTracker, TrackerError};
use serde_json::{Map, Value};
use std::sync::Arc;
use thiserror::Error;
use tokio::sync::{Mutex, mpsc, oneshot};
use tracing::{debug, info, instrument, warn};
use uigen_core::{InvocationId, ProjectId, RuntimeConfig};
use uigen_files::{FileSnapshot, FileTree, FilesError};
use uigen_tools::{ToolCallRequest, ToolInterpreter};

/// Errors from session operations.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SessionError {
    /// The session's worker has shut down
    #[error("Session for project '{project}' is closed")]
    Closed {
        /// Project whose session is closed
        project: ProjectId,
    },

    /// A project with this id is already open
    #[error("Project '{project}' is already open")]
    AlreadyOpen {
        /// Conflicting project id
        project: ProjectId,
    },

    /// Tracker rejected the operation
    #[error(transparent)]
    Tracker(#[from] TrackerError),

    /// Snapshot could not be turned into a tree
    #[error(transparent)]
    Files(#[from] FilesError),
}

impl SessionError {
    /// Returns `true` if the session is closed.
    #[must_use]
    pub const fn is_closed(&self) -> bool {
        matches!(self, Self::Closed { .. })
    }

    /// Returns `true` if the project was already open.
    #[must_use]
    pub const fn is_already_open(&self) -> bool {
        matches!(self, Self::AlreadyOpen { .. })
    }

    /// Returns `true` if the tracker rejected the operation.
    #[must_use]
    pub const fn is_tracker_error(&self) -> bool {
        matches!(self, Self::Tracker(_))
    }
}

/// Type alias for session results.
pub type Result<T> = std::result::Result<T, SessionError>;

enum Job {
    Execute {
        id: InvocationId,
        reply: oneshot::Sender<ToolInvocation>,
    },
    Snapshot {
        reply: oneshot::Sender<FileSnapshot>,
    },
    ReplaceTree {
        tree: FileTree,
        reply: oneshot::Sender<()>,
    },
    Shutdown {
        reply: oneshot::Sender<()>,
    },
}

/// Handle to one project's worker.
///
/// Handles are cheap to clone; all clones talk to the same worker.
#[derive(Debug, Clone)]
pub struct ProjectSession {
    project: ProjectId,
    tracker: Arc<Mutex<InvocationTracker>>,
    jobs: mpsc::Sender<Job>,
}

impl ProjectSession {
    /// Starts a worker for `project` that owns `tree`.
    ///
    /// Must be called from within a tokio runtime.
    #[must_use]
    pub fn spawn(project: ProjectId, tree: FileTree, config: &RuntimeConfig) -> Self {
        let (jobs, queue) = mpsc::channel(config.queue_capacity.max(1));
        let tracker = Arc::new(Mutex::new(InvocationTracker::new()));
        let worker = Worker {
            project: project.clone(),
            tree,
            interpreter: ToolInterpreter::new(config),
            tracker: Arc::clone(&tracker),
        };
        tokio::spawn(worker.run(queue));
        info!(project = %project, "project session started");

        Self {
            project,
            tracker,
            jobs,
        }
    }

    /// Project this session serves.
    #[must_use]
    pub const fn project(&self) -> &ProjectId {
        &self.project
    }

    /// Records a tool call whose arguments may still be streaming.
    pub async fn receive(&self, request: ToolCallRequest) -> InvocationId {
        self.tracker.lock().await.receive(request)
    }

    /// Merges streamed arguments into a received invocation.
    ///
    /// # Errors
    ///
    /// Returns a tracker error if the invocation is unknown or already
    /// submitted for execution.
    pub async fn update_args(&self, id: InvocationId, args: Map<String, Value>) -> Result<()> {
        Ok(self.tracker.lock().await.update_args(id, args)?)
    }

    /// Queues a received invocation for execution.
    ///
    /// The returned receiver yields the terminal record. Waits while the
    /// queue is full.
    ///
    /// # Errors
    ///
    /// - `Tracker(UnknownInvocation)` if `id` is not tracked
    /// - `Tracker(IllegalTransition)` if the invocation is no longer `Received`
    /// - `Closed` if the worker has shut down
    pub async fn submit(&self, id: InvocationId) -> Result<oneshot::Receiver<ToolInvocation>> {
        {
            let tracker = self.tracker.lock().await;
            let invocation = tracker
                .get(id)
                .ok_or(TrackerError::UnknownInvocation { id })?;
            if invocation.state() != InvocationState::Received {
                return Err(TrackerError::IllegalTransition {
                    id,
                    from: invocation.state(),
                    to: InvocationState::Executing,
                }
                .into());
            }
        }

        let (reply, receiver) = oneshot::channel();
        self.send(Job::Execute { id, reply }).await?;
        debug!(project = %self.project, invocation = %id, "invocation queued");
        Ok(receiver)
    }

    /// Receives, submits, and awaits a complete request.
    ///
    /// Tool failures are reported in the returned record, not as errors.
    ///
    /// # Errors
    ///
    /// Returns `Closed` if the worker has shut down.
    pub async fn execute(&self, request: ToolCallRequest) -> Result<ToolInvocation> {
        let id = self.receive(request).await;
        let receiver = self.submit(id).await?;
        receiver.await.map_err(|_| self.closed())
    }

    /// Cancels a non-terminal invocation.
    ///
    /// A queued invocation is skipped by the worker. An invocation already
    /// executing keeps whatever change it applies; its late completion is
    /// discarded.
    ///
    /// # Errors
    ///
    /// Returns a tracker error if the invocation is unknown or terminal.
    pub async fn cancel(&self, id: InvocationId) -> Result<ToolInvocation> {
        let mut tracker = self.tracker.lock().await;
        let record = tracker.cancel(id)?.clone();
        info!(project = %self.project, invocation = %id, "invocation cancelled");
        Ok(record)
    }

    /// Current record of an invocation.
    pub async fn get(&self, id: InvocationId) -> Option<ToolInvocation> {
        self.tracker.lock().await.get(id).cloned()
    }

    /// Every invocation of this session in the order received.
    pub async fn history(&self) -> Vec<ToolInvocation> {
        self.tracker.lock().await.history().cloned().collect()
    }

    /// Counts of this session's invocations by state.
    pub async fn stats(&self) -> TrackerStats {
        self.tracker.lock().await.stats()
    }

    /// Attaches an observer to this session's invocations.
    pub async fn subscribe(&self, observer: Arc<dyn InvocationObserver>) -> SubscriptionId {
        self.tracker.lock().await.subscribe(observer)
    }

    /// Detaches an observer. Returns `false` if it was not attached.
    pub async fn unsubscribe(&self, subscription: SubscriptionId) -> bool {
        self.tracker.lock().await.unsubscribe(subscription)
    }

    /// Captures the tree after every previously queued job has run.
    ///
    /// # Errors
    ///
    /// Returns `Closed` if the worker has shut down.
    pub async fn snapshot(&self) -> Result<FileSnapshot> {
        let (reply, receiver) = oneshot::channel();
        self.send(Job::Snapshot { reply }).await?;
        receiver.await.map_err(|_| self.closed())
    }

    /// Replaces the whole tree, in queue order, with one built from `snapshot`.
    ///
    /// # Errors
    ///
    /// - `Files` if the snapshot cannot form a tree
    /// - `Closed` if the worker has shut down
    pub async fn replace_tree(&self, snapshot: &FileSnapshot) -> Result<()> {
        let tree = FileTree::from_snapshot(snapshot)?;
        let (reply, receiver) = oneshot::channel();
        self.send(Job::ReplaceTree { tree, reply }).await?;
        receiver.await.map_err(|_| self.closed())
    }

    /// Stops the worker after the jobs queued ahead of it.
    ///
    /// Invocations queued behind the shutdown are cancelled rather than run.
    ///
    /// # Errors
    ///
    /// Returns `Closed` if the worker had already shut down.
    pub async fn shutdown(&self) -> Result<()> {
        let (reply, receiver) = oneshot::channel();
        self.send(Job::Shutdown { reply }).await?;
        receiver.await.map_err(|_| self.closed())
    }

    /// Returns `true` once the worker has stopped accepting jobs.
    #[must_use]
    pub fn is_closed(&self) -> bool {
        self.jobs.is_closed()
    }

    async fn send(&self, job: Job) -> Result<()> {
        self.jobs.send(job).await.map_err(|_| self.closed())
    }

    fn closed(&self) -> SessionError {
        SessionError::Closed {
            project: self.project.clone(),
        }
    }
}

struct Worker {
    project: ProjectId,
    tree: FileTree,
    interpreter: ToolInterpreter,
    tracker: Arc<Mutex<InvocationTracker>>,
}

impl Worker {
    async fn run(mut self, mut queue: mpsc::Receiver<Job>) {
        while let Some(job) = queue.recv().await {
            match job {
                Job::Execute { id, reply } => {
                    if let Some(record) = self.execute(id).await {
                        // Submitter stopped waiting; the record stays in the tracker.
                        let _ = reply.send(record);
                    }
                }
                Job::Snapshot { reply } => {
                    let _ = reply.send(self.tree.to_snapshot());
                }
                Job::ReplaceTree { tree, reply } => {
                    self.tree = tree;
                    debug!(project = %self.project, files = self.tree.file_count(), "tree replaced");
                    let _ = reply.send(());
                }
                Job::Shutdown { reply } => {
                    queue.close();
                    self.drain(&mut queue).await;
                    let _ = reply.send(());
                    break;
                }
            }
        }
        info!(project = %self.project, "project session stopped");
    }

    /// Answers jobs queued behind a shutdown without touching the tree.
    ///
    /// Queued invocations end `Failed(Cancelled)`. Dropping a tree
    /// replacement's reply reports `Closed` to its caller.
    async fn drain(&self, queue: &mut mpsc::Receiver<Job>) {
        let mut abandoned = 0_usize;
        while let Some(job) = queue.recv().await {
            match job {
                Job::Execute { id, reply } => {
                    abandoned += 1;
                    if let Some(record) = self.abandon(id).await {
                        let _ = reply.send(record);
                    }
                }
                Job::Snapshot { reply } => {
                    let _ = reply.send(self.tree.to_snapshot());
                }
                Job::ReplaceTree { .. } => {}
                Job::Shutdown { reply } => {
                    let _ = reply.send(());
                }
            }
        }
        if abandoned > 0 {
            warn!(project = %self.project, abandoned, "cancelled invocations queued behind shutdown");
        }
    }

    async fn abandon(&self, id: InvocationId) -> Option<ToolInvocation> {
        let mut tracker = self.tracker.lock().await;
        if tracker.get(id)?.is_terminal() {
            return tracker.get(id).cloned();
        }
        let cancelled = tracker.cancel(id).cloned();
        match cancelled {
            Ok(record) => Some(record),
            Err(e) => {
                warn!(error = %e, invocation = %id, "could not cancel queued invocation");
                tracker.get(id).cloned()
            }
        }
    }

    #[instrument(skip(self), fields(project = %self.project))]
    async fn execute(&mut self, id: InvocationId) -> Option<ToolInvocation> {
        let request = {
            let mut tracker = self.tracker.lock().await;
            let current = tracker.get(id)?;
            if current.state() != InvocationState::Received {
                debug!(state = %current.state(), "skipping invocation that is no longer queued");
                return Some(current.clone());
            }
            match tracker.start(id).map(|record| record.request().clone()) {
                Ok(request) => request,
                Err(e) => {
                    warn!(error = %e, "could not start invocation");
                    return tracker.get(id).cloned();
                }
            }
        };

        let outcome = self.interpreter.execute(&mut self.tree, &request);

        let mut tracker = self.tracker.lock().await;
        let finished = match outcome {
            Ok(output) => tracker.succeed(id, output).cloned(),
            Err(error) => tracker.fail(id, &error).cloned(),
        };
        match finished {
            Ok(record) => Some(record),
            Err(e) => {
                warn!(error = %e, "discarded late completion");
                tracker.get(id).cloned()
            }
        }
    }
}
