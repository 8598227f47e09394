//! Sessions for many projects.
//!
//! The registry maps project ids to their [`ProjectSession`]s. Each session
//! has its own worker, so calls for different projects proceed in parallel
//! while calls for one project stay serialized.

use crate::session::{ProjectSession, Result, SessionError};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::info;
use uigen_core::{ProjectId, RuntimeConfig};
use uigen_files::{FileSnapshot, FileTree};

/// Registry of open project sessions.
///
/// Clones share the same set of sessions.
///
/// # Examples
///
/// ```
/// use uigen_core::{ProjectId, RuntimeConfig};
/// use uigen_runtime::ProjectRegistry;
///
/// # #[tokio::main(flavor = "current_thread")]
/// # async fn main() {
/// let registry = ProjectRegistry::new(RuntimeConfig::default());
/// let project = ProjectId::new("landing-page");
///
/// let session = registry.get_or_open(&project).await;
/// assert_eq!(session.project(), &project);
/// assert_eq!(registry.len().await, 1);
///
/// assert!(registry.close(&project).await.unwrap());
/// assert!(registry.is_empty().await);
/// # }
/// ```
#[derive(Debug, Clone, Default)]
pub struct ProjectRegistry {
    sessions: Arc<RwLock<HashMap<ProjectId, ProjectSession>>>,
    config: RuntimeConfig,
}

impl ProjectRegistry {
    /// Creates an empty registry; new sessions use `config`.
    #[must_use]
    pub fn new(config: RuntimeConfig) -> Self {
        Self {
            sessions: Arc::default(),
            config,
        }
    }

    /// Configuration applied to new sessions.
    #[must_use]
    pub const fn config(&self) -> &RuntimeConfig {
        &self.config
    }

    /// Opens a project seeded from `snapshot`.
    ///
    /// # Errors
    ///
    /// - `AlreadyOpen` if the project already has a session
    /// - `Files` if the snapshot cannot form a tree
    pub async fn open(&self, project: ProjectId, snapshot: &FileSnapshot) -> Result<ProjectSession> {
        let tree = FileTree::from_snapshot(snapshot)?;
        let mut sessions = self.sessions.write().await;
        if sessions.contains_key(&project) {
            return Err(SessionError::AlreadyOpen { project });
        }

        let session = ProjectSession::spawn(project.clone(), tree, &self.config);
        sessions.insert(project, session.clone());
        Ok(session)
    }

    /// Returns the project's session, opening an empty one if needed.
    pub async fn get_or_open(&self, project: &ProjectId) -> ProjectSession {
        if let Some(session) = self.get(project).await {
            return session;
        }
        let mut sessions = self.sessions.write().await;
        sessions
            .entry(project.clone())
            .or_insert_with(|| ProjectSession::spawn(project.clone(), FileTree::new(), &self.config))
            .clone()
    }

    /// Returns the project's session, if open.
    pub async fn get(&self, project: &ProjectId) -> Option<ProjectSession> {
        self.sessions.read().await.get(project).cloned()
    }

    /// Shuts down and removes a project's session.
    ///
    /// Returns `false` if the project was not open.
    ///
    /// # Errors
    ///
    /// Returns `Closed` if the session's worker had already stopped; the
    /// session is removed regardless.
    pub async fn close(&self, project: &ProjectId) -> Result<bool> {
        let removed = self.sessions.write().await.remove(project);
        match removed {
            Some(session) => {
                session.shutdown().await?;
                info!(project = %project, "project closed");
                Ok(true)
            }
            None => Ok(false),
        }
    }

    /// Open project ids, sorted.
    pub async fn projects(&self) -> Vec<ProjectId> {
        let mut projects: Vec<_> = self.sessions.read().await.keys().cloned().collect();
        projects.sort();
        projects
    }

    /// Number of open projects.
    pub async fn len(&self) -> usize {
        self.sessions.read().await.len()
    }

    /// Returns `true` if no project is open.
    pub async fn is_empty(&self) -> bool {
        self.sessions.read().await.is_empty()
    }

    /// Shuts down every session. Returns how many were closed.
    pub async fn shutdown_all(&self) -> usize {
        let sessions: Vec<_> = self.sessions.write().await.drain().collect();
        let mut closed = 0;
        for (_, session) in sessions {
            if session.shutdown().await.is_ok() {
                closed += 1;
            }
        }
        closed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::InvocationState;
    use serde_json::json;
    use uigen_tools::ToolCallRequest;

    #[tokio::test]
    async fn test_open_twice_fails() {
        let registry = ProjectRegistry::default();
        let project = ProjectId::new("p");
        registry
            .open(project.clone(), &FileSnapshot::new())
            .await
            .unwrap();

        let err = registry
            .open(project, &FileSnapshot::new())
            .await
            .unwrap_err();
        assert!(err.is_already_open());
    }

    #[tokio::test]
    async fn test_projects_are_isolated() {
        let registry = ProjectRegistry::default();
        let a = registry.get_or_open(&ProjectId::new("a")).await;
        let b = registry.get_or_open(&ProjectId::new("b")).await;

        let record = a
            .execute(ToolCallRequest::editor(
                "create",
                json!({"path": "/App.jsx", "content": "a"}),
            ))
            .await
            .unwrap();
        assert_eq!(record.state(), InvocationState::Succeeded);

        assert_eq!(a.snapshot().await.unwrap().len(), 1);
        assert!(b.snapshot().await.unwrap().is_empty());
        assert_eq!(
            registry.projects().await,
            vec![ProjectId::new("a"), ProjectId::new("b")]
        );
    }

    #[tokio::test]
    async fn test_get_or_open_reuses_session() {
        let registry = ProjectRegistry::default();
        let project = ProjectId::new("p");
        let first = registry.get_or_open(&project).await;
        first
            .execute(ToolCallRequest::path_manager("mkdir", json!({"path": "/src"})))
            .await
            .unwrap();

        let second = registry.get_or_open(&project).await;
        assert_eq!(second.history().await.len(), 1);
    }

    #[tokio::test]
    async fn test_shutdown_all() {
        let registry = ProjectRegistry::default();
        let a = registry.get_or_open(&ProjectId::new("a")).await;
        registry.get_or_open(&ProjectId::new("b")).await;

        assert_eq!(registry.shutdown_all().await, 2);
        assert!(registry.is_empty().await);
        assert!(a.snapshot().await.unwrap_err().is_closed());
    }
}
