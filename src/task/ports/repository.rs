//! Repository port for task persistence with optimistic concurrency.

use crate::task::domain::{Revision, Task, TaskId};
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for task repository operations.
pub type TaskRepositoryResult<T> = Result<T, TaskRepositoryError>;

/// A task together with the revision it was read at.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredTask {
    /// The stored task.
    pub task: Task,
    /// Revision of the stored document.
    pub revision: Revision,
}

/// Task persistence contract.
///
/// Every stored task carries a [`Revision`] that advances on each write.
/// Updates are conditional on the revision the caller read, so a
/// read-merge-write cycle either lands as a whole or fails with
/// [`TaskRepositoryError::RevisionConflict`].
#[async_trait]
pub trait TaskRepository: Send + Sync {
    /// Stores a new task and returns its initial revision.
    ///
    /// # Errors
    ///
    /// Returns [`TaskRepositoryError::DuplicateTask`] when the task ID already
    /// exists.
    async fn insert(&self, task: &Task) -> TaskRepositoryResult<Revision>;

    /// Finds a task by identifier.
    ///
    /// Returns `None` when the task does not exist.
    async fn find_by_id(&self, id: TaskId) -> TaskRepositoryResult<Option<StoredTask>>;

    /// Returns every stored task ordered by creation time.
    async fn list(&self) -> TaskRepositoryResult<Vec<StoredTask>>;

    /// Replaces a task only if its stored revision equals `expected`.
    ///
    /// Returns the new revision on success.
    ///
    /// # Errors
    ///
    /// Returns [`TaskRepositoryError::NotFound`] when the task no longer
    /// exists or [`TaskRepositoryError::RevisionConflict`] when it was
    /// modified since `expected` was read.
    async fn update_if_revision(
        &self,
        task: &Task,
        expected: Revision,
    ) -> TaskRepositoryResult<Revision>;

    /// Deletes a task.
    ///
    /// Returns `true` if the task existed.
    async fn delete(&self, id: TaskId) -> TaskRepositoryResult<bool>;
}

/// Errors returned by task repository implementations.
#[derive(Debug, Clone, Error)]
pub enum TaskRepositoryError {
    /// A task with the same identifier already exists.
    #[error("duplicate task identifier: {0}")]
    DuplicateTask(TaskId),

    /// The task was not found.
    #[error("task not found: {0}")]
    NotFound(TaskId),

    /// The task changed since it was read.
    #[error("revision conflict on task {id}: expected {expected}, found {actual}")]
    RevisionConflict {
        /// The contested task.
        id: TaskId,
        /// Revision the caller read.
        expected: Revision,
        /// Revision currently stored.
        actual: Revision,
    },

    /// A stored document could not be encoded or decoded.
    #[error("serialization error: {0}")]
    Serialization(String),

    /// Persistence-layer failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl TaskRepositoryError {
    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }

    /// Creates a serialization error.
    #[must_use]
    pub fn serialization(message: impl Into<String>) -> Self {
        Self::Serialization(message.into())
    }
}
