//! Service layer for task submission, editing, and retrieval.

use crate::task::{
    domain::{Task, TaskId, apply_edit},
    error::ValidationError,
    normalize::{SubmissionMode, normalize},
    ports::{StoredTask, TaskRepository, TaskRepositoryError, TaskValidator},
    validation::DefaultTaskValidator,
};
use mockable::Clock;
use serde_json::Value;
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, info, warn};

/// Default bound on read-merge-write attempts for one edit.
pub const DEFAULT_MAX_EDIT_ATTEMPTS: u32 = 3;

const COMMENT_KEY: &str = "comment";

/// Request payload for creating a task.
#[derive(Debug, Clone, PartialEq)]
pub struct CreateTaskRequest {
    fields: Value,
}

impl CreateTaskRequest {
    /// Wraps the raw request body.
    #[must_use]
    pub const fn new(fields: Value) -> Self {
        Self { fields }
    }
}

impl From<Value> for CreateTaskRequest {
    fn from(fields: Value) -> Self {
        Self::new(fields)
    }
}

/// Request payload for editing a task.
///
/// The edit comment travels beside the fields. Use
/// [`EditTaskRequest::from_body`] when the comment arrives inside the body.
#[derive(Debug, Clone, PartialEq)]
pub struct EditTaskRequest {
    fields: Value,
    comment: Option<Value>,
}

impl EditTaskRequest {
    /// Creates an edit with no comment.
    ///
    /// `fields` must hold task fields only; a `comment` key here is
    /// rejected as an unknown field. Use [`EditTaskRequest::from_body`] for
    /// a raw request body that carries its comment inline.
    #[must_use]
    pub const fn new(fields: Value) -> Self {
        Self {
            fields,
            comment: None,
        }
    }

    /// Sets the edit comment.
    #[must_use]
    pub fn with_comment(mut self, comment: impl Into<String>) -> Self {
        self.comment = Some(Value::String(comment.into()));
        self
    }

    /// Splits a request body into fields and the `comment` it carries.
    ///
    /// The comment is checked when the edit is submitted; a non-string
    /// comment rejects the edit.
    #[must_use]
    pub fn from_body(body: Value) -> Self {
        let mut fields = body;
        let comment = fields
            .as_object_mut()
            .and_then(|map| map.remove(COMMENT_KEY));
        Self { fields, comment }
    }

    fn into_parts(self) -> (Value, Result<String, ValidationError>) {
        let comment = match self.comment {
            None => Ok(String::new()),
            Some(Value::String(text)) => Ok(text),
            Some(_) => Err(ValidationError::InvalidComment),
        };
        (self.fields, comment)
    }
}

/// Service-level errors for task operations.
#[derive(Debug, Error)]
pub enum TaskLifecycleError {
    /// The request failed validation; nothing was stored.
    #[error("task rejected: {0}")]
    Rejected(ValidationError),

    /// No task has the given identifier.
    #[error("task not found: {0}")]
    NotFound(String),

    /// The task kept changing while the edit was being applied.
    #[error("task {id} was modified concurrently; gave up after {attempts} attempts")]
    Conflict {
        /// The contested task.
        id: TaskId,
        /// Number of write attempts made.
        attempts: u32,
    },

    /// Repository operation failed.
    #[error(transparent)]
    Repository(#[from] TaskRepositoryError),
}

impl TaskLifecycleError {
    /// Returns `true` when the request itself was invalid.
    #[must_use]
    pub const fn is_rejection(&self) -> bool {
        matches!(self, Self::Rejected(_))
    }

    /// Returns `true` when the referenced task does not exist.
    #[must_use]
    pub const fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound(_))
    }

    /// Returns the validation failure, if the request was rejected.
    #[must_use]
    pub const fn rejection(&self) -> Option<&ValidationError> {
        match self {
            Self::Rejected(error) => Some(error),
            _ => None,
        }
    }
}

/// Result type for task lifecycle service operations.
pub type TaskLifecycleResult<T> = Result<T, TaskLifecycleError>;

/// Task submission and retrieval service.
///
/// Creates and edits run the normalizer and the validator before anything
/// is written. Edits are applied with a revision-checked write and retried
/// on conflict, so each accepted edit lands exactly once together with its
/// annotation.
#[derive(Clone)]
pub struct TaskLifecycleService<R, C, V = DefaultTaskValidator>
where
    R: TaskRepository,
    C: Clock + Send + Sync,
    V: TaskValidator,
{
    repository: Arc<R>,
    clock: Arc<C>,
    validator: Arc<V>,
    max_edit_attempts: u32,
}

impl<R, C> TaskLifecycleService<R, C>
where
    R: TaskRepository,
    C: Clock + Send + Sync,
{
    /// Creates a new service with the default validator.
    #[must_use]
    pub fn new(repository: Arc<R>, clock: Arc<C>) -> Self {
        Self {
            repository,
            clock,
            validator: Arc::new(DefaultTaskValidator::new()),
            max_edit_attempts: DEFAULT_MAX_EDIT_ATTEMPTS,
        }
    }
}

impl<R, C, V> TaskLifecycleService<R, C, V>
where
    R: TaskRepository,
    C: Clock + Send + Sync,
    V: TaskValidator,
{
    /// Replaces the validator.
    #[must_use]
    pub fn with_validator<W: TaskValidator>(self, validator: W) -> TaskLifecycleService<R, C, W> {
        TaskLifecycleService {
            repository: self.repository,
            clock: self.clock,
            validator: Arc::new(validator),
            max_edit_attempts: self.max_edit_attempts,
        }
    }

    /// Sets how many times an edit is attempted when the task changes
    /// between read and write. Values below 1 are raised to 1.
    #[must_use]
    pub fn with_max_edit_attempts(mut self, attempts: u32) -> Self {
        self.max_edit_attempts = attempts.max(1);
        self
    }

    /// Validates and stores a new task.
    ///
    /// # Errors
    ///
    /// Returns [`TaskLifecycleError::Rejected`] when any field fails
    /// validation, or [`TaskLifecycleError::Repository`] when the insert
    /// fails.
    pub async fn submit_create(&self, request: CreateTaskRequest) -> TaskLifecycleResult<Task> {
        let fields = normalize(
            &request.fields,
            SubmissionMode::Create,
            self.validator.config(),
        );
        let draft = self
            .validator
            .validate_create(&fields)
            .map_err(|error| reject(None, error))?;

        let task = Task::create(draft, &*self.clock);
        let revision = self.repository.insert(&task).await?;
        info!(task_id = %task.id(), %revision, "task created");
        Ok(task)
    }

    /// Validates and applies a partial edit, appending one annotation.
    ///
    /// The task is looked up first; an unknown or malformed identifier is
    /// reported as not found before any field is checked.
    ///
    /// # Errors
    ///
    /// Returns [`TaskLifecycleError::NotFound`] when the task does not exist,
    /// [`TaskLifecycleError::Rejected`] when any field or the comment fails
    /// validation, [`TaskLifecycleError::Conflict`] when every attempt lost a
    /// race with another writer, or [`TaskLifecycleError::Repository`] when
    /// persistence fails.
    pub async fn submit_edit(
        &self,
        id: &str,
        request: EditTaskRequest,
    ) -> TaskLifecycleResult<Task> {
        let mut stored = self.require(id).await?;
        let task_id = stored.task.id();

        let (raw_fields, comment_check) = request.into_parts();
        let fields = normalize(&raw_fields, SubmissionMode::Edit, self.validator.config());
        let (patch, comment) = match (self.validator.validate_edit(&fields), comment_check) {
            (Ok(patch), Ok(comment)) => (patch, comment),
            (Err(error), Ok(_)) | (Ok(_), Err(error)) => return Err(reject(Some(task_id), error)),
            (Err(fields_error), Err(comment_error)) => {
                return Err(reject(Some(task_id), fields_error.combine(comment_error)));
            }
        };

        let mut attempts = 0;
        loop {
            attempts += 1;
            let updated = apply_edit(&stored.task, patch.clone(), &comment, &*self.clock);
            match self
                .repository
                .update_if_revision(&updated, stored.revision)
                .await
            {
                Ok(revision) => {
                    info!(
                        task_id = %task_id,
                        %revision,
                        annotations = updated.annotations().len(),
                        "task edited"
                    );
                    return Ok(updated);
                }
                Err(TaskRepositoryError::RevisionConflict {
                    expected, actual, ..
                }) => {
                    if attempts >= self.max_edit_attempts {
                        warn!(task_id = %task_id, attempts, "edit abandoned after repeated conflicts");
                        return Err(TaskLifecycleError::Conflict {
                            id: task_id,
                            attempts,
                        });
                    }
                    warn!(
                        task_id = %task_id,
                        %expected,
                        %actual,
                        attempts,
                        "revision conflict on edit, retrying"
                    );
                    stored = self.require(id).await?;
                }
                Err(TaskRepositoryError::NotFound(_)) => {
                    return Err(TaskLifecycleError::NotFound(id.to_owned()));
                }
                Err(other) => return Err(other.into()),
            }
        }
    }

    /// Retrieves a task by identifier.
    ///
    /// # Errors
    ///
    /// Returns [`TaskLifecycleError::NotFound`] when the task does not exist,
    /// or [`TaskLifecycleError::Repository`] when the lookup fails.
    pub async fn get(&self, id: &str) -> TaskLifecycleResult<Task> {
        self.require(id).await.map(|stored| stored.task)
    }

    /// Returns every task in creation order.
    ///
    /// # Errors
    ///
    /// Returns [`TaskLifecycleError::Repository`] when the listing fails.
    pub async fn list(&self) -> TaskLifecycleResult<Vec<Task>> {
        let stored = self.repository.list().await?;
        debug!(count = stored.len(), "listed tasks");
        Ok(stored.into_iter().map(|entry| entry.task).collect())
    }

    /// Deletes a task.
    ///
    /// # Errors
    ///
    /// Returns [`TaskLifecycleError::NotFound`] when the task does not exist,
    /// or [`TaskLifecycleError::Repository`] when the delete fails.
    pub async fn delete(&self, id: &str) -> TaskLifecycleResult<()> {
        let task_id = parse_id(id)?;
        if !self.repository.delete(task_id).await? {
            return Err(TaskLifecycleError::NotFound(id.to_owned()));
        }
        info!(task_id = %task_id, "task deleted");
        Ok(())
    }

    async fn require(&self, id: &str) -> TaskLifecycleResult<StoredTask> {
        let task_id = parse_id(id)?;
        let stored = self.repository.find_by_id(task_id).await?;
        debug!(task_id = %task_id, found = stored.is_some(), "task lookup");
        stored.ok_or_else(|| TaskLifecycleError::NotFound(id.to_owned()))
    }
}

fn parse_id(id: &str) -> TaskLifecycleResult<TaskId> {
    TaskId::parse(id).map_err(|_| TaskLifecycleError::NotFound(id.to_owned()))
}

fn reject(task_id: Option<TaskId>, error: ValidationError) -> TaskLifecycleError {
    let fields = error.field_names().join(", ");
    match task_id {
        Some(id) => warn!(task_id = %id, %fields, "task edit rejected"),
        None => warn!(%fields, "task creation rejected"),
    }
    TaskLifecycleError::Rejected(error)
}
