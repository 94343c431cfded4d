//! In-memory task repository with revision-checked writes.
//!
//! Tasks are held as serialized JSON documents, so every read returns a
//! freshly decoded task and nothing outside the store can alias stored state.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::task::{
    domain::{Revision, Task, TaskId},
    ports::{StoredTask, TaskRepository, TaskRepositoryError, TaskRepositoryResult},
};

/// Thread-safe in-memory task repository.
#[derive(Debug, Clone, Default)]
pub struct InMemoryTaskRepository {
    state: Arc<RwLock<InMemoryTaskState>>,
}

#[derive(Debug, Default)]
struct InMemoryTaskState {
    documents: HashMap<TaskId, Document>,
    next_sequence: u64,
}

#[derive(Debug)]
struct Document {
    bytes: Vec<u8>,
    revision: Revision,
    sequence: u64,
}

impl Document {
    fn decode(&self) -> TaskRepositoryResult<StoredTask> {
        let task = serde_json::from_slice(&self.bytes)
            .map_err(|err| TaskRepositoryError::serialization(err.to_string()))?;
        Ok(StoredTask {
            task,
            revision: self.revision,
        })
    }
}

impl InMemoryTaskRepository {
    /// Creates an empty in-memory repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> TaskRepositoryResult<RwLockReadGuard<'_, InMemoryTaskState>> {
        self.state.read().map_err(|err| {
            TaskRepositoryError::persistence(std::io::Error::other(err.to_string()))
        })
    }

    fn write(&self) -> TaskRepositoryResult<RwLockWriteGuard<'_, InMemoryTaskState>> {
        self.state.write().map_err(|err| {
            TaskRepositoryError::persistence(std::io::Error::other(err.to_string()))
        })
    }
}

fn encode(task: &Task) -> TaskRepositoryResult<Vec<u8>> {
    serde_json::to_vec(task).map_err(|err| TaskRepositoryError::serialization(err.to_string()))
}

#[async_trait]
impl TaskRepository for InMemoryTaskRepository {
    async fn insert(&self, task: &Task) -> TaskRepositoryResult<Revision> {
        let bytes = encode(task)?;
        let mut state = self.write()?;
        if state.documents.contains_key(&task.id()) {
            return Err(TaskRepositoryError::DuplicateTask(task.id()));
        }

        let sequence = state.next_sequence;
        state.next_sequence += 1;
        state.documents.insert(
            task.id(),
            Document {
                bytes,
                revision: Revision::INITIAL,
                sequence,
            },
        );
        Ok(Revision::INITIAL)
    }

    async fn find_by_id(&self, id: TaskId) -> TaskRepositoryResult<Option<StoredTask>> {
        let state = self.read()?;
        state.documents.get(&id).map(Document::decode).transpose()
    }

    async fn list(&self) -> TaskRepositoryResult<Vec<StoredTask>> {
        let state = self.read()?;
        let mut documents: Vec<&Document> = state.documents.values().collect();
        documents.sort_by_key(|document| document.sequence);
        documents.into_iter().map(Document::decode).collect()
    }

    async fn update_if_revision(
        &self,
        task: &Task,
        expected: Revision,
    ) -> TaskRepositoryResult<Revision> {
        let bytes = encode(task)?;
        let mut state = self.write()?;
        let document = state
            .documents
            .get_mut(&task.id())
            .ok_or(TaskRepositoryError::NotFound(task.id()))?;

        if document.revision != expected {
            return Err(TaskRepositoryError::RevisionConflict {
                id: task.id(),
                expected,
                actual: document.revision,
            });
        }

        document.bytes = bytes;
        document.revision = document.revision.next();
        Ok(document.revision)
    }

    async fn delete(&self, id: TaskId) -> TaskRepositoryResult<bool> {
        let mut state = self.write()?;
        Ok(state.documents.remove(&id).is_some())
    }
}
