//! Shared world state for task submission BDD scenarios.

use std::sync::Arc;

use mockable::DefaultClock;
use rstest::fixture;
use serde_json::Value;
use sightline::task::{
    adapters::memory::InMemoryTaskRepository,
    domain::Task,
    services::{TaskLifecycleError, TaskLifecycleService},
};

/// Service type used by the BDD world.
pub type TestTaskService = TaskLifecycleService<InMemoryTaskRepository, DefaultClock>;

/// Scenario world for task submission behaviour tests.
pub struct SubmissionWorld {
    pub service: TestTaskService,
    pub pending_body: Option<Value>,
    pub task: Option<Task>,
    pub last_create_result: Option<Result<Task, TaskLifecycleError>>,
    pub last_edit_result: Option<Result<Task, TaskLifecycleError>>,
}

impl SubmissionWorld {
    /// Creates a world with empty pending scenario state.
    #[must_use]
    pub fn new() -> Self {
        let service = TaskLifecycleService::new(
            Arc::new(InMemoryTaskRepository::new()),
            Arc::new(DefaultClock),
        );
        Self {
            service,
            pending_body: None,
            task: None,
            last_create_result: None,
            last_edit_result: None,
        }
    }

    /// Returns the task the scenario is working on.
    ///
    /// # Errors
    ///
    /// Returns an error if no task has been created yet.
    pub fn task(&self) -> Result<&Task, eyre::Report> {
        self.task
            .as_ref()
            .ok_or_else(|| eyre::eyre!("missing task in scenario world"))
    }

    /// Reads the current stored form of the scenario task as JSON.
    ///
    /// # Errors
    ///
    /// Returns an error if the task is missing or cannot be read.
    pub fn stored_json(&self) -> Result<Value, eyre::Report> {
        let id = self.task()?.id().to_string();
        let stored = run_async(self.service.get(&id))
            .map_err(|err| eyre::eyre!("lookup failed: {err}"))?;
        Ok(serde_json::to_value(stored)?)
    }
}

impl Default for SubmissionWorld {
    fn default() -> Self {
        Self::new()
    }
}

/// Fixture that creates a new scenario world.
#[fixture]
pub fn world() -> SubmissionWorld {
    SubmissionWorld::default()
}

/// Runs an async operation within sync step definitions.
pub fn run_async<T>(future: impl std::future::Future<Output = T>) -> T {
    tokio::task::block_in_place(|| tokio::runtime::Handle::current().block_on(future))
}
