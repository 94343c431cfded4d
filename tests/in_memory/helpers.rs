//! Shared helpers for in-memory task service integration tests.

use std::sync::Arc;

use mockable::DefaultClock;
use rstest::fixture;
use serde_json::{Value, json};
use sightline::task::{
    adapters::memory::InMemoryTaskRepository,
    domain::Task,
    services::{CreateTaskRequest, TaskLifecycleService},
};

/// Service type used by the integration tests.
pub type TestService = TaskLifecycleService<InMemoryTaskRepository, DefaultClock>;

/// Provides a service over a fresh in-memory repository.
#[fixture]
pub fn service() -> TestService {
    TaskLifecycleService::new(
        Arc::new(InMemoryTaskRepository::new()),
        Arc::new(DefaultClock),
    )
}

/// The create body used across scenarios.
pub fn npg_home() -> Value {
    json!({
        "name": "NPG Home",
        "url": "nature.com",
        "standard": "WCAG2AA",
    })
}

/// Creates the standard task and returns it.
///
/// # Errors
///
/// Returns an error if the service rejects the task.
pub async fn create_npg_home(service: &TestService) -> Result<Task, eyre::Report> {
    service
        .submit_create(CreateTaskRequest::new(npg_home()))
        .await
        .map_err(|err| eyre::eyre!("create task: {err}"))
}

/// Reads a stored task back as JSON.
///
/// # Errors
///
/// Returns an error if the task cannot be found or serialized.
pub async fn stored_json(service: &TestService, task: &Task) -> Result<Value, eyre::Report> {
    let stored = service
        .get(&task.id().to_string())
        .await
        .map_err(|err| eyre::eyre!("lookup task: {err}"))?;
    Ok(serde_json::to_value(stored)?)
}
