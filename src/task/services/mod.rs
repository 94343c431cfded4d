//! Application services for task submission and retrieval.

mod lifecycle;

pub use lifecycle::{
    CreateTaskRequest, DEFAULT_MAX_EDIT_ATTEMPTS, EditTaskRequest, TaskLifecycleError,
    TaskLifecycleResult, TaskLifecycleService,
};
