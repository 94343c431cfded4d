//! Port contracts for task management.
//!
//! Ports define infrastructure-agnostic interfaces used by task services.

pub mod repository;
pub mod validator;

pub use repository::{StoredTask, TaskRepository, TaskRepositoryError, TaskRepositoryResult};
pub use validator::{ConfigError, TaskValidator, ValidationConfig, ValidationResult};
