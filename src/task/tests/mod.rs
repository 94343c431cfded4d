//! Unit tests for the task module.
//!
//! Tests are organised by concern: the action grammar, input normalization,
//! field validation, the domain model and edit applier, the in-memory
//! repository, and service orchestration.

mod support;
