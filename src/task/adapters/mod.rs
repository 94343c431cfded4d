//! Persistence adapters for the task module.
//!
//! # Available Adapters
//!
//! - [`memory::InMemoryTaskRepository`]: thread-safe in-memory storage with
//!   revision-checked writes
//!
//! Durable backends implement [`TaskRepository`] the same way: one JSON
//! document per task plus a revision that advances on every write.
//!
//! [`TaskRepository`]: crate::task::ports::repository::TaskRepository

pub mod memory;
