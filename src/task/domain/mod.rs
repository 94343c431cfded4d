//! Domain model for accessibility check tasks.
//!
//! The task domain models the stored task shape, its append-only edit
//! history, the action grammar, and the pure edit applier. Persistence and
//! request handling stay outside the domain boundary.

mod action;
mod annotation;
mod edit;
mod error;
mod field;
mod headers;
mod ids;
mod standard;
mod task;

pub use action::{Action, ActionCommand, ElementState, UrlPart, is_valid_action};
pub use annotation::{Annotation, AnnotationKind, AnnotationLog};
pub use edit::{FieldUpdate, TaskPatch, apply_edit};
pub use error::{
    ActionParseError, HeadersError, ParseStandardError, ParseTaskIdError, TaskDomainError,
};
pub use field::TaskField;
pub use headers::{Headers, HeadersInput};
pub use ids::{Revision, TaskId};
pub use standard::{RunnerId, Standard};
pub use task::{PersistedTaskData, Task, TaskDraft};
