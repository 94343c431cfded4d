//! Validation error types for task create and edit requests.
//!
//! Uses `thiserror` for typed variants that callers can inspect to report
//! which fields of a request were rejected.

use super::{
    domain::{ActionParseError, HeadersError, TaskField},
    normalize::SubmissionMode,
};
use thiserror::Error;

/// Reasons a create or edit request is rejected.
///
/// A rejected request never mutates stored state.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ValidationError {
    /// The request body is not a JSON object.
    #[error("request body must be a JSON object")]
    NotAnObject,

    /// The request names a field that tasks do not have.
    #[error("unknown field '{0}'")]
    UnknownField(String),

    /// A required field is absent.
    #[error("field '{0}' is required")]
    MissingField(TaskField),

    /// A field that must hold a value is `null`.
    #[error("field '{0}' must not be null")]
    NullField(TaskField),

    /// A string field is empty after trimming.
    #[error("field '{0}' must not be empty")]
    EmptyField(TaskField),

    /// A string field exceeds its length limit.
    #[error("field '{field}' exceeds {max} characters")]
    TooLong {
        /// The offending field.
        field: TaskField,
        /// Maximum allowed length in characters.
        max: usize,
    },

    /// A field holds a value of the wrong JSON type.
    #[error("field '{field}' must be {expected}")]
    WrongType {
        /// The offending field.
        field: TaskField,
        /// Description of the expected type.
        expected: &'static str,
    },

    /// A numeric field is below its minimum.
    #[error("field '{field}' must be at least {minimum}, got {value}")]
    OutOfRange {
        /// The offending field.
        field: TaskField,
        /// The rejected value as supplied.
        value: String,
        /// Smallest accepted value.
        minimum: u64,
    },

    /// The standard is not one of the supported standards.
    #[error("unknown accessibility standard '{0}'")]
    UnknownStandard(String),

    /// A runner is not one of the known runners.
    #[error("unknown runner '{0}'")]
    UnknownRunner(String),

    /// The runner list is empty.
    #[error("runners must contain at least one runner")]
    EmptyRunners,

    /// An action does not match the action grammar.
    #[error("invalid action at index {index}: {source}")]
    InvalidAction {
        /// Position of the action in the list.
        index: usize,
        /// Grammar failure.
        source: ActionParseError,
    },

    /// The headers input cannot be resolved into a mapping.
    #[error("invalid headers: {0}")]
    InvalidHeaders(HeadersError),

    /// The request tries to change a field fixed at creation.
    #[error("field '{0}' cannot be changed after creation")]
    ImmutableField(TaskField),

    /// The edit comment is not a string.
    #[error("edit comment must be a string")]
    InvalidComment,

    /// Fields normalized for one kind of submission were validated as the
    /// other.
    #[error("fields were normalized for {found}, not {expected}")]
    ModeMismatch {
        /// Mode the validator requires.
        expected: SubmissionMode,
        /// Mode the fields were normalized for.
        found: SubmissionMode,
    },

    /// Multiple validation errors occurred.
    #[error("multiple validation errors: {}", format_errors(.0))]
    Multiple(Vec<Self>),
}

fn format_errors(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

impl ValidationError {
    /// Combines validation errors into a single error.
    ///
    /// A single error is returned as-is, nested `Multiple` values are
    /// flattened, and an empty list yields `None`.
    #[must_use]
    pub fn multiple(errors: Vec<Self>) -> Option<Self> {
        let mut flattened = Vec::with_capacity(errors.len());
        for error in errors {
            match error {
                Self::Multiple(inner) => flattened.extend(inner),
                other => flattened.push(other),
            }
        }
        if flattened.len() > 1 {
            return Some(Self::Multiple(flattened));
        }
        flattened.pop()
    }

    /// Combines two errors into one `Multiple`, flattening either side.
    #[must_use]
    pub fn combine(self, other: Self) -> Self {
        let mut errors = self.into_errors();
        errors.extend(other.into_errors());
        Self::Multiple(errors)
    }

    fn into_errors(self) -> Vec<Self> {
        match self {
            Self::Multiple(errors) => errors,
            single => vec![single],
        }
    }

    /// Returns the individual errors if this is a `Multiple` variant.
    #[must_use]
    pub fn errors(&self) -> Option<&[Self]> {
        match self {
            Self::Multiple(errors) => Some(errors),
            _ => None,
        }
    }

    /// Returns the wire name of the field this error concerns, if any.
    #[must_use]
    pub fn field_name(&self) -> Option<&str> {
        let field = match self {
            Self::UnknownField(name) => return Some(name.as_str()),
            Self::NotAnObject
            | Self::InvalidComment
            | Self::ModeMismatch { .. }
            | Self::Multiple(_) => return None,
            Self::MissingField(field)
            | Self::NullField(field)
            | Self::EmptyField(field)
            | Self::ImmutableField(field)
            | Self::TooLong { field, .. }
            | Self::WrongType { field, .. }
            | Self::OutOfRange { field, .. } => *field,
            Self::UnknownStandard(_) => TaskField::Standard,
            Self::UnknownRunner(_) | Self::EmptyRunners => TaskField::Runners,
            Self::InvalidAction { .. } => TaskField::Actions,
            Self::InvalidHeaders(_) => TaskField::Headers,
        };
        Some(field.as_str())
    }

    /// Returns the sorted, de-duplicated names of every rejected field.
    #[must_use]
    pub fn field_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = match self {
            Self::Multiple(errors) => errors.iter().filter_map(Self::field_name).collect(),
            single => single.field_name().into_iter().collect(),
        };
        names.sort_unstable();
        names.dedup();
        names
    }
}
