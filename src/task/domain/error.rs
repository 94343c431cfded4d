//! Error types for task domain parsing.

use thiserror::Error;

/// Errors returned while constructing domain task values.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TaskDomainError {
    /// The runner identifier is empty after trimming.
    #[error("runner identifier must not be empty")]
    EmptyRunnerId,
}

/// Error returned while parsing a task identifier.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("invalid task identifier: {0}")]
pub struct ParseTaskIdError(pub String);

/// Error returned while parsing an accessibility standard.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown accessibility standard: {0}")]
pub struct ParseStandardError(pub String);

/// Reasons an action string fails the action grammar.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ActionParseError {
    /// The action text is empty or whitespace-only.
    #[error("action must not be empty")]
    Empty,

    /// The leading verb is not part of the grammar.
    #[error("unrecognised action '{0}'")]
    UnrecognisedCommand(String),

    /// A fixed keyword of the command is missing.
    #[error("'{command}' action expects the keyword '{keyword}'")]
    ExpectedKeyword {
        /// Command being parsed.
        command: &'static str,
        /// Keyword that was expected.
        keyword: &'static str,
    },

    /// A required argument of the command is missing.
    #[error("'{command}' action is missing its {argument}")]
    MissingArgument {
        /// Command being parsed.
        command: &'static str,
        /// Name of the missing argument.
        argument: &'static str,
    },

    /// A `wait for` action does not describe a known condition.
    #[error("unrecognised wait condition '{0}'")]
    InvalidWaitCondition(String),
}

/// Reasons a `headers` input cannot be resolved into a header mapping.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum HeadersError {
    /// The JSON-encoded string is not valid JSON.
    #[error("headers string is not valid JSON: {0}")]
    InvalidJson(String),

    /// The input, or the decoded JSON string, is not an object.
    #[error("headers must be an object, got {0}")]
    NotAnObject(&'static str),

    /// A header value is not a string.
    #[error("header '{0}' must have a string value")]
    NonStringValue(String),
}
