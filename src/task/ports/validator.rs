//! Validator port for task create and edit requests.
//!
//! Defines the abstract interface that turns normalized request fields into
//! validated domain values, and the configuration the rules read.

use crate::task::{
    domain::{TaskDraft, TaskPatch},
    error::ValidationError,
    normalize::NormalizedFields,
};
use serde::Deserialize;
use thiserror::Error;

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

/// Port for task request validation.
///
/// # Implementation Notes
///
/// Implementations should:
/// - Collect all validation errors before returning (not fail-fast)
/// - Use `ValidationError::multiple` to combine errors
/// - Include problems the normalizer already flagged
/// - Be stateless and thread-safe
pub trait TaskValidator: Send + Sync {
    /// Returns the configuration the rules are checked against.
    fn config(&self) -> &ValidationConfig;

    /// Validates the fields of a create request.
    ///
    /// # Errors
    ///
    /// Returns `ValidationError` if any create-time rule fails. Multiple
    /// failures are combined using `ValidationError::Multiple`.
    fn validate_create(&self, fields: &NormalizedFields) -> ValidationResult<TaskDraft>;

    /// Validates the fields of an edit request.
    ///
    /// # Errors
    ///
    /// Returns `ValidationError` if any edit-time rule fails. Multiple
    /// failures are combined using `ValidationError::Multiple`.
    fn validate_edit(&self, fields: &NormalizedFields) -> ValidationResult<TaskPatch>;
}

/// Configuration for task validation rules.
///
/// Every field has a default, so a partial JSON document is accepted.
///
/// # Examples
///
/// ```
/// use sightline::task::ports::validator::ValidationConfig;
///
/// let config = ValidationConfig::default();
/// assert_eq!(config.default_runner, "htmlcs");
///
/// let custom = ValidationConfig::from_json(r#"{"default_timeout_ms": 60000}"#)
///     .expect("valid config");
/// assert_eq!(custom.default_timeout_ms, 60_000);
/// assert_eq!(custom.known_runners, vec!["axe", "htmlcs"]);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ValidationConfig {
    /// Runner identifiers tasks may use.
    pub known_runners: Vec<String>,
    /// Runner assigned to tasks created without `runners`.
    pub default_runner: String,
    /// Timeout assigned to tasks created without `timeout`.
    pub default_timeout_ms: u64,
    /// Maximum task name length in characters.
    pub max_name_length: usize,
}

impl Default for ValidationConfig {
    fn default() -> Self {
        Self {
            known_runners: vec!["axe".to_owned(), "htmlcs".to_owned()],
            default_runner: "htmlcs".to_owned(),
            default_timeout_ms: 30_000,
            max_name_length: 1024,
        }
    }
}

impl ValidationConfig {
    /// Parses and checks a configuration from JSON text.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Parse`] for malformed JSON, or any error from
    /// [`ValidationConfig::validate`].
    pub fn from_json(text: &str) -> Result<Self, ConfigError> {
        let config: Self =
            serde_json::from_str(text).map_err(|err| ConfigError::Parse(err.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Checks the configuration is internally consistent.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when no runners are known or the default
    /// runner is not among them. A zero default timeout or name length limit
    /// is also rejected.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.known_runners.is_empty() {
            return Err(ConfigError::NoKnownRunners);
        }
        if !self.is_known_runner(&self.default_runner) {
            return Err(ConfigError::UnknownDefaultRunner(
                self.default_runner.clone(),
            ));
        }
        if self.default_timeout_ms == 0 {
            return Err(ConfigError::ZeroDefaultTimeout);
        }
        if self.max_name_length == 0 {
            return Err(ConfigError::ZeroNameLength);
        }
        Ok(())
    }

    /// Returns `true` when `runner` is one of the known runners.
    #[must_use]
    pub fn is_known_runner(&self, runner: &str) -> bool {
        self.known_runners.iter().any(|known| known == runner)
    }
}

/// Errors in a [`ValidationConfig`].
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ConfigError {
    /// The configuration text is not valid.
    #[error("invalid validation config: {0}")]
    Parse(String),

    /// No runners are configured.
    #[error("at least one known runner must be configured")]
    NoKnownRunners,

    /// The default runner is not among the known runners.
    #[error("default runner '{0}' is not a known runner")]
    UnknownDefaultRunner(String),

    /// The default timeout is zero.
    #[error("default timeout must be greater than zero")]
    ZeroDefaultTimeout,

    /// The name length limit is zero, which no name could satisfy.
    #[error("maximum name length must be greater than zero")]
    ZeroNameLength,
}
