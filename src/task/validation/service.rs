//! Validation service implementation.
//!
//! Provides the default implementation of the `TaskValidator` port,
//! combining the per-field rules into create-time and edit-time checks.

use crate::task::{
    domain::{FieldUpdate, RunnerId, TaskDraft, TaskField, TaskPatch},
    error::ValidationError,
    normalize::{NormalizedFields, SubmissionMode},
    ports::validator::{ConfigError, TaskValidator, ValidationConfig, ValidationResult},
    validation::rules,
};
use serde_json::Value;

/// Default implementation of the task validator.
///
/// Applies every rule, collecting errors to report all rejected fields
/// rather than failing on the first one.
///
/// # Examples
///
/// ```
/// use serde_json::json;
/// use sightline::task::normalize::{normalize, SubmissionMode};
/// use sightline::task::ports::validator::TaskValidator;
/// use sightline::task::validation::service::DefaultTaskValidator;
///
/// let validator = DefaultTaskValidator::new();
/// let body = json!({
///     "name": "Home page",
///     "url": "https://example.com/",
///     "standard": "WCAG2AA",
/// });
/// let fields = normalize(&body, SubmissionMode::Create, validator.config());
///
/// let draft = validator.validate_create(&fields).expect("valid task");
/// assert_eq!(draft.timeout, 30_000);
/// assert_eq!(draft.runners.len(), 1);
/// ```
#[derive(Debug, Clone, Default)]
pub struct DefaultTaskValidator {
    config: ValidationConfig,
}

impl DefaultTaskValidator {
    /// Creates a new validator with default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a new validator with custom configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when the configuration is inconsistent, such
    /// as a default runner missing from the known runners.
    pub fn with_config(config: ValidationConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self { config })
    }

    fn default_runner(&self) -> ValidationResult<RunnerId> {
        RunnerId::new(self.config.default_runner.as_str())
            .map_err(|_| ValidationError::UnknownRunner(self.config.default_runner.clone()))
    }
}

impl TaskValidator for DefaultTaskValidator {
    fn config(&self) -> &ValidationConfig {
        &self.config
    }

    fn validate_create(&self, fields: &NormalizedFields) -> ValidationResult<TaskDraft> {
        require_mode(fields, SubmissionMode::Create)?;
        let mut errors = Errors::from_issues(fields);

        let required = (
            errors.required(fields, TaskField::Name, |value| {
                rules::validate_name(value, &self.config)
            }),
            errors.required(fields, TaskField::Url, rules::validate_url),
            errors.required(fields, TaskField::Standard, rules::validate_standard),
            errors.take(self.default_runner()),
        );

        let timeout = errors
            .optional(fields, TaskField::Timeout, rules::validate_timeout)
            .unwrap_or(self.config.default_timeout_ms);
        let wait = errors
            .clearable(fields, TaskField::Wait, rules::validate_wait)
            .and_then(FieldUpdate::into_option);
        let ignore = errors.optional(fields, TaskField::Ignore, rules::validate_ignore);
        let hide_elements = errors.optional_string(fields, TaskField::HideElements);
        let username = errors.optional_string(fields, TaskField::Username);
        let password = errors.optional_string(fields, TaskField::Password);
        let actions = errors.optional(fields, TaskField::Actions, rules::validate_actions);
        let runners = errors.optional(fields, TaskField::Runners, |value| {
            rules::validate_runners(value, &self.config)
        });

        errors.finish()?;
        let (Some(name), Some(url), Some(standard), Some(default_runner)) = required else {
            // A missing required value always records an error above.
            return Err(ValidationError::MissingField(TaskField::Name));
        };

        let mut draft = TaskDraft::new(name, url, standard, timeout, default_runner);
        draft.wait = wait;
        draft.ignore = ignore.unwrap_or_default();
        draft.hide_elements = hide_elements;
        draft.headers = fields.headers().cloned().and_then(FieldUpdate::into_option);
        draft.username = username;
        draft.password = password;
        draft.actions = actions.unwrap_or_default();
        if let Some(runners) = runners {
            draft.runners = runners;
        }
        Ok(draft)
    }

    fn validate_edit(&self, fields: &NormalizedFields) -> ValidationResult<TaskPatch> {
        require_mode(fields, SubmissionMode::Edit)?;
        let mut errors = Errors::from_issues(fields);

        let patch = TaskPatch {
            name: errors.optional(fields, TaskField::Name, |value| {
                rules::validate_name(value, &self.config)
            }),
            timeout: errors.optional(fields, TaskField::Timeout, rules::validate_timeout),
            wait: errors.clearable(fields, TaskField::Wait, rules::validate_wait),
            standard: errors.optional(fields, TaskField::Standard, rules::validate_standard),
            ignore: errors.optional(fields, TaskField::Ignore, rules::validate_ignore),
            hide_elements: errors.string_update(fields, TaskField::HideElements),
            headers: fields.headers().cloned(),
            username: errors.string_update(fields, TaskField::Username),
            password: errors.string_update(fields, TaskField::Password),
            actions: errors.optional(fields, TaskField::Actions, rules::validate_actions),
            runners: errors.optional(fields, TaskField::Runners, |value| {
                rules::validate_runners(value, &self.config)
            }),
        };

        errors.finish()?;
        Ok(patch)
    }
}

/// Create defaults are filled in during normalization, so fields may only
/// be validated for the mode they were normalized for.
fn require_mode(fields: &NormalizedFields, expected: SubmissionMode) -> ValidationResult<()> {
    let found = fields.mode();
    if found == expected {
        return Ok(());
    }
    Err(ValidationError::ModeMismatch { expected, found })
}

/// Accumulates rule failures while a request is checked field by field.
struct Errors(Vec<ValidationError>);

impl Errors {
    fn from_issues(fields: &NormalizedFields) -> Self {
        Self(fields.issues().to_vec())
    }

    fn push(&mut self, error: ValidationError) {
        match error {
            ValidationError::Multiple(inner) => self.0.extend(inner),
            other => self.0.push(other),
        }
    }

    fn take<T>(&mut self, result: ValidationResult<T>) -> Option<T> {
        match result {
            Ok(value) => Some(value),
            Err(error) => {
                self.push(error);
                None
            }
        }
    }

    fn required<T>(
        &mut self,
        fields: &NormalizedFields,
        field: TaskField,
        rule: impl FnOnce(&Value) -> ValidationResult<T>,
    ) -> Option<T> {
        let Some(value) = fields.get(field) else {
            self.push(ValidationError::MissingField(field));
            return None;
        };
        self.take(rule(value))
    }

    fn optional<T>(
        &mut self,
        fields: &NormalizedFields,
        field: TaskField,
        rule: impl FnOnce(&Value) -> ValidationResult<T>,
    ) -> Option<T> {
        let value = fields.get(field)?;
        self.take(rule(value))
    }

    /// Like `optional`, but `null` clears the field instead of failing.
    fn clearable<T>(
        &mut self,
        fields: &NormalizedFields,
        field: TaskField,
        rule: impl FnOnce(&Value) -> ValidationResult<T>,
    ) -> Option<FieldUpdate<T>> {
        match fields.get(field)? {
            Value::Null => Some(FieldUpdate::Clear),
            value => self.take(rule(value)).map(FieldUpdate::Set),
        }
    }

    fn string_update(
        &mut self,
        fields: &NormalizedFields,
        field: TaskField,
    ) -> Option<FieldUpdate<String>> {
        self.optional(fields, field, |value| {
            rules::validate_optional_string(field, value)
        })
    }

    fn optional_string(&mut self, fields: &NormalizedFields, field: TaskField) -> Option<String> {
        self.string_update(fields, field)
            .and_then(FieldUpdate::into_option)
    }

    fn finish(self) -> ValidationResult<()> {
        ValidationError::multiple(self.0).map_or(Ok(()), Err)
    }
}
