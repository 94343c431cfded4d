//! Individual validation rule implementations.
//!
//! Each rule is a pure function over one normalized JSON value. Rules return
//! the validated domain value on success or a specific `ValidationError`.

use crate::task::{
    domain::{Action, FieldUpdate, RunnerId, Standard, TaskField},
    error::ValidationError,
    ports::validator::ValidationConfig,
};
use serde_json::Value;

const STRING: &str = "a string";
const INTEGER: &str = "an integer";
const STRING_ARRAY: &str = "an array of strings";

/// Validates a task name: a non-empty string within the length limit.
///
/// # Errors
///
/// Returns `NullField`, `WrongType`, `EmptyField`, or `TooLong` for `name`.
pub fn validate_name(value: &Value, config: &ValidationConfig) -> Result<String, ValidationError> {
    let name = require_string(TaskField::Name, value)?.trim();
    if name.is_empty() {
        return Err(ValidationError::EmptyField(TaskField::Name));
    }
    if name.chars().count() > config.max_name_length {
        return Err(ValidationError::TooLong {
            field: TaskField::Name,
            max: config.max_name_length,
        });
    }
    Ok(name.to_owned())
}

/// Validates the page URL: a non-empty string.
///
/// # Errors
///
/// Returns `NullField`, `WrongType`, or `EmptyField` for `url`.
pub fn validate_url(value: &Value) -> Result<String, ValidationError> {
    let url = require_string(TaskField::Url, value)?.trim();
    if url.is_empty() {
        return Err(ValidationError::EmptyField(TaskField::Url));
    }
    Ok(url.to_owned())
}

/// Validates the scan timeout: an integer of at least 1 millisecond.
///
/// # Errors
///
/// Returns `NullField`, `WrongType`, or `OutOfRange` for `timeout`.
pub fn validate_timeout(value: &Value) -> Result<u64, ValidationError> {
    require_integer(TaskField::Timeout, value, 1)
}

/// Validates the pre-scan delay: a non-negative integer.
///
/// # Errors
///
/// Returns `NullField`, `WrongType`, or `OutOfRange` for `wait`.
pub fn validate_wait(value: &Value) -> Result<u64, ValidationError> {
    require_integer(TaskField::Wait, value, 0)
}

/// Validates the accessibility standard against the supported standards.
///
/// # Errors
///
/// Returns `NullField` or `WrongType` for non-string values and
/// `UnknownStandard` for unsupported names.
pub fn validate_standard(value: &Value) -> Result<Standard, ValidationError> {
    let name = require_string(TaskField::Standard, value)?;
    Standard::try_from(name).map_err(|err| ValidationError::UnknownStandard(err.0))
}

/// Validates the ignore list: an array of rule identifier strings.
///
/// # Errors
///
/// Returns `NullField` or `WrongType` for `ignore`.
pub fn validate_ignore(value: &Value) -> Result<Vec<String>, ValidationError> {
    require_array(TaskField::Ignore, value)?
        .iter()
        .map(|rule| {
            rule.as_str()
                .map(str::to_owned)
                .ok_or(ValidationError::WrongType {
                    field: TaskField::Ignore,
                    expected: STRING_ARRAY,
                })
        })
        .collect()
}

/// Validates an optional string field; `null` clears the field.
///
/// # Errors
///
/// Returns `WrongType` when the value is neither a string nor `null`.
pub fn validate_optional_string(
    field: TaskField,
    value: &Value,
) -> Result<FieldUpdate<String>, ValidationError> {
    match value {
        Value::Null => Ok(FieldUpdate::Clear),
        Value::String(text) => Ok(FieldUpdate::Set(text.clone())),
        _ => Err(ValidationError::WrongType {
            field,
            expected: STRING,
        }),
    }
}

/// Validates the action list: every entry must match the action grammar.
///
/// One invalid entry rejects the whole list; every invalid entry is
/// reported.
///
/// # Errors
///
/// Returns `NullField` or `WrongType` for non-array values, and
/// `InvalidAction` or `WrongType` for each bad entry.
pub fn validate_actions(value: &Value) -> Result<Vec<Action>, ValidationError> {
    let entries = require_array(TaskField::Actions, value)?;
    let mut actions = Vec::with_capacity(entries.len());
    let mut errors = Vec::new();

    for (index, entry) in entries.iter().enumerate() {
        let Some(text) = entry.as_str() else {
            errors.push(ValidationError::WrongType {
                field: TaskField::Actions,
                expected: STRING_ARRAY,
            });
            continue;
        };
        match Action::parse(text) {
            Ok(action) => actions.push(action),
            Err(source) => errors.push(ValidationError::InvalidAction { index, source }),
        }
    }

    ValidationError::multiple(errors).map_or(Ok(actions), Err)
}

/// Validates the runner list: a non-empty array of known runner names.
///
/// # Errors
///
/// Returns `NullField` or `WrongType` for non-array values, `EmptyRunners`
/// for an empty array, and `WrongType` or `UnknownRunner` for each bad entry.
pub fn validate_runners(
    value: &Value,
    config: &ValidationConfig,
) -> Result<Vec<RunnerId>, ValidationError> {
    let entries = require_array(TaskField::Runners, value)?;
    if entries.is_empty() {
        return Err(ValidationError::EmptyRunners);
    }

    let mut runners = Vec::with_capacity(entries.len());
    let mut errors = Vec::new();
    for entry in entries {
        let Some(name) = entry.as_str() else {
            errors.push(ValidationError::WrongType {
                field: TaskField::Runners,
                expected: STRING_ARRAY,
            });
            continue;
        };
        match RunnerId::new(name) {
            Ok(runner) if config.is_known_runner(runner.as_str()) => runners.push(runner),
            _ => errors.push(ValidationError::UnknownRunner(name.to_owned())),
        }
    }

    ValidationError::multiple(errors).map_or(Ok(runners), Err)
}

fn require_string(field: TaskField, value: &Value) -> Result<&str, ValidationError> {
    match value {
        Value::Null => Err(ValidationError::NullField(field)),
        Value::String(text) => Ok(text),
        _ => Err(ValidationError::WrongType {
            field,
            expected: STRING,
        }),
    }
}

fn require_array(field: TaskField, value: &Value) -> Result<&[Value], ValidationError> {
    match value {
        Value::Null => Err(ValidationError::NullField(field)),
        Value::Array(entries) => Ok(entries),
        _ => Err(ValidationError::WrongType {
            field,
            expected: STRING_ARRAY,
        }),
    }
}

fn require_integer(field: TaskField, value: &Value, minimum: u64) -> Result<u64, ValidationError> {
    let out_of_range = |shown: String| ValidationError::OutOfRange {
        field,
        value: shown,
        minimum,
    };
    match value {
        Value::Null => Err(ValidationError::NullField(field)),
        Value::Number(number) => match (number.as_u64(), number.as_i64()) {
            (Some(parsed), _) if parsed >= minimum => Ok(parsed),
            (Some(_), _) | (None, Some(_)) => Err(out_of_range(number.to_string())),
            (None, None) => Err(ValidationError::WrongType {
                field,
                expected: INTEGER,
            }),
        },
        _ => Err(ValidationError::WrongType {
            field,
            expected: INTEGER,
        }),
    }
}
