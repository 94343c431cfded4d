//! Canonicalization of raw client input into per-field values.
//!
//! Clients send loosely typed JSON: numbers as strings, headers as
//! JSON-encoded text, and so on. [`normalize`] converges each recognised
//! field onto one canonical JSON shape and records structural problems it
//! cannot repair. It never rejects on its own; the task validator reports
//! the recorded problems together with its own findings.

use crate::task::{
    domain::{FieldUpdate, Headers, HeadersInput, TaskField},
    error::ValidationError,
    ports::validator::ValidationConfig,
};
use serde_json::{Map, Number, Value};
use std::collections::BTreeMap;
use std::fmt;

/// Whether a request creates a task or edits an existing one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SubmissionMode {
    /// A new task; create-time defaults apply.
    Create,
    /// A partial edit; absent fields stay untouched.
    Edit,
}

impl SubmissionMode {
    /// Returns a lowercase label for the mode.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Create => "create",
            Self::Edit => "edit",
        }
    }
}

impl fmt::Display for SubmissionMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Canonical field values of one request.
#[derive(Debug, Clone, PartialEq)]
pub struct NormalizedFields {
    mode: SubmissionMode,
    values: BTreeMap<TaskField, Value>,
    headers: Option<FieldUpdate<Headers>>,
    issues: Vec<ValidationError>,
}

impl NormalizedFields {
    fn empty(mode: SubmissionMode) -> Self {
        Self {
            mode,
            values: BTreeMap::new(),
            headers: None,
            issues: Vec::new(),
        }
    }

    /// Returns the mode the fields were normalized for.
    #[must_use]
    pub const fn mode(&self) -> SubmissionMode {
        self.mode
    }

    /// Returns the canonical value of a field, if present.
    ///
    /// `headers` is never returned here; see [`NormalizedFields::headers`].
    #[must_use]
    pub fn get(&self, field: TaskField) -> Option<&Value> {
        self.values.get(&field)
    }

    /// Returns `true` when the request supplied `field`.
    #[must_use]
    pub fn contains(&self, field: TaskField) -> bool {
        if field == TaskField::Headers {
            return self.headers.is_some();
        }
        self.values.contains_key(&field)
    }

    /// Returns the resolved headers update, if headers were supplied and
    /// resolved.
    #[must_use]
    pub const fn headers(&self) -> Option<&FieldUpdate<Headers>> {
        self.headers.as_ref()
    }

    /// Returns structural problems found while normalizing.
    #[must_use]
    pub fn issues(&self) -> &[ValidationError] {
        &self.issues
    }
}

/// Normalizes a raw request body.
///
/// Rules, per field:
/// - `timeout`, `wait`: integer strings become numbers; anything else is
///   passed through for the validator to reject.
/// - `headers`: a JSON-encoded string is decoded; strings that are not
///   valid JSON, and any other non-object value, are recorded as problems.
/// - `actions`: a non-array value is recorded as a problem, not coerced.
/// - `runners`, `ignore`: when absent on create, default to the configured
///   default runner and an empty list.
/// - every other recognised field passes through unchanged.
///
/// On edit, a body naming `url` is rejected before any other field is
/// looked at. Unrecognised keys are recorded as problems.
#[must_use]
pub fn normalize(
    raw: &Value,
    mode: SubmissionMode,
    config: &ValidationConfig,
) -> NormalizedFields {
    let mut fields = NormalizedFields::empty(mode);

    let Some(body) = raw.as_object() else {
        fields.issues.push(ValidationError::NotAnObject);
        return fields;
    };

    if mode == SubmissionMode::Edit
        && let Some(error) = reject_url_edit(body)
    {
        fields.issues.push(error);
        return fields;
    }

    for (key, value) in body {
        let Some(field) = TaskField::from_key(key) else {
            fields
                .issues
                .push(ValidationError::UnknownField(key.clone()));
            continue;
        };
        normalize_field(&mut fields, field, value);
    }

    if mode == SubmissionMode::Create {
        apply_create_defaults(&mut fields, config);
    }

    fields
}

/// Returns the rejection for an edit body that names `url`.
#[must_use]
pub fn reject_url_edit(body: &Map<String, Value>) -> Option<ValidationError> {
    body.contains_key(TaskField::Url.as_str())
        .then_some(ValidationError::ImmutableField(TaskField::Url))
}

fn normalize_field(fields: &mut NormalizedFields, field: TaskField, value: &Value) {
    match field {
        TaskField::Timeout | TaskField::Wait => {
            fields.values.insert(field, coerce_integer(value));
        }
        TaskField::Headers => match normalize_headers(value) {
            Ok(update) => fields.headers = Some(update),
            Err(error) => fields.issues.push(error),
        },
        TaskField::Actions if !value.is_array() => {
            fields.issues.push(ValidationError::WrongType {
                field,
                expected: "an array of strings",
            });
        }
        _ => {
            fields.values.insert(field, value.clone());
        }
    }
}

fn normalize_headers(value: &Value) -> Result<FieldUpdate<Headers>, ValidationError> {
    if value.is_null() {
        return Ok(FieldUpdate::Clear);
    }
    HeadersInput::from_value(value.clone())
        .and_then(HeadersInput::resolve)
        .map(FieldUpdate::Set)
        .map_err(ValidationError::InvalidHeaders)
}

fn apply_create_defaults(fields: &mut NormalizedFields, config: &ValidationConfig) {
    fields
        .values
        .entry(TaskField::Runners)
        .or_insert_with(|| Value::Array(vec![Value::String(config.default_runner.clone())]));
    fields
        .values
        .entry(TaskField::Ignore)
        .or_insert_with(|| Value::Array(Vec::new()));
}

/// Converts integer strings into JSON numbers.
///
/// Surrounding whitespace is ignored. Values that are not integer strings
/// are returned unchanged.
#[must_use]
pub fn coerce_integer(value: &Value) -> Value {
    let Value::String(text) = value else {
        return value.clone();
    };
    let trimmed = text.trim();
    if let Ok(parsed) = trimmed.parse::<u64>() {
        return Value::Number(Number::from(parsed));
    }
    if let Ok(parsed) = trimmed.parse::<i64>() {
        return Value::Number(Number::from(parsed));
    }
    value.clone()
}
