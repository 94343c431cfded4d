//! Validated partial edits and the edit applier.

use super::{Action, Annotation, Headers, RunnerId, Standard, Task};
use mockable::Clock;

/// Change to an optional field that an edit may also clear.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldUpdate<T> {
    /// Remove the stored value.
    Clear,
    /// Replace the stored value.
    Set(T),
}

impl<T> FieldUpdate<T> {
    /// Converts the update into the value the field should hold.
    #[must_use]
    pub fn into_option(self) -> Option<T> {
        match self {
            Self::Clear => None,
            Self::Set(value) => Some(value),
        }
    }
}

/// Validated partial edit of a task.
///
/// `None` leaves the stored field untouched. The URL is not editable and
/// therefore has no counterpart here.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskPatch {
    /// New task name.
    pub name: Option<String>,
    /// New scan timeout.
    pub timeout: Option<u64>,
    /// New or cleared pre-scan delay.
    pub wait: Option<FieldUpdate<u64>>,
    /// New accessibility standard.
    pub standard: Option<Standard>,
    /// Replacement ignore list.
    pub ignore: Option<Vec<String>>,
    /// New or cleared hidden element selectors.
    pub hide_elements: Option<FieldUpdate<String>>,
    /// New or cleared request headers.
    pub headers: Option<FieldUpdate<Headers>>,
    /// New or cleared user name.
    pub username: Option<FieldUpdate<String>>,
    /// New or cleared password.
    pub password: Option<FieldUpdate<String>>,
    /// Replacement action list.
    pub actions: Option<Vec<Action>>,
    /// Replacement runner list.
    pub runners: Option<Vec<RunnerId>>,
}

impl TaskPatch {
    /// Returns `true` when the patch changes no field.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self == &Self::default()
    }
}

/// Merges `patch` over `existing` and records the edit.
///
/// Fields absent from the patch keep their stored values. Exactly one
/// [`Annotation`] of kind edit is appended, carrying `comment` and the
/// current clock time in epoch milliseconds, clamped so annotation dates
/// never decrease. The existing task is not modified; the merged task is
/// returned as a whole so callers persist fields and annotation together.
#[must_use]
pub fn apply_edit(existing: &Task, patch: TaskPatch, comment: &str, clock: &impl Clock) -> Task {
    let now = clock.utc();
    let mut data = existing.to_persisted();

    if let Some(name) = patch.name {
        data.name = name;
    }
    if let Some(timeout) = patch.timeout {
        data.timeout = timeout;
    }
    if let Some(wait) = patch.wait {
        data.wait = wait.into_option();
    }
    if let Some(standard) = patch.standard {
        data.standard = standard;
    }
    if let Some(ignore) = patch.ignore {
        data.ignore = ignore;
    }
    if let Some(hide_elements) = patch.hide_elements {
        data.hide_elements = hide_elements.into_option();
    }
    if let Some(headers) = patch.headers {
        data.headers = headers.into_option();
    }
    if let Some(username) = patch.username {
        data.username = username.into_option();
    }
    if let Some(password) = patch.password {
        data.password = password.into_option();
    }
    if let Some(actions) = patch.actions {
        data.actions = actions;
    }
    if let Some(runners) = patch.runners {
        data.runners = runners;
    }

    let previous_date = data.annotations.last().map_or(i64::MIN, Annotation::date);
    let date = now.timestamp_millis().max(previous_date);
    data.annotations = data.annotations.appended(Annotation::edit(comment, date));
    data.updated_at = now.max(data.updated_at);

    Task::from_persisted(data)
}
