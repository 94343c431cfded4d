//! Task aggregate root and the validated create payload.

use super::{Action, AnnotationLog, Headers, RunnerId, Standard, TaskId};
use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};

/// Validated field set for a new task.
///
/// Produced by the task validator once every create-time rule has passed.
/// Defaults for omitted optional fields are already resolved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskDraft {
    /// Trimmed, non-empty task name.
    pub name: String,
    /// Page under test.
    pub url: String,
    /// Scan timeout in milliseconds.
    pub timeout: u64,
    /// Delay before scanning in milliseconds.
    pub wait: Option<u64>,
    /// Accessibility standard.
    pub standard: Standard,
    /// Ignored rule identifiers.
    pub ignore: Vec<String>,
    /// CSS selectors hidden before scanning.
    pub hide_elements: Option<String>,
    /// Extra request headers.
    pub headers: Option<Headers>,
    /// Basic authentication user name.
    pub username: Option<String>,
    /// Basic authentication password.
    pub password: Option<String>,
    /// Scripted actions.
    pub actions: Vec<Action>,
    /// Runners to execute; never empty.
    pub runners: Vec<RunnerId>,
}

impl TaskDraft {
    /// Creates a draft with the required fields and default optional fields.
    #[must_use]
    pub fn new(
        name: impl Into<String>,
        url: impl Into<String>,
        standard: Standard,
        timeout: u64,
        default_runner: RunnerId,
    ) -> Self {
        Self {
            name: name.into(),
            url: url.into(),
            timeout,
            wait: None,
            standard,
            ignore: Vec::new(),
            hide_elements: None,
            headers: None,
            username: None,
            password: None,
            actions: Vec::new(),
            runners: vec![default_runner],
        }
    }
}

/// Stored accessibility check configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    id: TaskId,
    name: String,
    url: String,
    timeout: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    wait: Option<u64>,
    standard: Standard,
    #[serde(default)]
    ignore: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    hide_elements: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    headers: Option<Headers>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    username: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    password: Option<String>,
    #[serde(default)]
    actions: Vec<Action>,
    runners: Vec<RunnerId>,
    #[serde(default)]
    annotations: AnnotationLog,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

/// Parameter object for reconstructing a task from stored fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedTaskData {
    /// Task identifier.
    pub id: TaskId,
    /// Task name.
    pub name: String,
    /// Page under test.
    pub url: String,
    /// Scan timeout in milliseconds.
    pub timeout: u64,
    /// Delay before scanning in milliseconds.
    pub wait: Option<u64>,
    /// Accessibility standard.
    pub standard: Standard,
    /// Ignored rule identifiers.
    pub ignore: Vec<String>,
    /// CSS selectors hidden before scanning.
    pub hide_elements: Option<String>,
    /// Extra request headers.
    pub headers: Option<Headers>,
    /// Basic authentication user name.
    pub username: Option<String>,
    /// Basic authentication password.
    pub password: Option<String>,
    /// Scripted actions.
    pub actions: Vec<Action>,
    /// Runners to execute.
    pub runners: Vec<RunnerId>,
    /// Edit history.
    pub annotations: AnnotationLog,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Latest edit timestamp.
    pub updated_at: DateTime<Utc>,
}

impl Task {
    /// Creates a new task from a validated draft with a fresh identifier and
    /// an empty annotation log.
    #[must_use]
    pub fn create(draft: TaskDraft, clock: &impl Clock) -> Self {
        let timestamp = clock.utc();
        Self {
            id: TaskId::new(),
            name: draft.name,
            url: draft.url,
            timeout: draft.timeout,
            wait: draft.wait,
            standard: draft.standard,
            ignore: draft.ignore,
            hide_elements: draft.hide_elements,
            headers: draft.headers,
            username: draft.username,
            password: draft.password,
            actions: draft.actions,
            runners: draft.runners,
            annotations: AnnotationLog::new(),
            created_at: timestamp,
            updated_at: timestamp,
        }
    }

    /// Reconstructs a task from persisted storage.
    #[must_use]
    pub fn from_persisted(data: PersistedTaskData) -> Self {
        Self {
            id: data.id,
            name: data.name,
            url: data.url,
            timeout: data.timeout,
            wait: data.wait,
            standard: data.standard,
            ignore: data.ignore,
            hide_elements: data.hide_elements,
            headers: data.headers,
            username: data.username,
            password: data.password,
            actions: data.actions,
            runners: data.runners,
            annotations: data.annotations,
            created_at: data.created_at,
            updated_at: data.updated_at,
        }
    }

    /// Returns the stored fields as a parameter object.
    #[must_use]
    pub fn to_persisted(&self) -> PersistedTaskData {
        PersistedTaskData {
            id: self.id,
            name: self.name.clone(),
            url: self.url.clone(),
            timeout: self.timeout,
            wait: self.wait,
            standard: self.standard,
            ignore: self.ignore.clone(),
            hide_elements: self.hide_elements.clone(),
            headers: self.headers.clone(),
            username: self.username.clone(),
            password: self.password.clone(),
            actions: self.actions.clone(),
            runners: self.runners.clone(),
            annotations: self.annotations.clone(),
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }

    /// Returns the task identifier.
    #[must_use]
    pub const fn id(&self) -> TaskId {
        self.id
    }

    /// Returns the task name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the page under test.
    #[must_use]
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Returns the scan timeout in milliseconds.
    #[must_use]
    pub const fn timeout(&self) -> u64 {
        self.timeout
    }

    /// Returns the pre-scan delay in milliseconds, if set.
    #[must_use]
    pub const fn wait(&self) -> Option<u64> {
        self.wait
    }

    /// Returns the accessibility standard.
    #[must_use]
    pub const fn standard(&self) -> Standard {
        self.standard
    }

    /// Returns the ignored rule identifiers.
    #[must_use]
    pub fn ignore(&self) -> &[String] {
        &self.ignore
    }

    /// Returns the hidden element selectors, if set.
    #[must_use]
    pub fn hide_elements(&self) -> Option<&str> {
        self.hide_elements.as_deref()
    }

    /// Returns the extra request headers, if set.
    #[must_use]
    pub const fn headers(&self) -> Option<&Headers> {
        self.headers.as_ref()
    }

    /// Returns the basic authentication user name, if set.
    #[must_use]
    pub fn username(&self) -> Option<&str> {
        self.username.as_deref()
    }

    /// Returns the basic authentication password, if set.
    #[must_use]
    pub fn password(&self) -> Option<&str> {
        self.password.as_deref()
    }

    /// Returns the scripted actions.
    #[must_use]
    pub fn actions(&self) -> &[Action] {
        &self.actions
    }

    /// Returns the runners to execute.
    #[must_use]
    pub fn runners(&self) -> &[RunnerId] {
        &self.runners
    }

    /// Returns the edit history.
    #[must_use]
    pub const fn annotations(&self) -> &AnnotationLog {
        &self.annotations
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Returns the latest edit timestamp.
    #[must_use]
    pub const fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }
}
