//! Append-only audit annotations recorded on every accepted edit.

use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Kind of event an annotation records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AnnotationKind {
    /// The task configuration was edited.
    Edit,
}

/// Immutable record of one accepted edit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Annotation {
    #[serde(rename = "type")]
    kind: AnnotationKind,
    comment: String,
    date: i64,
}

impl Annotation {
    /// Creates an edit annotation dated `date` epoch milliseconds.
    #[must_use]
    pub fn edit(comment: impl Into<String>, date: i64) -> Self {
        Self {
            kind: AnnotationKind::Edit,
            comment: comment.into(),
            date,
        }
    }

    /// Returns the annotation kind.
    #[must_use]
    pub const fn kind(&self) -> AnnotationKind {
        self.kind
    }

    /// Returns the editor's comment, possibly empty.
    #[must_use]
    pub fn comment(&self) -> &str {
        &self.comment
    }

    /// Returns the edit time in epoch milliseconds.
    #[must_use]
    pub const fn date(&self) -> i64 {
        self.date
    }
}

/// Ordered, append-only sequence of annotations.
///
/// Appending produces a new log and leaves the original untouched, so a log
/// handed out to readers never changes underneath them.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Vec<Annotation>", into = "Vec<Annotation>")]
pub struct AnnotationLog(Arc<[Annotation]>);

impl AnnotationLog {
    /// Creates an empty log.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a new log holding every existing entry followed by `annotation`.
    #[must_use]
    pub fn appended(&self, annotation: Annotation) -> Self {
        self.0
            .iter()
            .cloned()
            .chain(std::iter::once(annotation))
            .collect::<Vec<_>>()
            .into()
    }

    /// Returns the entries in the order they were recorded.
    #[must_use]
    pub fn as_slice(&self) -> &[Annotation] {
        &self.0
    }

    /// Returns the most recent entry.
    #[must_use]
    pub fn last(&self) -> Option<&Annotation> {
        self.0.last()
    }

    /// Returns the number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns `true` when nothing has been recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterates the entries in order.
    pub fn iter(&self) -> impl Iterator<Item = &Annotation> {
        self.0.iter()
    }
}

impl From<Vec<Annotation>> for AnnotationLog {
    fn from(entries: Vec<Annotation>) -> Self {
        Self(entries.into())
    }
}

impl From<AnnotationLog> for Vec<Annotation> {
    fn from(log: AnnotationLog) -> Self {
        log.0.to_vec()
    }
}
