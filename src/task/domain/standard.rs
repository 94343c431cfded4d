//! Accessibility standards and test runner identifiers.

use super::{ParseStandardError, TaskDomainError};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Accessibility standard a task is tested against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Standard {
    /// US Section 508.
    #[serde(rename = "Section508")]
    Section508,
    /// WCAG 2 level A.
    #[serde(rename = "WCAG2A")]
    Wcag2A,
    /// WCAG 2 level AA.
    #[serde(rename = "WCAG2AA")]
    Wcag2Aa,
    /// WCAG 2 level AAA.
    #[serde(rename = "WCAG2AAA")]
    Wcag2Aaa,
}

impl Standard {
    /// Every supported standard.
    pub const ALL: [Self; 4] = [Self::Section508, Self::Wcag2A, Self::Wcag2Aa, Self::Wcag2Aaa];

    /// Returns the canonical wire representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Section508 => "Section508",
            Self::Wcag2A => "WCAG2A",
            Self::Wcag2Aa => "WCAG2AA",
            Self::Wcag2Aaa => "WCAG2AAA",
        }
    }
}

impl TryFrom<&str> for Standard {
    type Error = ParseStandardError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::ALL
            .into_iter()
            .find(|standard| standard.as_str() == value)
            .ok_or_else(|| ParseStandardError(value.to_owned()))
    }
}

impl fmt::Display for Standard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Identifier of a test runner such as `htmlcs` or `axe`.
///
/// Membership in the set of known runners is checked by the task validator;
/// this type only guarantees a non-empty, trimmed identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RunnerId(String);

impl RunnerId {
    /// Creates a runner identifier.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::EmptyRunnerId`] when the value is empty
    /// after trimming.
    pub fn new(value: impl Into<String>) -> Result<Self, TaskDomainError> {
        let raw = value.into();
        let normalized = raw.trim();
        if normalized.is_empty() {
            return Err(TaskDomainError::EmptyRunnerId);
        }
        Ok(Self(normalized.to_owned()))
    }

    /// Returns the identifier as `str`.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for RunnerId {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Display for RunnerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
