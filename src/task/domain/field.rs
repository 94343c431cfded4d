//! Names of the client-facing task fields.

use std::fmt;

/// A recognised field of a task create or edit payload.
///
/// The wire names are the camelCase keys clients send, such as
/// `hideElements`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum TaskField {
    /// Human-readable task label.
    Name,
    /// Page under test. Immutable after creation.
    Url,
    /// Scan timeout in milliseconds.
    Timeout,
    /// Delay before scanning in milliseconds.
    Wait,
    /// Accessibility standard to test against.
    Standard,
    /// Rule identifiers to ignore.
    Ignore,
    /// CSS selectors hidden before scanning.
    HideElements,
    /// Extra HTTP request headers.
    Headers,
    /// Basic authentication user name.
    Username,
    /// Basic authentication password.
    Password,
    /// Scripted browser actions.
    Actions,
    /// Test runners to execute.
    Runners,
}

impl TaskField {
    /// Every recognised field, in wire order.
    pub const ALL: [Self; 12] = [
        Self::Name,
        Self::Url,
        Self::Timeout,
        Self::Wait,
        Self::Standard,
        Self::Ignore,
        Self::HideElements,
        Self::Headers,
        Self::Username,
        Self::Password,
        Self::Actions,
        Self::Runners,
    ];

    /// Returns the wire name of the field.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::Url => "url",
            Self::Timeout => "timeout",
            Self::Wait => "wait",
            Self::Standard => "standard",
            Self::Ignore => "ignore",
            Self::HideElements => "hideElements",
            Self::Headers => "headers",
            Self::Username => "username",
            Self::Password => "password",
            Self::Actions => "actions",
            Self::Runners => "runners",
        }
    }

    /// Looks up a field by its exact wire name.
    #[must_use]
    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|field| field.as_str() == key)
    }
}

impl fmt::Display for TaskField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
