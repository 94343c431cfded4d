//! Grammar for scripted browser actions.
//!
//! Tasks may carry a list of actions run before a page is scanned, such as
//! `click element #accept-cookies` or `wait for path to be /dashboard`. Each
//! action must match one of a closed set of command shapes:
//!
//! | Command | Shape |
//! |---|---|
//! | navigate | `navigate to [url] <url>` |
//! | click | `click [element] <selector>` |
//! | set | `set [field] <selector> to <value>` |
//! | clear | `clear [field] <selector>` |
//! | check | `check [field] <selector>` / `uncheck [field] <selector>` |
//! | capture | `screen capture <path>` / `capture <path>` |
//! | wait for url | `wait for (fragment\|hash\|host\|path\|url) [to [not] be] <value>` |
//! | wait for state | `wait for [element] <selector> to be (added\|removed\|visible\|hidden)` |
//! | wait for event | `wait for [element] <selector> to emit <event>` |
//!
//! Keywords are matched ASCII case-insensitively. Bracketed words are
//! optional and only consumed when an argument still follows them.

use super::ActionParseError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Part of the page location a `wait for` action observes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UrlPart {
    /// The fragment, without `#`.
    Fragment,
    /// The hash, including `#`.
    Hash,
    /// The host name.
    Host,
    /// The path.
    Path,
    /// The full URL.
    Url,
}

impl UrlPart {
    fn from_keyword(word: &str) -> Option<Self> {
        [
            ("fragment", Self::Fragment),
            ("hash", Self::Hash),
            ("host", Self::Host),
            ("path", Self::Path),
            ("url", Self::Url),
        ]
        .into_iter()
        .find_map(|(keyword, part)| word.eq_ignore_ascii_case(keyword).then_some(part))
    }
}

/// Element state a `wait for` action observes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ElementState {
    /// The element appears in the DOM.
    Added,
    /// The element leaves the DOM.
    Removed,
    /// The element becomes visible.
    Visible,
    /// The element becomes hidden.
    Hidden,
}

impl ElementState {
    fn from_keyword(word: &str) -> Option<Self> {
        [
            ("added", Self::Added),
            ("removed", Self::Removed),
            ("visible", Self::Visible),
            ("hidden", Self::Hidden),
        ]
        .into_iter()
        .find_map(|(keyword, state)| word.eq_ignore_ascii_case(keyword).then_some(state))
    }
}

/// A recognised action command with its arguments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ActionCommand {
    /// Navigate the page to a URL.
    NavigateUrl {
        /// Destination URL.
        url: String,
    },
    /// Click an element.
    ClickElement {
        /// Target selector.
        selector: String,
    },
    /// Set the value of a form field.
    SetFieldValue {
        /// Target selector.
        selector: String,
        /// Value to enter.
        value: String,
    },
    /// Clear the value of a form field.
    ClearFieldValue {
        /// Target selector.
        selector: String,
    },
    /// Check or uncheck a checkbox or radio field.
    CheckField {
        /// Target selector.
        selector: String,
        /// `true` for `check`, `false` for `uncheck`.
        checked: bool,
    },
    /// Capture a screenshot.
    ScreenCapture {
        /// Output path.
        path: String,
    },
    /// Wait for part of the location to (not) equal a value.
    WaitForUrl {
        /// Observed location part.
        part: UrlPart,
        /// `true` when waiting for the value to go away.
        negated: bool,
        /// Expected value.
        value: String,
    },
    /// Wait for an element to reach a state.
    WaitForElementState {
        /// Target selector.
        selector: String,
        /// Awaited state.
        state: ElementState,
    },
    /// Wait for an element to emit a DOM event.
    WaitForElementEvent {
        /// Target selector.
        selector: String,
        /// Awaited event type.
        event: String,
    },
}

/// A validated action, keeping the client's text verbatim.
///
/// Serializes as the original string.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Action {
    text: String,
    command: ActionCommand,
}

impl Action {
    /// Parses an action string against the action grammar.
    ///
    /// # Errors
    ///
    /// Returns [`ActionParseError`] when the text matches no command shape.
    pub fn parse(text: impl Into<String>) -> Result<Self, ActionParseError> {
        let raw = text.into();
        let command = parse_command(&raw)?;
        Ok(Self { text: raw, command })
    }

    /// Returns the action text as supplied.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.text
    }

    /// Returns the parsed command.
    #[must_use]
    pub const fn command(&self) -> &ActionCommand {
        &self.command
    }
}

impl TryFrom<String> for Action {
    type Error = ActionParseError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(value)
    }
}

impl From<Action> for String {
    fn from(action: Action) -> Self {
        action.text
    }
}

impl FromStr for Action {
    type Err = ActionParseError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Self::parse(value)
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

/// Returns `true` when `text` is a valid action.
#[must_use]
pub fn is_valid_action(text: &str) -> bool {
    parse_command(text).is_ok()
}

fn parse_command(text: &str) -> Result<ActionCommand, ActionParseError> {
    let words = Words::new(text);
    let verb = words.word(0).ok_or(ActionParseError::Empty)?;

    match verb.to_ascii_lowercase().as_str() {
        "navigate" => parse_navigate(&words),
        "click" => {
            let selector = words.optional_noun_tail(1, "element", "click", "selector")?;
            Ok(ActionCommand::ClickElement { selector })
        }
        "set" => parse_set(&words),
        "clear" => {
            let selector = words.optional_noun_tail(1, "field", "clear", "selector")?;
            Ok(ActionCommand::ClearFieldValue { selector })
        }
        "check" | "uncheck" => {
            let checked = words.is(0, "check");
            let command = if checked { "check" } else { "uncheck" };
            let selector = words.optional_noun_tail(1, "field", command, "selector")?;
            Ok(ActionCommand::CheckField { selector, checked })
        }
        "screen" if words.is(1, "capture") => parse_capture(&words, 2),
        "capture" | "screen-capture" | "screencapture" => parse_capture(&words, 1),
        "wait" => parse_wait(&words, text),
        _ => Err(ActionParseError::UnrecognisedCommand(verb.to_owned())),
    }
}

fn parse_navigate(words: &Words<'_>) -> Result<ActionCommand, ActionParseError> {
    if !words.is(1, "to") {
        return Err(ActionParseError::ExpectedKeyword {
            command: "navigate",
            keyword: "to",
        });
    }
    let url = words.optional_noun_tail(2, "url", "navigate", "url")?;
    Ok(ActionCommand::NavigateUrl { url })
}

fn parse_set(words: &Words<'_>) -> Result<ActionCommand, ActionParseError> {
    // `set field to x` keeps `field` as the selector.
    let start = if words.is(1, "field") && words.find_separator(3, "to").is_some() {
        2
    } else {
        1
    };
    let separator =
        words
            .find_separator(start + 1, "to")
            .ok_or(ActionParseError::ExpectedKeyword {
                command: "set",
                keyword: "to",
            })?;
    let selector = words.slice(start, separator).ok_or(missing("set", "selector"))?;
    let value = words.tail(separator + 1).ok_or(missing("set", "value"))?;
    Ok(ActionCommand::SetFieldValue {
        selector: selector.to_owned(),
        value: value.to_owned(),
    })
}

fn parse_capture(words: &Words<'_>, start: usize) -> Result<ActionCommand, ActionParseError> {
    let path = words.tail(start).ok_or(missing("screen capture", "path"))?;
    Ok(ActionCommand::ScreenCapture {
        path: path.to_owned(),
    })
}

fn parse_wait(words: &Words<'_>, text: &str) -> Result<ActionCommand, ActionParseError> {
    if !words.is(1, "for") {
        return Err(ActionParseError::ExpectedKeyword {
            command: "wait",
            keyword: "for",
        });
    }

    if let Some(command) = parse_wait_for_url(words) {
        return Ok(command);
    }
    if let Some(command) = parse_wait_for_state(words) {
        return Ok(command);
    }
    if let Some(command) = parse_wait_for_event(words) {
        return Ok(command);
    }
    Err(ActionParseError::InvalidWaitCondition(text.trim().to_owned()))
}

fn parse_wait_for_url(words: &Words<'_>) -> Option<ActionCommand> {
    let part = UrlPart::from_keyword(words.word(2)?)?;
    let (negated, value_index) = match words.len() {
        4 => (false, 3),
        6 if words.is(3, "to") && words.is(4, "be") => (false, 5),
        7 if words.is(3, "to") && words.is(4, "not") && words.is(5, "be") => (true, 6),
        _ => return None,
    };
    Some(ActionCommand::WaitForUrl {
        part,
        negated,
        value: words.word(value_index)?.to_owned(),
    })
}

fn parse_wait_for_state(words: &Words<'_>) -> Option<ActionCommand> {
    let last = words.len().checked_sub(1)?;
    let state = ElementState::from_keyword(words.word(last)?)?;
    let to_index = last.checked_sub(2)?;
    if !(words.is(to_index, "to") && words.is(to_index + 1, "be")) {
        return None;
    }
    let start = words.selector_start(to_index);
    let selector = words.slice(start, to_index)?;
    Some(ActionCommand::WaitForElementState {
        selector: selector.to_owned(),
        state,
    })
}

fn parse_wait_for_event(words: &Words<'_>) -> Option<ActionCommand> {
    let mut search_from = 3;
    let to_index = loop {
        let candidate = words.find_separator(search_from, "to")?;
        if words.is(candidate + 1, "emit") && words.word(candidate + 2).is_some() {
            break candidate;
        }
        search_from = candidate + 1;
    };
    let start = words.selector_start(to_index);
    let selector = words.slice(start, to_index)?;
    let event = words.tail(to_index + 2)?;
    Some(ActionCommand::WaitForElementEvent {
        selector: selector.to_owned(),
        event: event.to_owned(),
    })
}

const fn missing(command: &'static str, argument: &'static str) -> ActionParseError {
    ActionParseError::MissingArgument { command, argument }
}

/// Whitespace-separated words of an action, with their byte spans.
///
/// Slices taken across several words keep the original spacing.
struct Words<'a> {
    text: &'a str,
    spans: Vec<(usize, usize)>,
}

impl<'a> Words<'a> {
    fn new(text: &'a str) -> Self {
        let mut spans = Vec::new();
        let mut start = None;
        for (index, character) in text.char_indices() {
            match (character.is_whitespace(), start) {
                (true, Some(begin)) => {
                    spans.push((begin, index));
                    start = None;
                }
                (false, None) => start = Some(index),
                _ => {}
            }
        }
        if let Some(begin) = start {
            spans.push((begin, text.len()));
        }
        Self { text, spans }
    }

    fn len(&self) -> usize {
        self.spans.len()
    }

    fn word(&self, index: usize) -> Option<&'a str> {
        let &(start, end) = self.spans.get(index)?;
        self.text.get(start..end)
    }

    fn is(&self, index: usize, keyword: &str) -> bool {
        self.word(index)
            .is_some_and(|word| word.eq_ignore_ascii_case(keyword))
    }

    /// Text covering words `from..to`, or `None` when the range is empty.
    fn slice(&self, from: usize, to: usize) -> Option<&'a str> {
        if from >= to {
            return None;
        }
        let &(start, _) = self.spans.get(from)?;
        let &(_, end) = self.spans.get(to.checked_sub(1)?)?;
        self.text.get(start..end)
    }

    fn tail(&self, from: usize) -> Option<&'a str> {
        self.slice(from, self.len())
    }

    /// Finds the first `keyword` at or after `from` that has a word after it.
    fn find_separator(&self, from: usize, keyword: &str) -> Option<usize> {
        (from..self.len().saturating_sub(1)).find(|&index| self.is(index, keyword))
    }

    /// Start of a `wait for [element] <selector>` selector ending before `end`.
    fn selector_start(&self, end: usize) -> usize {
        if self.is(2, "element") && end > 3 { 3 } else { 2 }
    }

    /// Reads `[noun] <argument>` starting at `index`.
    fn optional_noun_tail(
        &self,
        index: usize,
        noun: &str,
        command: &'static str,
        argument: &'static str,
    ) -> Result<String, ActionParseError> {
        let start = if self.is(index, noun) && self.word(index + 1).is_some() {
            index + 1
        } else {
            index
        };
        self.tail(start)
            .map(str::to_owned)
            .ok_or(missing(command, argument))
    }
}
