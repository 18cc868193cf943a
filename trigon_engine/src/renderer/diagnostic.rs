/// Bounded driver diagnostics for compile and link failures

use std::fmt;

/// Maximum number of characters kept from a driver info log
pub const INFO_LOG_CAPACITY: usize = 1024;

/// Driver info log, truncated to [`INFO_LOG_CAPACITY`] characters
///
/// Drivers may produce arbitrarily long logs. Anything past the capacity is
/// dropped silently; a long log is never an error in itself.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    text: String,
    truncated: bool,
}

impl Diagnostic {
    /// Build a diagnostic from the raw text returned by the driver
    pub fn from_driver_log(log: impl Into<String>) -> Self {
        let mut text = log.into();
        let truncated = match text.char_indices().nth(INFO_LOG_CAPACITY) {
            Some((byte_offset, _)) => {
                text.truncate(byte_offset);
                true
            }
            None => false,
        };
        Self { text, truncated }
    }

    /// The (possibly truncated) log text
    pub fn as_str(&self) -> &str {
        &self.text
    }

    /// Length in characters, never above [`INFO_LOG_CAPACITY`]
    pub fn len(&self) -> usize {
        self.text.chars().count()
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// Whether the driver log was longer than the capacity
    pub fn is_truncated(&self) -> bool {
        self.truncated
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = self.text.trim_end_matches(['\0', '\n', '\r', ' ']);
        if text.is_empty() {
            write!(f, "(driver returned an empty info log)")
        } else {
            write!(f, "{}", text)
        }
    }
}

#[cfg(test)]
#[path = "diagnostic_tests.rs"]
mod tests;
