//! Timestamped entry model.
//!
//! # Responsibility
//! - Define the single-line record appended under the Context section.
//! - Normalize user text into a value that always renders as one line.
//!
//! # Invariants
//! - `message` is never blank and never contains line breaks.
//! - Rendered form is `- [HH:MM] <message>`.

use crate::clock::format_time;
use chrono::NaiveTime;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Validation error for entry construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EntryValidationError {
    /// Message is empty after trimming.
    EmptyMessage,
}

impl Display for EntryValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyMessage => write!(f, "message is empty"),
        }
    }
}

impl Error for EntryValidationError {}

/// One timestamped line in a day file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    /// Local wall-clock time, rendered at minute precision.
    pub time: NaiveTime,
    /// Single-line message text.
    pub message: String,
}

impl Entry {
    /// Creates an entry, trimming the message and collapsing line breaks.
    ///
    /// # Errors
    /// - Returns `EmptyMessage` when nothing but whitespace remains.
    pub fn new(time: NaiveTime, message: &str) -> Result<Self, EntryValidationError> {
        let message = collapse_line_breaks(message.trim());
        if message.is_empty() {
            return Err(EntryValidationError::EmptyMessage);
        }
        Ok(Self { time, message })
    }

    /// Returns whether `line` looks like a rendered entry.
    ///
    /// Used to keep consecutive entries in insertion order.
    pub fn is_entry_line(line: &str) -> bool {
        let Some(rest) = line.trim_start().strip_prefix("- [") else {
            return false;
        };
        let bytes = rest.as_bytes();
        bytes.len() >= 6
            && bytes[0].is_ascii_digit()
            && bytes[1].is_ascii_digit()
            && bytes[2] == b':'
            && bytes[3].is_ascii_digit()
            && bytes[4].is_ascii_digit()
            && bytes[5] == b']'
    }
}

impl Display for Entry {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "- [{}] {}", format_time(self.time), self.message)
    }
}

fn collapse_line_breaks(value: &str) -> String {
    if !value.contains(['\n', '\r']) {
        return value.to_string();
    }
    value
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::{Entry, EntryValidationError};
    use chrono::NaiveTime;

    fn at(hour: u32, minute: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(hour, minute, 0).expect("valid time")
    }

    #[test]
    fn renders_zero_padded_timestamp() {
        let entry = Entry::new(at(9, 5), "  Fixed bug ").unwrap();
        assert_eq!(entry.to_string(), "- [09:05] Fixed bug");
    }

    #[test]
    fn blank_message_is_rejected() {
        let err = Entry::new(at(9, 5), " \n\t ").unwrap_err();
        assert_eq!(err, EntryValidationError::EmptyMessage);
    }

    #[test]
    fn line_breaks_collapse_to_single_spaces() {
        let entry = Entry::new(at(14, 5), "first\r\n\nsecond\nthird").unwrap();
        assert_eq!(entry.message, "first second third");
    }

    #[test]
    fn entry_line_detection() {
        assert!(Entry::is_entry_line("- [14:05] Fixed bug"));
        assert!(Entry::is_entry_line("  - [00:00] x"));
        assert!(!Entry::is_entry_line("- "));
        assert!(!Entry::is_entry_line("- [ ] todo item"));
        assert!(!Entry::is_entry_line("- [1:05] short hour"));
    }
}
