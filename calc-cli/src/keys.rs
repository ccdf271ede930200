//! Text form of keypad input.
//!
//! A key sequence is a string of keypad characters such as `"2+3*4="`.
//! Whitespace is skipped so sequences can be spaced out for readability.

use calc_core::Key;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
#[error("unknown key '{key}' at position {position}")]
pub struct KeyParseError {
    pub key: char,
    /// Zero-based character index in the original sequence.
    pub position: usize,
}

/// Parses every character of `sequence` into a [`Key`].
///
/// # Errors
///
/// Returns [`KeyParseError`] for the first character that is not a keypad key.
///
/// # Examples
///
/// ```
/// use calc_cli::keys::parse_key_sequence;
/// use calc_core::Key;
///
/// let keys = parse_key_sequence("5 + 3 =").unwrap();
/// assert_eq!(keys.len(), 4);
/// assert_eq!(keys[3], Key::Equals);
/// ```
pub fn parse_key_sequence(sequence: &str) -> Result<Vec<Key>, KeyParseError> {
    sequence
        .chars()
        .enumerate()
        .filter(|(_, c)| !c.is_whitespace())
        .map(|(position, key)| Key::from_char(key).ok_or(KeyParseError { key, position }))
        .collect()
}
