use std::fmt;

use crate::engine::Operation;

/// A single keypad press.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    /// `'0'..='9'` or `'.'`.
    Digit(char),
    Operation(Operation),
    Equals,
    Percent,
    ToggleSign,
    Backspace,
    Clear,
}

impl Key {
    /// Maps a keypad character to its key.
    ///
    /// Besides the digits and operator symbols accepted by
    /// [`Operation::parse`], `=` evaluates, `%` takes a percentage,
    /// `n`/`±` toggles the sign, `<`/`⌫` deletes and `c`/`C` clears.
    pub fn from_char(c: char) -> Option<Self> {
        match c {
            '0'..='9' | '.' => Some(Self::Digit(c)),
            '=' => Some(Self::Equals),
            '%' => Some(Self::Percent),
            'n' | '±' => Some(Self::ToggleSign),
            '<' | '⌫' => Some(Self::Backspace),
            'c' | 'C' => Some(Self::Clear),
            _ => {
                let mut buf = [0u8; 4];
                Operation::parse(c.encode_utf8(&mut buf)).map(Self::Operation)
            }
        }
    }
}

impl fmt::Display for Key {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        match self {
            Self::Digit(d) => write!(f, "{d}"),
            Self::Operation(op) => write!(f, "{op}"),
            Self::Equals => f.write_str("="),
            Self::Percent => f.write_str("%"),
            Self::ToggleSign => f.write_str("±"),
            Self::Backspace => f.write_str("⌫"),
            Self::Clear => f.write_str("C"),
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn from_char_maps_digits_and_decimal_point() {
        assert_eq!(Key::from_char('7'), Some(Key::Digit('7')));
        assert_eq!(Key::from_char('.'), Some(Key::Digit('.')));
    }

    #[test]
    fn from_char_maps_operators() {
        assert_eq!(Key::from_char('x'), Some(Key::Operation(Operation::Multiply)));
        assert_eq!(Key::from_char('÷'), Some(Key::Operation(Operation::Divide)));
        assert_eq!(Key::from_char('-'), Some(Key::Operation(Operation::Subtract)));
    }

    #[test]
    fn from_char_maps_commands() {
        assert_eq!(Key::from_char('='), Some(Key::Equals));
        assert_eq!(Key::from_char('%'), Some(Key::Percent));
        assert_eq!(Key::from_char('n'), Some(Key::ToggleSign));
        assert_eq!(Key::from_char('<'), Some(Key::Backspace));
        assert_eq!(Key::from_char('C'), Some(Key::Clear));
    }

    #[test]
    fn from_char_rejects_unknown() {
        assert_eq!(Key::from_char('('), None);
        assert_eq!(Key::from_char('a'), None);
    }
}
