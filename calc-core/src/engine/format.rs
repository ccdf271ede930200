//! Display formatting and parsing for calculator values.
//!
//! Values are rendered with a three-tier policy:
//!
//! | Value | Rendering | Example |
//! |-------|-----------|---------|
//! | `NaN` or infinite | the literal [`ERROR_TEXT`] | `"Error"` |
//! | integer, `\|v\| < 1e15` | grouped integer | `1,234,567` |
//! | non-integer, `1e-8 ≤ \|v\| < 1e15` | up to 8 fraction digits, trailing zeros trimmed | `123.456` |
//! | anything else except zero | scientific, up to 4 mantissa fraction digits | `1.2346E15` |
//!
//! Zero always renders as `"0"`.
//!
//! Separators come from a [`FormatConfig`] threaded into a [`NumberFormatter`];
//! the free functions [`format_for_display`] and [`parse_from_display`] use the
//! default configuration (`.` decimal, `,` grouping).

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Text shown for any invalid arithmetic result.
pub const ERROR_TEXT: &str = "Error";

/// Magnitudes at or above this are rendered in scientific notation.
pub const PLAIN_UPPER_BOUND: f64 = 1e15;

/// Non-integer magnitudes below this are rendered in scientific notation.
pub const PLAIN_LOWER_BOUND: f64 = 1e-8;

/// Maximum fraction digits in plain decimal rendering.
pub const MAX_FRACTION_DIGITS: usize = 8;

/// Maximum fraction digits of the mantissa in scientific rendering.
pub const MAX_MANTISSA_FRACTION_DIGITS: usize = 4;

const DEFAULT_DECIMAL_SEPARATOR: char = '.';
const DEFAULT_GROUPING_SEPARATOR: char = ',';

/// Errors raised when validating a [`FormatConfig`].
#[derive(Debug, Error, PartialEq, Eq)]
pub enum FormatConfigError {
    /// The decimal and grouping separators are the same character.
    #[error("decimal and grouping separators must differ, both are '{0}'")]
    SameSeparators(char),

    /// The separator would be confused with part of a number.
    #[error("'{0}' cannot be used as a separator")]
    ReservedSeparator(char),
}

/// Locale settings used when rendering values for the user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FormatConfig {
    /// Character between the integer and fraction parts.
    pub decimal_separator: char,

    /// Character between groups of three integer digits, `None` disables grouping.
    pub grouping_separator: Option<char>,

    /// Prefix used by [`NumberFormatter::format_currency`].
    pub currency_symbol: String,
}

impl Default for FormatConfig {
    fn default() -> Self {
        Self {
            decimal_separator: DEFAULT_DECIMAL_SEPARATOR,
            grouping_separator: Some(DEFAULT_GROUPING_SEPARATOR),
            currency_symbol: "$".to_string(),
        }
    }
}

impl FormatConfig {
    /// Checks that the separators can be told apart from digits and from each other.
    ///
    /// # Errors
    ///
    /// Returns [`FormatConfigError`] if:
    /// - either separator is a digit, a sign, or an exponent marker
    /// - both separators are the same character
    pub fn validate(&self) -> Result<(), FormatConfigError> {
        let separators = std::iter::once(self.decimal_separator).chain(self.grouping_separator);
        for separator in separators {
            if separator.is_ascii_digit() || matches!(separator, '-' | '+' | 'e' | 'E') {
                return Err(FormatConfigError::ReservedSeparator(separator));
            }
        }

        if self.grouping_separator == Some(self.decimal_separator) {
            return Err(FormatConfigError::SameSeparators(self.decimal_separator));
        }

        Ok(())
    }
}

/// Formats and parses values according to a validated [`FormatConfig`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NumberFormatter {
    config: FormatConfig,
}

impl NumberFormatter {
    /// Creates a formatter after validating `config`.
    ///
    /// # Errors
    ///
    /// Returns [`FormatConfigError`] when the separators are unusable.
    pub fn new(config: FormatConfig) -> Result<Self, FormatConfigError> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &FormatConfig {
        &self.config
    }

    /// Renders `value` for display using the configured separators.
    ///
    /// # Examples
    ///
    /// ```
    /// use calc_core::engine::NumberFormatter;
    ///
    /// let formatter = NumberFormatter::default();
    /// assert_eq!(formatter.format(1234567.0), "1,234,567");
    /// assert_eq!(formatter.format(f64::NAN), "Error");
    /// ```
    pub fn format(
        &self,
        value: f64,
    ) -> String {
        render(
            value,
            self.config.decimal_separator,
            self.config.grouping_separator,
        )
    }

    /// Renders `value` in the form stored in an edit buffer: `.` as the
    /// decimal point and no grouping.
    pub fn format_edit(
        &self,
        value: f64,
    ) -> String {
        render(value, DEFAULT_DECIMAL_SEPARATOR, None)
    }

    /// Parses text produced by [`NumberFormatter::format`], returning `0` for
    /// anything that is not a finite number.
    pub fn parse(
        &self,
        text: &str,
    ) -> f64 {
        parse_with(
            text,
            self.config.decimal_separator,
            self.config.grouping_separator,
        )
    }

    /// Renders an in-progress edit buffer with grouping and the configured
    /// decimal separator.
    ///
    /// Unlike [`NumberFormatter::format`] this keeps what the user typed: a
    /// trailing decimal point and trailing fraction zeros survive.
    pub fn group_edit_text(
        &self,
        buffer: &str,
    ) -> String {
        let decimal = self.config.decimal_separator;
        let (sign, unsigned) = match buffer.strip_prefix('-') {
            Some(rest) => ("-", rest),
            None => ("", buffer),
        };

        if unsigned.is_empty() || !unsigned.chars().all(|c| c.is_ascii_digit() || c == '.') {
            return buffer.replace(DEFAULT_DECIMAL_SEPARATOR, &decimal.to_string());
        }

        let grouping = self.config.grouping_separator;
        match unsigned.split_once('.') {
            Some((int_part, frac_part)) => {
                format!(
                    "{sign}{}{decimal}{frac_part}",
                    group_digits(int_part, grouping)
                )
            }
            None => format!("{sign}{}", group_digits(unsigned, grouping)),
        }
    }

    /// Renders a money amount with the currency symbol and exactly two
    /// fraction digits, rounding half away from zero.
    pub fn format_currency(
        &self,
        amount: Decimal,
    ) -> String {
        let rounded = amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
        let sign = if rounded.is_sign_negative() && !rounded.is_zero() {
            "-"
        } else {
            ""
        };
        let fixed = format!("{:.2}", rounded.abs());
        let (int_part, frac_part) = fixed.split_once('.').unwrap_or((fixed.as_str(), "00"));

        format!(
            "{sign}{}{}{}{frac_part}",
            self.config.currency_symbol,
            group_digits(int_part, self.config.grouping_separator),
            self.config.decimal_separator,
        )
    }
}

/// Formats `value` with the default separators.
///
/// # Examples
///
/// ```
/// use calc_core::engine::format_for_display;
///
/// assert_eq!(format_for_display(1234567.0), "1,234,567");
/// assert_eq!(format_for_display(123.456), "123.456");
/// assert_eq!(format_for_display(0.1 + 0.2), "0.3");
/// assert_eq!(format_for_display(f64::NAN), "Error");
/// ```
pub fn format_for_display(value: f64) -> String {
    render(
        value,
        DEFAULT_DECIMAL_SEPARATOR,
        Some(DEFAULT_GROUPING_SEPARATOR),
    )
}

/// Parses display text with the default separators; invalid text yields `0`.
pub fn parse_from_display(text: &str) -> f64 {
    parse_with(
        text,
        DEFAULT_DECIMAL_SEPARATOR,
        Some(DEFAULT_GROUPING_SEPARATOR),
    )
}

/// Parses an edit buffer (`.` decimal point, no grouping).
pub(crate) fn parse_edit(text: &str) -> f64 {
    parse_with(text, DEFAULT_DECIMAL_SEPARATOR, None)
}

fn render(
    value: f64,
    decimal_separator: char,
    grouping_separator: Option<char>,
) -> String {
    if !value.is_finite() {
        return ERROR_TEXT.to_string();
    }
    if value == 0.0 {
        return "0".to_string();
    }

    let sign = if value < 0.0 { "-" } else { "" };
    let magnitude = value.abs();

    if value.fract() == 0.0 && magnitude < PLAIN_UPPER_BOUND {
        let digits = format!("{magnitude:.0}");
        return format!("{sign}{}", group_digits(&digits, grouping_separator));
    }

    if (PLAIN_LOWER_BOUND..PLAIN_UPPER_BOUND).contains(&magnitude) {
        let fixed = format!("{:.*}", MAX_FRACTION_DIGITS, magnitude);
        let (int_part, frac_part) = fixed.split_once('.').unwrap_or((fixed.as_str(), ""));
        let frac_part = frac_part.trim_end_matches('0');
        let grouped = group_digits(int_part, grouping_separator);

        return if frac_part.is_empty() {
            format!("{sign}{grouped}")
        } else {
            format!("{sign}{grouped}{decimal_separator}{frac_part}")
        };
    }

    let scientific = format!("{:.*e}", MAX_MANTISSA_FRACTION_DIGITS, magnitude);
    let (mantissa, exponent) = scientific
        .split_once('e')
        .unwrap_or((scientific.as_str(), "0"));
    let mantissa = if mantissa.contains('.') {
        mantissa.trim_end_matches('0').trim_end_matches('.')
    } else {
        mantissa
    };
    let mantissa = mantissa.replace(DEFAULT_DECIMAL_SEPARATOR, &decimal_separator.to_string());

    format!("{sign}{mantissa}E{exponent}")
}

fn parse_with(
    text: &str,
    decimal_separator: char,
    grouping_separator: Option<char>,
) -> f64 {
    let mut normalized = String::with_capacity(text.len());
    for c in text.trim().chars() {
        if Some(c) == grouping_separator {
            continue;
        }
        normalized.push(if c == decimal_separator { '.' } else { c });
    }

    match normalized.parse::<f64>() {
        Ok(value) if value.is_finite() => value,
        _ => 0.0,
    }
}

/// Inserts `separator` between groups of three ASCII digits.
fn group_digits(
    digits: &str,
    separator: Option<char>,
) -> String {
    let Some(separator) = separator else {
        return digits.to_string();
    };

    let len = digits.len();
    let mut grouped = String::with_capacity(len + len / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            grouped.push(separator);
        }
        grouped.push(c);
    }
    grouped
}
