use calc_core::{FormatConfig, slider::Point};
use rust_decimal::Decimal;
use thiserror::Error;

/// Error returned when a command-line amount cannot be parsed as a [`Decimal`].
#[derive(Debug, Error)]
#[error("invalid amount '{input}': {source}")]
pub struct ParseAmountError {
    input: String,
    #[source]
    source: rust_decimal::Error,
}

/// Error returned when a drag point is not of the form `x,y`.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("invalid point '{0}', expected x,y")]
pub struct ParsePointError(String);

/// Normalizes amount input: trims whitespace, drops the currency symbol, a
/// trailing `%` and grouping separators, and turns the locale decimal
/// separator into `.`.
fn normalize_amount_input(
    s: &str,
    config: &FormatConfig,
) -> String {
    let trimmed = s.trim();
    let trimmed = trimmed.strip_suffix('%').unwrap_or(trimmed).trim_end();
    let (sign, unsigned) = match trimmed.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", trimmed),
    };
    let unsigned = unsigned
        .strip_prefix(config.currency_symbol.as_str())
        .filter(|_| !config.currency_symbol.is_empty())
        .unwrap_or(unsigned);

    let digits: String = unsigned
        .chars()
        .filter(|&c| Some(c) != config.grouping_separator)
        .map(|c| if c == config.decimal_separator { '.' } else { c })
        .collect();
    format!("{sign}{digits}")
}

/// Parses a money amount or percentage written in the configured locale.
///
/// Accepts `"1,234.56"`, `"$12"`, `"-$3.50"` and `"15%"` with the default
/// locale. Empty or whitespace-only input is treated as 0.
/// Returns an error and logs when the input is invalid.
pub fn parse_amount(
    s: &str,
    config: &FormatConfig,
) -> Result<Decimal, ParseAmountError> {
    let normalized = normalize_amount_input(s, config);
    if normalized.is_empty() {
        return Ok(Decimal::ZERO);
    }
    normalized.parse().map_err(|e| {
        tracing::error!(input = %s, "invalid amount: {}", e);
        ParseAmountError {
            input: s.to_string(),
            source: e,
        }
    })
}

/// Parses a drag point such as `"12.5,-40"`.
pub fn parse_point(s: &str) -> Result<Point, ParsePointError> {
    let invalid = || ParsePointError(s.to_string());
    let (x, y) = s.split_once(',').ok_or_else(invalid)?;
    let x: f64 = x.trim().parse().map_err(|_| invalid())?;
    let y: f64 = y.trim().parse().map_err(|_| invalid())?;
    if !x.is_finite() || !y.is_finite() {
        return Err(invalid());
    }
    Ok(Point::new(x, y))
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;

    fn euro() -> FormatConfig {
        FormatConfig {
            decimal_separator: ',',
            grouping_separator: Some('.'),
            currency_symbol: "€".to_string(),
        }
    }

    #[test]
    fn parse_amount_accepts_grouping_separator() {
        let config = FormatConfig::default();

        assert_eq!(parse_amount("1,234.56", &config).unwrap(), dec!(1234.56));
        assert_eq!(parse_amount("1,234,567.89", &config).unwrap(), dec!(1234567.89));
    }

    #[test]
    fn parse_amount_strips_currency_and_percent() {
        let config = FormatConfig::default();

        assert_eq!(parse_amount("$84.50", &config).unwrap(), dec!(84.50));
        assert_eq!(parse_amount("-$3.50", &config).unwrap(), dec!(-3.50));
        assert_eq!(parse_amount("17.5%", &config).unwrap(), dec!(17.5));
    }

    #[test]
    fn parse_amount_uses_locale_separators() {
        assert_eq!(parse_amount("€1.234,56", &euro()).unwrap(), dec!(1234.56));
        assert_eq!(parse_amount("0,5", &euro()).unwrap(), dec!(0.5));
    }

    #[test]
    fn parse_amount_trim_whitespace() {
        assert_eq!(
            parse_amount("  123.45  ", &FormatConfig::default()).unwrap(),
            dec!(123.45)
        );
    }

    #[test]
    fn parse_amount_empty_treated_as_zero() {
        assert_eq!(parse_amount("", &FormatConfig::default()).unwrap(), Decimal::ZERO);
        assert_eq!(parse_amount("   ", &FormatConfig::default()).unwrap(), Decimal::ZERO);
    }

    #[test]
    fn parse_amount_invalid_returns_error() {
        assert!(parse_amount("abc", &FormatConfig::default()).is_err());
        assert!(parse_amount("1.2.3", &FormatConfig::default()).is_err());
    }

    #[test]
    fn parse_point_accepts_pair() {
        assert_eq!(parse_point("12.5,-40").unwrap(), Point::new(12.5, -40.0));
        assert_eq!(parse_point(" 3 , 4 ").unwrap(), Point::new(3.0, 4.0));
    }

    #[test]
    fn parse_point_rejects_malformed_input() {
        assert!(parse_point("12").is_err());
        assert!(parse_point("a,b").is_err());
        assert!(parse_point("inf,0").is_err());
    }
}
