use perfshield::engine::config::ValueRange;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ParseError {
    #[error(
        "Invalid range '{0}'. Expected 'START:STOP:COUNT', 'START:STOP/STEP' or a comma-separated list (e.g., '0.015:0.025:10')."
    )]
    InvalidRange(String),

    #[error("Invalid number '{value}' in '{input}'.")]
    InvalidNumber { input: String, value: String },

    #[error("Invalid --set format: '{0}'. Expected KEY=VALUE.")]
    InvalidKeyValue(String),
}

/// Parses a range written on the command line.
///
/// - `START:STOP:COUNT` evenly spaced values, both ends included
/// - `START:STOP/STEP` stepped values, stop excluded
/// - `V1,V2,...` explicit values (a single number is a one-element list)
pub fn parse_range(input: &str) -> Result<ValueRange, ParseError> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(ParseError::InvalidRange(input.to_string()));
    }

    let parts: Vec<&str> = trimmed.split(':').collect();
    match parts.as_slice() {
        [start, stop, count] => {
            let count = count
                .trim()
                .parse::<usize>()
                .map_err(|_| invalid_number(input, count))?;
            Ok(ValueRange::linspace(
                parse_number(input, start)?,
                parse_number(input, stop)?,
                count,
            ))
        }
        [start, stop_and_step] => {
            let (stop, step) = stop_and_step
                .split_once('/')
                .ok_or_else(|| ParseError::InvalidRange(input.to_string()))?;
            Ok(ValueRange::arange(
                parse_number(input, start)?,
                parse_number(input, stop)?,
                parse_number(input, step)?,
            ))
        }
        [list] => list
            .split(',')
            .map(|value| parse_number(input, value))
            .collect::<Result<Vec<_>, _>>()
            .map(ValueRange::Values),
        _ => Err(ParseError::InvalidRange(input.to_string())),
    }
}

/// Splits a `KEY=VALUE` override into its trimmed parts.
pub fn parse_key_value(input: &str) -> Result<(&str, &str), ParseError> {
    match input.split_once('=') {
        Some((key, value)) if !key.trim().is_empty() => Ok((key.trim(), value.trim())),
        _ => Err(ParseError::InvalidKeyValue(input.to_string())),
    }
}

pub fn parse_number(input: &str, value: &str) -> Result<f64, ParseError> {
    value
        .trim()
        .parse::<f64>()
        .map_err(|_| invalid_number(input, value))
}

fn invalid_number(input: &str, value: &str) -> ParseError {
    ParseError::InvalidNumber {
        input: input.to_string(),
        value: value.trim().to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_linspace_range() {
        assert_eq!(
            parse_range("0.015:0.025:10"),
            Ok(ValueRange::linspace(0.015, 0.025, 10))
        );
    }

    #[test]
    fn parses_stepped_range() {
        assert_eq!(
            parse_range(" 0 : 0.5/1e-3 "),
            Ok(ValueRange::arange(0.0, 0.5, 1e-3))
        );
    }

    #[test]
    fn parses_value_lists_and_single_values() {
        assert_eq!(
            parse_range("0.01, 0.02,0.04"),
            Ok(ValueRange::Values(vec![0.01, 0.02, 0.04]))
        );
        assert_eq!(parse_range("3e-2"), Ok(ValueRange::single(0.03)));
    }

    #[test]
    fn rejects_malformed_ranges() {
        assert!(matches!(parse_range(""), Err(ParseError::InvalidRange(_))));
        assert!(matches!(
            parse_range("0.1:0.2"),
            Err(ParseError::InvalidRange(_))
        ));
        assert!(matches!(
            parse_range("0.1:0.2:3:4"),
            Err(ParseError::InvalidRange(_))
        ));
        assert_eq!(
            parse_range("0.1:0.2:ten"),
            Err(ParseError::InvalidNumber {
                input: "0.1:0.2:ten".to_string(),
                value: "ten".to_string(),
            })
        );
        assert!(matches!(
            parse_range("0.1,,0.2"),
            Err(ParseError::InvalidNumber { .. })
        ));
    }

    #[test]
    fn parses_key_value_pairs() {
        assert_eq!(
            parse_key_value("search.target = 10"),
            Ok(("search.target", "10"))
        );
        assert_eq!(
            parse_key_value("search.hole-heights=0.01:0.02:3"),
            Ok(("search.hole-heights", "0.01:0.02:3"))
        );
        assert!(parse_key_value("search.target").is_err());
        assert!(parse_key_value("=10").is_err());
    }
}
