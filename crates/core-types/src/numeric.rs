use crate::error::CoreError;
use crate::structs::Outcome;
use rust_decimal::Decimal;
use std::str::FromStr;

/// Parses a user-supplied number.
///
/// Accepts plain decimals (`12.5`, `-3`) as well as scientific notation (`1e3`).
/// Surrounding whitespace is ignored.
pub fn parse_decimal(field: &str, raw: &str) -> Result<Decimal, CoreError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(CoreError::InvalidInput(field.to_string(), "empty input".to_string()));
    }

    Decimal::from_str(trimmed)
        .or_else(|_| Decimal::from_scientific(trimmed))
        .map_err(|e| CoreError::InvalidInput(field.to_string(), e.to_string()))
}

/// Formats a value without trailing zeros, e.g. `5.00` -> `5`.
pub fn format_decimal(value: Decimal) -> String {
    value.normalize().to_string()
}

/// Formats a formula result: the number, or the error message in its place.
pub fn format_outcome(outcome: &Outcome) -> String {
    match outcome {
        Ok(value) => format_decimal(*value),
        Err(e) => e.to_string(),
    }
}
