//! Numeric input handling
//!
//! Conversions work on `f64`. Values arriving as text (from a form field or
//! a JSON string) go through [`parse_number`], which accepts digit grouping
//! commas the same way results are displayed.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum NumberError {
    #[error("Invalid number format: {0}")]
    ParseError(String),

    #[error("Value is not finite: {0}")]
    NonFinite(String),
}

/// Parse a decimal number, allowing `,` as a thousands separator.
///
/// `NaN` and infinities are rejected even though `f64::from_str` accepts them.
pub fn parse_number(s: &str) -> Result<f64, NumberError> {
    let trimmed = s.trim();
    if trimmed.is_empty() {
        return Err(NumberError::ParseError(s.to_string()));
    }

    let cleaned: String = trimmed.chars().filter(|&c| c != ',').collect();
    let value: f64 = cleaned
        .parse()
        .map_err(|_| NumberError::ParseError(trimmed.to_string()))?;

    ensure_finite(value)
}

/// Reject NaN and infinities
pub fn ensure_finite(value: f64) -> Result<f64, NumberError> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(NumberError::NonFinite(value.to_string()))
    }
}
