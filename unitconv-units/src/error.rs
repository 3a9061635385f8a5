//! Conversion errors

use thiserror::Error;
use unitconv_core::{NumberError, UnitError};

use crate::Category;

/// Errors that can occur during unit conversion
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConversionError {
    /// Unit name not found in the category's table (or in any table when no
    /// category was chosen)
    #[error("invalid unit '{unit}'{}", scope_suffix(.category))]
    InvalidUnit {
        unit: String,
        category: Option<Category>,
    },

    #[error("unknown category '{0}'")]
    UnknownCategory(String),

    /// Units from two different categories
    #[error("cannot convert {from} ({from_category}) to {to} ({to_category})")]
    IncompatibleUnits {
        from: String,
        from_category: Category,
        to: String,
        to_category: Category,
    },

    #[error("invalid value: {0}")]
    InvalidValue(String),

    #[error("{0}")]
    Parse(String),
}

fn scope_suffix(category: &Option<Category>) -> String {
    match category {
        Some(c) => format!(" for {}", c),
        None => String::new(),
    }
}

impl ConversionError {
    pub(crate) fn invalid_unit(unit: &str, category: Option<Category>) -> Self {
        ConversionError::InvalidUnit {
            unit: unit.trim().to_string(),
            category,
        }
    }
}

impl From<NumberError> for ConversionError {
    fn from(err: NumberError) -> Self {
        match err {
            NumberError::ParseError(s) => ConversionError::Parse(format!("not a number: {}", s)),
            NumberError::NonFinite(s) => ConversionError::InvalidValue(format!("{} is not a finite number", s)),
        }
    }
}

impl From<ConversionError> for UnitError {
    fn from(err: ConversionError) -> Self {
        let message = err.to_string();
        match err {
            ConversionError::InvalidUnit { unit, category: Some(c) } => {
                UnitError::invalid_unit(format!("'{}' for {}", unit, c))
                    .with_suggestion(format!("{} units: {}", c, c.unit_names().join(", ")))
            }
            ConversionError::InvalidUnit { unit, category: None } => UnitError::invalid_unit(format!("'{}'", unit)),
            ConversionError::UnknownCategory(name) => UnitError::unknown_category(&name),
            ConversionError::IncompatibleUnits { .. } => UnitError::incompatible_units(message),
            ConversionError::InvalidValue(details) => UnitError::invalid_value(details),
            ConversionError::Parse(details) => UnitError::parse_error(details),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use unitconv_core::codes;

    #[test]
    fn test_invalid_unit_message() {
        let err = ConversionError::invalid_unit(" Parsecs ", Some(Category::Length));
        assert_eq!(err.to_string(), "invalid unit 'Parsecs' for Length");

        let err = ConversionError::invalid_unit("furlong", None);
        assert_eq!(err.to_string(), "invalid unit 'furlong'");
    }

    #[test]
    fn test_into_unit_error_lists_category_units() {
        let err: UnitError = ConversionError::invalid_unit("Stones", Some(Category::Weight)).into();
        assert_eq!(err.code, codes::INVALID_UNIT);
        let suggestion = err.suggestion.unwrap();
        assert!(suggestion.contains("Kilograms"));
        assert!(suggestion.contains("Milligrams"));
    }

    #[test]
    fn test_codes_by_variant() {
        let cases: Vec<(ConversionError, &str)> = vec![
            (ConversionError::UnknownCategory("Volume".into()), codes::UNKNOWN_CATEGORY),
            (ConversionError::InvalidValue("NaN".into()), codes::INVALID_VALUE),
            (ConversionError::Parse("bad".into()), codes::PARSE_ERROR),
        ];
        for (err, code) in cases {
            let unit_err: UnitError = err.into();
            assert_eq!(unit_err.code, code);
        }
    }
}
