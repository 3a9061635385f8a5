//! Free-form conversion expressions
//!
//! ```text
//! 12.5 km -> mi
//! 100 Celsius to Fahrenheit
//! 3 in in cm
//! 1,500 g → lb
//! ```
//!
//! Both units are looked up across all categories and must agree.

use pest::iterators::Pair;
use pest::Parser;
use pest_derive::Parser;
use unitconv_core::parse_number;

use crate::{Conversion, ConversionError, Unit};

#[derive(Parser)]
#[grammar = "expression.pest"]
struct ExpressionParser;

/// Parse `"<value> <unit> <sep> <unit>"` into a resolved conversion
pub fn parse_expression(input: &str) -> Result<Conversion, ConversionError> {
    let pair = parse_rule(Rule::conversion, input)?;

    let mut value = None;
    let mut units = Vec::with_capacity(2);
    for inner in pair.into_inner() {
        match inner.as_rule() {
            Rule::number => value = Some(parse_number(inner.as_str())?),
            Rule::unit => units.push(Unit::parse_any(inner.as_str())?),
            _ => {}
        }
    }

    match (value, units.as_slice()) {
        (Some(value), &[from, to]) => Conversion::between(value, from, to),
        _ => Err(malformed(input)),
    }
}

/// Parse a bare `"from->to"` pair. The units must share a category.
pub fn parse_unit_pair(input: &str) -> Result<(Unit, Unit), ConversionError> {
    let pair = parse_rule(Rule::unit_pair, input)?;

    let units = pair
        .into_inner()
        .filter(|p| p.as_rule() == Rule::unit)
        .map(|p| Unit::parse_any(p.as_str()))
        .collect::<Result<Vec<_>, _>>()?;

    match units.as_slice() {
        &[from, to] if from.category() == to.category() => Ok((from, to)),
        &[from, to] => Err(ConversionError::IncompatibleUnits {
            from: from.name().to_string(),
            from_category: from.category(),
            to: to.name().to_string(),
            to_category: to.category(),
        }),
        _ => Err(malformed(input)),
    }
}

fn parse_rule(rule: Rule, input: &str) -> Result<Pair<'_, Rule>, ConversionError> {
    ExpressionParser::parse(rule, input)
        .map_err(|e| ConversionError::Parse(format!("cannot parse '{}': {}", input.trim(), e.variant.message())))?
        .next()
        .ok_or_else(|| malformed(input))
}

fn malformed(input: &str) -> ConversionError {
    ConversionError::Parse(format!("cannot parse '{}'", input.trim()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Category;
    use crate::unit::{LengthUnit, TemperatureUnit, WeightUnit};

    #[test]
    fn test_arrow() {
        let c = parse_expression("12.5 km -> mi").unwrap();
        assert_eq!(c.value(), 12.5);
        assert_eq!(c.from_unit(), Unit::Length(LengthUnit::Kilometers));
        assert_eq!(c.to_unit(), Unit::Length(LengthUnit::Miles));
    }

    #[test]
    fn test_unicode_arrow_and_grouping() {
        let c = parse_expression("1,500 g → lb").unwrap();
        assert_eq!(c.value(), 1500.0);
        assert_eq!(c.category(), Category::Weight);
        assert_eq!(c.to_unit(), Unit::Weight(WeightUnit::Pounds));
    }

    #[test]
    fn test_word_separators() {
        let c = parse_expression("100 Celsius to Fahrenheit").unwrap();
        assert_eq!(c.from_unit(), Unit::Temperature(TemperatureUnit::Celsius));
        assert!((c.run().unwrap() - 212.0).abs() < 1e-9);

        let c = parse_expression("10 KM IN miles").unwrap();
        assert_eq!(c.to_unit(), Unit::Length(LengthUnit::Miles));
    }

    #[test]
    fn test_inches_in_centimeters() {
        let c = parse_expression("3 in in cm").unwrap();
        assert_eq!(c.from_unit(), Unit::Length(LengthUnit::Inches));
        assert_eq!(c.to_unit(), Unit::Length(LengthUnit::Centimeters));
    }

    #[test]
    fn test_number_forms() {
        assert_eq!(parse_expression("-40 °C -> °F").unwrap().value(), -40.0);
        assert_eq!(parse_expression("+2 kg -> g").unwrap().value(), 2.0);
        assert_eq!(parse_expression("1.5e3 m -> km").unwrap().value(), 1500.0);
        assert_eq!(parse_expression("  5km->m  ").unwrap().value(), 5.0);
    }

    #[test]
    fn test_leading_decimal_point() {
        let c = parse_expression(".5 m -> cm").unwrap();
        assert_eq!(c.value(), 0.5);
        assert!((c.run().unwrap() - 50.0).abs() < 1e-9);
        assert_eq!(parse_expression("-.25 kg -> g").unwrap().value(), -0.25);
        assert!(parse_expression(". m -> cm").is_err());
    }

    #[test]
    fn test_cross_category() {
        let err = parse_expression("5 kg -> m").unwrap_err();
        assert!(matches!(err, ConversionError::IncompatibleUnits { .. }));
    }

    #[test]
    fn test_unknown_unit() {
        let err = parse_expression("5 parsecs -> m").unwrap_err();
        assert_eq!(err, ConversionError::InvalidUnit { unit: "parsecs".to_string(), category: None });
    }

    #[test]
    fn test_malformed() {
        for input in ["", "km -> mi", "5 km", "5 km -> ", "5 km mi", "5 km tomi", "1,50 m -> ft"] {
            assert!(
                matches!(parse_expression(input), Err(ConversionError::Parse(_))),
                "'{}' should not parse",
                input
            );
        }
    }

    #[test]
    fn test_unit_pair() {
        let (from, to) = parse_unit_pair("km->mi").unwrap();
        assert_eq!(from, Unit::Length(LengthUnit::Kilometers));
        assert_eq!(to, Unit::Length(LengthUnit::Miles));

        let (from, to) = parse_unit_pair("C to K").unwrap();
        assert_eq!(from, Unit::Temperature(TemperatureUnit::Celsius));
        assert_eq!(to, Unit::Temperature(TemperatureUnit::Kelvin));

        assert!(matches!(parse_unit_pair("kg->ft"), Err(ConversionError::IncompatibleUnits { .. })));
        assert!(matches!(parse_unit_pair("5 km->mi"), Err(ConversionError::Parse(_))));
    }
}
