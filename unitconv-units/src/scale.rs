//! Length and weight conversion
//!
//! Both categories are pure scalings of a base unit: the value is normalized
//! by the source factor and rescaled by the target factor.

use crate::ConversionError;
use crate::table::{ConversionFactorTable, LENGTH_FACTORS, WEIGHT_FACTORS};
use crate::unit::{LengthUnit, UnitKind, WeightUnit};

/// `(value / table[from]) * table[to]`
///
/// Both units are looked up before anything else, so a table missing either
/// one fails even when `from == to`. Converting a unit to itself returns the
/// value untouched.
pub fn convert_scaled<U: UnitKind>(
    value: f64,
    from: U,
    to: U,
    table: &ConversionFactorTable<U>,
) -> Result<f64, ConversionError> {
    let from_factor = table.factor(from)?;
    let to_factor = table.factor(to)?;

    if from == to {
        return Ok(value);
    }

    Ok((value / from_factor) * to_factor)
}

pub fn convert_length(value: f64, from: LengthUnit, to: LengthUnit) -> Result<f64, ConversionError> {
    convert_scaled(value, from, to, &LENGTH_FACTORS)
}

pub fn convert_weight(value: f64, from: WeightUnit, to: WeightUnit) -> Result<f64, ConversionError> {
    convert_scaled(value, from, to, &WEIGHT_FACTORS)
}

/// Length conversion with units given by name
pub fn convert_length_named(value: f64, from: &str, to: &str) -> Result<f64, ConversionError> {
    convert_length(value, LengthUnit::parse(from)?, LengthUnit::parse(to)?)
}

/// Weight conversion with units given by name
pub fn convert_weight_named(value: f64, from: &str, to: &str) -> Result<f64, ConversionError> {
    convert_weight(value, WeightUnit::parse(from)?, WeightUnit::parse(to)?)
}
