//! Conversion factor tables
//!
//! A factor is how many of the named unit equal one base unit, so
//! `base_value * factor` gives the value in that unit.

use crate::ConversionError;
use crate::unit::{LengthUnit, UnitKind, WeightUnit};

/// Immutable mapping from unit to its factor relative to the base unit.
/// The base unit itself is listed with factor 1.
#[derive(Debug)]
pub struct ConversionFactorTable<U: 'static> {
    factors: &'static [(U, f64)],
}

impl<U: 'static> ConversionFactorTable<U> {
    pub const fn new(factors: &'static [(U, f64)]) -> Self {
        ConversionFactorTable { factors }
    }
}

impl<U: UnitKind> ConversionFactorTable<U> {
    /// Factor for `unit`. A unit missing from the table is an error, never
    /// a default.
    pub fn factor(&self, unit: U) -> Result<f64, ConversionError> {
        self.factors
            .iter()
            .find(|(u, _)| *u == unit)
            .map(|&(_, f)| f)
            .ok_or_else(|| ConversionError::invalid_unit(unit.name(), Some(U::CATEGORY)))
    }
}

/// Length factors relative to meters
pub static LENGTH_FACTORS: ConversionFactorTable<LengthUnit> = ConversionFactorTable::new(
    &[
        (LengthUnit::Meters, 1.0),
        (LengthUnit::Kilometers, 0.001),
        (LengthUnit::Centimeters, 100.0),
        (LengthUnit::Millimeters, 1000.0),
        (LengthUnit::Miles, 0.000621371),
        (LengthUnit::Yards, 1.09361),
        (LengthUnit::Feet, 3.28084),
        (LengthUnit::Inches, 39.3701),
    ],
);

/// Weight factors relative to kilograms
pub static WEIGHT_FACTORS: ConversionFactorTable<WeightUnit> = ConversionFactorTable::new(
    &[
        (WeightUnit::Kilograms, 1.0),
        (WeightUnit::Grams, 1000.0),
        (WeightUnit::Pounds, 2.2046244202),
        (WeightUnit::Ounces, 35.274),
        (WeightUnit::Milligrams, 1_000_000.0),
    ],
);
