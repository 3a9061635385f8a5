//! Temperature conversion
//!
//! Temperatures are affine, not proportional, so they cannot share the factor
//! tables. Every (from, to) pair has its own formula below.

use crate::ConversionError;
use crate::unit::{TemperatureUnit, UnitKind};

const KELVIN_OFFSET: f64 = 273.15;
const FAHRENHEIT_OFFSET: f64 = 32.0;

pub fn convert_temperature(value: f64, from: TemperatureUnit, to: TemperatureUnit) -> f64 {
    use TemperatureUnit::*;

    match (from, to) {
        (Celsius, Celsius) | (Fahrenheit, Fahrenheit) | (Kelvin, Kelvin) => value,

        (Celsius, Fahrenheit) => value * 9.0 / 5.0 + FAHRENHEIT_OFFSET,
        (Celsius, Kelvin) => value + KELVIN_OFFSET,

        (Fahrenheit, Celsius) => (value - FAHRENHEIT_OFFSET) * 5.0 / 9.0,
        (Fahrenheit, Kelvin) => (value - FAHRENHEIT_OFFSET) * 5.0 / 9.0 + KELVIN_OFFSET,

        (Kelvin, Celsius) => value - KELVIN_OFFSET,
        (Kelvin, Fahrenheit) => (value - KELVIN_OFFSET) * 9.0 / 5.0 + FAHRENHEIT_OFFSET,
    }
}

/// Temperature conversion with units given by name. Unknown names on either
/// side are rejected rather than passed through.
pub fn convert_temperature_named(value: f64, from: &str, to: &str) -> Result<f64, ConversionError> {
    let from = TemperatureUnit::parse(from)?;
    let to = TemperatureUnit::parse(to)?;
    Ok(convert_temperature(value, from, to))
}
