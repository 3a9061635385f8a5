//! Category dispatch
//!
//! A [`Conversion`] is a fully resolved request: one variant per category,
//! each holding units of that category only. Running it routes to the
//! category's converter; errors are returned as-is.

use std::fmt;
use serde::{Serialize, Deserialize};
use unitconv_core::ensure_finite;

use crate::{Category, ConversionError, Unit};
use crate::render::render_line;
use crate::scale::{convert_length, convert_weight};
use crate::temperature::convert_temperature;
use crate::unit::{LengthUnit, TemperatureUnit, UnitKind, WeightUnit};

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Conversion {
    Length { value: f64, from: LengthUnit, to: LengthUnit },
    Weight { value: f64, from: WeightUnit, to: WeightUnit },
    Temperature { value: f64, from: TemperatureUnit, to: TemperatureUnit },
}

impl Conversion {
    /// Resolve unit names within `category`
    pub fn resolve(category: Category, value: f64, from: &str, to: &str) -> Result<Self, ConversionError> {
        let value = ensure_finite(value)?;
        Ok(match category {
            Category::Length => Conversion::Length {
                value,
                from: LengthUnit::parse(from)?,
                to: LengthUnit::parse(to)?,
            },
            Category::Weight => Conversion::Weight {
                value,
                from: WeightUnit::parse(from)?,
                to: WeightUnit::parse(to)?,
            },
            Category::Temperature => Conversion::Temperature {
                value,
                from: TemperatureUnit::parse(from)?,
                to: TemperatureUnit::parse(to)?,
            },
        })
    }

    /// Pair two tagged units. Units of different categories are rejected.
    pub fn between(value: f64, from: Unit, to: Unit) -> Result<Self, ConversionError> {
        let value = ensure_finite(value)?;
        match (from, to) {
            (Unit::Length(from), Unit::Length(to)) => Ok(Conversion::Length { value, from, to }),
            (Unit::Weight(from), Unit::Weight(to)) => Ok(Conversion::Weight { value, from, to }),
            (Unit::Temperature(from), Unit::Temperature(to)) => Ok(Conversion::Temperature { value, from, to }),
            _ => Err(ConversionError::IncompatibleUnits {
                from: from.name().to_string(),
                from_category: from.category(),
                to: to.name().to_string(),
                to_category: to.category(),
            }),
        }
    }

    pub fn category(&self) -> Category {
        match self {
            Conversion::Length { .. } => Category::Length,
            Conversion::Weight { .. } => Category::Weight,
            Conversion::Temperature { .. } => Category::Temperature,
        }
    }

    pub fn value(&self) -> f64 {
        match *self {
            Conversion::Length { value, .. }
            | Conversion::Weight { value, .. }
            | Conversion::Temperature { value, .. } => value,
        }
    }

    pub fn from_unit(&self) -> Unit {
        match *self {
            Conversion::Length { from, .. } => from.into(),
            Conversion::Weight { from, .. } => from.into(),
            Conversion::Temperature { from, .. } => from.into(),
        }
    }

    pub fn to_unit(&self) -> Unit {
        match *self {
            Conversion::Length { to, .. } => to.into(),
            Conversion::Weight { to, .. } => to.into(),
            Conversion::Temperature { to, .. } => to.into(),
        }
    }

    pub fn run(&self) -> Result<f64, ConversionError> {
        match *self {
            Conversion::Length { value, from, to } => convert_length(value, from, to),
            Conversion::Weight { value, from, to } => convert_weight(value, from, to),
            Conversion::Temperature { value, from, to } => Ok(convert_temperature(value, from, to)),
        }
    }

    /// Run and keep the inputs alongside the result for display
    pub fn report(&self) -> Result<ConversionReport, ConversionError> {
        Ok(ConversionReport {
            category: self.category(),
            value: self.value(),
            from_unit: self.from_unit(),
            result: self.run()?,
            to_unit: self.to_unit(),
        })
    }
}

/// Convert `value` between two units named within `category`
pub fn convert(category: Category, value: f64, from_unit: &str, to_unit: &str) -> Result<f64, ConversionError> {
    Conversion::resolve(category, value, from_unit, to_unit)?.run()
}

/// Convert between two tagged units, which must share a category
pub fn convert_units(value: f64, from: Unit, to: Unit) -> Result<f64, ConversionError> {
    Conversion::between(value, from, to)?.run()
}

/// A conversion request as an external caller sends it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConversionRequest {
    pub category: String,
    #[serde(default)]
    pub value: f64,
    pub from_unit: String,
    pub to_unit: String,
}

impl ConversionRequest {
    pub fn new(category: &str, value: f64, from_unit: &str, to_unit: &str) -> Self {
        ConversionRequest {
            category: category.to_string(),
            value,
            from_unit: from_unit.to_string(),
            to_unit: to_unit.to_string(),
        }
    }

    pub fn resolve(&self) -> Result<Conversion, ConversionError> {
        let category = Category::parse(&self.category)?;
        Conversion::resolve(category, self.value, &self.from_unit, &self.to_unit)
    }

    pub fn execute(&self) -> Result<ConversionReport, ConversionError> {
        self.resolve()?.report()
    }
}

/// Inputs and result of one conversion
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ConversionReport {
    pub category: Category,
    pub value: f64,
    pub from_unit: Unit,
    pub result: f64,
    pub to_unit: Unit,
}

impl ConversionReport {
    pub fn render(&self) -> String {
        render_line(self.value, self.from_unit, self.result, self.to_unit)
    }
}

impl fmt::Display for ConversionReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.render())
    }
}
