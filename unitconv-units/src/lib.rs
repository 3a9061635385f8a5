//! unitconv Units - Length, Weight and Temperature Conversion
//!
//! Converts a value between two units of the same category.
//!
//! Categories:
//! - Length (Meters, Kilometers, Centimeters, Millimeters, Miles, Yards, Feet, Inches)
//! - Weight (Kilograms, Grams, Pounds, Ounces, Milligrams)
//! - Temperature (Celsius, Fahrenheit, Kelvin)
//!
//! Length and weight scale through a per-category factor table relative to a
//! base unit (Meters, Kilograms). Temperature uses explicit affine formulas.
//!
//! ```text
//! convert(Category::Length, 1000.0, "Meters", "Kilometers") == Ok(1.0)
//! parse_expression("100 Celsius to Fahrenheit")?.run() == Ok(212.0)
//! ```

mod category;
mod convert;
mod dispatch;
mod error;
mod expression;
mod helpers;
mod render;
mod scale;
mod table;
mod temperature;
pub mod unit;

pub use category::Category;
pub use convert::report_to_value;
pub use dispatch::{convert, convert_units, Conversion, ConversionReport, ConversionRequest};
pub use error::ConversionError;
pub use expression::{parse_expression, parse_unit_pair};
pub use render::{format_grouped, render_line, DISPLAY_DECIMALS};
pub use scale::{convert_length, convert_length_named, convert_scaled, convert_weight, convert_weight_named};
pub use table::{ConversionFactorTable, LENGTH_FACTORS, WEIGHT_FACTORS};
pub use temperature::{convert_temperature, convert_temperature_named};
pub use unit::{LengthUnit, TemperatureUnit, Unit, UnitKind, WeightUnit};

use unitconv_plugin::PluginRegistry;

/// Load unit functions into registry
pub fn load_units_library(registry: PluginRegistry) -> PluginRegistry {
    registry
        // Conversion (5 functions)
        .with_function(convert::Convert)
        .with_function(convert::ConvertLength)
        .with_function(convert::ConvertWeight)
        .with_function(convert::ConvertTemperature)
        .with_function(convert::InUnits)

        // Expressions and display (2 functions)
        .with_function(convert::ConvertExpression)
        .with_function(convert::RenderConversion)

        // Inspection (2 functions)
        .with_function(convert::ListUnits)
        .with_function(convert::ListCategories)
}

/// A registry with the units library loaded
pub fn standard_registry() -> PluginRegistry {
    load_units_library(PluginRegistry::new())
}
