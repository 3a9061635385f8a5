//! Conversion functions exposed through the plugin registry

use std::collections::HashMap;
use unitconv_plugin::prelude::*;

use crate::{Category, Conversion, ConversionError, ConversionReport, Unit};
use crate::expression::{parse_expression, parse_unit_pair};
use crate::helpers::{extract_number, extract_optional_text, extract_text, require_args};

fn to_value(result: Result<f64, ConversionError>) -> Value {
    match result {
        Ok(n) => Value::Number(n),
        Err(e) => Value::Error(e.into()),
    }
}

/// Structured form of a finished conversion
pub fn report_to_value(report: &ConversionReport) -> Value {
    let mut obj = HashMap::new();
    obj.insert("category".to_string(), Value::Text(report.category.name().to_string()));
    obj.insert("value".to_string(), Value::Number(report.value));
    obj.insert("from_unit".to_string(), Value::Text(report.from_unit.name().to_string()));
    obj.insert("result".to_string(), Value::Number(report.result));
    obj.insert("to_unit".to_string(), Value::Text(report.to_unit.name().to_string()));
    obj.insert("display".to_string(), Value::Text(report.render()));
    Value::Object(obj)
}

/// Shared argument handling for `value, from_unit, to_unit, [category]`.
///
/// Without a category, the source unit decides it and the target must
/// belong to the same one.
fn resolve_args(func: &str, args: &[Value], category: Option<Category>) -> Result<Conversion, UnitError> {
    let meta: &[ArgMeta] = if category.is_some() { &CATEGORY_ARGS } else { &CONVERT_ARGS };
    require_args(args, meta, func)?;

    let value = extract_number(&args[0], func, "value")?;
    let from = extract_text(&args[1], func, "from_unit")?;
    let to = extract_text(&args[2], func, "to_unit")?;

    let category = match category {
        Some(c) => Some(c),
        None => extract_optional_text(args, 3, func, "category")?
            .map(Category::parse)
            .transpose()?,
    };

    let conversion = match category {
        Some(c) => Conversion::resolve(c, value, from, to)?,
        None => {
            let from = Unit::parse_any(from)?;
            let to = Unit::parse_in(from.category(), to)?;
            Conversion::between(value, from, to)?
        }
    };
    Ok(conversion)
}

fn run_args(func: &str, args: &[Value], category: Option<Category>) -> Value {
    match resolve_args(func, args, category) {
        Ok(conversion) => to_value(conversion.run()),
        Err(e) => Value::Error(e),
    }
}

// ============ convert ============

pub struct Convert;

static CONVERT_ARGS: [ArgMeta; 4] = [
    ArgMeta::required("value", "Number", "Value to convert"),
    ArgMeta::required("from_unit", "Text", "Source unit (e.g., \"Meters\" or \"km\")"),
    ArgMeta::required("to_unit", "Text", "Target unit of the same category"),
    ArgMeta::optional("category", "Text", "Length, Weight or Temperature", "category of from_unit"),
];

static CONVERT_EXAMPLES: [&str; 3] = [
    "convert(1000, \"Meters\", \"Kilometers\") → 1",
    "convert(1, \"kg\", \"g\") → 1000",
    "convert(100, \"Celsius\", \"Kelvin\", \"Temperature\") → 373.15",
];

static CONVERT_RELATED: [&str; 3] = ["in_units", "convert_expression", "render_conversion"];

impl FunctionPlugin for Convert {
    fn meta(&self) -> FunctionMeta {
        FunctionMeta {
            name: "convert",
            description: "Convert a value from one unit to another within a category",
            usage: "convert(value, from_unit, to_unit, [category])",
            args: &CONVERT_ARGS,
            returns: "Number",
            examples: &CONVERT_EXAMPLES,
            category: "units",
            related: &CONVERT_RELATED,
        }
    }

    fn call(&self, args: &[Value]) -> Value {
        run_args("convert", args, None)
    }
}

// ============ per-category converters ============

static CATEGORY_ARGS: [ArgMeta; 3] = [
    ArgMeta::required("value", "Number", "Value to convert"),
    ArgMeta::required("from_unit", "Text", "Source unit"),
    ArgMeta::required("to_unit", "Text", "Target unit"),
];

static CATEGORY_RELATED: [&str; 2] = ["convert", "list_units"];

pub struct ConvertLength;

static CONVERT_LENGTH_EXAMPLES: [&str; 2] = [
    "convert_length(1, \"Meters\", \"Centimeters\") → 100",
    "convert_length(1, \"Miles\", \"Feet\") → 5280.0",
];

impl FunctionPlugin for ConvertLength {
    fn meta(&self) -> FunctionMeta {
        FunctionMeta {
            name: "convert_length",
            description: "Convert between length units via meters",
            usage: "convert_length(value, from_unit, to_unit)",
            args: &CATEGORY_ARGS,
            returns: "Number",
            examples: &CONVERT_LENGTH_EXAMPLES,
            category: "units",
            related: &CATEGORY_RELATED,
        }
    }

    fn call(&self, args: &[Value]) -> Value {
        run_args("convert_length", args, Some(Category::Length))
    }
}

pub struct ConvertWeight;

static CONVERT_WEIGHT_EXAMPLES: [&str; 2] = [
    "convert_weight(1, \"Kilograms\", \"Grams\") → 1000",
    "convert_weight(1, \"Pounds\", \"Ounces\") → 16.0",
];

impl FunctionPlugin for ConvertWeight {
    fn meta(&self) -> FunctionMeta {
        FunctionMeta {
            name: "convert_weight",
            description: "Convert between weight units via kilograms",
            usage: "convert_weight(value, from_unit, to_unit)",
            args: &CATEGORY_ARGS,
            returns: "Number",
            examples: &CONVERT_WEIGHT_EXAMPLES,
            category: "units",
            related: &CATEGORY_RELATED,
        }
    }

    fn call(&self, args: &[Value]) -> Value {
        run_args("convert_weight", args, Some(Category::Weight))
    }
}

pub struct ConvertTemperature;

static CONVERT_TEMPERATURE_EXAMPLES: [&str; 3] = [
    "convert_temperature(0, \"Celsius\", \"Fahrenheit\") → 32",
    "convert_temperature(100, \"Celsius\", \"Kelvin\") → 373.15",
    "convert_temperature(0, \"Kelvin\", \"Celsius\") → -273.15",
];

impl FunctionPlugin for ConvertTemperature {
    fn meta(&self) -> FunctionMeta {
        FunctionMeta {
            name: "convert_temperature",
            description: "Convert between Celsius, Fahrenheit and Kelvin",
            usage: "convert_temperature(value, from_unit, to_unit)",
            args: &CATEGORY_ARGS,
            returns: "Number",
            examples: &CONVERT_TEMPERATURE_EXAMPLES,
            category: "units",
            related: &CATEGORY_RELATED,
        }
    }

    fn call(&self, args: &[Value]) -> Value {
        run_args("convert_temperature", args, Some(Category::Temperature))
    }
}

// ============ in_units ============

pub struct InUnits;

static IN_UNITS_ARGS: [ArgMeta; 2] = [
    ArgMeta::required("value", "Number", "Value to convert"),
    ArgMeta::required("conversion", "Text", "Conversion spec like \"km->mi\""),
];

static IN_UNITS_EXAMPLES: [&str; 2] = [
    "in_units(100, \"km->mi\") → 62.1371",
    "in_units(0, \"C->F\") → 32",
];

static IN_UNITS_RELATED: [&str; 2] = ["convert", "convert_expression"];

impl FunctionPlugin for InUnits {
    fn meta(&self) -> FunctionMeta {
        FunctionMeta {
            name: "in_units",
            description: "Convert a value using a conversion spec",
            usage: "in_units(value, \"from->to\")",
            args: &IN_UNITS_ARGS,
            returns: "Number",
            examples: &IN_UNITS_EXAMPLES,
            category: "units",
            related: &IN_UNITS_RELATED,
        }
    }

    fn call(&self, args: &[Value]) -> Value {
        if let Err(e) = require_args(args, &IN_UNITS_ARGS, "in_units") {
            return Value::Error(e);
        }

        let value = match extract_number(&args[0], "in_units", "value") {
            Ok(n) => n,
            Err(e) => return Value::Error(e),
        };

        let spec = match extract_text(&args[1], "in_units", "conversion") {
            Ok(s) => s,
            Err(e) => return Value::Error(e),
        };

        let (from, to) = match parse_unit_pair(spec) {
            Ok(pair) => pair,
            Err(e) => return Value::Error(e.into()),
        };

        to_value(crate::convert_units(value, from, to))
    }
}

// ============ convert_expression ============

pub struct ConvertExpression;

static CONVERT_EXPRESSION_ARGS: [ArgMeta; 1] = [
    ArgMeta::required("expression", "Text", "Expression like \"12 km -> mi\""),
];

static CONVERT_EXPRESSION_EXAMPLES: [&str; 3] = [
    "convert_expression(\"12.5 km -> mi\")",
    "convert_expression(\"100 Celsius to Fahrenheit\")",
    "convert_expression(\"1,500 g → lb\")",
];

static CONVERT_EXPRESSION_RELATED: [&str; 2] = ["convert", "in_units"];

impl FunctionPlugin for ConvertExpression {
    fn meta(&self) -> FunctionMeta {
        FunctionMeta {
            name: "convert_expression",
            description: "Parse and run a free-form conversion such as \"12 km -> mi\"",
            usage: "convert_expression(\"<value> <unit> -> <unit>\")",
            args: &CONVERT_EXPRESSION_ARGS,
            returns: "Object",
            examples: &CONVERT_EXPRESSION_EXAMPLES,
            category: "units",
            related: &CONVERT_EXPRESSION_RELATED,
        }
    }

    fn call(&self, args: &[Value]) -> Value {
        if let Err(e) = require_args(args, &CONVERT_EXPRESSION_ARGS, "convert_expression") {
            return Value::Error(e);
        }

        let input = match extract_text(&args[0], "convert_expression", "expression") {
            Ok(s) => s,
            Err(e) => return Value::Error(e),
        };

        match parse_expression(input).and_then(|c| c.report()) {
            Ok(report) => report_to_value(&report),
            Err(e) => Value::Error(e.into()),
        }
    }
}

// ============ render_conversion ============

pub struct RenderConversion;

static RENDER_EXAMPLES: [&str; 2] = [
    "render_conversion(1000, \"Meters\", \"Kilometers\") → \"1,000.0000 Meters -> 1.0000 Kilometers\"",
    "render_conversion(0, \"Kelvin\", \"Celsius\") → \"0.0000 Kelvin -> -273.1500 Celsius\"",
];

static RENDER_RELATED: [&str; 1] = ["convert"];

impl FunctionPlugin for RenderConversion {
    fn meta(&self) -> FunctionMeta {
        FunctionMeta {
            name: "render_conversion",
            description: "Convert and format the result line with 4 decimals",
            usage: "render_conversion(value, from_unit, to_unit, [category])",
            args: &CONVERT_ARGS,
            returns: "Text",
            examples: &RENDER_EXAMPLES,
            category: "units",
            related: &RENDER_RELATED,
        }
    }

    fn call(&self, args: &[Value]) -> Value {
        let report = resolve_args("render_conversion", args, None)
            .and_then(|c| c.report().map_err(UnitError::from));
        match report {
            Ok(report) => Value::Text(report.render()),
            Err(e) => Value::Error(e),
        }
    }
}

// ============ list_units ============

pub struct ListUnits;

static LIST_UNITS_ARGS: [ArgMeta; 1] = [
    ArgMeta::optional("category", "Text", "Length, Weight or Temperature", "all categories"),
];

static LIST_UNITS_EXAMPLES: [&str; 2] = [
    "list_units(\"Weight\") → [\"Kilograms\", \"Grams\", \"Pounds\", \"Ounces\", \"Milligrams\"]",
    "list_units() → {Length: [...], Weight: [...], Temperature: [...]}",
];

static LIST_UNITS_RELATED: [&str; 2] = ["list_categories", "convert"];

fn unit_list(category: Category) -> Value {
    Value::List(
        category
            .unit_names()
            .into_iter()
            .map(|name| Value::Text(name.to_string()))
            .collect(),
    )
}

impl FunctionPlugin for ListUnits {
    fn meta(&self) -> FunctionMeta {
        FunctionMeta {
            name: "list_units",
            description: "List the units of one category, or of all categories",
            usage: "list_units([category])",
            args: &LIST_UNITS_ARGS,
            returns: "List | Object",
            examples: &LIST_UNITS_EXAMPLES,
            category: "units",
            related: &LIST_UNITS_RELATED,
        }
    }

    fn call(&self, args: &[Value]) -> Value {
        let category = match extract_optional_text(args, 0, "list_units", "category") {
            Ok(c) => c,
            Err(e) => return Value::Error(e),
        };

        match category {
            Some(name) => match Category::parse(name) {
                Ok(c) => unit_list(c),
                Err(e) => Value::Error(e.into()),
            },
            None => Value::Object(
                Category::ALL
                    .iter()
                    .map(|c| (c.name().to_string(), unit_list(*c)))
                    .collect(),
            ),
        }
    }
}

// ============ list_categories ============

pub struct ListCategories;

static LIST_CATEGORIES_EXAMPLES: [&str; 1] = ["list_categories() → [\"Length\", \"Weight\", \"Temperature\"]"];

static LIST_CATEGORIES_RELATED: [&str; 1] = ["list_units"];

impl FunctionPlugin for ListCategories {
    fn meta(&self) -> FunctionMeta {
        FunctionMeta {
            name: "list_categories",
            description: "List the supported unit categories",
            usage: "list_categories()",
            args: &[],
            returns: "List",
            examples: &LIST_CATEGORIES_EXAMPLES,
            category: "units",
            related: &LIST_CATEGORIES_RELATED,
        }
    }

    fn call(&self, _args: &[Value]) -> Value {
        Value::List(
            Category::ALL
                .iter()
                .map(|c| Value::Text(c.name().to_string()))
                .collect(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text(s: &str) -> Value {
        Value::Text(s.to_string())
    }

    fn approx_eq(a: f64, b: f64) -> bool {
        (a - b).abs() <= 1e-6 * b.abs().max(1.0)
    }

    #[test]
    fn test_convert_infers_category() {
        let result = Convert.call(&[Value::Number(1000.0), text("Meters"), text("Kilometers")]);
        assert!(approx_eq(result.as_number().unwrap(), 1.0));

        let result = Convert.call(&[Value::Number(0.0), text("C"), text("F")]);
        assert!(approx_eq(result.as_number().unwrap(), 32.0));
    }

    #[test]
    fn test_convert_with_category() {
        let args = [Value::Number(1.0), text("Kilograms"), text("Grams"), text("Weight")];
        assert_eq!(Convert.call(&args).as_number(), Some(1000.0));

        let args = [Value::Number(1.0), text("Kilograms"), text("Grams"), text("Length")];
        assert_eq!(Convert.call(&args).as_error().unwrap().code, codes::INVALID_UNIT);
    }

    #[test]
    fn test_convert_target_outside_inferred_category() {
        let result = Convert.call(&[Value::Number(1.0), text("Feet"), text("Grams")]);
        let err = result.as_error().unwrap();
        assert_eq!(err.code, codes::INVALID_UNIT);
        assert!(err.suggestion.as_deref().unwrap_or("").contains("Inches"));
    }

    #[test]
    fn test_convert_argument_errors() {
        let result = Convert.call(&[Value::Number(1.0)]);
        assert_eq!(result.as_error().unwrap().code, codes::ARG_COUNT);

        let result = Convert.call(&[text("one"), text("m"), text("km")]);
        assert_eq!(result.as_error().unwrap().code, codes::ARG_TYPE);

        let result = Convert.call(&[Value::Number(1.0), Value::Number(2.0), text("km")]);
        assert_eq!(result.as_error().unwrap().code, codes::ARG_TYPE);

        let args = [Value::Number(1.0), text("m"), text("km"), text("Volume")];
        assert_eq!(Convert.call(&args).as_error().unwrap().code, codes::UNKNOWN_CATEGORY);
    }

    #[test]
    fn test_category_functions() {
        let cm = ConvertLength.call(&[Value::Number(1.0), text("Meters"), text("Centimeters")]);
        assert_eq!(cm.as_number(), Some(100.0));

        let g = ConvertWeight.call(&[Value::Number(1.0), text("Kilograms"), text("Grams")]);
        assert_eq!(g.as_number(), Some(1000.0));

        let k = ConvertTemperature.call(&[Value::Number(100.0), text("Celsius"), text("Kelvin")]);
        assert!(approx_eq(k.as_number().unwrap(), 373.15));

        let err = ConvertLength.call(&[Value::Number(1.0), text("Parsecs"), text("Meters")]);
        assert_eq!(err.as_error().unwrap().code, codes::INVALID_UNIT);

        let err = ConvertTemperature.call(&[Value::Number(1.0), text("Celsius"), text("Rankine")]);
        assert_eq!(err.as_error().unwrap().code, codes::INVALID_UNIT);
    }

    #[test]
    fn test_zero_converts_to_zero() {
        for (category, plugin) in [
            (Category::Length, &ConvertLength as &dyn FunctionPlugin),
            (Category::Weight, &ConvertWeight as &dyn FunctionPlugin),
        ] {
            for from in category.unit_names() {
                for to in category.unit_names() {
                    let result = plugin.call(&[Value::Number(0.0), text(from), text(to)]);
                    assert_eq!(result.as_number(), Some(0.0), "{} -> {}", from, to);
                }
            }
        }
    }

    #[test]
    fn test_numeric_text_value() {
        let result = ConvertWeight.call(&[text("1,500"), text("g"), text("kg")]);
        assert!(approx_eq(result.as_number().unwrap(), 1.5));
    }

    #[test]
    fn test_in_units() {
        let result = InUnits.call(&[Value::Number(1000.0), text("m->km")]);
        assert!(approx_eq(result.as_number().unwrap(), 1.0));

        let result = InUnits.call(&[Value::Number(1.0), text("kg->ft")]);
        assert_eq!(result.as_error().unwrap().code, codes::INCOMPATIBLE_UNITS);

        let result = InUnits.call(&[Value::Number(1.0), text("kg")]);
        assert_eq!(result.as_error().unwrap().code, codes::PARSE_ERROR);
    }

    #[test]
    fn test_convert_expression() {
        let result = ConvertExpression.call(&[text("1,000 m -> km")]);
        let obj = result.as_object().unwrap();
        assert_eq!(obj["category"], text("Length"));
        assert_eq!(obj["from_unit"], text("Meters"));
        assert_eq!(obj["to_unit"], text("Kilometers"));
        assert_eq!(obj["value"], Value::Number(1000.0));
        assert_eq!(obj["display"], text("1,000.0000 Meters -> 1.0000 Kilometers"));
    }

    #[test]
    fn test_convert_expression_errors() {
        let result = ConvertExpression.call(&[text("5 kg -> m")]);
        assert_eq!(result.as_error().unwrap().code, codes::INCOMPATIBLE_UNITS);

        let result = ConvertExpression.call(&[text("five kg -> g")]);
        assert_eq!(result.as_error().unwrap().code, codes::PARSE_ERROR);

        let result = ConvertExpression.call(&[]);
        assert_eq!(result.as_error().unwrap().code, codes::ARG_COUNT);
    }

    #[test]
    fn test_render_conversion() {
        let result = RenderConversion.call(&[Value::Number(0.0), text("Kelvin"), text("Celsius")]);
        assert_eq!(result.as_text(), Some("0.0000 Kelvin -> -273.1500 Celsius"));
    }

    #[test]
    fn test_list_units() {
        let result = ListUnits.call(&[text("Temperature")]);
        assert_eq!(
            result,
            Value::List(vec![text("Celsius"), text("Fahrenheit"), text("Kelvin")])
        );

        let all = ListUnits.call(&[]);
        let obj = all.as_object().unwrap();
        assert_eq!(obj.len(), 3);
        assert_eq!(obj["Length"].as_list().unwrap().len(), 8);

        let err = ListUnits.call(&[text("Volume")]);
        assert_eq!(err.as_error().unwrap().code, codes::UNKNOWN_CATEGORY);
    }

    #[test]
    fn test_list_categories() {
        assert_eq!(
            ListCategories.call(&[]),
            Value::List(vec![text("Length"), text("Weight"), text("Temperature")])
        );
    }
}
