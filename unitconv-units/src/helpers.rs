//! Argument extraction for the function plugins

use unitconv_core::{UnitError, Value};
use unitconv_plugin::ArgMeta;

/// Extract a number. Numeric text ("1,500") is accepted, as form fields send text.
pub fn extract_number(value: &Value, func: &str, arg: &str) -> Result<f64, UnitError> {
    match value {
        Value::Number(n) => Ok(*n),
        Value::Text(_) => match value.to_number() {
            Value::Number(n) => Ok(n),
            _ => Err(UnitError::arg_type(func, arg, "Number", "Text")),
        },
        Value::Error(e) => Err(e.clone()),
        other => Err(UnitError::arg_type(func, arg, "Number", other.type_name())),
    }
}

pub fn extract_text<'a>(value: &'a Value, func: &str, arg: &str) -> Result<&'a str, UnitError> {
    match value {
        Value::Text(s) => Ok(s),
        Value::Error(e) => Err(e.clone()),
        other => Err(UnitError::arg_type(func, arg, "Text", other.type_name())),
    }
}

/// Optional text argument; missing or null means absent
pub fn extract_optional_text<'a>(args: &'a [Value], index: usize, func: &str, arg: &str) -> Result<Option<&'a str>, UnitError> {
    match args.get(index) {
        Some(v) if !v.is_null() => extract_text(v, func, arg).map(Some),
        _ => Ok(None),
    }
}

/// Fail with ARG_COUNT unless every non-optional argument in `meta` was given
pub fn require_args(args: &[Value], meta: &[ArgMeta], func: &str) -> Result<(), UnitError> {
    let required = ArgMeta::required_count(meta);
    if args.len() < required {
        return Err(UnitError::arg_count(func, required, args.len()));
    }
    Ok(())
}
