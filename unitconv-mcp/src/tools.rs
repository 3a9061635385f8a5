//! MCP tools
//!
//! - convert: Convert a value between two units of a category
//! - convert_expression: Run a free-form conversion like "12 km -> mi"
//! - list_units: List the units of one or all categories
//! - help: Documentation for the conversion functions

use serde_json::{json, Value as JsonValue};
use tracing::{debug, warn};
use unitconv_core::{UnitError, Value};
use unitconv_plugin::PluginRegistry;
use unitconv_units::{report_to_value, Category, ConversionRequest};

use crate::protocol::McpError;

pub const TOOL_NAMES: [&str; 4] = ["convert", "convert_expression", "list_units", "help"];

pub fn tools_list() -> JsonValue {
    json!({
        "tools": [
            {
                "name": "convert",
                "description": "Convert a value between two units of the same category. Returns the result and a display line with 4 decimals.",
                "inputSchema": {
                    "type": "object",
                    "properties": {
                        "category": {
                            "type": "string",
                            "description": "Unit category",
                            "enum": ["Length", "Weight", "Temperature"]
                        },
                        "value": {
                            "type": "number",
                            "description": "Value to convert (default: 0). Length and Weight values must be at least 0.",
                            "default": 0.0
                        },
                        "from_unit": {
                            "type": "string",
                            "description": "Source unit, e.g. \"Meters\""
                        },
                        "to_unit": {
                            "type": "string",
                            "description": "Target unit, e.g. \"Kilometers\""
                        }
                    },
                    "required": ["category", "from_unit", "to_unit"]
                }
            },
            {
                "name": "convert_expression",
                "description": "Convert using a free-form expression such as \"12.5 km -> mi\" or \"100 Celsius to Fahrenheit\".",
                "inputSchema": {
                    "type": "object",
                    "properties": {
                        "expression": {
                            "type": "string",
                            "description": "<value> <unit> (->|→|to|in) <unit>"
                        }
                    },
                    "required": ["expression"]
                }
            },
            {
                "name": "list_units",
                "description": "List the units of a category, or of every category when omitted.",
                "inputSchema": {
                    "type": "object",
                    "properties": {
                        "category": {
                            "type": "string",
                            "description": "Unit category",
                            "enum": ["Length", "Weight", "Temperature"]
                        }
                    }
                }
            },
            {
                "name": "help",
                "description": "Get documentation for a conversion function, or general help.",
                "inputSchema": {
                    "type": "object",
                    "properties": {
                        "name": {
                            "type": "string",
                            "description": "Function name. Omit for general help."
                        }
                    }
                }
            }
        ]
    })
}

pub fn call_tool(registry: &PluginRegistry, params: &Option<JsonValue>) -> Result<JsonValue, McpError> {
    let params = params
        .as_ref()
        .ok_or_else(|| McpError::invalid_params("Missing params"))?;

    let name = params
        .get("name")
        .and_then(|v| v.as_str())
        .ok_or_else(|| McpError::invalid_params("Missing tool name"))?;

    let args = params.get("arguments").cloned().unwrap_or(json!({}));

    debug!(tool = name, "calling tool");
    match name {
        "convert" => tool_convert(args),
        "convert_expression" => tool_convert_expression(registry, &args),
        "list_units" => tool_list_units(registry, &args),
        "help" => tool_help(registry, &args),
        _ => {
            warn!(tool = name, "unknown tool");
            Err(McpError::invalid_params(format!("Unknown tool: {}", name))
                .with_data(json!({ "available": TOOL_NAMES })))
        }
    }
}

fn tool_result(text: String, data: JsonValue) -> JsonValue {
    json!({
        "content": [{ "type": "text", "text": text }],
        "data": data,
        "isError": false
    })
}

fn tool_error(err: &UnitError) -> JsonValue {
    json!({
        "content": [{ "type": "text", "text": err.to_string() }],
        "data": Value::Error(err.clone()).to_json(),
        "isError": true
    })
}

fn optional_str<'a>(args: &'a JsonValue, key: &str) -> Result<Option<&'a str>, McpError> {
    match args.get(key) {
        None | Some(JsonValue::Null) => Ok(None),
        Some(JsonValue::String(s)) => Ok(Some(s)),
        Some(_) => Err(McpError::invalid_params(format!("{} must be a string", key))),
    }
}

fn tool_convert(args: JsonValue) -> Result<JsonValue, McpError> {
    let request: ConversionRequest = serde_json::from_value(args)
        .map_err(|e| McpError::invalid_params(format!("Invalid convert arguments: {}", e)))?;

    let category = match Category::parse(&request.category) {
        Ok(c) => c,
        Err(e) => return Ok(tool_error(&e.into())),
    };

    // Temperatures may go below zero; lengths and weights may not
    if request.value < 0.0 && matches!(category, Category::Length | Category::Weight) {
        return Ok(tool_error(&UnitError::invalid_value(format!(
            "{} values must be at least 0, got {}",
            category, request.value
        ))));
    }

    match request.execute() {
        Ok(report) => Ok(tool_result(report.render(), report_to_value(&report).to_json())),
        Err(e) => Ok(tool_error(&e.into())),
    }
}

fn tool_convert_expression(registry: &PluginRegistry, args: &JsonValue) -> Result<JsonValue, McpError> {
    let expression = optional_str(args, "expression")?
        .ok_or_else(|| McpError::invalid_params("Missing expression argument"))?;

    let result = registry.call_function("convert_expression", &[Value::Text(expression.to_string())]);
    Ok(match &result {
        Value::Error(e) => tool_error(e),
        Value::Object(obj) => {
            let text = obj.get("display").map(|d| d.to_string()).unwrap_or_default();
            tool_result(text, result.to_json())
        }
        other => tool_result(other.to_string(), other.to_json()),
    })
}

fn tool_list_units(registry: &PluginRegistry, args: &JsonValue) -> Result<JsonValue, McpError> {
    let category = optional_str(args, "category")?;

    let call_args: Vec<Value> = category.map(|c| Value::Text(c.to_string())).into_iter().collect();
    let result = registry.call_function("list_units", &call_args);
    Ok(match &result {
        Value::Error(e) => tool_error(e),
        _ => tool_result(format_units(&result, category), result.to_json()),
    })
}

fn unit_line(label: &str, units: &Value) -> String {
    let names: Vec<String> = units
        .as_list()
        .unwrap_or(&[])
        .iter()
        .map(|u| u.to_string())
        .collect();
    format!("{}: {}", label, names.join(", "))
}

fn format_units(units: &Value, category: Option<&str>) -> String {
    match units {
        Value::Object(map) => Category::ALL
            .iter()
            .filter_map(|c| map.get(c.name()).map(|list| unit_line(c.name(), list)))
            .collect::<Vec<_>>()
            .join("\n"),
        Value::List(_) => {
            let label = category
                .and_then(|c| Category::parse(c).ok())
                .map(|c| c.name())
                .unwrap_or("Units");
            unit_line(label, units)
        }
        other => other.to_string(),
    }
}

fn tool_help(registry: &PluginRegistry, args: &JsonValue) -> Result<JsonValue, McpError> {
    let name = optional_str(args, "name")?;
    let help = registry.help(name);
    Ok(match &help {
        Value::Error(e) => tool_error(e),
        _ => tool_result(format_help(&help), help.to_json()),
    })
}

fn format_help(help: &Value) -> String {
    let Value::Object(map) = help else {
        return help.to_string();
    };

    let mut out = String::new();
    if let Some(Value::Text(n)) = map.get("name") {
        out.push_str(&format!("# {}\n\n", n));
    }
    if let Some(Value::Text(d)) = map.get("description") {
        out.push_str(&format!("{}\n\n", d));
    }
    if let Some(Value::Text(u)) = map.get("usage") {
        out.push_str(&format!("**Usage:** `{}`\n\n", u));
    }
    if let Some(Value::List(examples)) = map.get("examples") {
        for example in examples {
            out.push_str(&format!("- `{}`\n", example));
        }
    }

    // General help: functions grouped by category
    if let Some(Value::Object(groups)) = map.get("functions") {
        let mut categories: Vec<&String> = groups.keys().collect();
        categories.sort();
        for category in categories {
            out.push_str(&format!("## {}\n\n", category));
            if let Some(Value::List(names)) = groups.get(category) {
                for name in names {
                    out.push_str(&format!("- {}\n", name));
                }
            }
            out.push('\n');
        }
    }

    out.trim_end().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use unitconv_core::codes;

    fn registry() -> PluginRegistry {
        unitconv_units::standard_registry()
    }

    fn call(name: &str, arguments: JsonValue) -> Result<JsonValue, McpError> {
        call_tool(&registry(), &Some(json!({ "name": name, "arguments": arguments })))
    }

    fn text_of(result: &JsonValue) -> &str {
        result["content"][0]["text"].as_str().unwrap_or("")
    }

    #[test]
    fn test_tools_list_names() {
        let list = tools_list();
        let names: Vec<&str> = list["tools"]
            .as_array()
            .unwrap()
            .iter()
            .filter_map(|t| t["name"].as_str())
            .collect();
        assert_eq!(names, TOOL_NAMES);
    }

    #[test]
    fn test_convert() {
        let result = call(
            "convert",
            json!({"category": "Length", "value": 1000, "from_unit": "Meters", "to_unit": "Kilometers"}),
        )
        .unwrap();
        assert_eq!(result["isError"], false);
        assert_eq!(text_of(&result), "1,000.0000 Meters -> 1.0000 Kilometers");
        assert_eq!(result["data"]["category"], "Length");
        assert_eq!(result["data"]["to_unit"], "Kilometers");
    }

    #[test]
    fn test_convert_value_defaults_to_zero() {
        let result = call(
            "convert",
            json!({"category": "Weight", "from_unit": "Pounds", "to_unit": "Grams"}),
        )
        .unwrap();
        assert_eq!(text_of(&result), "0.0000 Pounds -> 0.0000 Grams");
    }

    #[test]
    fn test_convert_invalid_unit_is_tool_error() {
        let result = call(
            "convert",
            json!({"category": "Length", "value": 1, "from_unit": "Parsecs", "to_unit": "Meters"}),
        )
        .unwrap();
        assert_eq!(result["isError"], true);
        assert_eq!(result["data"]["error"], codes::INVALID_UNIT);
        assert!(text_of(&result).contains("Parsecs"));
    }

    #[test]
    fn test_convert_unknown_category() {
        let result = call(
            "convert",
            json!({"category": "Volume", "value": 1, "from_unit": "Liters", "to_unit": "Gallons"}),
        )
        .unwrap();
        assert_eq!(result["data"]["error"], codes::UNKNOWN_CATEGORY);
    }

    #[test]
    fn test_convert_rejects_negative_length() {
        let result = call(
            "convert",
            json!({"category": "Length", "value": -1, "from_unit": "Meters", "to_unit": "Feet"}),
        )
        .unwrap();
        assert_eq!(result["isError"], true);
        assert_eq!(result["data"]["error"], codes::INVALID_VALUE);
    }

    #[test]
    fn test_convert_allows_negative_temperature() {
        let result = call(
            "convert",
            json!({"category": "Temperature", "value": -40, "from_unit": "Celsius", "to_unit": "Fahrenheit"}),
        )
        .unwrap();
        assert_eq!(result["isError"], false);
        assert_eq!(text_of(&result), "-40.0000 Celsius -> -40.0000 Fahrenheit");
    }

    #[test]
    fn test_convert_bad_arguments() {
        let err = call("convert", json!({"category": "Length", "value": "ten", "from_unit": "m", "to_unit": "km"}))
            .unwrap_err();
        assert_eq!(err.code, crate::protocol::INVALID_PARAMS);

        let err = call("convert", json!({"category": "Length", "value": 1})).unwrap_err();
        assert_eq!(err.code, crate::protocol::INVALID_PARAMS);
    }

    #[test]
    fn test_convert_expression() {
        let result = call("convert_expression", json!({"expression": "100 Celsius to Fahrenheit"})).unwrap();
        assert_eq!(result["isError"], false);
        assert_eq!(text_of(&result), "100.0000 Celsius -> 212.0000 Fahrenheit");
        assert_eq!(result["data"]["category"], "Temperature");

        let result = call("convert_expression", json!({"expression": "5 kg -> m"})).unwrap();
        assert_eq!(result["isError"], true);
        assert_eq!(result["data"]["error"], codes::INCOMPATIBLE_UNITS);

        assert!(call("convert_expression", json!({})).is_err());
    }

    #[test]
    fn test_list_units() {
        let result = call("list_units", json!({"category": "weight"})).unwrap();
        assert_eq!(text_of(&result), "Weight: Kilograms, Grams, Pounds, Ounces, Milligrams");

        let result = call("list_units", json!({})).unwrap();
        let text = text_of(&result);
        assert!(text.starts_with("Length: Meters"));
        assert!(text.ends_with("Temperature: Celsius, Fahrenheit, Kelvin"));
        assert_eq!(result["data"]["Weight"].as_array().unwrap().len(), 5);
    }

    #[test]
    fn test_help() {
        let result = call("help", json!({"name": "convert"})).unwrap();
        assert!(text_of(&result).starts_with("# convert"));

        let result = call("help", json!({})).unwrap();
        assert!(text_of(&result).contains("## units"));

        let result = call("help", json!({"name": "nope"})).unwrap();
        assert_eq!(result["isError"], true);
        assert_eq!(result["data"]["error"], codes::NOT_FOUND);
    }

    #[test]
    fn test_unknown_tool() {
        let err = call("eval", json!({})).unwrap_err();
        assert_eq!(err.code, crate::protocol::INVALID_PARAMS);
        assert!(err.data.is_some());
    }

    #[test]
    fn test_missing_params() {
        assert!(call_tool(&registry(), &None).is_err());
        assert!(call_tool(&registry(), &Some(json!({"arguments": {}}))).is_err());
    }
}
