//! Plugin Registry

use crate::{ArgMeta, FunctionMeta, FunctionPlugin};
use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use tracing::{debug, warn};
use unitconv_core::{UnitError, Value};

/// Central plugin registry
pub struct PluginRegistry {
    functions: HashMap<String, Arc<dyn FunctionPlugin>>,
}

impl PluginRegistry {
    pub fn new() -> Self {
        Self {
            functions: HashMap::new(),
        }
    }

    pub fn with_function<F: FunctionPlugin + 'static>(mut self, f: F) -> Self {
        let name = f.meta().name.to_lowercase();
        self.functions.insert(name, Arc::new(f));
        self
    }

    pub fn get_function(&self, name: &str) -> Option<&dyn FunctionPlugin> {
        self.functions.get(&name.to_lowercase()).map(|f| f.as_ref())
    }

    /// Sorted list of registered function names
    pub fn function_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.functions.keys().map(|s| s.as_str()).collect();
        names.sort_unstable();
        names
    }

    pub fn call_function(&self, name: &str, args: &[Value]) -> Value {
        match self.get_function(name) {
            Some(f) => {
                debug!(function = name, args = args.len(), "calling function");
                let result = f.call(args);
                if let Value::Error(e) = &result {
                    debug!(function = name, code = %e.code, "function returned error");
                }
                result
            }
            None => {
                warn!(function = name, "unknown function");
                // Find similar function names for better error message
                let similar = self.find_similar_functions(name);
                let mut err = UnitError::undefined_func(name);
                if !similar.is_empty() {
                    let suggestions: Vec<&str> = similar.iter().take(5).map(|s| s.as_str()).collect();
                    err = err.with_suggestion(format!(
                        "Similar: {}. Use help() for full list.",
                        suggestions.join(", ")
                    ));
                }
                Value::Error(err)
            }
        }
    }

    /// Find function names similar to the given name (for error suggestions)
    fn find_similar_functions(&self, name: &str) -> Vec<String> {
        let name_lower = name.to_lowercase();
        let mut matches: Vec<(String, usize)> = self
            .functions
            .keys()
            .filter_map(|func_name| {
                let score = Self::similarity_score(&name_lower, func_name);
                if score > 0 {
                    Some((func_name.clone(), score))
                } else {
                    None
                }
            })
            .collect();

        // Highest score first, ties broken by name so suggestions are stable
        matches.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
        matches.into_iter().map(|(name, _)| name).collect()
    }

    fn similarity_score(query: &str, candidate: &str) -> usize {
        let mut score = 0;

        if candidate.starts_with(query) {
            score += 100;
        } else if candidate.contains(query) {
            score += 50;
        } else if query.contains(candidate) {
            score += 30;
        }

        let query_chars: HashSet<char> = query.chars().collect();
        let candidate_chars: HashSet<char> = candidate.chars().collect();
        let common = query_chars.intersection(&candidate_chars).count();
        score += common * 2;

        // Penalize length difference
        let len_diff = (query.len() as i32 - candidate.len() as i32).unsigned_abs() as usize;
        if len_diff < 5 && score > 0 {
            score += 5 - len_diff;
        }

        score
    }

    pub fn help(&self, name: Option<&str>) -> Value {
        match name {
            Some(n) => self.help_for(n),
            None => self.general_help(),
        }
    }

    fn help_for(&self, name: &str) -> Value {
        match self.functions.get(&name.to_lowercase()) {
            Some(f) => Value::Object(Self::function_to_help(f.meta())),
            None => Value::Error(UnitError::not_found(name)),
        }
    }

    fn general_help(&self) -> Value {
        let mut help = HashMap::new();

        let mut funcs_by_cat: HashMap<String, Vec<String>> = HashMap::new();
        for name in self.function_names() {
            if let Some(f) = self.functions.get(name) {
                let cat = f.meta().category.to_string();
                funcs_by_cat.entry(cat).or_default().push(name.to_string());
            }
        }
        help.insert(
            "functions".to_string(),
            Value::Object(
                funcs_by_cat
                    .into_iter()
                    .map(|(k, v)| (k, Value::List(v.into_iter().map(Value::Text).collect())))
                    .collect(),
            ),
        );

        help.insert(
            "usage".to_string(),
            Value::Text("Call help('function_name') for detailed help.".to_string()),
        );

        Value::Object(help)
    }

    fn function_to_help(meta: FunctionMeta) -> HashMap<String, Value> {
        let mut help = HashMap::new();
        help.insert("name".to_string(), Value::Text(meta.name.to_string()));
        help.insert("description".to_string(), Value::Text(meta.description.to_string()));
        help.insert("usage".to_string(), Value::Text(meta.usage.to_string()));
        help.insert("returns".to_string(), Value::Text(meta.returns.to_string()));
        help.insert("category".to_string(), Value::Text(meta.category.to_string()));
        help.insert(
            "args".to_string(),
            Value::List(meta.args.iter().map(Self::arg_to_help).collect()),
        );
        help.insert(
            "examples".to_string(),
            Value::List(meta.examples.iter().map(|e| Value::Text(e.to_string())).collect()),
        );
        help.insert(
            "related".to_string(),
            Value::List(meta.related.iter().map(|r| Value::Text(r.to_string())).collect()),
        );
        help
    }

    fn arg_to_help(arg: &ArgMeta) -> Value {
        let mut obj = HashMap::new();
        obj.insert("name".to_string(), Value::Text(arg.name.to_string()));
        obj.insert("type".to_string(), Value::Text(arg.typ.to_string()));
        obj.insert("description".to_string(), Value::Text(arg.description.to_string()));
        obj.insert("optional".to_string(), Value::Bool(arg.optional));
        if let Some(default) = arg.default {
            obj.insert("default".to_string(), Value::Text(default.to_string()));
        }
        Value::Object(obj)
    }

    pub fn list_functions(&self, category: Option<&str>) -> Value {
        let funcs: Vec<Value> = self
            .function_names()
            .into_iter()
            .filter_map(|name| self.functions.get(name))
            .filter(|f| category.map_or(true, |c| f.meta().category == c))
            .map(|f| {
                let meta = f.meta();
                let mut obj = HashMap::new();
                obj.insert("name".to_string(), Value::Text(meta.name.to_string()));
                obj.insert("description".to_string(), Value::Text(meta.description.to_string()));
                obj.insert("usage".to_string(), Value::Text(meta.usage.to_string()));
                obj.insert("category".to_string(), Value::Text(meta.category.to_string()));
                Value::Object(obj)
            })
            .collect();
        Value::List(funcs)
    }
}

impl Default for PluginRegistry {
    fn default() -> Self {
        Self::new()
    }
}
