//! Small builders for the JSON Schemas advertised in `tools/list`.

use serde_json::{json, Map, Value};

pub fn string(description: &str) -> Value {
    json!({ "type": "string", "description": description })
}

pub fn boolean(description: &str) -> Value {
    json!({ "type": "boolean", "description": description })
}

pub fn object(description: &str) -> Value {
    json!({ "type": "object", "description": description })
}

pub fn any(description: &str) -> Value {
    json!({ "description": description })
}

pub fn node_position() -> Value {
    json!({
        "type": "array",
        "items": { "type": "number" },
        "minItems": 2,
        "maxItems": 2,
        "description": "Optional [X, Y] position in the graph (default [0, 0])"
    })
}

pub fn blueprint_name() -> (&'static str, Value) {
    ("blueprint_name", string("Name of the target Blueprint"))
}

pub fn graph_name() -> (&'static str, Value) {
    (
        "function_or_graph_name",
        string("Name of the function or event graph (e.g. 'EventGraph')"),
    )
}

/// An object schema from `(name, schema)` pairs and the required names.
pub fn tool_input(properties: Vec<(&str, Value)>, required: &[&str]) -> Value {
    let properties: Map<String, Value> = properties
        .into_iter()
        .map(|(name, schema)| (name.to_string(), schema))
        .collect();
    json!({
        "type": "object",
        "properties": properties,
        "required": required,
    })
}
