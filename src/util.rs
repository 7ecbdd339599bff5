use serde_json::Value;

/// Property values come straight from the topology JSON; strings render
/// unquoted, null as empty, everything else in its JSON form.
pub fn format_value(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(text) => text.clone(),
        other => other.to_string(),
    }
}
