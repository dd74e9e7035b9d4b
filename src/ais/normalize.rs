use serde_json::Value;

/// Walk a vessel record before it is typed: Spire encodes spaces as
/// underscores in its text fields (`DRY_BULK`, `MV_SAMPLE_SHIP`), and sends
/// `null` for unknown values, which are dropped so field defaults apply.
pub fn normalize(value: &mut Value) {
    match value {
        Value::String(s) => {
            if s.contains('_') {
                *s = replace_underscores_with_spaces(s);
            }
        }
        Value::Object(map) => {
            map.retain(|_, v| !v.is_null());
            map.values_mut().for_each(normalize);
        }
        Value::Array(items) => items.iter_mut().for_each(normalize),
        Value::Null | Value::Bool(_) | Value::Number(_) => {}
    }
}

pub fn replace_underscores_with_spaces(s: &str) -> String {
    s.replace('_', " ")
}
