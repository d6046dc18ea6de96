use serde_json::{Map, Value};

/// Opaque `arguments` / `parameters` mapping as it appears in the dataset.
pub type ParamMap = Map<String, Value>;

/// Encode a JSON value with mapping keys sorted ascending at every level.
/// Arrays keep their source order. Used for identity derivation, grouping and sorting,
/// so semantically identical maps always produce the same string.
pub fn canonical_json(value: &Value) -> String {
    sorted_value(value).to_string()
}

pub fn canonical_map(map: &ParamMap) -> String {
    Value::Object(sorted_map(map)).to_string()
}

/// Copy of `map` with keys inserted in ascending order at every level, so that the
/// serialized form is canonical whatever map backing serde_json was built with.
pub fn sorted_map(map: &ParamMap) -> ParamMap {
    let mut keys: Vec<&String> = map.keys().collect();
    keys.sort();
    keys.into_iter().filter_map(|key| map.get(key).map(|value| (key.clone(), sorted_value(value)))).collect()
}

fn sorted_value(value: &Value) -> Value {
    match value {
        Value::Object(map) => Value::Object(sorted_map(map)),
        Value::Array(items) => Value::Array(items.iter().map(sorted_value).collect()),
        scalar => scalar.clone(),
    }
}
