//! JSON canónico mínimo: claves de objeto ordenadas, sin espacios.
//! Base de `registry_hash` y del fingerprint de respuestas.

use serde_json::Value;
use std::collections::BTreeMap;

pub fn to_canonical_json(value: &Value) -> String {
    match value {
        Value::Null => "null".to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        Value::String(_) => value.to_string(),
        Value::Array(arr) => {
            let items: Vec<String> = arr.iter().map(to_canonical_json).collect();
            format!("[{}]", items.join(","))
        }
        Value::Object(map) => {
            let tree: BTreeMap<&String, String> = map.iter().map(|(k, v)| (k, to_canonical_json(v))).collect();
            let items: Vec<String> = tree.into_iter()
                                         .map(|(k, v)| format!("{}:{}", Value::String(k.clone()), v))
                                         .collect();
            format!("{{{}}}", items.join(","))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn object_keys_are_sorted() {
        let a = json!({"b": 1, "a": [true, null, "x"]});
        assert_eq!(to_canonical_json(&a), r#"{"a":[true,null,"x"],"b":1}"#);
    }

    #[test]
    fn strings_are_escaped() {
        let v = json!({"k\"ey": "va\nl"});
        assert_eq!(to_canonical_json(&v), r#"{"k\"ey":"va\nl"}"#);
    }
}
