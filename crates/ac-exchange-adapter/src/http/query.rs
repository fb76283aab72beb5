/*
[INPUT]:  Typed filter structs (anything Serialize into a flat JSON object)
[OUTPUT]: Deterministic URL query strings
[POS]:    HTTP layer - query encoding shared by signing and transport
[UPDATE]: When filter shapes gain nested or new value kinds
*/

use serde::Serialize;
use serde_json::Value;
use url::form_urlencoded;

use crate::http::{ExchangeError, Result};

/// Encode a filter as `k=v&k=v`. Returns `None` when nothing is set.
///
/// Keys are sorted, null fields are skipped and arrays repeat the key. The
/// produced string is the one that gets both signed and sent.
pub fn encode_query<T: Serialize + ?Sized>(filter: &T) -> Result<Option<String>> {
    let value = serde_json::to_value(filter)?;
    let map = match value {
        Value::Null => return Ok(None),
        Value::Object(map) => map,
        other => {
            return Err(ExchangeError::validation(format!(
                "query parameters must be an object, got {other}"
            )));
        }
    };

    let mut entries: Vec<_> = map.iter().collect();
    entries.sort_by(|a, b| a.0.cmp(b.0));

    let mut serializer = form_urlencoded::Serializer::new(String::new());
    let mut written = false;
    for (key, value) in entries {
        match value {
            Value::Null => {}
            Value::Array(items) => {
                for item in items {
                    serializer.append_pair(key, &scalar(key, item)?);
                    written = true;
                }
            }
            other => {
                serializer.append_pair(key, &scalar(key, other)?);
                written = true;
            }
        }
    }

    Ok(written.then(|| serializer.finish()))
}

fn scalar(key: &str, value: &Value) -> Result<String> {
    match value {
        Value::String(s) => Ok(s.clone()),
        Value::Number(n) => Ok(n.to_string()),
        Value::Bool(b) => Ok(b.to_string()),
        _ => Err(ExchangeError::validation(format!(
            "query parameter `{key}` must be a scalar"
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::collections::BTreeMap;

    #[test]
    fn test_empty_filter_encodes_to_none() {
        assert_eq!(encode_query(&json!({})).unwrap(), None);
        assert_eq!(encode_query(&json!({ "product_id": null })).unwrap(), None);
        assert_eq!(encode_query(&()).unwrap(), None);
    }

    #[test]
    fn test_scalars_and_arrays() {
        let query = encode_query(&json!({
            "product_id": "BTC-USD",
            "status": ["open", "pending"],
            "limit": 100,
        }))
        .unwrap()
        .unwrap();
        assert_eq!(query, "limit=100&product_id=BTC-USD&status=open&status=pending");
    }

    #[test]
    fn test_values_are_percent_encoded() {
        let mut map = BTreeMap::new();
        map.insert("after", "2024-01-01T00:00:00Z");
        assert_eq!(
            encode_query(&map).unwrap().as_deref(),
            Some("after=2024-01-01T00%3A00%3A00Z")
        );
    }

    #[test]
    fn test_nested_objects_rejected() {
        let err = encode_query(&json!({ "nested": { "a": 1 } })).unwrap_err();
        assert!(err.is_validation());
        assert!(encode_query(&json!([1, 2])).unwrap_err().is_validation());
    }
}
