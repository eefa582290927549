use serde_json::{Map, Value};

/// Rebuilds nested objects from joined keys: `{"a.b": 1}` becomes `{"a": {"b": 1}}`.
///
/// Non-object input is returned unchanged and an object without joined keys is returned as a
/// shallow copy. Keys are applied in payload order; when a path runs through an existing
/// primitive or array, that value is replaced by an object.
pub fn unflatten(value: &Value, joiner: &str) -> Value {
    let Value::Object(flat) = value else {
        return value.clone();
    };
    if joiner.is_empty() || !flat.keys().any(|key| key.contains(joiner)) {
        return value.clone();
    }

    let mut nested = Map::with_capacity(flat.len());
    for (key, item) in flat {
        let parts: Vec<&str> = key.split(joiner).collect();
        insert_path(&mut nested, &parts, item.clone());
    }
    Value::Object(nested)
}

fn insert_path(map: &mut Map<String, Value>, parts: &[&str], value: Value) {
    match parts {
        [] => {}
        [leaf] => {
            map.insert((*leaf).to_owned(), value);
        }
        [head, rest @ ..] => {
            let slot = map.entry(*head).or_insert(Value::Null);
            if !slot.is_object() {
                *slot = Value::Object(Map::new());
            }
            if let Value::Object(child) = slot {
                insert_path(child, rest, value);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn nests_joined_keys() {
        let flat = json!({
            "key": "C1",
            "recipient.display_name": "Acme",
            "recipient.location.city_name": "Austin",
        });
        assert_eq!(
            unflatten(&flat, "."),
            json!({ "key": "C1", "recipient": { "display_name": "Acme", "location": { "city_name": "Austin" } } })
        );
    }

    #[test]
    fn custom_joiner() {
        let flat = json!({ "recipient__uei": "U1" });
        assert_eq!(unflatten(&flat, "__"), json!({ "recipient": { "uei": "U1" } }));
        assert_eq!(unflatten(&flat, "."), flat);
    }

    #[test]
    fn later_keys_overwrite_colliding_primitives() {
        let flat = json!({ "recipient": "Acme", "recipient.uei": "U1" });
        assert_eq!(unflatten(&flat, "."), json!({ "recipient": { "uei": "U1" } }));

        let listed = json!({ "tags": [1, 2], "tags.first": 1 });
        assert_eq!(unflatten(&listed, "."), json!({ "tags": { "first": 1 } }));
    }

    #[test]
    fn passthrough_cases() {
        assert_eq!(unflatten(&json!([1, 2]), "."), json!([1, 2]));
        assert_eq!(unflatten(&json!(null), "."), json!(null));
        let plain = json!({ "a": { "b": 1 } });
        assert_eq!(unflatten(&plain, "."), plain);
    }
}
