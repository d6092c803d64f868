// Dotted-path lookup and section assembly over the flat key store

use serde_json::{Map, Value};
use std::collections::HashMap;

/// Key an environment variable would produce for a dotted path:
/// `rest-client.activities-simple` -> `rest_client_activities_simple`
pub fn env_key(path: &str) -> String {
    path.chars()
        .map(|c| match c {
            '.' | '-' => '_',
            c => c.to_ascii_lowercase(),
        })
        .collect()
}

/// Environment values are always strings; recover bools and numbers.
pub fn coerce_scalar(value: &Value) -> Value {
    let Value::String(raw) = value else {
        return value.clone();
    };

    match raw.as_str() {
        "true" => Value::Bool(true),
        "false" => Value::Bool(false),
        s => {
            if let Ok(n) = s.parse::<i64>() {
                Value::from(n)
            } else if let Ok(f) = s.parse::<f64>()
                && f.is_finite()
                && s.contains('.')
            {
                Value::from(f)
            } else {
                value.clone()
            }
        }
    }
}

/// Walk nested objects: the first segment is a store key, the rest are
/// object fields.
pub fn lookup_nested<'a>(store: &'a HashMap<String, Value>, path: &str) -> Option<&'a Value> {
    let mut segments = path.split('.');
    let mut current = store.get(segments.next()?)?;

    for segment in segments {
        current = current.as_object()?.get(segment)?;
    }

    Some(current)
}

/// Insert `value` at a dotted `path` inside `target`, creating objects on the way.
pub fn insert_path(target: &mut Map<String, Value>, path: &str, value: Value) {
    match path.split_once('.') {
        None => {
            target.insert(path.to_string(), value);
        }
        Some((head, rest)) => {
            let entry = target
                .entry(head.to_string())
                .or_insert_with(|| Value::Object(Map::new()));

            if !entry.is_object() {
                *entry = Value::Object(Map::new());
            }

            if let Value::Object(child) = entry {
                insert_path(child, rest, value);
            }
        }
    }
}

/// Build the object rooted at `prefix`.
///
/// Layers, lowest precedence first: nested file data, flat dotted keys
/// (`rest-client.x.url`), environment-style keys
/// (`rest_client_x_connect_timeout`, mapped to `connect-timeout`).
pub fn assemble_section(store: &HashMap<String, Value>, prefix: &str) -> Map<String, Value> {
    let mut section = match lookup_nested(store, prefix) {
        Some(Value::Object(map)) => map.clone(),
        _ => Map::new(),
    };

    let dotted_prefix = format!("{}.", prefix);
    for (key, value) in store {
        if let Some(rest) = key.strip_prefix(&dotted_prefix)
            && !rest.is_empty()
        {
            insert_path(&mut section, rest, value.clone());
        }
    }

    let env_prefix = format!("{}_", env_key(prefix));
    for (key, value) in store {
        if let Some(rest) = key.strip_prefix(&env_prefix)
            && !rest.is_empty()
        {
            section.insert(rest.replace('_', "-"), coerce_scalar(value));
        }
    }

    section
}
