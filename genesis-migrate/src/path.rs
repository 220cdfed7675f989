//! Fail-fast navigation over a genesis tree.
//!
//! Every helper takes the full key path from the document root so that a
//! failure can name exactly which hop was absent or of the wrong type.

use serde_json::{Map, Value};

use crate::error::{MigrationError, Result};

/// Walks `path` from `root`, requiring every intermediate node to be an object
/// that holds the next key.
pub fn node_mut<'a>(root: &'a mut Value, path: &[&str]) -> Result<&'a mut Value> {
    let mut node = root;
    for (depth, key) in path.iter().enumerate() {
        node = match node {
            Value::Object(map) => map
                .get_mut(*key)
                .ok_or_else(|| MigrationError::missing(&path[..=depth]))?,
            _ => return Err(MigrationError::unexpected(&path[..depth], "object")),
        };
    }
    Ok(node)
}

pub fn object_mut<'a>(root: &'a mut Value, path: &[&str]) -> Result<&'a mut Map<String, Value>> {
    node_mut(root, path)?
        .as_object_mut()
        .ok_or_else(|| MigrationError::unexpected(path, "object"))
}

pub fn array_mut<'a>(root: &'a mut Value, path: &[&str]) -> Result<&'a mut Vec<Value>> {
    node_mut(root, path)?
        .as_array_mut()
        .ok_or_else(|| MigrationError::unexpected(path, "array"))
}

/// Inserts or overwrites `key` inside the existing object at `parent`.
pub fn set_field(root: &mut Value, parent: &[&str], key: &str, value: Value) -> Result<Option<Value>> {
    Ok(object_mut(root, parent)?.insert(key.to_string(), value))
}

/// Overwrites `key` inside the object at `parent`. The key must already exist;
/// it is never created. Returns the previous value.
pub fn replace_field(root: &mut Value, parent: &[&str], key: &str, value: Value) -> Result<Value> {
    let object = object_mut(root, parent)?;
    match object.get_mut(key) {
        Some(slot) => Ok(std::mem::replace(slot, value)),
        None => {
            let mut full = parent.to_vec();
            full.push(key);
            Err(MigrationError::missing(&full))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn node_mut_reports_first_missing_hop() {
        let mut doc = json!({ "app_state": { "account": {} } });
        let err = node_mut(&mut doc, &["app_state", "account", "params", "x"]).unwrap_err();
        assert!(
            matches!(err, MigrationError::MissingField { ref path } if path == "app_state.account.params"),
            "{err}"
        );
    }

    #[test]
    fn node_mut_rejects_non_object_hop() {
        let mut doc = json!({ "app_state": [1, 2] });
        let err = node_mut(&mut doc, &["app_state", "gov"]).unwrap_err();
        assert!(matches!(
            err,
            MigrationError::UnexpectedType { ref path, expected: "object" } if path == "app_state"
        ));
    }

    #[test]
    fn array_mut_checks_leaf_type() {
        let mut doc = json!({ "app_state": { "accounts": {} } });
        let err = array_mut(&mut doc, &["app_state", "accounts"]).unwrap_err();
        assert!(matches!(err, MigrationError::UnexpectedType { expected: "array", .. }));
    }

    #[test]
    fn replace_field_never_creates() {
        let mut doc = json!({ "params": { "a": "1" } });

        let old = replace_field(&mut doc, &["params"], "a", json!("2")).unwrap();
        assert_eq!(old, json!("1"));
        assert_eq!(doc["params"]["a"], json!("2"));

        let err = replace_field(&mut doc, &["params"], "b", json!("3")).unwrap_err();
        assert!(matches!(err, MigrationError::MissingField { ref path } if path == "params.b"));
        assert!(doc["params"].get("b").is_none());
    }

    #[test]
    fn set_field_inserts_into_existing_parent() {
        let mut doc = json!({ "app_state": {} });
        set_field(&mut doc, &["app_state"], "supply", json!({ "supply": [] })).unwrap();
        assert_eq!(doc["app_state"]["supply"], json!({ "supply": [] }));

        let err = set_field(&mut doc, &["app_state", "crisis"], "constant_fee", json!(null)).unwrap_err();
        assert!(matches!(err, MigrationError::MissingField { .. }));
    }
}
