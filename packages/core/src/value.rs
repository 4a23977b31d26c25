//! The ConfigValue type - a configuration subtree.

use std::collections::BTreeMap;

use crate::error::{json_type_name, Error};
use crate::path::Path;

/// A node in a configuration tree.
///
/// The wire protocol only knows three shapes: scalar string values, maps
/// from segment name to further nodes, and arrays of values that all live
/// at the same path (multi-valued leaves). Every node is exactly one of
/// these; anything else coming from decoded JSON is a shape error.
///
/// Uses `BTreeMap` so that iteration order, and therefore the order of
/// flattened operations, is deterministic within a call.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ConfigValue {
    /// A scalar string value.
    Leaf(String),
    /// A map of child nodes keyed by segment name.
    Tree(BTreeMap<String, ConfigValue>),
    /// Multiple values at a single path. Order is preserved.
    Array(Vec<ConfigValue>),
}

impl ConfigValue {
    /// Create an empty tree.
    pub fn tree() -> Self {
        ConfigValue::Tree(BTreeMap::new())
    }

    /// Create an empty array.
    pub fn array() -> Self {
        ConfigValue::Array(Vec::new())
    }

    /// Check if this node is a leaf.
    pub fn is_leaf(&self) -> bool {
        matches!(self, ConfigValue::Leaf(_))
    }

    /// Check if this node is a tree.
    pub fn is_tree(&self) -> bool {
        matches!(self, ConfigValue::Tree(_))
    }

    /// Check if this node is an array.
    pub fn is_array(&self) -> bool {
        matches!(self, ConfigValue::Array(_))
    }

    /// Convert decoded JSON into a configuration value.
    ///
    /// Only strings, arrays, and string-keyed objects are accepted, in any
    /// recursive combination. Numbers, booleans, and nulls fail with
    /// [`Error::InvalidType`] naming the path of the offending node.
    ///
    /// The conversion is shape-driven: any JSON object converts the same
    /// way no matter how it was produced.
    pub fn from_json(value: &serde_json::Value) -> Result<Self, Error> {
        Self::from_json_at(value, &Path::root())
    }

    fn from_json_at(value: &serde_json::Value, path: &Path) -> Result<Self, Error> {
        match value {
            serde_json::Value::String(s) => Ok(ConfigValue::Leaf(s.clone())),
            serde_json::Value::Array(items) => {
                let mut values = Vec::with_capacity(items.len());
                for item in items {
                    values.push(Self::from_json_at(item, path)?);
                }
                Ok(ConfigValue::Array(values))
            }
            serde_json::Value::Object(map) => {
                let mut tree = BTreeMap::new();
                for (key, child) in map {
                    tree.insert(key.clone(), Self::from_json_at(child, &path.child(key))?);
                }
                Ok(ConfigValue::Tree(tree))
            }
            other => Err(Error::InvalidType {
                path: path.to_string(),
                found: json_type_name(other),
            }),
        }
    }

    /// Convert back into JSON.
    pub fn to_json(&self) -> serde_json::Value {
        match self {
            ConfigValue::Leaf(s) => serde_json::Value::String(s.clone()),
            ConfigValue::Array(items) => {
                serde_json::Value::Array(items.iter().map(ConfigValue::to_json).collect())
            }
            ConfigValue::Tree(map) => serde_json::Value::Object(
                map.iter()
                    .map(|(key, child)| (key.clone(), child.to_json()))
                    .collect(),
            ),
        }
    }
}

impl From<&str> for ConfigValue {
    fn from(s: &str) -> Self {
        ConfigValue::Leaf(s.to_string())
    }
}

impl From<String> for ConfigValue {
    fn from(s: String) -> Self {
        ConfigValue::Leaf(s)
    }
}

impl<V: Into<ConfigValue>> From<Vec<V>> for ConfigValue {
    fn from(items: Vec<V>) -> Self {
        ConfigValue::Array(items.into_iter().map(Into::into).collect())
    }
}

impl<V: Into<ConfigValue>> From<BTreeMap<String, V>> for ConfigValue {
    fn from(map: BTreeMap<String, V>) -> Self {
        ConfigValue::Tree(
            map.into_iter()
                .map(|(key, value)| (key, value.into()))
                .collect(),
        )
    }
}

impl<K: Into<String>, V: Into<ConfigValue>> FromIterator<(K, V)> for ConfigValue {
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        ConfigValue::Tree(
            iter.into_iter()
                .map(|(key, value)| (key.into(), value.into()))
                .collect(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn from_json_leaf() {
        let value = ConfigValue::from_json(&json!("bar")).unwrap();
        assert_eq!(value, ConfigValue::Leaf("bar".to_string()));
    }

    #[test]
    fn from_json_nested() {
        let value = ConfigValue::from_json(&json!({
            "foo": { "bar": "baz" },
            "list": ["a", "b"],
        }))
        .unwrap();

        assert!(value.is_tree());
        let ConfigValue::Tree(tree) = &value else {
            unreachable!()
        };
        assert!(tree["foo"].is_tree());
        assert!(tree["list"].is_array());
    }

    #[test]
    fn from_json_rejects_number_with_path() {
        let err = ConfigValue::from_json(&json!({ "foo": { "bar": 42 } })).unwrap_err();
        let display = err.to_string();
        assert!(display.contains("foo bar"));
        assert!(display.contains("invalid type number"));
    }

    #[test]
    fn from_json_rejects_bool_and_null() {
        assert!(ConfigValue::from_json(&json!({ "foo": true })).is_err());
        assert!(ConfigValue::from_json(&json!({ "foo": null })).is_err());
    }

    #[test]
    fn from_json_rejects_bad_array_element_at_parent_path() {
        // Array elements live at the array's own path.
        let err = ConfigValue::from_json(&json!({ "foo": ["ok", 1] })).unwrap_err();
        assert!(err.to_string().starts_with("foo:"));
    }

    #[test]
    fn json_round_trip() {
        let original = json!({
            "system": {
                "host-name": "gateway",
                "name-server": ["1.1.1.1", "1.0.0.1"],
                "option": {},
            }
        });
        let value = ConfigValue::from_json(&original).unwrap();
        assert_eq!(value.to_json(), original);
    }

    #[test]
    fn from_impls() {
        assert_eq!(ConfigValue::from("x"), ConfigValue::Leaf("x".to_string()));
        assert_eq!(
            ConfigValue::from(vec!["a", "b"]),
            ConfigValue::Array(vec![
                ConfigValue::Leaf("a".to_string()),
                ConfigValue::Leaf("b".to_string()),
            ])
        );

        let tree: ConfigValue = [("host-name", "gateway")].into_iter().collect();
        let ConfigValue::Tree(map) = &tree else {
            unreachable!()
        };
        assert_eq!(map["host-name"], ConfigValue::Leaf("gateway".to_string()));
    }
}
