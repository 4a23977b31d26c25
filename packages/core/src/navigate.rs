//! Navigation of decoded configuration trees by path.

use crate::error::{json_type_name, Error};
use crate::path::Path;

/// The result of walking a configuration tree down to a path.
#[derive(Clone, Debug, PartialEq)]
pub enum NavResult {
    /// The path ends at a scalar string value.
    Leaf(String),
    /// The path ends at a multi-valued node.
    Array(Vec<String>),
    /// The path ends at a subtree of further segments.
    Subtree(serde_json::Map<String, serde_json::Value>),
    /// The path does not exist in the tree.
    NotFound,
}

impl NavResult {
    pub fn is_not_found(&self) -> bool {
        matches!(self, NavResult::NotFound)
    }

    /// The leaf value, if the path ended at one.
    pub fn as_leaf(&self) -> Option<&str> {
        match self {
            NavResult::Leaf(s) => Some(s),
            _ => None,
        }
    }

    /// The subtree, if the path ended at one.
    pub fn as_subtree(&self) -> Option<&serde_json::Map<String, serde_json::Value>> {
        match self {
            NavResult::Subtree(map) => Some(map),
            _ => None,
        }
    }
}

/// Walk `tree` down one path segment at a time and classify what is there.
///
/// The empty path classifies the whole tree. Descending requires the
/// current value to be an object containing the next segment; if it is
/// not, the result is [`NavResult::NotFound`], never an error - an absent
/// path is an answer, not a failure.
///
/// The final value must be a string (leaf), an object (subtree), or an
/// array of strings (multi-valued node). Any other shape is a protocol
/// violation and surfaces as [`Error::UnexpectedShape`].
pub fn navigate(tree: &serde_json::Value, path: &Path) -> Result<NavResult, Error> {
    let mut current = tree;
    for segment in path.iter() {
        match current {
            serde_json::Value::Object(map) => match map.get(segment) {
                Some(next) => current = next,
                None => return Ok(NavResult::NotFound),
            },
            _ => return Ok(NavResult::NotFound),
        }
    }
    classify(current)
}

fn classify(value: &serde_json::Value) -> Result<NavResult, Error> {
    match value {
        serde_json::Value::String(s) => Ok(NavResult::Leaf(s.clone())),
        serde_json::Value::Object(map) => Ok(NavResult::Subtree(map.clone())),
        serde_json::Value::Array(items) => {
            let mut values = Vec::with_capacity(items.len());
            for item in items {
                match item {
                    serde_json::Value::String(s) => values.push(s.clone()),
                    other => {
                        return Err(Error::UnexpectedShape {
                            found: json_type_name(other),
                        })
                    }
                }
            }
            Ok(NavResult::Array(values))
        }
        other => Err(Error::UnexpectedShape {
            found: json_type_name(other),
        }),
    }
}
