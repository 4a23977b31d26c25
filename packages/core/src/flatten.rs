//! Flattening of configuration trees into atomic path/value operations.

use crate::error::Error;
use crate::path::Path;
use crate::value::ConfigValue;

/// One atomic set/delete unit on the wire: a path and a scalar value.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub struct FlatOp {
    pub path: Path,
    pub value: String,
}

impl FlatOp {
    pub fn new(path: Path, value: impl Into<String>) -> Self {
        FlatOp {
            path,
            value: value.into(),
        }
    }
}

/// Flatten a configuration value into a list of path/value operations.
///
/// Depth-first, pre-order by path:
///
/// - a leaf at path `P` emits `(P, value)`;
/// - an empty tree or empty array at `P` emits `(P, "")`, the sentinel
///   for "target an empty container", which must not be dropped or a set
///   of an empty map would silently become a no-op;
/// - a tree descends into each child at `P + " " + key`;
/// - an array emits each element at the *same* `P` (arrays are multiple
///   values at one path, not nested segments), preserving element order.
///
/// The wire API treats the result as a set of independent operations, so
/// callers must not rely on the relative order of entries from a tree;
/// it is deterministic (sorted by key) but not part of the contract.
pub fn flatten(value: &ConfigValue) -> Vec<FlatOp> {
    flatten_at(value, &Path::root())
}

/// Flatten with every emitted path prefixed by `prefix`.
pub fn flatten_at(value: &ConfigValue, prefix: &Path) -> Vec<FlatOp> {
    let mut ops = Vec::new();
    walk(value, prefix, &mut ops);
    ops
}

/// Flatten decoded JSON, validating its shape first.
///
/// Fails with [`Error::InvalidType`] naming the offending path if any node
/// is not a string, array, or string-keyed object.
pub fn flatten_json(tree: &serde_json::Value) -> Result<Vec<FlatOp>, Error> {
    Ok(flatten(&ConfigValue::from_json(tree)?))
}

fn walk(value: &ConfigValue, path: &Path, ops: &mut Vec<FlatOp>) {
    match value {
        ConfigValue::Leaf(s) => ops.push(FlatOp::new(path.clone(), s.clone())),
        ConfigValue::Tree(tree) => {
            if tree.is_empty() {
                ops.push(FlatOp::new(path.clone(), ""));
            }
            for (key, child) in tree {
                walk(child, &path.child(key), ops);
            }
        }
        ConfigValue::Array(items) => {
            if items.is_empty() {
                ops.push(FlatOp::new(path.clone(), ""));
            }
            for item in items {
                walk(item, path, ops);
            }
        }
    }
}
