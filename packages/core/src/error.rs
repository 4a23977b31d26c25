//! Error types for the core layer.
//!
//! These are semantic errors only. Transport errors (HTTP failures,
//! envelope errors) belong to the client layer.

/// Errors from the pure algorithms: shape validation, tree navigation,
/// and image table parsing.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// A node in a configuration tree is not a string, map, or array.
    #[error("{path}: invalid type {found}")]
    InvalidType { path: String, found: &'static str },

    /// Decoded response data has a shape the protocol does not allow here.
    #[error("unexpected {found} in server response")]
    UnexpectedShape { found: &'static str },

    /// No container image header line was found in the listing text.
    #[error("could not find expected container image header in response:\n{text}")]
    MissingHeader { text: String },

    /// A line after the image header did not parse as an image row.
    #[error("could not parse container image line: {line}")]
    MalformedRow { line: String },
}

/// The JSON type name of a value, for error messages.
pub fn json_type_name(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "boolean",
        serde_json::Value::Number(_) => "number",
        serde_json::Value::String(_) => "string",
        serde_json::Value::Array(_) => "array",
        serde_json::Value::Object(_) => "object",
    }
}
