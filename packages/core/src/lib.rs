//! Core vyapi: the pure configuration-tree algorithms.
//!
//! This layer has no I/O. It defines:
//! - `Path`: space-delimited configuration path
//! - `ConfigValue`: tagged tree value (leaf / tree / array)
//! - `flatten`: nested tree -> flat path/value operations for the wire API
//! - `navigate`: walk a decoded tree by path and classify the result
//! - `parse_image_table`: container image listing text -> records
//!
//! Everything here is synchronous, reentrant, and safe to call from any
//! number of threads without coordination.
//!
//! # Example
//!
//! ```rust
//! use vyapi_core::{flatten_json, path};
//!
//! let ops = flatten_json(&serde_json::json!({ "foo": { "bar": "baz" } }))?;
//! assert_eq!(ops[0].path, path!("foo bar"));
//! assert_eq!(ops[0].value, "baz");
//! # Ok::<(), vyapi_core::Error>(())
//! ```

mod error;
mod flatten;
mod navigate;
mod path;
mod table;
mod value;

pub use error::{json_type_name, Error};
pub use flatten::{flatten, flatten_at, flatten_json, FlatOp};
pub use navigate::{navigate, NavResult};
pub use path::Path;
pub use table::{parse_image_table, ContainerImage};
pub use value::ConfigValue;
