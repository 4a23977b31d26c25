//! The configuration facade: show/set/delete/save/load, plus an optional
//! read-through snapshot cache.

use std::sync::{Arc, Mutex, PoisonError};

use serde_json::json;

use vyapi_core::{flatten_at, json_type_name, navigate, ConfigValue, Error as CoreError, NavResult, Path};

use crate::client::{Client, Endpoint};
use crate::error::Error;

// How the server reports a read of a path that does not exist. This is an
// answer, not a failure; `show` translates it to `NavResult::NotFound`.
const EMPTY_PATH_MARKER: &str = "specified path is empty";

/// Configuration tree operations. Obtained from [`Client::config`].
pub struct ConfigService<'a> {
    pub(crate) client: &'a Client,
}

impl ConfigService<'_> {
    /// Return the configuration at `path`.
    ///
    /// The empty path returns the whole tree as a subtree. An absent path
    /// yields [`NavResult::NotFound`], whether the server reports it as an
    /// "empty path" error or returns a tree lacking the requested node.
    pub fn show(&self, path: &str) -> Result<NavResult, Error> {
        let path = Path::parse(path);
        let payload = json!({ "op": "showConfig", "path": path.segments() });

        let data = match self.client.request(Endpoint::Retrieve, &payload) {
            Ok(data) => data,
            // The marker can arrive as a decoded envelope error or inside
            // a non-2xx body; both mean the same thing.
            Err(err) if err.to_string().contains(EMPTY_PATH_MARKER) => {
                return Ok(NavResult::NotFound);
            }
            Err(err) => return Err(err),
        };

        if !data.is_object() {
            return Err(CoreError::UnexpectedShape {
                found: json_type_name(&data),
            }
            .into());
        }

        // The server returns the requested node wrapped in its terminal
        // segment; the root is returned bare.
        let terminal = match path.last() {
            Some(segment) => Path::from_segments(vec![segment.to_string()]),
            None => Path::root(),
        };
        navigate(&data, &terminal).map_err(Error::from)
    }

    /// Set the configuration at `path`.
    ///
    /// A string value is set directly. Trees and arrays, in any nesting,
    /// are flattened into one batch of atomic set operations:
    ///
    /// ```ignore
    /// config.set("system host-name", "gateway")?;
    /// config.set("system name-server", vec!["1.1.1.1", "1.0.0.1"])?;
    /// ```
    pub fn set(&self, path: &str, value: impl Into<ConfigValue>) -> Result<(), Error> {
        self.configure_batch("set", &Path::parse(path), &value.into())
    }

    /// Set decoded JSON at `path`, validating its shape first.
    pub fn set_json(&self, path: &str, value: &serde_json::Value) -> Result<(), Error> {
        self.configure_batch("set", &Path::parse(path), &ConfigValue::from_json(value)?)
    }

    /// Delete the whole subtree at `path`.
    ///
    /// Deleting a path that does not exist succeeds; the operation is
    /// idempotent on the server side.
    pub fn delete(&self, path: &str) -> Result<(), Error> {
        let path = Path::parse(path);
        let payload = json!([{ "op": "delete", "path": path.segments() }]);
        self.client.request(Endpoint::Configure, &payload)?;
        Ok(())
    }

    /// Delete individual values under `path`.
    ///
    /// The value is flattened exactly like [`ConfigService::set`], so a
    /// single element of a multi-valued node can be removed without
    /// touching its siblings.
    pub fn delete_value(&self, path: &str, value: impl Into<ConfigValue>) -> Result<(), Error> {
        self.configure_batch("delete", &Path::parse(path), &value.into())
    }

    /// Save the running configuration to the default startup config.
    pub fn save(&self) -> Result<(), Error> {
        self.config_file(json!({ "op": "save" }))
    }

    /// Save the running configuration to `file` on the device.
    pub fn save_file(&self, file: &str) -> Result<(), Error> {
        self.config_file(json!({ "op": "save", "file": file }))
    }

    /// Load a configuration file on the device.
    pub fn load_file(&self, file: &str) -> Result<(), Error> {
        self.config_file(json!({ "op": "load", "file": file }))
    }

    fn configure_batch(&self, op: &str, prefix: &Path, value: &ConfigValue) -> Result<(), Error> {
        let ops: Vec<serde_json::Value> = flatten_at(value, prefix)
            .into_iter()
            .map(|flat| json!({ "op": op, "path": flat.path.segments(), "value": flat.value }))
            .collect();
        self.client
            .request(Endpoint::Configure, &serde_json::Value::Array(ops))?;
        Ok(())
    }

    fn config_file(&self, payload: serde_json::Value) -> Result<(), Error> {
        self.client.request(Endpoint::ConfigFile, &payload)?;
        Ok(())
    }
}

/// A read-through cache of the full configuration tree.
///
/// The first read fetches the whole tree once; later reads navigate the
/// snapshot locally. Concurrent first readers are serialized so the tree
/// is fetched at most once per cache instance.
///
/// **Staleness hazard**: nothing invalidates the snapshot automatically.
/// After any `set`/`delete`/`load_file`, reads through the cache keep
/// returning pre-write state until [`ConfigCache::invalidate`] is called.
///
/// ```ignore
/// let cache = ConfigCache::new();
/// let hostname = cache.show(&client.config(), "system host-name")?;
///
/// client.config().set("system host-name", "gw2")?;
/// cache.invalidate(); // without this, the next show still sees the old name
/// ```
#[derive(Default)]
pub struct ConfigCache {
    snapshot: Mutex<Option<Arc<serde_json::Value>>>,
}

impl ConfigCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the cached tree, fetching it through `config` if this cache
    /// has not been populated yet.
    pub fn get_or_populate(
        &self,
        config: &ConfigService<'_>,
    ) -> Result<Arc<serde_json::Value>, Error> {
        let mut slot = self.snapshot.lock().unwrap_or_else(PoisonError::into_inner);
        if let Some(tree) = slot.as_ref() {
            return Ok(Arc::clone(tree));
        }

        let tree = match config.show("")? {
            NavResult::Subtree(map) => serde_json::Value::Object(map),
            NavResult::NotFound => json!({}),
            NavResult::Leaf(_) => {
                return Err(CoreError::UnexpectedShape { found: "string" }.into())
            }
            NavResult::Array(_) => {
                return Err(CoreError::UnexpectedShape { found: "array" }.into())
            }
        };
        log::debug!("populated configuration snapshot");

        let tree = Arc::new(tree);
        *slot = Some(Arc::clone(&tree));
        Ok(tree)
    }

    /// Show `path` from the snapshot, populating it on first use.
    pub fn show(&self, config: &ConfigService<'_>, path: &str) -> Result<NavResult, Error> {
        let tree = self.get_or_populate(config)?;
        navigate(&tree, &Path::parse(path)).map_err(Error::from)
    }

    /// Discard the snapshot. The next read fetches a fresh tree.
    ///
    /// Call this after any write made through [`ConfigService`].
    pub fn invalidate(&self) {
        let mut slot = self.snapshot.lock().unwrap_or_else(PoisonError::into_inner);
        if slot.take().is_some() {
            log::debug!("invalidated configuration snapshot");
        }
    }
}
