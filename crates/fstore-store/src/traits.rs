use serde::de::DeserializeOwned;
use serde::Serialize;

use fstore_types::{KeyValue, StoreType};

use crate::error::StoreResult;

/// Hierarchical key-value store.
///
/// All implementations must satisfy these invariants:
/// - Keys and values are validated before any I/O.
/// - A missing key is not an error: `get` returns `Ok(None)`, `exist`
///   returns `Ok(false)`, `keys` returns an empty list and `delete` succeeds.
/// - Writes to one key are linearized with reads and writes of that key;
///   there is no ordering across keys.
/// - No operation is retried internally.
pub trait Store: Send + Sync {
    /// Store `value` under `key`, replacing any previous value.
    fn set<V>(&self, key: &str, value: &V) -> StoreResult<()>
    where
        V: Serialize + ?Sized;

    /// Store every entry of a collection.
    ///
    /// This is not a transaction. On failure the first error is returned,
    /// and entries other than the failing one may or may not have been
    /// written. An empty collection is a no-op.
    ///
    /// Default implementation calls `set()` for each entry in order and
    /// stops at the first failure. Backends may override to write
    /// concurrently.
    fn set_collection<V>(&self, entries: &[KeyValue<V>]) -> StoreResult<()>
    where
        V: Serialize + Sync,
    {
        entries
            .iter()
            .try_for_each(|entry| self.set(&entry.key, &entry.value))
    }

    /// Read the value stored under `key`.
    ///
    /// Returns `Ok(None)` if nothing is stored there.
    fn get<V>(&self, key: &str) -> StoreResult<Option<V>>
    where
        V: DeserializeOwned;

    /// Read the value stored under `key` into `destination`.
    ///
    /// Returns `Ok(false)` and leaves `destination` untouched if nothing is
    /// stored there.
    fn get_into<V>(&self, key: &str, destination: &mut V) -> StoreResult<bool>
    where
        V: DeserializeOwned,
    {
        match self.get(key)? {
            Some(value) => {
                *destination = value;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    /// Check whether a value is stored under `key`.
    fn exist(&self, key: &str) -> StoreResult<bool>;

    /// List the leaf names directly below `prefix` (one level, sub-prefixes
    /// excluded). The empty prefix lists the root.
    fn keys(&self, prefix: &str) -> StoreResult<Vec<String>>;

    /// Delete the value under `key`, or with `recursive` the whole subtree
    /// below it. Deleting something that does not exist succeeds.
    fn delete(&self, key: &str, recursive: bool) -> StoreResult<()>;

    /// Categories of state this store is responsible for.
    fn types(&self) -> &[StoreType];
}
