//! Per-key-locked, filesystem-backed key-value store.
//!
//! Keys are `/`-delimited hierarchical names. Each leaf key is one file at
//! `<directory>/<key>.<extension>` holding the codec-encoded value; the key's
//! prefix segments are real directories created on demand.
//!
//! # Concurrency
//!
//! Every path has exactly one readers-writer lock, handed out by a
//! [`LockRegistry`]:
//!
//! 1. Writers to the same key serialize, and exclude readers of that key.
//! 2. Readers of the same key proceed in parallel.
//! 3. Operations on different keys never wait on each other; the registry's
//!    own mutex is held only to look up or insert a lock, never across I/O.
//! 4. Encoding happens before the write lock is taken and decoding after the
//!    read lock is released.
//!
//! Listing ([`Store::keys`]) and existence checks ([`Store::exist`]) take no
//! lock and are advisory snapshots.
//!
//! # Modules
//!
//! - [`error`] — [`StoreError`] and the [`StoreResult`] alias
//! - [`path`] — [`PathMapper`], key to filesystem path translation
//! - [`locks`] — [`LockRegistry`] and [`PathLock`]
//! - [`traits`] — the [`Store`] trait
//! - [`file`] — [`FileStore`], the filesystem implementation
//! - [`async_store`] — [`AsyncFileStore`], a tokio facade
//! - [`config`] — [`StoreConfig`] loaded from TOML
//! - [`plugin`] — [`StorePlugin`], the unit a host publishes

pub mod async_store;
pub mod config;
pub mod error;
pub mod file;
pub mod locks;
pub mod path;
pub mod plugin;
pub mod traits;

// Re-export primary types at crate root for ergonomic imports.
pub use async_store::AsyncFileStore;
pub use config::StoreConfig;
pub use error::{StoreError, StoreResult};
pub use file::{FileStore, StoreOptions};
pub use locks::{LockRegistry, PathLock};
pub use path::PathMapper;
pub use plugin::{StorePlugin, STORE_PLUGIN_NAME};
pub use traits::Store;

pub use fstore_codec::{Codec, Encoding};
pub use fstore_types::{KeyValue, StoreType, ValidationError};
