//! Publication of the store to a host process.
//!
//! A host looks the store up by [`STORE_PLUGIN_NAME`] and calls it through
//! the [`Store`] operations. How the host discovers plugins is its own
//! business; this module only builds the published unit from configuration.

use std::sync::Arc;

use tracing::info;

use fstore_types::StoreType;

use crate::async_store::AsyncFileStore;
use crate::config::StoreConfig;
use crate::error::StoreResult;
use crate::file::FileStore;
use crate::traits::Store;

/// Name the store is registered under in a host plugin registry.
pub const STORE_PLUGIN_NAME: &str = "Store";

/// A configured [`FileStore`] ready to be registered with a host.
#[derive(Clone, Debug)]
pub struct StorePlugin {
    store: Arc<FileStore>,
}

impl StorePlugin {
    /// Build the store described by `config`, creating its directory.
    pub fn load(config: &StoreConfig) -> StoreResult<Self> {
        let store = FileStore::new(config.options())?;
        info!(plugin = STORE_PLUGIN_NAME, types = ?store.types(), "store plugin loaded");
        Ok(Self {
            store: Arc::new(store),
        })
    }

    pub fn name(&self) -> &'static str {
        STORE_PLUGIN_NAME
    }

    pub fn types(&self) -> &[StoreType] {
        self.store.types()
    }

    pub fn store(&self) -> &Arc<FileStore> {
        &self.store
    }

    /// Async handle sharing this plugin's store and lock registry.
    pub fn async_store(&self) -> AsyncFileStore {
        AsyncFileStore::from_shared(Arc::clone(&self.store))
    }
}
