//! Tokio facade over [`FileStore`].
//!
//! Store operations block on locks and filesystem calls, so each one runs on
//! tokio's blocking pool. Dropping a returned future stops waiting for the
//! result; a filesystem call that has already started still completes.

use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde::Serialize;
use tokio::task::{JoinError, JoinSet};

use fstore_codec::{Codec, Encoding};
use fstore_types::{KeyValue, StoreType};

use crate::error::{StoreError, StoreResult};
use crate::file::FileStore;
use crate::traits::Store;

/// Cloneable async handle to a shared [`FileStore`].
pub struct AsyncFileStore<C = Encoding> {
    inner: Arc<FileStore<C>>,
}

impl<C> Clone for AsyncFileStore<C> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<C: Codec + 'static> AsyncFileStore<C> {
    pub fn new(store: FileStore<C>) -> Self {
        Self::from_shared(Arc::new(store))
    }

    pub fn from_shared(inner: Arc<FileStore<C>>) -> Self {
        Self { inner }
    }

    /// The underlying blocking store.
    pub fn blocking(&self) -> &Arc<FileStore<C>> {
        &self.inner
    }

    pub async fn set<V>(&self, key: impl Into<String>, value: V) -> StoreResult<()>
    where
        V: Serialize + Send + 'static,
    {
        let key = key.into();
        self.run(move |store| store.set(&key, &value)).await
    }

    /// Write every entry concurrently and return the first failure collected.
    ///
    /// On failure this returns without waiting for the remaining entries;
    /// their writes keep running in the background and may or may not land.
    /// Nothing is rolled back.
    pub async fn set_collection<V>(&self, entries: Vec<KeyValue<V>>) -> StoreResult<()>
    where
        V: Serialize + Send + 'static,
    {
        let mut tasks = JoinSet::new();
        for entry in entries {
            let store = Arc::clone(&self.inner);
            tasks.spawn_blocking(move || store.set(&entry.key, &entry.value));
        }

        while let Some(joined) = tasks.join_next().await {
            let outcome = joined.map_err(task_error).and_then(|result| result);
            if let Err(e) = outcome {
                tasks.detach_all();
                return Err(e);
            }
        }
        Ok(())
    }

    pub async fn get<V>(&self, key: impl Into<String>) -> StoreResult<Option<V>>
    where
        V: DeserializeOwned + Send + 'static,
    {
        let key = key.into();
        self.run(move |store| store.get(&key)).await
    }

    pub async fn exist(&self, key: impl Into<String>) -> StoreResult<bool> {
        let key = key.into();
        self.run(move |store| store.exist(&key)).await
    }

    pub async fn keys(&self, prefix: impl Into<String>) -> StoreResult<Vec<String>> {
        let prefix = prefix.into();
        self.run(move |store| store.keys(&prefix)).await
    }

    pub async fn delete(&self, key: impl Into<String>, recursive: bool) -> StoreResult<()> {
        let key = key.into();
        self.run(move |store| store.delete(&key, recursive)).await
    }

    pub fn types(&self) -> &[StoreType] {
        self.inner.types()
    }

    async fn run<T, F>(&self, op: F) -> StoreResult<T>
    where
        T: Send + 'static,
        F: FnOnce(&FileStore<C>) -> StoreResult<T> + Send + 'static,
    {
        let store = Arc::clone(&self.inner);
        tokio::task::spawn_blocking(move || op(&store))
            .await
            .map_err(task_error)?
    }
}

fn task_error(err: JoinError) -> StoreError {
    StoreError::Task(err.to_string())
}
