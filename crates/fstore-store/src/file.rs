//! Filesystem-backed [`Store`].

use std::fs::{self, DirBuilder, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::mpsc;
use std::thread;

use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, info, warn};

use fstore_codec::{Codec, Encoding};
use fstore_types::{check_key, check_key_and_value, check_prefix, KeyValue, StoreType};

use crate::error::{StoreError, StoreResult};
use crate::locks::LockRegistry;
use crate::path::PathMapper;
use crate::traits::Store;

/// Categories served by [`FileStore`].
const FILE_STORE_TYPES: &[StoreType] = &[StoreType::Deployment];

const WRITER_THREAD_NAME: &str = "fstore-set";

#[cfg(unix)]
const DIR_MODE: u32 = 0o700;
#[cfg(unix)]
const FILE_MODE: u32 = 0o600;

/// Construction parameters for a [`FileStore`].
#[derive(Clone, Debug)]
pub struct StoreOptions<C = Encoding> {
    /// Directory holding the store. Relative paths resolve against the
    /// process working directory.
    pub directory: PathBuf,
    /// Extension of leaf files, without the dot. Empty for none.
    ///
    /// When changing `codec`, change this too unless it is empty.
    pub filename_extension: String,
    /// Value encoding.
    pub codec: C,
}

impl StoreOptions<Encoding> {
    /// JSON-encoded store with `.json` files, the reference configuration.
    pub fn new(directory: impl Into<PathBuf>) -> Self {
        Self::with_codec(directory, Encoding::Json)
    }
}

impl<C: Codec> StoreOptions<C> {
    /// Store using `codec`, with the codec's own filename extension.
    pub fn with_codec(directory: impl Into<PathBuf>, codec: C) -> Self {
        Self {
            directory: directory.into(),
            filename_extension: codec.extension().to_string(),
            codec,
        }
    }
}

/// Key-value store keeping one file per key below a base directory.
///
/// See the [crate docs](crate) for the locking discipline.
pub struct FileStore<C = Encoding> {
    paths: PathMapper,
    locks: LockRegistry,
    codec: C,
}

impl<C: Codec> FileStore<C> {
    /// Create the store, creating its base directory if needed.
    pub fn new(options: StoreOptions<C>) -> StoreResult<Self> {
        info!(
            directory = %options.directory.display(),
            encoding = options.codec.name(),
            "creating file store"
        );

        create_dir_all(&options.directory).map_err(|e| StoreError::io(&options.directory, e))?;

        Ok(Self {
            paths: PathMapper::new(options.directory, &options.filename_extension),
            locks: LockRegistry::new(),
            codec: options.codec,
        })
    }

    /// Base directory of the store.
    pub fn directory(&self) -> &Path {
        self.paths.directory()
    }

    pub fn paths(&self) -> &PathMapper {
        &self.paths
    }

    pub fn codec(&self) -> &C {
        &self.codec
    }

    #[cfg(test)]
    pub(crate) fn locks(&self) -> &LockRegistry {
        &self.locks
    }

    /// Number of paths a lock has been created for so far.
    pub fn lock_count(&self) -> usize {
        self.locks.len()
    }

    /// Fan-out behind [`Store::set_collection`].
    ///
    /// A thread that cannot be started fails the collection with `Io` at
    /// that entry's path. No further threads are started, and the ones
    /// already running are joined before returning.
    fn write_concurrently<V, B>(&self, entries: &[KeyValue<V>], builder: B) -> StoreResult<()>
    where
        V: Serialize + Sync,
        B: Fn() -> thread::Builder,
    {
        if entries.is_empty() {
            return Ok(());
        }

        let (tx, rx) = mpsc::channel();
        let mut spawn_failure = None;
        thread::scope(|scope| {
            for entry in entries {
                let tx = tx.clone();
                let spawned = builder().spawn_scoped(scope, move || {
                    let result = self.set(&entry.key, &entry.value);
                    if let Err(e) = &result {
                        warn!(key = %entry.key, error = %e, "collection entry failed");
                    }
                    // The receiver outlives the scope.
                    let _ = tx.send(result);
                });
                if let Err(e) = spawned {
                    warn!(key = %entry.key, error = %e, "could not start collection writer");
                    spawn_failure = Some(StoreError::io(&self.paths.file_path(&entry.key), e));
                    break;
                }
            }
        });
        drop(tx);

        if let Some(e) = spawn_failure {
            return Err(e);
        }
        match rx.into_iter().find_map(Result::err) {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }
}

impl<C: Codec> Store for FileStore<C> {
    fn set<V>(&self, key: &str, value: &V) -> StoreResult<()>
    where
        V: Serialize + ?Sized,
    {
        check_key_and_value(key, value)?;

        let data = self.codec.encode(value).map_err(|source| StoreError::Encoding {
            key: key.to_string(),
            source,
        })?;

        let file_path = self.paths.file_path(key);
        let lock = self.locks.acquire(&file_path);
        let _guard = lock.write();

        if let Some(parent) = file_path.parent() {
            create_dir_all(parent).map_err(|e| StoreError::io(parent, e))?;
        }
        write_file(&file_path, &data).map_err(|e| StoreError::io(&file_path, e))
    }

    /// Writes every entry on its own thread, waits for all of them, and
    /// returns the first failure to complete.
    fn set_collection<V>(&self, entries: &[KeyValue<V>]) -> StoreResult<()>
    where
        V: Serialize + Sync,
    {
        self.write_concurrently(entries, || thread::Builder::new().name(WRITER_THREAD_NAME.into()))
    }

    fn get<V>(&self, key: &str) -> StoreResult<Option<V>>
    where
        V: DeserializeOwned,
    {
        check_key(key)?;

        let file_path = self.paths.file_path(key);
        let lock = self.locks.acquire(&file_path);

        // Decode after the read lock is released.
        let read = {
            let _guard = lock.read();
            fs::read(&file_path)
        };

        let data = match read {
            Ok(data) => data,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(StoreError::io(&file_path, e)),
        };

        self.codec
            .decode(&data)
            .map(Some)
            .map_err(|source| StoreError::Decoding {
                key: key.to_string(),
                source,
            })
    }

    fn exist(&self, key: &str) -> StoreResult<bool> {
        check_key(key)?;

        let file_path = self.paths.file_path(key);
        match fs::metadata(&file_path) {
            Ok(_) => Ok(true),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(false),
            Err(e) => Err(StoreError::io(&file_path, e)),
        }
    }

    fn keys(&self, prefix: &str) -> StoreResult<Vec<String>> {
        debug!(prefix, "listing keys");
        check_prefix(prefix)?;

        let dir_path = self.paths.dir_path(prefix);
        let entries = match fs::read_dir(&dir_path) {
            Ok(entries) => entries,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(StoreError::io(&dir_path, e)),
        };

        let mut keys = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|e| StoreError::io(&dir_path, e))?;
            let file_type = match entry.file_type() {
                Ok(file_type) => file_type,
                // Removed since the listing was taken.
                Err(e) if e.kind() == io::ErrorKind::NotFound => continue,
                Err(e) => return Err(StoreError::io(&entry.path(), e)),
            };
            if file_type.is_dir() {
                continue;
            }

            let file_name = entry.file_name();
            match file_name.to_str() {
                Some(name) => keys.push(self.paths.leaf_name(name).to_string()),
                None => warn!(path = %entry.path().display(), "skipping non UTF-8 file name"),
            }
        }

        keys.sort();
        Ok(keys)
    }

    fn delete(&self, key: &str, recursive: bool) -> StoreResult<()> {
        debug!(key, recursive, "deleting key");
        check_key(key)?;

        let path = self.paths.key_path(key, !recursive);
        let lock = self.locks.acquire(&path);
        let _guard = lock.write();

        let result = if recursive {
            remove_all(&path)
        } else {
            fs::remove_file(&path)
        };

        match result {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(StoreError::io(&path, e)),
        }
    }

    fn types(&self) -> &[StoreType] {
        FILE_STORE_TYPES
    }
}

impl<C: Codec> std::fmt::Debug for FileStore<C> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FileStore")
            .field("directory", &self.paths.directory())
            .field("extension", &self.paths.extension())
            .field("encoding", &self.codec.name())
            .field("lock_count", &self.locks.len())
            .finish()
    }
}

fn create_dir_all(path: &Path) -> io::Result<()> {
    let mut builder = DirBuilder::new();
    builder.recursive(true);
    #[cfg(unix)]
    {
        use std::os::unix::fs::DirBuilderExt;
        builder.mode(DIR_MODE);
    }
    builder.create(path)
}

fn write_file(path: &Path, data: &[u8]) -> io::Result<()> {
    let mut options = OpenOptions::new();
    options.write(true).create(true).truncate(true);
    #[cfg(unix)]
    {
        use std::os::unix::fs::OpenOptionsExt;
        options.mode(FILE_MODE);
    }
    let mut file = options.open(path)?;
    file.write_all(data)
}

/// Remove a directory tree, or a single file if that is what `path` names.
fn remove_all(path: &Path) -> io::Result<()> {
    if fs::symlink_metadata(path)?.is_dir() {
        fs::remove_dir_all(path)
    } else {
        fs::remove_file(path)
    }
}
