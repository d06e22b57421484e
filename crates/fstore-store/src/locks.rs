//! Per-path readers-writer locks.
//!
//! [`LockRegistry`] hands out exactly one [`PathLock`] per filesystem path.
//! Its own mutex is held only for the check-then-insert on the map, so two
//! callers racing to create the lock for a path both end up with the same
//! instance, and callers working on unrelated paths never contend beyond
//! that lookup.
//!
//! Entries are never evicted. The registry grows with the number of distinct
//! paths touched by the process, which is bounded by the amount of
//! deployment state the store holds.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

/// Readers-writer lock guarding one filesystem path.
///
/// Cloning yields another handle to the same lock. Acquisition never fails:
/// the lock guards no data, so a panic while it was held leaves nothing
/// inconsistent and poisoning is ignored.
#[derive(Clone, Debug, Default)]
pub struct PathLock(Arc<RwLock<()>>);

impl PathLock {
    /// Block until shared access is granted.
    pub fn read(&self) -> RwLockReadGuard<'_, ()> {
        self.0.read().unwrap_or_else(PoisonError::into_inner)
    }

    /// Block until exclusive access is granted.
    pub fn write(&self) -> RwLockWriteGuard<'_, ()> {
        self.0.write().unwrap_or_else(PoisonError::into_inner)
    }

    /// Returns `true` if both handles refer to the same lock.
    pub fn same_lock(&self, other: &PathLock) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

/// Process-wide (per store) mapping from path to [`PathLock`].
#[derive(Debug, Default)]
pub struct LockRegistry {
    locks: Mutex<HashMap<PathBuf, PathLock>>,
}

impl LockRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the lock for `path`, creating it on first access.
    ///
    /// The returned handle is used after the registry mutex is released.
    pub fn acquire(&self, path: &Path) -> PathLock {
        let mut locks = self.locks.lock().unwrap_or_else(PoisonError::into_inner);
        if let Some(lock) = locks.get(path) {
            return lock.clone();
        }
        let lock = PathLock::default();
        locks.insert(path.to_path_buf(), lock.clone());
        lock
    }

    /// Number of paths that have a lock.
    pub fn len(&self) -> usize {
        self.locks.lock().unwrap_or_else(PoisonError::into_inner).len()
    }

    /// Returns `true` if no lock has been created yet.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
