//! Single-flight cache of compiled schemas, keyed by function identity.
//!
//! The cache guarantees at most one synthesis+compilation per distinct
//! function across concurrent callers: a single critical section spans
//! check-existence, compile-if-absent, and insert. Entries are immutable
//! once present and live as long as the cache does.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};

use crate::error::CompileError;
use crate::schema::Schema;

static NEXT_FUNCTION_ID: AtomicU64 = AtomicU64::new(1);

/// Identity of one function value.
///
/// Minted once per [`Function`](crate::validator::Function); two functions
/// with the same name (or even the same source) never share an id, so
/// their cache entries never collide.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FunctionId(u64);

impl FunctionId {
    pub(crate) fn mint() -> Self {
        Self(NEXT_FUNCTION_ID.fetch_add(1, Ordering::Relaxed))
    }
}

/// Memoized compiled schemas, one per function identity.
#[derive(Debug, Default)]
pub struct SchemaCache {
    entries: Mutex<HashMap<FunctionId, Arc<Schema>>>,
}

impl SchemaCache {
    /// Create an empty cache.
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the cached artifact for `key`, or run `factory` to create,
    /// insert, and return it.
    ///
    /// The whole check-and-insert is one critical section, so `factory`
    /// runs at most once per key no matter how many threads race here. A
    /// failing factory caches nothing; the error propagates.
    pub fn get_or_create<F>(&self, key: FunctionId, factory: F) -> Result<Arc<Schema>, CompileError>
    where
        F: FnOnce() -> Result<Schema, CompileError>,
    {
        let mut entries = self.lock_entries();
        if let Some(existing) = entries.get(&key) {
            return Ok(Arc::clone(existing));
        }
        let artifact = Arc::new(factory()?);
        entries.insert(key, Arc::clone(&artifact));
        Ok(artifact)
    }

    /// Number of cached artifacts.
    pub fn len(&self) -> usize {
        self.lock_entries().len()
    }

    /// True when nothing has been compiled yet.
    pub fn is_empty(&self) -> bool {
        self.lock_entries().is_empty()
    }

    /// The map stays structurally valid even if a factory panicked while
    /// the lock was held, so poisoning is recoverable.
    fn lock_entries(&self) -> MutexGuard<'_, HashMap<FunctionId, Arc<Schema>>> {
        match self.entries.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        }
    }
}
