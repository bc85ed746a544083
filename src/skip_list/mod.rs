mod inner;
mod inspect;
mod node;

use std::borrow::Borrow;
use std::fmt::{self, Debug, Display};

use parking_lot::RwLock;
use tracing::debug;

use crate::error::Result;
use crate::fingerprint::Fingerprint;
use crate::level::LevelGenerator;
use crate::options::SkipListOptions;
use inner::Inner;

/// A probabilistic skip list ordered by key fingerprint
///
/// Keys are kept in ascending [`Fingerprint`] order; keys that share a
/// fingerprint are told apart by equality. Mutations (`insert`, `remove`,
/// `clear`) take an exclusive write lock and fully serialize against each
/// other. Lookups take a shared read lock, so any number of readers proceed
/// together while no writer is active. The lock is not reentrant.
///
/// Share a list across threads with `Arc<SkipList<K, V>>`.
pub struct SkipList<K, V> {
    max_level: usize,
    inner: RwLock<Inner<K, V>>,
}

impl<K, V> SkipList<K, V>
where
    K: Fingerprint + PartialEq,
{
    /// Create an empty skip list whose nodes may reach `max_level`
    ///
    /// `max_level` must be in `1..=MAX_LEVEL_LIMIT`.
    pub fn new(max_level: usize) -> Result<Self> {
        Self::with_options(SkipListOptions::new(max_level))
    }

    /// Create an empty skip list from explicit options
    pub fn with_options(options: SkipListOptions) -> Result<Self> {
        options.validate()?;
        Ok(Self::from_valid_options(options))
    }

    fn from_valid_options(options: SkipListOptions) -> Self {
        let levels = match options.seed {
            Some(seed) => LevelGenerator::with_seed(options.max_level, seed),
            None => LevelGenerator::new(options.max_level),
        };
        debug!(
            max_level = options.max_level,
            seeded = options.seed.is_some(),
            "created skip list"
        );
        SkipList {
            max_level: options.max_level,
            inner: RwLock::new(Inner::new(levels)),
        }
    }

    /// Insert a key-value pair, overwriting the value of an equal key in place
    ///
    /// Returns the previous value if the key already existed.
    pub fn insert(&self, key: K, value: V) -> Option<V> {
        self.inner.write().insert(key, value)
    }

    /// Get a clone of the value associated with a key
    pub fn get<Q>(&self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: Fingerprint + PartialEq + ?Sized,
        V: Clone,
    {
        self.inner.read().get(key).cloned()
    }

    /// Apply `f` to the value associated with a key while holding the read lock
    pub fn get_with<Q, F, R>(&self, key: &Q, f: F) -> Option<R>
    where
        K: Borrow<Q>,
        Q: Fingerprint + PartialEq + ?Sized,
        F: FnOnce(&V) -> R,
    {
        self.inner.read().get(key).map(f)
    }

    /// Check if a key exists
    pub fn contains_key<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Fingerprint + PartialEq + ?Sized,
    {
        self.inner.read().get(key).is_some()
    }

    /// Remove a key from the skip list
    /// Returns the removed value if found
    pub fn remove<Q>(&self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: Fingerprint + PartialEq + ?Sized,
    {
        self.inner.write().remove(key)
    }

    /// Remove a key, reporting whether anything was removed
    pub fn delete<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Fingerprint + PartialEq + ?Sized,
    {
        self.remove(key).is_some()
    }

    /// Drop every entry and return to the empty state
    pub fn clear(&self) {
        let mut inner = self.inner.write();
        let dropped = inner.len;
        inner.clear();
        debug!(dropped, "cleared skip list");
    }

    /// Check every structural invariant, for diagnostics and tests
    pub fn validate(&self) -> Result<()> {
        self.inner.read().validate()
    }
}

impl<K, V> SkipList<K, V> {
    /// Get the number of elements in the skip list
    pub fn len(&self) -> usize {
        self.inner.read().len
    }

    /// Check if the skip list is empty
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn max_level(&self) -> usize {
        self.max_level
    }

    /// Highest level currently carrying an entry (0 when empty)
    pub fn top_level(&self) -> usize {
        self.inner.read().top_level
    }

    /// Number of entries linked at `level`
    pub fn level_len(&self, level: usize) -> usize {
        self.inner.read().level_iter(level).count()
    }

    /// Level-0 fingerprints, in list order
    pub fn fingerprints(&self) -> Vec<u64> {
        self.inner
            .read()
            .level_iter(0)
            .map(|(_, node)| node.fingerprint)
            .collect()
    }

    /// Snapshot of all entries in fingerprint order
    pub fn iter(&self) -> Vec<(K, V)>
    where
        K: Clone,
        V: Clone,
    {
        self.inner
            .read()
            .level_iter(0)
            .map(|(_, node)| (node.key.clone(), node.value.clone()))
            .collect()
    }

    /// Human-readable listing of the values on every level, top level first
    pub fn dump(&self) -> String
    where
        V: Debug,
    {
        self.to_string()
    }
}

impl<K, V> Default for SkipList<K, V>
where
    K: Fingerprint + PartialEq,
{
    fn default() -> Self {
        Self::from_valid_options(SkipListOptions::default())
    }
}

impl<K, V> Debug for SkipList<K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let inner = self.inner.read();
        f.debug_struct("SkipList")
            .field("max_level", &self.max_level)
            .field("top_level", &inner.top_level)
            .field("len", &inner.len)
            .finish()
    }
}

impl<K, V: Debug> Display for SkipList<K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.inner.read().dump(f)
    }
}
