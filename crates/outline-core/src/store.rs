//! Bounded least-recently-used store shared by both caches.

use lru::LruCache;
use std::borrow::Borrow;
use std::hash::Hash;
use std::num::NonZeroUsize;
use std::sync::Arc;

/// A cached value plus the key it was validated against.
#[derive(Debug)]
pub struct CacheEntry<T, V = ()> {
    pub value: Arc<T>,
    pub validity: V,
}

impl<T, V> CacheEntry<T, V> {
    pub fn new(value: Arc<T>, validity: V) -> Self {
        Self { value, validity }
    }
}

/// What an insert did to the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Insertion<K> {
    /// New key, store had room
    Inserted,
    /// Key was already present; its entry was overwritten in place
    Replaced,
    /// New key, store was full; the least recently used key was dropped
    Evicted(K),
}

/// Capacity-bounded map with O(1) recency updates.
///
/// Size never exceeds the capacity given at construction, and a full store
/// always drops its least recently used key to make room.
pub struct LruStore<K: Hash + Eq, T, V = ()> {
    inner: LruCache<K, CacheEntry<T, V>>,
}

impl<K: Hash + Eq, T, V> LruStore<K, T, V> {
    pub fn with_capacity(capacity: NonZeroUsize) -> Self {
        Self {
            inner: LruCache::new(capacity),
        }
    }

    /// Look up `key`, marking it most recently used.
    pub fn get<Q>(&mut self, key: &Q) -> Option<&CacheEntry<T, V>>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.inner.get(key)
    }

    /// Look up `key` without touching recency.
    pub fn peek<Q>(&self, key: &Q) -> Option<&CacheEntry<T, V>>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.inner.peek(key)
    }

    pub fn contains<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.inner.contains(key)
    }

    /// Store `entry` under `key` as the most recently used item.
    pub fn insert(&mut self, key: K, entry: CacheEntry<T, V>) -> Insertion<K> {
        let existed = self.inner.contains(&key);
        match self.inner.push(key, entry) {
            _ if existed => Insertion::Replaced,
            Some((evicted, _)) => Insertion::Evicted(evicted),
            None => Insertion::Inserted,
        }
    }

    /// Insert `entry` unless the current entry for `key` passes `keep`.
    ///
    /// Returns the value now stored under `key` and, when `entry` was the
    /// one stored, what the insert did. A kept entry is bumped to most
    /// recently used.
    pub fn insert_unless<F>(
        &mut self,
        key: K,
        entry: CacheEntry<T, V>,
        keep: F,
    ) -> (Arc<T>, Option<Insertion<K>>)
    where
        F: FnOnce(&CacheEntry<T, V>) -> bool,
    {
        if let Some(existing) = self.inner.get(&key) {
            if keep(existing) {
                return (existing.value.clone(), None);
            }
        }
        let value = entry.value.clone();
        let insertion = self.insert(key, entry);
        (value, Some(insertion))
    }

    pub fn remove<Q>(&mut self, key: &Q) -> Option<CacheEntry<T, V>>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.inner.pop(key)
    }

    pub fn clear(&mut self) {
        self.inner.clear();
    }

    pub fn len(&self) -> usize {
        self.inner.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.inner.cap().get()
    }

    /// Keys from most to least recently used.
    pub fn keys(&self) -> impl Iterator<Item = &K> {
        self.inner.iter().map(|(k, _)| k)
    }
}

/// Turn a configured capacity into a usable one, clamping zero to one.
pub(crate) fn effective_capacity(requested: usize, cache: &'static str) -> NonZeroUsize {
    NonZeroUsize::new(requested).unwrap_or_else(|| {
        tracing::warn!(cache, "Cache capacity of 0 requested, using 1");
        NonZeroUsize::MIN
    })
}
