//! Response caches injected into [`CachedSource`](crate::CachedSource).
use std::{
  collections::HashMap,
  sync::{Mutex, MutexGuard, PoisonError},
  time::{Duration, Instant},
};

use log::trace;

use crate::repo::CacheKey;

/// How long [`MemoryCache`] keeps a response by default.
pub const DEFAULT_TTL: Duration = Duration::from_secs(5 * 60);

/// A store for fetched responses, keyed by repository and resource kind.
///
/// Values are the raw response bodies. Implementations decide on expiry;
/// an expired entry behaves as if it was never set.
pub trait ResponseCache {
  fn get(&self, key: &CacheKey) -> Option<String>;
  fn set(&self, key: CacheKey, value: String);
  fn clear(&self);
  /// Number of entries currently held.
  fn len(&self) -> usize;

  fn is_empty(&self) -> bool {
    self.len() == 0
  }
}

/// In-memory cache with a fixed time to live.
#[derive(Debug)]
pub struct MemoryCache {
  ttl:     Duration,
  entries: Mutex<HashMap<CacheKey, (Instant, String)>>,
}

impl Default for MemoryCache {
  fn default() -> Self {
    Self::new(DEFAULT_TTL)
  }
}

impl MemoryCache {
  #[must_use]
  pub fn new(ttl: Duration) -> Self {
    Self {
      ttl,
      entries: Mutex::new(HashMap::new()),
    }
  }

  #[must_use]
  pub const fn ttl(&self) -> Duration {
    self.ttl
  }

  /// Drop every expired entry, returning how many were removed.
  ///
  /// Expired entries are also dropped on lookup and whenever a new entry is
  /// stored.
  pub fn purge_expired(&self) -> usize {
    let mut entries = self.lock();
    let before = entries.len();
    entries.retain(|_, (stored, _)| stored.elapsed() < self.ttl);
    before - entries.len()
  }

  /// Keys currently held, in no particular order.
  #[must_use]
  pub fn keys(&self) -> Vec<String> {
    self.lock().keys().map(ToString::to_string).collect()
  }

  fn lock(&self) -> MutexGuard<'_, HashMap<CacheKey, (Instant, String)>> {
    // A panic while holding the lock cannot leave the map half-updated.
    self.entries.lock().unwrap_or_else(PoisonError::into_inner)
  }
}

impl ResponseCache for MemoryCache {
  fn get(&self, key: &CacheKey) -> Option<String> {
    let mut entries = self.lock();
    let (stored, value) = entries.get(key)?;
    if stored.elapsed() < self.ttl {
      trace!("Cache hit for {key}");
      return Some(value.clone());
    }
    trace!("Cache entry for {key} expired");
    entries.remove(key);
    None
  }

  fn set(&self, key: CacheKey, value: String) {
    let mut entries = self.lock();
    let ttl = self.ttl;
    entries.retain(|_, (stored, _)| stored.elapsed() < ttl);
    entries.insert(key, (Instant::now(), value));
  }

  fn clear(&self) {
    self.lock().clear();
  }

  fn len(&self) -> usize {
    self.lock().len()
  }
}

/// A cache that stores nothing.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoCache;

impl ResponseCache for NoCache {
  fn get(&self, _key: &CacheKey) -> Option<String> {
    None
  }

  fn set(&self, _key: CacheKey, _value: String) {}

  fn clear(&self) {}

  fn len(&self) -> usize {
    0
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::repo::{RepoRef, ResourceKind};

  fn key(kind: ResourceKind) -> CacheKey {
    CacheKey::new(kind, &RepoRef::new("o", "r"))
  }

  #[test]
  fn test_memory_cache_roundtrip() {
    let cache = MemoryCache::default();
    assert!(cache.is_empty());
    cache.set(key(ResourceKind::Readme), "# hi".to_string());
    assert_eq!(cache.get(&key(ResourceKind::Readme)).as_deref(), Some("# hi"));
    assert_eq!(cache.get(&key(ResourceKind::Metadata)), None);
    assert_eq!(cache.keys(), ["readme-o/r"]);

    cache.clear();
    assert_eq!(cache.len(), 0);
  }

  #[test]
  fn test_memory_cache_expiry_drops_entry() {
    let cache = MemoryCache::new(Duration::ZERO);
    cache.set(key(ResourceKind::Readme), "# hi".to_string());
    assert_eq!(cache.len(), 1);
    assert_eq!(cache.get(&key(ResourceKind::Readme)), None);
    assert!(cache.is_empty());
  }

  #[test]
  fn test_memory_cache_set_and_purge_drop_expired() {
    let cache = MemoryCache::new(Duration::ZERO);
    cache.set(key(ResourceKind::Readme), "# hi".to_string());
    cache.set(key(ResourceKind::Metadata), "{}".to_string());
    assert_eq!(cache.keys(), ["repo-o/r"]);

    assert_eq!(cache.purge_expired(), 1);
    assert!(cache.is_empty());
    assert_eq!(MemoryCache::default().purge_expired(), 0);
  }

  #[test]
  fn test_no_cache() {
    let cache = NoCache;
    cache.set(key(ResourceKind::Readme), "# hi".to_string());
    assert_eq!(cache.get(&key(ResourceKind::Readme)), None);
    assert!(cache.is_empty());
  }
}
