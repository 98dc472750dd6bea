use crate::theme::Theme;
use std::collections::HashMap;
use std::hash::Hash;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::RwLock;
use tokio::time::Instant;

/// Default time-to-live for resolution cache entries.
pub const DEFAULT_CACHE_TTL: Duration = Duration::from_secs(5 * 60);

#[derive(Debug, Clone)]
struct CachedEntry<V> {
    value: V,
    expires_at: Instant,
}

impl<V> CachedEntry<V> {
    fn new(value: V, ttl: Duration) -> Self {
        Self {
            value,
            expires_at: Instant::now() + ttl,
        }
    }

    fn is_expired(&self) -> bool {
        Instant::now() >= self.expires_at
    }
}

/// Key/value cache with a fixed time-to-live.
///
/// Expired entries are never returned and are purged lazily on the next read.
#[derive(Clone)]
pub struct TtlCache<K, V> {
    entries: Arc<RwLock<HashMap<K, CachedEntry<V>>>>,
    ttl: Duration,
}

impl<K, V> TtlCache<K, V>
where
    K: Eq + Hash + Clone,
    V: Clone,
{
    pub fn new(ttl: Duration) -> Self {
        Self {
            entries: Arc::new(RwLock::new(HashMap::new())),
            ttl,
        }
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    pub async fn get(&self, key: &K) -> Option<V> {
        {
            let entries = self.entries.read().await;
            match entries.get(key) {
                Some(entry) if !entry.is_expired() => return Some(entry.value.clone()),
                Some(_) => {}
                None => return None,
            }
        }

        let mut entries = self.entries.write().await;
        if entries.get(key).is_some_and(CachedEntry::is_expired) {
            entries.remove(key);
        }
        None
    }

    pub async fn insert(&self, key: K, value: V) {
        let mut entries = self.entries.write().await;
        entries.insert(key, CachedEntry::new(value, self.ttl));
    }

    pub async fn invalidate(&self, key: &K) {
        let mut entries = self.entries.write().await;
        entries.remove(key);
    }

    pub async fn clear(&self) {
        let mut entries = self.entries.write().await;
        entries.clear();
    }

    /// Number of stored entries, including expired ones not yet purged.
    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.entries.read().await.is_empty()
    }
}

/// The resolver's cache, one namespace per query family.
#[derive(Clone)]
pub struct ThemeCache {
    pub available: TtlCache<(), Vec<Theme>>,
    pub by_id: TtlCache<String, Theme>,
    pub organization: TtlCache<String, Theme>,
    pub user: TtlCache<String, Theme>,
}

impl ThemeCache {
    pub fn new(ttl: Duration) -> Self {
        Self {
            available: TtlCache::new(ttl),
            by_id: TtlCache::new(ttl),
            organization: TtlCache::new(ttl),
            user: TtlCache::new(ttl),
        }
    }

    pub async fn clear(&self) {
        self.available.clear().await;
        self.by_id.clear().await;
        self.organization.clear().await;
        self.user.clear().await;
    }
}

impl Default for ThemeCache {
    fn default() -> Self {
        Self::new(DEFAULT_CACHE_TTL)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test(start_paused = true)]
    async fn entry_expires_after_ttl() {
        let cache = TtlCache::new(Duration::from_secs(10));
        cache.insert("k".to_string(), 1).await;

        tokio::time::advance(Duration::from_secs(9)).await;
        assert_eq!(cache.get(&"k".to_string()).await, Some(1));

        tokio::time::advance(Duration::from_secs(1)).await;
        assert_eq!(cache.get(&"k".to_string()).await, None);
    }

    #[tokio::test(start_paused = true)]
    async fn expired_entries_are_purged_on_read() {
        let cache = TtlCache::new(Duration::from_secs(1));
        cache.insert(1u8, "a").await;
        cache.insert(2u8, "b").await;

        tokio::time::advance(Duration::from_secs(2)).await;
        assert_eq!(cache.len().await, 2);

        assert_eq!(cache.get(&1).await, None);
        assert_eq!(cache.len().await, 1);
    }

    #[tokio::test]
    async fn invalidate_and_clear() {
        let cache = TtlCache::new(DEFAULT_CACHE_TTL);
        cache.insert(1u8, "a").await;
        cache.insert(2u8, "b").await;

        cache.invalidate(&1).await;
        assert_eq!(cache.get(&1).await, None);
        assert_eq!(cache.get(&2).await, Some("b"));

        cache.clear().await;
        assert!(cache.is_empty().await);
    }

    #[tokio::test]
    async fn namespaces_do_not_collide() {
        let cache = ThemeCache::default();
        let theme = crate::theme::predefined_themes().remove(0);

        cache.by_id.insert("same".to_string(), theme.clone()).await;
        assert!(cache.organization.get(&"same".to_string()).await.is_none());
        assert!(cache.user.get(&"same".to_string()).await.is_none());

        cache.clear().await;
        assert!(cache.by_id.is_empty().await);
    }
}
