//! Unbounded Cache Module
//!
//! Map-backed store with no expiration and no background work.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::cache::{validate_key, Cache};
use crate::error::Result;

// == Unbounded Cache ==
/// Lock-guarded key-value table without expiration.
///
/// `set`/`delete` take the write lock, `get` takes the read lock.
#[derive(Debug)]
pub struct UnboundedCache<V> {
    /// Key-value storage
    entries: RwLock<HashMap<String, V>>,
}

impl<V> UnboundedCache<V> {
    // == Constructor ==
    /// Creates an empty cache.
    pub fn new() -> Self {
        Self {
            entries: RwLock::new(HashMap::new()),
        }
    }

    // == Length ==
    /// Returns the current number of entries.
    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }

    // == Is Empty ==
    /// Returns true if the cache is empty.
    pub async fn is_empty(&self) -> bool {
        self.entries.read().await.is_empty()
    }
}

impl<V> Default for UnboundedCache<V> {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl<V> Cache<V> for UnboundedCache<V>
where
    V: Clone + Send + Sync + 'static,
{
    async fn set(&self, key: &str, value: V) -> Result<()> {
        validate_key(key)?;

        let mut entries = self.entries.write().await;
        entries.insert(key.to_string(), value);
        Ok(())
    }

    async fn get(&self, key: &str) -> Result<Option<V>> {
        validate_key(key)?;

        let entries = self.entries.read().await;
        Ok(entries.get(key).cloned())
    }

    async fn delete(&self, key: &str) -> Result<()> {
        validate_key(key)?;

        let mut entries = self.entries.write().await;
        entries.remove(key);
        Ok(())
    }
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CacheError;
    use std::sync::Arc;

    #[tokio::test]
    async fn test_new_is_empty() {
        let cache: UnboundedCache<String> = UnboundedCache::new();
        assert_eq!(cache.len().await, 0);
        assert!(cache.is_empty().await);
    }

    #[tokio::test]
    async fn test_set_and_get() {
        let cache = UnboundedCache::<String>::new();

        cache.set("key1", "value1".to_string()).await.unwrap();

        assert_eq!(cache.get("key1").await.unwrap(), Some("value1".to_string()));
        assert_eq!(cache.len().await, 1);
    }

    #[tokio::test]
    async fn test_stores_arbitrary_values() {
        #[derive(Debug, Clone, PartialEq)]
        struct Profile {
            name: String,
            age: u32,
        }

        let cache = UnboundedCache::<Profile>::new();
        let profile = Profile {
            name: "test".to_string(),
            age: 100,
        };

        cache.set("profile", profile.clone()).await.unwrap();
        assert_eq!(cache.get("profile").await.unwrap(), Some(profile));
    }

    #[tokio::test]
    async fn test_get_nonexistent() {
        let cache: UnboundedCache<i32> = UnboundedCache::new();
        assert_eq!(cache.get("nonexistent").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_overwrite() {
        let cache = UnboundedCache::<i32>::new();

        cache.set("key1", 1).await.unwrap();
        cache.set("key1", 2).await.unwrap();

        assert_eq!(cache.get("key1").await.unwrap(), Some(2));
        assert_eq!(cache.len().await, 1);
    }

    #[tokio::test]
    async fn test_delete() {
        let cache = UnboundedCache::<&str>::new();

        cache.set("key1", "value1").await.unwrap();
        cache.delete("key1").await.unwrap();

        assert!(cache.is_empty().await);
        assert_eq!(cache.get("key1").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_delete_nonexistent_is_idempotent() {
        let cache: UnboundedCache<i32> = UnboundedCache::new();

        for _ in 0..3 {
            assert!(cache.delete("nonexistent").await.is_ok());
        }
    }

    #[tokio::test]
    async fn test_empty_key_rejected() {
        let cache = UnboundedCache::<i32>::new();

        assert_eq!(cache.set("", 1).await, Err(CacheError::InvalidKey));
        assert_eq!(cache.get("").await, Err(CacheError::InvalidKey));
        assert_eq!(cache.delete("").await, Err(CacheError::InvalidKey));
        assert!(cache.is_empty().await);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_writers_then_readers() {
        let cache = Arc::new(UnboundedCache::<i32>::new());

        let writers: Vec<_> = (0..32)
            .map(|i| {
                let cache = Arc::clone(&cache);
                tokio::spawn(async move { cache.set(&format!("key{}", i), i).await })
            })
            .collect();
        for handle in writers {
            handle.await.unwrap().unwrap();
        }

        let readers: Vec<_> = (0..32)
            .map(|i| {
                let cache = Arc::clone(&cache);
                tokio::spawn(async move { (i, cache.get(&format!("key{}", i)).await) })
            })
            .collect();
        for handle in readers {
            let (i, result) = handle.await.unwrap();
            assert_eq!(result.unwrap(), Some(i));
        }

        assert_eq!(cache.len().await, 32);
    }
}
