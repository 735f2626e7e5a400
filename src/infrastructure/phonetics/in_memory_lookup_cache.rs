use std::sync::Arc;

use async_trait::async_trait;
use dashmap::DashMap;
use futures::future::BoxFuture;
use tokio::sync::OnceCell;

use crate::application::ports::{LookupCache, LookupError};

/// Populate-once cache. Each key owns a `OnceCell`, so concurrent first
/// lookups of the same key share a single fetch.
pub struct InMemoryLookupCache<V> {
    entries: DashMap<String, Arc<OnceCell<V>>>,
}

impl<V> InMemoryLookupCache<V> {
    pub fn new() -> Self {
        Self {
            entries: DashMap::new(),
        }
    }

    /// Keys that are cached or currently being populated.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl<V> Default for InMemoryLookupCache<V> {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl<V> LookupCache<V> for InMemoryLookupCache<V>
where
    V: Clone + Send + Sync + 'static,
{
    fn get(&self, key: &str) -> Option<V> {
        self.entries
            .get(key)
            .and_then(|cell| cell.value().get().cloned())
    }

    async fn get_or_populate(
        &self,
        key: &str,
        populate: BoxFuture<'static, Result<V, LookupError>>,
    ) -> Result<V, LookupError> {
        let cell = Arc::clone(self.entries.entry(key.to_string()).or_default().value());
        let result = cell.get_or_try_init(|| populate).await.cloned();
        if result.is_err() {
            // Only drop the cell this call used, and only while it is still empty.
            self.entries
                .remove_if(key, |_, current| Arc::ptr_eq(current, &cell) && !current.initialized());
        }
        result
    }
}
