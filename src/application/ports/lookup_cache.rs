use async_trait::async_trait;
use futures::future::BoxFuture;

use super::phonetic_data_source::LookupError;

/// Process-lifetime cache for static lookup data. A failed populate leaves
/// the key absent so the next caller retries.
#[async_trait]
pub trait LookupCache<V>: Send + Sync
where
    V: Clone + Send + Sync + 'static,
{
    fn get(&self, key: &str) -> Option<V>;

    async fn get_or_populate(
        &self,
        key: &str,
        populate: BoxFuture<'static, Result<V, LookupError>>,
    ) -> Result<V, LookupError>;
}
