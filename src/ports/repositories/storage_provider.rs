use async_trait::async_trait;

use crate::domain::errors::ServiceResult;

/// Persistence port for one entity type.
///
/// Implemented by the outbound persistence adapters; the services never hold
/// persistence state themselves. Lookups return `None` rather than failing
/// when nothing is stored under a key.
#[async_trait]
pub trait StorageProvider<K, E>: Send + Sync + 'static
where
    K: Send + Sync + 'static,
    E: Send + Sync + 'static,
{
    /// Check whether a record is stored under `key`
    async fn exists(&self, key: &K) -> ServiceResult<bool>;

    /// Every stored record; empty when nothing is stored
    async fn get_all(&self) -> ServiceResult<Vec<E>>;

    async fn get(&self, key: &K) -> ServiceResult<Option<E>>;

    /// Insert or replace a record, assigning its key on first save.
    /// Callers are expected to have validated `entity` already.
    async fn save(&self, entity: E) -> ServiceResult<E>;

    /// Remove a record; removing an absent key is not an error
    async fn delete(&self, key: &K) -> ServiceResult<()>;
}
