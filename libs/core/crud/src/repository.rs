use async_trait::async_trait;

use crate::entity::CrudEntity;
use crate::error::CrudResult;
use crate::query::FindQuery;

/// Storage for one entity type.
///
/// `find` and `get` return records with [`CrudEntity::joins`] resolved;
/// `get_stored` returns the record as written, ready to be modified and
/// passed back to `replace`.
#[async_trait]
pub trait CrudRepository<E: CrudEntity>: Send + Sync + 'static {
    async fn find(&self, query: &FindQuery) -> CrudResult<Vec<E>>;

    async fn get(&self, id: &str) -> CrudResult<Option<E>>;

    async fn get_stored(&self, id: &str) -> CrudResult<Option<E>>;

    async fn insert(&self, entity: &E) -> CrudResult<()>;

    /// `false` when no record has the entity's id
    async fn replace(&self, entity: &E) -> CrudResult<bool>;

    /// `false` when nothing was deleted
    async fn delete(&self, id: &str) -> CrudResult<bool>;

    /// Whether `collection` holds a record with this id
    async fn exists(&self, collection: &str, id: &str) -> CrudResult<bool>;
}
