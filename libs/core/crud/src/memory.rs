//! In-memory implementation of [`CrudRepository`], for tests and local runs.

use async_trait::async_trait;
use serde_json::Value;
use std::collections::{BTreeMap, HashMap};
use std::marker::PhantomData;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::entity::{CrudEntity, Predicate};
use crate::error::{CrudError, CrudResult};
use crate::query::FindQuery;
use crate::repository::CrudRepository;

type Collection = BTreeMap<String, Value>;

/// Documents of every collection, keyed by collection name then `_id`.
///
/// Repositories built on the same store see each other's records, which is
/// what reference checks and joins need.
#[derive(Clone, Default)]
pub struct InMemoryStore {
    collections: Arc<RwLock<HashMap<String, Collection>>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn repository<E: CrudEntity>(&self) -> InMemoryRepository<E> {
        InMemoryRepository::new(self.clone())
    }

    pub async fn len(&self, collection: &str) -> usize {
        self.collections
            .read()
            .await
            .get(collection)
            .map_or(0, BTreeMap::len)
    }
}

pub struct InMemoryRepository<E> {
    store: InMemoryStore,
    _entity: PhantomData<fn() -> E>,
}

impl<E: CrudEntity> InMemoryRepository<E> {
    pub fn new(store: InMemoryStore) -> Self {
        Self {
            store,
            _entity: PhantomData,
        }
    }

    fn resolve_joins(collections: &HashMap<String, Collection>, mut document: Value) -> Value {
        for join in E::joins() {
            let target = document
                .get(join.field)
                .and_then(Value::as_str)
                .and_then(|id| collections.get(join.from).and_then(|c| c.get(id)))
                .cloned();

            if let (Some(target), Some(object)) = (target, document.as_object_mut()) {
                object.insert(join.field.to_string(), target);
            }
        }
        document
    }
}

fn field<'a>(document: &'a Value, path: &str) -> Option<&'a Value> {
    path.split('.')
        .try_fold(document, |current, segment| current.get(segment))
}

fn matches(document: &Value, predicates: &[Predicate]) -> bool {
    predicates
        .iter()
        .all(|predicate| match field(document, predicate.field) {
            Some(Value::String(value)) => *value == predicate.value,
            Some(other) => other.to_string() == predicate.value,
            None => false,
        })
}

#[async_trait]
impl<E: CrudEntity> CrudRepository<E> for InMemoryRepository<E> {
    async fn find(&self, query: &FindQuery) -> CrudResult<Vec<E>> {
        let collections = self.store.collections.read().await;
        let Some(collection) = collections.get(E::COLLECTION) else {
            return Ok(Vec::new());
        };

        let limit = query.limit.map_or(usize::MAX, |limit| limit as usize);
        collection
            .values()
            .rev()
            .filter(|document| matches(document, &query.predicates))
            .skip(query.skip as usize)
            .take(limit)
            .map(|document| {
                let joined = Self::resolve_joins(&collections, document.clone());
                serde_json::from_value(joined).map_err(CrudError::from)
            })
            .collect()
    }

    async fn get(&self, id: &str) -> CrudResult<Option<E>> {
        let collections = self.store.collections.read().await;
        collections
            .get(E::COLLECTION)
            .and_then(|collection| collection.get(id))
            .map(|document| {
                let joined = Self::resolve_joins(&collections, document.clone());
                serde_json::from_value(joined).map_err(CrudError::from)
            })
            .transpose()
    }

    async fn get_stored(&self, id: &str) -> CrudResult<Option<E>> {
        let collections = self.store.collections.read().await;
        collections
            .get(E::COLLECTION)
            .and_then(|collection| collection.get(id))
            .map(|document| serde_json::from_value(document.clone()).map_err(CrudError::from))
            .transpose()
    }

    async fn insert(&self, entity: &E) -> CrudResult<()> {
        let document = serde_json::to_value(entity)?;
        let mut collections = self.store.collections.write().await;
        let collection = collections.entry(E::COLLECTION.to_string()).or_default();

        if collection.contains_key(entity.id()) {
            return Err(CrudError::Conflict("Duplicate key".to_string()));
        }
        collection.insert(entity.id().to_string(), document);
        Ok(())
    }

    async fn replace(&self, entity: &E) -> CrudResult<bool> {
        let document = serde_json::to_value(entity)?;
        let mut collections = self.store.collections.write().await;

        match collections
            .get_mut(E::COLLECTION)
            .and_then(|collection| collection.get_mut(entity.id()))
        {
            Some(slot) => {
                *slot = document;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn delete(&self, id: &str) -> CrudResult<bool> {
        let mut collections = self.store.collections.write().await;
        Ok(collections
            .get_mut(E::COLLECTION)
            .and_then(|collection| collection.remove(id))
            .is_some())
    }

    async fn exists(&self, collection: &str, id: &str) -> CrudResult<bool> {
        let collections = self.store.collections.read().await;
        Ok(collections
            .get(collection)
            .is_some_and(|documents| documents.contains_key(id)))
    }
}
