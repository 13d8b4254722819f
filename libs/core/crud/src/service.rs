use async_trait::async_trait;
use chrono::Utc;
use mongodb::bson::oid::ObjectId;
use std::sync::Arc;
use tracing::instrument;
use validator::Validate;

use crate::entity::{CrudEntity, ListFilter, Predicate};
use crate::error::{CrudError, CrudResult};
use crate::query::{FindQuery, Pagination};
use crate::repository::CrudRepository;

/// Runs after a record has been stored.
///
/// A failing hook fails the request, but the record stays stored.
#[async_trait]
pub trait CreateHook<E: CrudEntity>: Send + Sync + 'static {
    async fn after_create(&self, entity: &E) -> CrudResult<()>;
}

/// Business rules shared by every CRUD resource.
pub struct CrudService<E: CrudEntity> {
    repository: Arc<dyn CrudRepository<E>>,
    on_create: Option<Arc<dyn CreateHook<E>>>,
}

impl<E: CrudEntity> Clone for CrudService<E> {
    fn clone(&self) -> Self {
        Self {
            repository: Arc::clone(&self.repository),
            on_create: self.on_create.clone(),
        }
    }
}

impl<E: CrudEntity> CrudService<E> {
    pub fn new(repository: impl CrudRepository<E>) -> Self {
        Self {
            repository: Arc::new(repository),
            on_create: None,
        }
    }

    pub fn with_create_hook(mut self, hook: impl CreateHook<E>) -> Self {
        self.on_create = Some(Arc::new(hook));
        self
    }

    #[instrument(skip(self, filter), fields(collection = E::COLLECTION))]
    pub async fn list(&self, pagination: Pagination, filter: &E::Filter) -> CrudResult<Vec<E>> {
        self.repository
            .find(&FindQuery::page(filter.predicates(), pagination))
            .await
    }

    /// Every match, newest first, without a page window.
    pub async fn find_all(&self, predicates: Vec<Predicate>) -> CrudResult<Vec<E>> {
        self.repository.find(&FindQuery::all(predicates)).await
    }

    #[instrument(skip(self), fields(collection = E::COLLECTION))]
    pub async fn get(&self, id: &str) -> CrudResult<E> {
        self.repository
            .get(id)
            .await?
            .ok_or_else(|| CrudError::not_found(E::LABEL, id))
    }

    #[instrument(skip(self, input), fields(collection = E::COLLECTION))]
    pub async fn create(&self, input: E::Create) -> CrudResult<E> {
        input.validate()?;

        let entity = E::from_create(ObjectId::new().to_hex(), input, Utc::now());
        self.check_references(&entity).await?;
        self.repository.insert(&entity).await?;
        tracing::info!(id = entity.id(), "{} created", E::LABEL);

        let created = self.get(entity.id()).await?;
        if let Some(hook) = &self.on_create {
            hook.after_create(&created).await?;
        }
        Ok(created)
    }

    #[instrument(skip(self, input), fields(collection = E::COLLECTION))]
    pub async fn update(&self, id: &str, input: E::Update) -> CrudResult<E> {
        input.validate()?;
        self.write(id, move |entity| entity.apply_update(input), true).await
    }

    /// Loads the stored record, applies `change`, refreshes `updatedAt` and
    /// writes it back. Returns the record as a read would.
    ///
    /// Unlike [`update`](Self::update), references are not re-checked.
    pub async fn modify<F>(&self, id: &str, change: F) -> CrudResult<E>
    where
        F: FnOnce(&mut E) + Send,
    {
        self.write(id, change, false).await
    }

    async fn write<F>(&self, id: &str, change: F, check_references: bool) -> CrudResult<E>
    where
        F: FnOnce(&mut E) + Send,
    {
        let mut entity = self
            .repository
            .get_stored(id)
            .await?
            .ok_or_else(|| CrudError::not_found(E::LABEL, id))?;

        change(&mut entity);
        entity.touch(Utc::now());
        if check_references {
            self.check_references(&entity).await?;
        }

        if !self.repository.replace(&entity).await? {
            return Err(CrudError::not_found(E::LABEL, id));
        }
        self.get(id).await
    }

    #[instrument(skip(self), fields(collection = E::COLLECTION))]
    pub async fn remove(&self, id: &str) -> CrudResult<String> {
        if !self.repository.delete(id).await? {
            return Err(CrudError::not_found(E::LABEL, id));
        }
        tracing::info!(id, "{} removed", E::LABEL);
        Ok(format!("{} successfully removed", E::LABEL))
    }

    async fn check_references(&self, entity: &E) -> CrudResult<()> {
        for reference in entity.references() {
            if !self
                .repository
                .exists(reference.collection, &reference.id)
                .await?
            {
                return Err(CrudError::not_found(reference.label, reference.id));
            }
        }
        Ok(())
    }
}
