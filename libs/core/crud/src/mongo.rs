//! MongoDB implementation of [`CrudRepository`]

use async_trait::async_trait;
use futures::TryStreamExt;
use mongodb::{
    Collection, Database,
    bson::{self, Document, doc},
};
use std::marker::PhantomData;
use tracing::instrument;

use crate::entity::{CrudEntity, Predicate};
use crate::error::{CrudError, CrudResult};
use crate::query::FindQuery;
use crate::repository::CrudRepository;

/// Stores `E` in the `E::COLLECTION` collection.
///
/// Reads run as an aggregation so that [`CrudEntity::joins`] can be
/// resolved with `$lookup`.
pub struct MongoRepository<E: Send + Sync> {
    db: Database,
    collection: Collection<E>,
    _entity: PhantomData<fn() -> E>,
}

impl<E: CrudEntity> MongoRepository<E> {
    pub fn new(db: &Database) -> Self {
        Self {
            db: db.clone(),
            collection: db.collection::<E>(E::COLLECTION),
            _entity: PhantomData,
        }
    }

    pub fn collection(&self) -> &Collection<E> {
        &self.collection
    }

    fn build_filter(predicates: &[Predicate]) -> Document {
        let mut filter = Document::new();
        for predicate in predicates {
            filter.insert(predicate.field, predicate.value.as_str());
        }
        filter
    }

    /// `$lookup` the referenced document into a scratch field, replace the
    /// id with it when found, then drop the scratch field.
    fn join_stages() -> Vec<Document> {
        let mut stages = Vec::new();

        for join in E::joins() {
            let scratch = format!("__joined_{}", join.field);
            let scratch_ref = format!("${scratch}");
            let field_ref = format!("${}", join.field);

            stages.push(doc! {
                "$lookup": {
                    "from": join.from,
                    "localField": join.field,
                    "foreignField": "_id",
                    "as": scratch.as_str(),
                }
            });

            let mut resolved = Document::new();
            resolved.insert(
                join.field,
                doc! { "$ifNull": [ { "$arrayElemAt": [scratch_ref, 0] }, field_ref ] },
            );
            stages.push(doc! { "$addFields": resolved });

            let mut drop_scratch = Document::new();
            drop_scratch.insert(scratch, 0);
            stages.push(doc! { "$project": drop_scratch });
        }

        stages
    }

    fn build_pipeline(query: &FindQuery) -> CrudResult<Vec<Document>> {
        let mut pipeline = vec![
            doc! { "$match": Self::build_filter(&query.predicates) },
            doc! { "$sort": { "_id": -1 } },
        ];

        if query.skip > 0 {
            pipeline.push(doc! { "$skip": window("skip", query.skip)? });
        }
        if let Some(limit) = query.limit {
            pipeline.push(doc! { "$limit": window("limit", limit)? });
        }

        pipeline.extend(Self::join_stages());
        Ok(pipeline)
    }

    async fn aggregate(&self, pipeline: Vec<Document>) -> CrudResult<Vec<E>> {
        let documents: Vec<Document> = self.collection.aggregate(pipeline).await?.try_collect().await?;

        documents
            .into_iter()
            .map(|document| bson::from_document::<E>(document).map_err(Into::into))
            .collect()
    }
}

/// Pipeline stages take signed 64-bit counts
fn window(stage: &str, value: u64) -> CrudResult<i64> {
    i64::try_from(value).map_err(|_| CrudError::Internal(format!("${stage} of {value} is out of range")))
}

#[async_trait]
impl<E: CrudEntity> CrudRepository<E> for MongoRepository<E> {
    #[instrument(skip(self, query), fields(collection = E::COLLECTION))]
    async fn find(&self, query: &FindQuery) -> CrudResult<Vec<E>> {
        self.aggregate(Self::build_pipeline(query)?).await
    }

    #[instrument(skip(self), fields(collection = E::COLLECTION))]
    async fn get(&self, id: &str) -> CrudResult<Option<E>> {
        let mut pipeline = vec![doc! { "$match": { "_id": id } }, doc! { "$limit": 1 }];
        pipeline.extend(Self::join_stages());

        Ok(self.aggregate(pipeline).await?.into_iter().next())
    }

    #[instrument(skip(self), fields(collection = E::COLLECTION))]
    async fn get_stored(&self, id: &str) -> CrudResult<Option<E>> {
        Ok(self.collection.find_one(doc! { "_id": id }).await?)
    }

    #[instrument(skip(self, entity), fields(collection = E::COLLECTION, id = entity.id()))]
    async fn insert(&self, entity: &E) -> CrudResult<()> {
        self.collection.insert_one(entity).await?;
        Ok(())
    }

    #[instrument(skip(self, entity), fields(collection = E::COLLECTION, id = entity.id()))]
    async fn replace(&self, entity: &E) -> CrudResult<bool> {
        let result = self
            .collection
            .replace_one(doc! { "_id": entity.id() }, entity)
            .await?;
        Ok(result.matched_count > 0)
    }

    #[instrument(skip(self), fields(collection = E::COLLECTION))]
    async fn delete(&self, id: &str) -> CrudResult<bool> {
        let result = self.collection.delete_one(doc! { "_id": id }).await?;
        Ok(result.deleted_count > 0)
    }

    #[instrument(skip(self))]
    async fn exists(&self, collection: &str, id: &str) -> CrudResult<bool> {
        let count = self
            .db
            .collection::<Document>(collection)
            .count_documents(doc! { "_id": id })
            .await?;
        Ok(count > 0)
    }
}
