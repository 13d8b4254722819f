use chrono::{DateTime, Utc};
use core_proc_macros::ApiResource;
use serde::{Deserialize, Serialize, de::DeserializeOwned};
use std::borrow::Cow;
use utoipa::openapi::schema::{ObjectBuilder, OneOfBuilder, Ref, Schema, Type};
use utoipa::openapi::RefOr;
use utoipa::ToSchema;
use utoipa::__dev::ComposeSchema;
use validator::{Validate, ValidationErrors};

/// A record type the generic CRUD layer can store, list and serve.
///
/// `_id` is a 24-character hex object id held as a string. Object ids are
/// time-ordered, so listing by `_id` descending yields newest first.
pub trait CrudEntity:
    ApiResource + ToSchema + Serialize + DeserializeOwned + Clone + Send + Sync + Unpin + 'static
{
    /// Body accepted by `POST`
    type Create: DeserializeOwned + Validate + ToSchema + Send + 'static;
    /// Body accepted by `PUT`
    type Update: DeserializeOwned + Validate + ToSchema + Send + 'static;
    /// Equality filters accepted by `GET /`
    type Filter: ListFilter;

    fn from_create(id: String, input: Self::Create, now: DateTime<Utc>) -> Self;

    fn apply_update(&mut self, input: Self::Update);

    fn id(&self) -> &str;

    /// Sets `updatedAt`
    fn touch(&mut self, now: DateTime<Utc>);

    /// Fields replaced by the referenced document on read.
    fn joins() -> &'static [Join] {
        &[]
    }

    /// Records this one points at; each must exist before a write.
    fn references(&self) -> Vec<ForeignKey> {
        Vec::new()
    }
}

/// A top-level field holding the id of a document in another collection.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Join {
    pub field: &'static str,
    pub from: &'static str,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ForeignKey {
    pub collection: &'static str,
    pub label: &'static str,
    pub id: String,
}

/// One equality predicate; dotted fields address nested documents
/// (`client._id`).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Predicate {
    pub field: &'static str,
    pub value: String,
}

impl Predicate {
    pub fn new(field: &'static str, value: impl Into<String>) -> Self {
        Self {
            field,
            value: value.into(),
        }
    }
}

/// Query-string filter for list endpoints.
pub trait ListFilter: DeserializeOwned + Validate + Default + Send + Sync + 'static {
    /// Query parameters, for documentation
    const PARAMS: &'static [&'static str] = &[];

    fn predicates(&self) -> Vec<Predicate>;
}

/// Filter for resources listed without one.
#[derive(Clone, Copy, Debug, Default, Deserialize)]
pub struct NoFilter {}

impl Validate for NoFilter {
    fn validate(&self) -> Result<(), ValidationErrors> {
        Ok(())
    }
}

impl ListFilter for NoFilter {
    fn predicates(&self) -> Vec<Predicate> {
        Vec::new()
    }
}

/// A reference field: the stored id, or the referenced document once a
/// read has joined it in.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Reference<T> {
    Id(String),
    Resolved(Box<T>),
}

impl<T> Reference<T> {
    pub fn resolved(&self) -> Option<&T> {
        match self {
            Reference::Id(_) => None,
            Reference::Resolved(value) => Some(&**value),
        }
    }
}

impl<T: CrudEntity> Reference<T> {
    pub fn id(&self) -> &str {
        match self {
            Reference::Id(id) => id,
            Reference::Resolved(value) => value.id(),
        }
    }

    /// Back to the stored form.
    pub fn detach(self) -> Self {
        match self {
            Reference::Id(_) => self,
            Reference::Resolved(value) => Reference::Id(value.id().to_string()),
        }
    }
}

impl<T: ToSchema> ComposeSchema for Reference<T> {
    fn compose(_generics: Vec<RefOr<Schema>>) -> RefOr<Schema> {
        let id = ObjectBuilder::new()
            .schema_type(Type::String)
            .description(Some("Object id of the referenced record"))
            .build();
        RefOr::T(Schema::OneOf(
            OneOfBuilder::new()
                .item(RefOr::T(Schema::Object(id)))
                .item(RefOr::Ref(Ref::from_schema_name(T::name())))
                .build(),
        ))
    }
}

impl<T: ToSchema> ToSchema for Reference<T> {
    fn name() -> Cow<'static, str> {
        Cow::Owned(format!("{}Ref", T::name()))
    }

    fn schemas(schemas: &mut Vec<(String, RefOr<Schema>)>) {
        schemas.push((T::name().into_owned(), T::schema()));
        T::schemas(schemas);
    }
}

impl<T> From<String> for Reference<T> {
    fn from(id: String) -> Self {
        Reference::Id(id)
    }
}
