//! OpenAPI paths for the generic routes.
//!
//! `#[utoipa::path]` cannot describe a generic handler, so the operations
//! are built here and added to a resource's document with
//! `#[openapi(modifiers(&CrudPaths::<Seller>::new(Access::ProtectWrites)))]`.
//! Paths are relative (`""`, `"/{id}"`); the app nests the document under
//! `/api/<resource>`.

use std::marker::PhantomData;
use utoipa::openapi::{
    OpenApi, RefOr, Required,
    content::ContentBuilder,
    path::{
        HttpMethod, Operation, OperationBuilder, Parameter, ParameterBuilder, ParameterIn,
        PathItemBuilder,
    },
    request_body::{RequestBody, RequestBodyBuilder},
    response::{Response, ResponseBuilder},
    schema::{Array, ObjectBuilder, Ref, Schema, Type},
    security::SecurityRequirement,
};
use utoipa::{IntoParams, Modify, PartialSchema, ToSchema};

use crate::entity::{CrudEntity, ListFilter};
use crate::handlers::{Access, Removed};
use crate::query::Pagination;

/// Security scheme name the app registers for bearer tokens.
pub const BEARER_AUTH: &str = "bearer_auth";

const JSON: &str = "application/json";

fn string_schema() -> RefOr<Schema> {
    RefOr::T(Schema::Object(
        ObjectBuilder::new().schema_type(Type::String).build(),
    ))
}

pub struct CrudPaths<E> {
    access: Access,
    _entity: PhantomData<fn() -> E>,
}

impl<E: CrudEntity> CrudPaths<E> {
    pub const fn new(access: Access) -> Self {
        Self {
            access,
            _entity: PhantomData,
        }
    }

    fn operation(name: &str, summary: String) -> OperationBuilder {
        OperationBuilder::new()
            .tag(E::TAG)
            .operation_id(Some(format!("{name}_{}", E::COLLECTION)))
            .summary(Some(summary))
    }

    fn json_response(description: &str, schema: RefOr<Schema>) -> RefOr<Response> {
        RefOr::T(
            ResponseBuilder::new()
                .description(description)
                .content(JSON, ContentBuilder::new().schema(Some(schema)).build())
                .build(),
        )
    }

    fn shared(name: &str) -> RefOr<Response> {
        RefOr::Ref(Ref::from_response_name(name))
    }

    fn schema_ref<T: ToSchema>() -> RefOr<Schema> {
        RefOr::Ref(Ref::from_schema_name(T::name()))
    }

    fn id_param() -> Parameter {
        ParameterBuilder::new()
            .name("id")
            .parameter_in(ParameterIn::Path)
            .required(Required::True)
            .description(Some(format!("{} id (24 hex characters)", E::LABEL)))
            .schema(Some(string_schema()))
            .build()
    }

    fn body<T: ToSchema>() -> RequestBody {
        RequestBodyBuilder::new()
            .content(JSON, ContentBuilder::new().schema(Some(Self::schema_ref::<T>())).build())
            .required(Some(Required::True))
            .build()
    }

    fn secured(&self, builder: OperationBuilder, protected: bool) -> Operation {
        let builder = if protected {
            builder
                .security(SecurityRequirement::new(BEARER_AUTH, Vec::<String>::new()))
                .response("401", Self::shared("UnauthorizedResponse"))
        } else {
            builder
        };
        builder
            .response("500", Self::shared("InternalServerErrorResponse"))
            .build()
    }

    fn list(&self) -> Operation {
        let mut builder = Self::operation("list", format!("List {}", E::COLLECTION))
            .description(Some("Newest first, one page at a time"));

        for param in Pagination::into_params(|| Some(ParameterIn::Query)) {
            builder = builder.parameter(param);
        }
        for name in <E::Filter as ListFilter>::PARAMS {
            builder = builder.parameter(
                ParameterBuilder::new()
                    .name(*name)
                    .parameter_in(ParameterIn::Query)
                    .required(Required::False)
                    .schema(Some(string_schema()))
                    .build(),
            );
        }

        let records = RefOr::T(Schema::Array(Array::new(Self::schema_ref::<E>())));
        let builder = builder
            .response("200", Self::json_response("One page of records", records))
            .response("400", Self::shared("BadRequestValidationResponse"));
        self.secured(builder, self.access.protects_reads())
    }

    fn get(&self) -> Operation {
        let builder = Self::operation("get", format!("Get a {} by id", E::LABEL.to_lowercase()))
            .parameter(Self::id_param())
            .response("200", Self::json_response("Record found", Self::schema_ref::<E>()))
            .response("400", Self::shared("BadRequestObjectIdResponse"))
            .response("404", Self::shared("NotFoundResponse"));
        self.secured(builder, self.access.protects_reads())
    }

    fn create(&self) -> Operation {
        let builder = Self::operation("create", format!("Create a {}", E::LABEL.to_lowercase()))
            .request_body(Some(Self::body::<E::Create>()))
            .response("201", Self::json_response("Record created", Self::schema_ref::<E>()))
            .response("400", Self::shared("BadRequestValidationResponse"))
            .response("404", Self::shared("NotFoundResponse"));
        self.secured(builder, true)
    }

    fn update(&self) -> Operation {
        let builder = Self::operation("update", format!("Update a {}", E::LABEL.to_lowercase()))
            .parameter(Self::id_param())
            .request_body(Some(Self::body::<E::Update>()))
            .response("200", Self::json_response("Record updated", Self::schema_ref::<E>()))
            .response("400", Self::shared("BadRequestValidationResponse"))
            .response("404", Self::shared("NotFoundResponse"));
        self.secured(builder, true)
    }

    fn remove(&self) -> Operation {
        let builder = Self::operation("remove", format!("Remove a {}", E::LABEL.to_lowercase()))
            .parameter(Self::id_param())
            .response("200", Self::json_response("Record removed", Self::schema_ref::<Removed>()))
            .response("400", Self::shared("BadRequestObjectIdResponse"))
            .response("404", Self::shared("NotFoundResponse"));
        self.secured(builder, true)
    }
}

impl<E: CrudEntity> Modify for CrudPaths<E> {
    fn modify(&self, openapi: &mut OpenApi) {
        let collection = PathItemBuilder::new()
            .operation(HttpMethod::Get, self.list())
            .operation(HttpMethod::Post, self.create())
            .build();
        let item = PathItemBuilder::new()
            .operation(HttpMethod::Get, self.get())
            .operation(HttpMethod::Put, self.update())
            .operation(HttpMethod::Delete, self.remove())
            .build();

        openapi.paths.paths.insert(String::new(), collection);
        openapi.paths.paths.insert("/{id}".to_string(), item);

        let mut schemas = Vec::new();
        <E as ToSchema>::schemas(&mut schemas);
        <E::Create as ToSchema>::schemas(&mut schemas);
        <E::Update as ToSchema>::schemas(&mut schemas);
        schemas.push((<E as ToSchema>::name().into_owned(), E::schema()));
        schemas.push((
            <E::Create as ToSchema>::name().into_owned(),
            <E::Create as PartialSchema>::schema(),
        ));
        schemas.push((
            <E::Update as ToSchema>::name().into_owned(),
            <E::Update as PartialSchema>::schema(),
        ));
        schemas.push((<Removed as ToSchema>::name().into_owned(), Removed::schema()));

        let components = openapi.components.get_or_insert_with(Default::default);
        for (name, schema) in schemas {
            components.schemas.entry(name).or_insert(schema);
        }
    }
}
