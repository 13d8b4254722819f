//! HTTP surface for sellers

use axum::Router;
use axum_helpers::{
    SessionResolver,
    errors::responses::{
        BadRequestObjectIdResponse, BadRequestValidationResponse, InternalServerErrorResponse,
        NotFoundResponse, UnauthorizedResponse,
    },
};
use crud::{Access, CrudPaths, CrudService};
use std::sync::Arc;
use utoipa::OpenApi;

use crate::models::{Hours, Seller};

pub const ACCESS: Access = Access::ProtectWrites;

const PATHS: CrudPaths<Seller> = CrudPaths::new(ACCESS);

/// OpenAPI documentation for the Sellers API
#[derive(OpenApi)]
#[openapi(
    components(
        schemas(Hours),
        responses(
            NotFoundResponse,
            BadRequestValidationResponse,
            BadRequestObjectIdResponse,
            UnauthorizedResponse,
            InternalServerErrorResponse
        )
    ),
    modifiers(&PATHS),
    tags(
        (name = "Sellers", description = "Shops that publish offers")
    )
)]
pub struct ApiDoc;

/// Create the sellers router
pub fn router<R: SessionResolver>(service: CrudService<Seller>, guard: Arc<R>) -> Router {
    crud::router(service, guard, ACCESS)
}
