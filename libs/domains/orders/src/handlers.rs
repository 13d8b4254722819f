//! HTTP surface for orders: the generic CRUD routes plus the status
//! transition, all behind a session.

use axum::{
    Json, Router,
    extract::State,
    middleware::from_fn_with_state,
    routing::patch,
};
use axum_helpers::{
    ObjectIdPath, SessionResolver, ValidatedJson, bearer_auth_middleware,
    errors::responses::{
        BadRequestObjectIdResponse, BadRequestValidationResponse, InternalServerErrorResponse,
        NotFoundResponse, UnauthorizedResponse,
    },
};
use crud::{Access, CrudPaths, CrudService, CrudState};
use std::sync::Arc;
use utoipa::OpenApi;

use crate::error::OrderResult;
use crate::models::{Client, Order, OrderItem, OrderStatus, StatusUpdate};

pub const ACCESS: Access = Access::ProtectAll;

const PATHS: CrudPaths<Order> = CrudPaths::new(ACCESS);

/// OpenAPI documentation for the Orders API
#[derive(OpenApi)]
#[openapi(
    paths(update_status),
    components(
        schemas(Client, OrderItem, OrderStatus, StatusUpdate),
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
        (name = "Orders", description = "Orders placed with sellers")
    )
)]
pub struct ApiDoc;

/// Create the orders router
pub fn router<R: SessionResolver>(service: CrudService<Order>, guard: Arc<R>) -> Router {
    let transitions = Router::new()
        .route("/{id}/status", patch(update_status))
        .route_layer(from_fn_with_state(
            Arc::clone(&guard),
            bearer_auth_middleware::<R>,
        ))
        .with_state(Arc::new(service.clone()));

    crud::router(service, guard, ACCESS).merge(transitions)
}

/// Move an order to another status
#[utoipa::path(
    patch,
    path = "/{id}/status",
    tag = "Orders",
    params(
        ("id" = String, Path, description = "Order id (24 hex characters)")
    ),
    request_body = StatusUpdate,
    responses(
        (status = 200, description = "Status updated", body = Order),
        (status = 400, response = BadRequestValidationResponse),
        (status = 401, response = UnauthorizedResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    ),
    security(("bearer_auth" = []))
)]
async fn update_status(
    State(service): State<CrudState<Order>>,
    ObjectIdPath(id): ObjectIdPath,
    ValidatedJson(input): ValidatedJson<StatusUpdate>,
) -> OrderResult<Json<Order>> {
    let order = service
        .modify(&id, move |order| order.status = input.status)
        .await?;
    tracing::info!(order_id = %order.id, status = %order.status, "Order status changed");
    Ok(Json(order))
}
