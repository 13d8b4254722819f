//! Generic HTTP handlers for [`CrudEntity`] resources.

use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    middleware::from_fn_with_state,
    response::IntoResponse,
    routing::{delete, get, post, put},
};
use axum_helpers::{
    ObjectIdPath, SessionResolver, ValidatedJson, ValidatedQuery, bearer_auth_middleware,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use utoipa::ToSchema;

use crate::entity::CrudEntity;
use crate::error::CrudResult;
use crate::query::Pagination;
use crate::service::CrudService;

pub type CrudState<E> = Arc<CrudService<E>>;

/// Body of a successful `DELETE`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Removed {
    #[schema(example = "Seller successfully removed")]
    pub message: String,
}

/// Which routes of a resource need a bearer token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Access {
    /// Reads are public; `POST`, `PUT` and `DELETE` need a session
    ProtectWrites,
    /// Every route needs a session
    ProtectAll,
}

impl Access {
    pub fn protects_reads(self) -> bool {
        matches!(self, Access::ProtectAll)
    }
}

/// Mounts `GET /`, `POST /`, `GET /{id}`, `PUT /{id}` and `DELETE /{id}`.
///
/// The returned router is stateless, so a resource can merge its own extra
/// routes next to these.
pub fn router<E, R>(service: CrudService<E>, guard: Arc<R>, access: Access) -> Router
where
    E: CrudEntity,
    R: SessionResolver,
{
    let auth = from_fn_with_state(guard, bearer_auth_middleware::<R>);

    let (root_reads, item_reads) = if access.protects_reads() {
        (
            get(list::<E>).route_layer(auth.clone()),
            get(get_one::<E>).route_layer(auth.clone()),
        )
    } else {
        (get(list::<E>), get(get_one::<E>))
    };

    let root_writes = post(create::<E>).route_layer(auth.clone());
    let item_writes = put(update::<E>)
        .merge(delete(remove::<E>))
        .route_layer(auth);

    Router::new()
        .route("/", root_reads.merge(root_writes))
        .route("/{id}", item_reads.merge(item_writes))
        .with_state(Arc::new(service))
}

async fn list<E: CrudEntity>(
    State(service): State<CrudState<E>>,
    ValidatedQuery(pagination): ValidatedQuery<Pagination>,
    ValidatedQuery(filter): ValidatedQuery<E::Filter>,
) -> CrudResult<Json<Vec<E>>> {
    let records = service.list(pagination, &filter).await?;
    Ok(Json(records))
}

async fn get_one<E: CrudEntity>(
    State(service): State<CrudState<E>>,
    ObjectIdPath(id): ObjectIdPath,
) -> CrudResult<Json<E>> {
    let record = service.get(&id).await?;
    Ok(Json(record))
}

async fn create<E: CrudEntity>(
    State(service): State<CrudState<E>>,
    ValidatedJson(input): ValidatedJson<E::Create>,
) -> CrudResult<impl IntoResponse> {
    let record = service.create(input).await?;
    Ok((StatusCode::CREATED, Json(record)))
}

async fn update<E: CrudEntity>(
    State(service): State<CrudState<E>>,
    ObjectIdPath(id): ObjectIdPath,
    ValidatedJson(input): ValidatedJson<E::Update>,
) -> CrudResult<Json<E>> {
    let record = service.update(&id, input).await?;
    Ok(Json(record))
}

async fn remove<E: CrudEntity>(
    State(service): State<CrudState<E>>,
    ObjectIdPath(id): ObjectIdPath,
) -> CrudResult<Json<Removed>> {
    let message = service.remove(&id).await?;
    Ok(Json(Removed { message }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::InMemoryStore;
    use crate::testing::{Gadget, Shop, shop};
    use crate::CrudRepository;
    use async_trait::async_trait;
    use axum::{body::Body, http::Request};
    use axum_helpers::AppError;
    use http_body_util::BodyExt;
    use serde_json::{Value, json};
    use tower::ServiceExt;

    struct StaticGuard;

    #[async_trait]
    impl SessionResolver for StaticGuard {
        type Principal = String;

        async fn resolve(&self, token: &str) -> Result<String, AppError> {
            if token == "valid" {
                Ok("user".to_string())
            } else {
                Err(AppError::Unauthorized("Not authorized".to_string()))
            }
        }
    }

    fn app(store: &InMemoryStore, access: Access) -> Router {
        let shops = router(
            CrudService::new(store.repository::<Shop>()),
            Arc::new(StaticGuard),
            access,
        );
        let gadgets = router(
            CrudService::new(store.repository::<Gadget>()),
            Arc::new(StaticGuard),
            access,
        );
        Router::new().nest("/shops", shops).nest("/gadgets", gadgets)
    }

    async fn send(
        app: Router,
        method: &str,
        uri: &str,
        body: Option<Value>,
        token: Option<&str>,
    ) -> (StatusCode, Value) {
        let mut request = Request::builder().method(method).uri(uri);
        if let Some(token) = token {
            request = request.header("authorization", format!("Bearer {token}"));
        }
        let body = match body {
            Some(json) => {
                request = request.header("content-type", "application/json");
                Body::from(json.to_string())
            }
            None => Body::empty(),
        };

        let response = app.oneshot(request.body(body).unwrap()).await.unwrap();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        (status, serde_json::from_slice(&bytes).unwrap_or(Value::Null))
    }

    #[tokio::test]
    async fn test_reads_are_public_with_protected_writes() {
        let store = InMemoryStore::new();
        let record = shop("corner");
        store.repository::<Shop>().insert(&record).await.unwrap();

        let (status, body) = send(app(&store, Access::ProtectWrites), "GET", "/shops", None, None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body[0]["_id"], record.id);

        let uri = format!("/shops/{}", record.id);
        let (status, body) = send(app(&store, Access::ProtectWrites), "GET", &uri, None, None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["name"], "corner");
    }

    #[tokio::test]
    async fn test_writes_need_a_session() {
        let store = InMemoryStore::new();
        let payload = json!({ "name": "corner" });

        let (status, body) = send(
            app(&store, Access::ProtectWrites),
            "POST",
            "/shops",
            Some(payload.clone()),
            None,
        )
        .await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body["message"], "Not authorized");

        let (status, body) = send(
            app(&store, Access::ProtectWrites),
            "POST",
            "/shops",
            Some(payload),
            Some("valid"),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(body["name"], "corner");
        assert!(body["createdAt"].is_string());
    }

    #[tokio::test]
    async fn test_protect_all_guards_reads() {
        let store = InMemoryStore::new();
        let (status, _) = send(app(&store, Access::ProtectAll), "GET", "/shops", None, None).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);

        let (status, body) =
            send(app(&store, Access::ProtectAll), "GET", "/shops", None, Some("valid")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!([]));
    }

    #[tokio::test]
    async fn test_list_pages_and_filters() {
        let store = InMemoryStore::new();
        let owner = shop("corner");
        store.repository::<Shop>().insert(&owner).await.unwrap();
        for name in ["lamp", "desk", "sofa"] {
            let payload = json!({ "name": name, "shop": owner.id });
            send(app(&store, Access::ProtectWrites), "POST", "/gadgets", Some(payload), Some("valid")).await;
        }

        let uri = format!("/gadgets?shop={}&page=2&limit=2", owner.id);
        let (status, body) = send(app(&store, Access::ProtectWrites), "GET", &uri, None, None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body.as_array().map(Vec::len), Some(1));
        assert_eq!(body[0]["name"], "lamp");
        assert_eq!(body[0]["shop"]["name"], "corner");

        let uri = "/gadgets?shop=64b7f0c2a1b2c3d4e5f60718";
        let (_, body) = send(app(&store, Access::ProtectWrites), "GET", uri, None, None).await;
        assert_eq!(body, json!([]));
    }

    #[tokio::test]
    async fn test_bad_pagination_is_rejected() {
        let store = InMemoryStore::new();
        let (status, _) =
            send(app(&store, Access::ProtectWrites), "GET", "/shops?page=0", None, None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let (status, _) =
            send(app(&store, Access::ProtectWrites), "GET", "/shops?limit=abc", None, None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let uri = "/shops?page=18446744073709551615&limit=100";
        let (status, body) = send(app(&store, Access::ProtectWrites), "GET", uri, None, None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["message"], "\"page\" must be between 1 and 1000000");
    }

    #[tokio::test]
    async fn test_not_found_and_invalid_id() {
        let store = InMemoryStore::new();
        let uri = "/shops/64b7f0c2a1b2c3d4e5f60718";

        let (status, body) = send(app(&store, Access::ProtectWrites), "GET", uri, None, None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["message"], "Shop with id 64b7f0c2a1b2c3d4e5f60718 not found");

        let (status, _) =
            send(app(&store, Access::ProtectWrites), "DELETE", uri, None, Some("valid")).await;
        assert_eq!(status, StatusCode::NOT_FOUND);

        let (status, _) =
            send(app(&store, Access::ProtectWrites), "GET", "/shops/42", None, None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_update_and_remove() {
        let store = InMemoryStore::new();
        let record = shop("corner");
        store.repository::<Shop>().insert(&record).await.unwrap();
        let uri = format!("/shops/{}", record.id);

        let (status, body) = send(
            app(&store, Access::ProtectWrites),
            "PUT",
            &uri,
            Some(json!({ "name": "renamed" })),
            Some("valid"),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["name"], "renamed");

        let (status, body) = send(
            app(&store, Access::ProtectWrites),
            "PUT",
            &uri,
            Some(json!({ "name": "ab" })),
            Some("valid"),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["message"], "name must be between 3 and 30 characters");

        let (status, body) =
            send(app(&store, Access::ProtectWrites), "DELETE", &uri, None, Some("valid")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({ "message": "Shop successfully removed" }));
    }

    #[tokio::test]
    async fn test_create_with_unknown_reference() {
        let store = InMemoryStore::new();
        let payload = json!({ "name": "lamp", "shop": "64b7f0c2a1b2c3d4e5f60718" });

        let (status, body) = send(
            app(&store, Access::ProtectWrites),
            "POST",
            "/gadgets",
            Some(payload),
            Some("valid"),
        )
        .await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["message"], "Shop with id 64b7f0c2a1b2c3d4e5f60718 not found");
    }
}
