//! HTTP surface for offers

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

use crate::models::Offer;

pub const ACCESS: Access = Access::ProtectWrites;

const PATHS: CrudPaths<Offer> = CrudPaths::new(ACCESS);

/// OpenAPI documentation for the Offers API
#[derive(OpenApi)]
#[openapi(
    components(
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
        (name = "Offers", description = "Products offered by sellers")
    )
)]
pub struct ApiDoc;

pub fn router<R: SessionResolver>(service: CrudService<Offer>, guard: Arc<R>) -> Router {
    crud::router(service, guard, ACCESS)
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use axum::{
        body::Body,
        http::{Request, StatusCode},
    };
    use axum_helpers::AppError;
    use crud::{CrudRepository, InMemoryStore};
    use domain_sellers::{Seller, SellerInput};
    use http_body_util::BodyExt;
    use serde_json::{Value, json};
    use tower::ServiceExt;

    struct AnyBearer;

    #[async_trait]
    impl SessionResolver for AnyBearer {
        type Principal = ();

        async fn resolve(&self, token: &str) -> Result<(), AppError> {
            match token {
                "session" => Ok(()),
                _ => Err(AppError::Unauthorized("Not authorized".to_string())),
            }
        }
    }

    async fn seed_seller(store: &InMemoryStore) -> Seller {
        use crud::CrudEntity;

        let seller = Seller::from_create(
            "65f0c1d2e3a4b5c6d7e8f901".to_string(),
            SellerInput {
                name: "Corner Shop".to_string(),
                email: "corner@mail.com".to_string(),
                phone: "+380671234567".to_string(),
                address: "12 Market Street".to_string(),
                plus_code: None,
                web: None,
                hours: None,
            },
            chrono::Utc::now(),
        );
        store.repository::<Seller>().insert(&seller).await.unwrap();
        seller
    }

    async fn send(store: &InMemoryStore, request: Request<Body>) -> (StatusCode, Value) {
        let app = router(CrudService::new(store.repository::<Offer>()), Arc::new(AnyBearer));
        let response = app.oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        (status, serde_json::from_slice(&bytes).unwrap_or(Value::Null))
    }

    fn create(seller: &str) -> Request<Body> {
        let body = json!({
            "name": "Espresso",
            "image": "https://img.example.com/espresso.png",
            "desc": "Double shot, freshly ground",
            "price": 2.5,
            "seller": seller,
        });
        Request::post("/")
            .header("content-type", "application/json")
            .header("authorization", "Bearer session")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    #[tokio::test]
    async fn test_create_joins_seller() {
        let store = InMemoryStore::new();
        let seller = seed_seller(&store).await;

        let (status, body) = send(&store, create(&seller.id)).await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(body["seller"]["_id"], seller.id);
        assert_eq!(body["seller"]["name"], "Corner Shop");
    }

    #[tokio::test]
    async fn test_create_with_unknown_seller() {
        let store = InMemoryStore::new();

        let (status, body) = send(&store, create("65f0c1d2e3a4b5c6d7e8f999")).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["message"], "Seller with id 65f0c1d2e3a4b5c6d7e8f999 not found");
    }

    #[tokio::test]
    async fn test_list_by_seller() {
        let store = InMemoryStore::new();
        let seller = seed_seller(&store).await;
        send(&store, create(&seller.id)).await;

        let uri = format!("/?seller={}", seller.id);
        let (status, body) = send(&store, Request::get(uri).body(Body::empty()).unwrap()).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body.as_array().map(Vec::len), Some(1));

        let (_, body) = send(
            &store,
            Request::get("/?seller=65f0c1d2e3a4b5c6d7e8f999")
                .body(Body::empty())
                .unwrap(),
        )
        .await;
        assert_eq!(body, json!([]));

        let (status, _) = send(
            &store,
            Request::get("/?seller=bogus").body(Body::empty()).unwrap(),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }
}
