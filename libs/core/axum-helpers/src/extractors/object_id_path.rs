use crate::errors::AppError;
use axum::{
    extract::{FromRequestParts, Path},
    http::request::Parts,
};
use mongodb::bson::oid::ObjectId;

/// `{id}` path parameter checked to be a 24-character hex object id.
///
/// The id is kept as its hex string, which is how records are keyed.
///
/// ```ignore
/// async fn get_seller(ObjectIdPath(id): ObjectIdPath) -> String {
///     id
/// }
///
/// let app = Router::new().route("/sellers/{id}", get(get_seller));
/// ```
pub struct ObjectIdPath(pub String);

impl<S> FromRequestParts<S> for ObjectIdPath
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(id) = Path::<String>::from_request_parts(parts, state)
            .await
            .map_err(|e| AppError::BadRequest(e.body_text()))?;

        match ObjectId::parse_str(&id) {
            Ok(oid) => Ok(ObjectIdPath(oid.to_hex())),
            Err(_) => Err(AppError::InvalidObjectId(id)),
        }
    }
}
