use crate::errors::AppError;
use async_trait::async_trait;
use axum::{
    extract::{Request, State},
    http::{HeaderMap, header::AUTHORIZATION},
    middleware::Next,
    response::Response,
};
use std::sync::Arc;

pub const NOT_AUTHORIZED: &str = "Not authorized";

/// Turns a presented access token into the caller's identity.
///
/// Implementations decide what makes a session live (signature, expiry,
/// whether the token is still the one on file).
#[async_trait]
pub trait SessionResolver: Send + Sync + 'static {
    type Principal: Clone + Send + Sync + 'static;

    async fn resolve(&self, token: &str) -> Result<Self::Principal, AppError>;
}

/// Token from an `Authorization: Bearer <token>` header.
pub fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "))
        .map(str::trim)
        .filter(|token| !token.is_empty())
}

/// Rejects with 401 unless the bearer token resolves; on success the
/// principal is inserted into the request extensions.
///
/// ```ignore
/// let protected = Router::new()
///     .route("/current", get(current))
///     .route_layer(axum::middleware::from_fn_with_state(
///         guard.clone(),
///         bearer_auth_middleware::<SessionGuard>,
///     ));
/// ```
pub async fn bearer_auth_middleware<R: SessionResolver>(
    State(resolver): State<Arc<R>>,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let Some(token) = bearer_token(request.headers()) else {
        tracing::debug!("Missing bearer token");
        return Err(AppError::Unauthorized(NOT_AUTHORIZED.to_string()));
    };

    let principal = resolver.resolve(token).await?;

    request.extensions_mut().insert(principal);
    Ok(next.run(request).await)
}
