//! # Axum Helpers
//!
//! Shared building blocks for the marketplace HTTP services.
//!
//! - **[`errors`]**: [`AppError`] and the JSON error body
//! - **[`extractors`]**: [`ValidatedJson`], [`ValidatedQuery`] and [`ObjectIdPath`]
//! - **[`validation`]**: field rules (email, phone, password, object id)
//! - **[`auth`]**: session tokens and the bearer-token guard
//! - **[`server`]**: router assembly, health checks, graceful shutdown
//! - **[`http`]**: security headers

pub mod auth;
pub mod errors;
pub mod extractors;
pub mod http;
pub mod server;
pub mod validation;

pub use auth::{
    AccessLifetime, JwtConfig, SessionResolver, TokenPair, TokenService, bearer_auth_middleware,
};
pub use errors::{AppError, ErrorCode, ErrorResponse};
pub use extractors::{ObjectIdPath, ValidatedJson, ValidatedQuery};
pub use http::security_headers;
pub use server::{
    HealthCheckFuture, HealthResponse, ShutdownCoordinator, cors_layer_from_env,
    create_production_app, create_router, health_router, run_health_checks, shutdown_signal,
};
