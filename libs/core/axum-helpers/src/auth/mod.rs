//! Session tokens and the bearer-token guard.
//!
//! ```ignore
//! use axum_helpers::auth::{JwtConfig, TokenService, AccessLifetime};
//! use core_config::FromEnv;
//!
//! let tokens = TokenService::new(JwtConfig::from_env()?);
//! let pair = tokens.issue_pair(&payload, AccessLifetime::Session)?;
//! ```

pub mod config;
pub mod jwt;
pub mod middleware;

pub use config::JwtConfig;
pub use jwt::{
    AccessLifetime, Claims, TokenError, TokenPair, TokenService, issue_token, verify_token,
};
pub use middleware::{NOT_AUTHORIZED, SessionResolver, bearer_auth_middleware, bearer_token};
