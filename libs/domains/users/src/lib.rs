//! Users Domain
//!
//! Registration with email verification, password sign-in and
//! server-side sessions.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────┐
//! │  Handlers   │  ← HTTP endpoints, multipart avatar upload
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │ AuthService │  ← bcrypt, token issue, verification mail
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │ Repository  │  ← Data access (trait + MongoDB / in-memory)
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │   Models    │  ← User record, profiles, request bodies
//! └─────────────┘
//! ```
//!
//! Both tokens of the current session are stored on the user record. The
//! [`SessionGuard`] only accepts the access token on file, so logout ends
//! a session immediately.
//!
//! # Usage
//!
//! ```rust,ignore
//! use domain_users::{AuthService, MongoUserRepository, handlers};
//!
//! let users = MongoUserRepository::new(&db);
//! users.ensure_indexes().await?;
//!
//! let service = AuthService::new(users, tokens, mailer, orders, avatars);
//! let guard = service.guard();
//! let router = handlers::router(service);
//! ```

pub mod avatar;
pub mod error;
pub mod handlers;
pub mod history;
pub mod models;
pub mod mongo;
pub mod password;
pub mod repository;
pub mod service;
pub mod session;

pub use avatar::{AvatarConfig, AvatarStore, AvatarUpload, LocalAvatarStore};
pub use error::{UserError, UserResult};
pub use handlers::{ApiDoc, router};
pub use history::OrderHistory;
pub use models::{Profile, RegisterUser, SessionUser, User};
pub use mongo::MongoUserRepository;
pub use repository::{InMemoryUserRepository, UserRepository};
pub use service::AuthService;
pub use session::SessionGuard;
