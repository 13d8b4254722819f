//! Generic CRUD over document collections.
//!
//! A resource implements [`CrudEntity`] once and gets:
//!
//! - storage through [`CrudRepository`], backed by MongoDB
//!   ([`MongoRepository`]) or a shared in-memory map ([`InMemoryRepository`])
//! - [`CrudService`]: id generation, reference checks, not-found handling
//!   and an optional after-create hook
//! - generic axum handlers mounted by [`router`]
//! - OpenAPI paths via [`CrudPaths`]
//!
//! ```ignore
//! let service = CrudService::new(MongoRepository::<Seller>::new(&db));
//! let routes = crud::router(service, guard, Access::ProtectWrites);
//! ```
//!
//! Reads resolve the references an entity declares in
//! [`CrudEntity::joins`]: the referenced document replaces the stored id,
//! which is why those fields are typed as [`Reference`].

pub mod entity;
pub mod error;
pub mod handlers;
pub mod memory;
pub mod mongo;
pub mod openapi;
pub mod query;
pub mod repository;
pub mod service;

#[cfg(test)]
mod testing;

pub use entity::{CrudEntity, ForeignKey, Join, ListFilter, NoFilter, Predicate, Reference};
pub use error::{CrudError, CrudResult};
pub use handlers::{Access, CrudState, Removed, router};
pub use memory::{InMemoryRepository, InMemoryStore};
pub use mongo::MongoRepository;
pub use openapi::{BEARER_AUTH, CrudPaths};
pub use query::{FindQuery, Pagination};
pub use repository::CrudRepository;
pub use service::{CreateHook, CrudService};
