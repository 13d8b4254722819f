//! Sellers Domain
//!
//! Sellers are plain CRUD records: reads are public, writes need a session.
//! Offers and orders reference a seller by id and get it joined in on read.
//!
//! ```rust,ignore
//! let service = CrudService::new(MongoRepository::<Seller>::new(&db));
//! let routes = domain_sellers::router(service, guard);
//! ```

pub mod handlers;
pub mod models;

pub use handlers::{ACCESS, ApiDoc, router};
pub use models::{Hours, Seller, SellerInput};
