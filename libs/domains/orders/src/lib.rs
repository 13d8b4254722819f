//! Orders Domain
//!
//! Orders snapshot the client at order time, reference a seller and carry
//! their line items as sent. Creating an order emails a confirmation to
//! the client; after that only the status moves, through
//! `PATCH /orders/{id}/status`.
//!
//! ```rust,ignore
//! let orders = domain_orders::service(MongoRepository::new(&db), mailer);
//! let routes = domain_orders::router(orders, guard);
//! ```

pub mod error;
pub mod handlers;
pub mod models;
pub mod notify;

use crud::{CrudRepository, CrudService};
use email::Mailer;

pub use error::{OrderError, OrderResult};
pub use handlers::{ACCESS, ApiDoc, router};
pub use models::{Client, CreateOrder, Order, OrderFilter, OrderItem, OrderStatus, StatusUpdate, UpdateOrder};
pub use notify::OrderEmailHook;

/// Order service that sends the confirmation email on create.
pub fn service(repository: impl CrudRepository<Order>, mailer: Mailer) -> CrudService<Order> {
    CrudService::new(repository).with_create_hook(OrderEmailHook::new(mailer))
}
