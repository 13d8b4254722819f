//! Offers Domain
//!
//! Products a seller puts up for sale. Every offer references an existing
//! seller; reads return the seller document in place of its id.

pub mod handlers;
pub mod models;

pub use handlers::{ACCESS, ApiDoc, router};
pub use models::{Offer, OfferFilter, OfferInput};
