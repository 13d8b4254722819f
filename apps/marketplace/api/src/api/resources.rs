//! Sellers, offers and orders share the generic CRUD component.

use axum::Router;
use axum_helpers::SessionResolver;
use crud::{CrudService, MongoRepository};
use domain_offers::Offer;
use domain_orders::Order;
use domain_sellers::Seller;
use std::sync::Arc;

use crate::state::AppState;

pub fn sellers<R: SessionResolver>(state: &AppState, guard: Arc<R>) -> Router {
    let service = CrudService::new(MongoRepository::<Seller>::new(&state.db));
    domain_sellers::router(service, guard)
}

pub fn offers<R: SessionResolver>(state: &AppState, guard: Arc<R>) -> Router {
    let service = CrudService::new(MongoRepository::<Offer>::new(&state.db));
    domain_offers::router(service, guard)
}

/// Orders send a confirmation mail on create
pub fn orders<R: SessionResolver>(state: &AppState, guard: Arc<R>) -> Router {
    let service = domain_orders::service(
        MongoRepository::<Order>::new(&state.db),
        state.mailer.clone(),
    );
    domain_orders::router(service, guard)
}
