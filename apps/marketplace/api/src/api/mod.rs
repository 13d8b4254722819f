//! API routes
//!
//! Everything here is nested under /api by `axum_helpers::create_router`.

pub mod health;
pub mod resources;
pub mod users;

use axum::Router;

use crate::state::AppState;

pub fn routes(state: &AppState) -> Router {
    let users = users::service(state);
    let guard = users.guard();

    Router::new()
        .nest("/users", domain_users::router(users))
        .nest("/sellers", resources::sellers(state, guard.clone()))
        .nest("/offers", resources::offers(state, guard.clone()))
        .nest("/orders", resources::orders(state, guard))
        .merge(health::router(state.clone()))
}
