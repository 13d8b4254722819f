//! Users wiring: Mongo repository, token service, mailer, order history and
//! avatar storage.

use axum_helpers::TokenService;
use crud::MongoRepository;
use domain_orders::Order;
use domain_users::{AuthService, LocalAvatarStore, MongoUserRepository};
use tracing::info;

use crate::state::AppState;

pub fn service(state: &AppState) -> AuthService<MongoUserRepository> {
    let history = domain_orders::service(
        MongoRepository::<Order>::new(&state.db),
        state.mailer.clone(),
    );

    AuthService::new(
        MongoUserRepository::new(&state.db),
        TokenService::new(state.config.jwt.clone()),
        state.mailer.clone(),
        history,
        LocalAvatarStore::new(state.config.avatars.clone()),
    )
}

/// Unique indexes on email, phone and address
pub async fn init_indexes(db: &mongodb::Database) -> eyre::Result<()> {
    MongoUserRepository::new(db)
        .ensure_indexes()
        .await
        .map_err(|e| eyre::eyre!("Failed to create user indexes: {}", e))?;
    info!("User collection indexes created");
    Ok(())
}
