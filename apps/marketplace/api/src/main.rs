use axum::Router;
use axum_helpers::server::{cors_layer_from_env, create_production_app, health_router};
use core_config::tracing::{init_tracing, install_color_eyre};
use email::{Mailer, SmtpProvider};
use std::sync::Arc;
use std::time::Duration;
use tower_http::services::ServeDir;
use tracing::info;

mod api;
mod config;
mod openapi;
mod state;

use config::Config;
use state::AppState;

#[tokio::main]
async fn main() -> eyre::Result<()> {
    install_color_eyre();

    let config = Config::from_env()?;

    init_tracing(&config.environment);

    info!(database = %config.mongodb.database, "Connecting to MongoDB");

    let mongo_client =
        database::mongodb::connect_from_config_with_retry(&config.mongodb, None).await?;
    let db = mongo_client.database(&config.mongodb.database);

    info!(database = %config.mongodb.database, "Connected to MongoDB");

    api::users::init_indexes(&db).await?;

    let provider = SmtpProvider::new(config.smtp.clone())?;
    let mailer = Mailer::new(Arc::new(provider), config.mailer.clone())?;

    tokio::fs::create_dir_all(&config.avatars.dir).await?;

    let state = AppState {
        config,
        mongo_client,
        db,
        mailer,
    };

    let api_routes = api::routes(&state);

    let router = axum_helpers::create_router::<openapi::ApiDoc>(api_routes, cors_layer_from_env()?);

    let AppState {
        config,
        mongo_client,
        ..
    } = state;

    let app = router
        .merge(health_router(config.app))
        .merge(Router::new().nest_service("/avatars", ServeDir::new(&config.avatars.dir)));

    info!("Starting marketplace API with graceful shutdown (30s timeout)");

    create_production_app(
        app,
        &config.server,
        Duration::from_secs(30),
        async move {
            info!("Shutting down: closing MongoDB connections");
            drop(mongo_client);
            info!("MongoDB connection closed");
        },
    )
    .await
    .map_err(|e| eyre::eyre!("Server error: {}", e))?;

    info!("Marketplace API shutdown complete");
    Ok(())
}
