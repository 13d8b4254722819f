//! Shared application state.

use email::Mailer;
use mongodb::{Client, Database};

/// Handed to the route builders once at startup
#[derive(Clone)]
pub struct AppState {
    pub config: crate::config::Config,
    /// Kept so shutdown can release the pool explicitly
    pub mongo_client: Client,
    pub db: Database,
    pub mailer: Mailer,
}
