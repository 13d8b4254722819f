//! MongoDB connection management and store helpers

mod config;
mod connector;
mod health;
mod indexes;

pub use config::MongoConfig;
pub use connector::{MongoError, connect_from_config, connect_from_config_with_retry};
pub use health::{HealthStatus, check_health, check_health_detailed};
pub use indexes::{DUPLICATE_KEY_CODE, ensure_unique_index, is_duplicate_key};

pub use mongodb::{Client, Collection, Database};
