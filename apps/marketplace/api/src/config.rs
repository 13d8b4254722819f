use axum_helpers::JwtConfig;
use core_config::{AppInfo, FromEnv, app_info, server::ServerConfig};
use database::mongodb::MongoConfig;
use domain_users::AvatarConfig;
use email::{MailerConfig, SmtpConfig};

pub use core_config::Environment;

/// Application configuration, composed from the shared config components
#[derive(Clone, Debug)]
pub struct Config {
    pub app: AppInfo,
    pub mongodb: MongoConfig,
    pub server: ServerConfig,
    pub environment: Environment,
    pub jwt: JwtConfig,
    pub smtp: SmtpConfig,
    pub mailer: MailerConfig,
    pub avatars: AvatarConfig,
}

impl Config {
    pub fn from_env() -> eyre::Result<Self> {
        let app = app_info!();
        let mut mongodb = MongoConfig::from_env()?;
        if mongodb.app_name.is_none() {
            mongodb = mongodb.with_app_name(app.name);
        }

        Ok(Self {
            app,
            mongodb,
            server: ServerConfig::from_env()?,
            environment: Environment::from_env(),
            jwt: JwtConfig::from_env()?,
            smtp: SmtpConfig::from_env()?,
            mailer: MailerConfig::from_env()?,
            avatars: AvatarConfig::from_env()?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const REQUIRED: [(&str, Option<&str>); 7] = [
        ("MONGODB_URL", Some("mongodb://localhost:27017")),
        ("MONGODB_DATABASE", Some("marketplace")),
        ("ACCESS_SECRET", Some("access-secret-that-is-at-least-32-chars")),
        ("REFRESH_SECRET", Some("refresh-secret-that-is-at-least-32-chars")),
        ("BASE_URL", Some("http://localhost:8080")),
        ("SMTP_HOST", Some("localhost")),
        ("EMAIL_FROM_ADDRESS", Some("noreply@market.example.com")),
    ];

    #[test]
    fn test_loads_from_env() {
        temp_env::with_vars(REQUIRED, || {
            let config = Config::from_env().unwrap();
            assert_eq!(config.app.name, "marketplace_api");
            assert_eq!(config.mongodb.app_name.as_deref(), Some("marketplace_api"));
            assert_eq!(config.jwt.access_ttl_secs, 60);
            assert_eq!(config.avatars.public_url, "http://localhost:8080/avatars");
        });
    }

    #[test]
    fn test_missing_secret_fails() {
        let mut vars = REQUIRED;
        vars[2] = ("ACCESS_SECRET", None);
        temp_env::with_vars(vars, || {
            assert!(Config::from_env().is_err());
        });
    }
}
