use core_config::{ConfigError, FromEnv, env_parse_or, env_required};

const MIN_SECRET_LEN: usize = 32;
/// Ten years
const MAX_TTL_SECS: i64 = 10 * 365 * 24 * 60 * 60;

/// Signing secrets and lifetimes for session tokens.
///
/// Loaded from environment variables:
/// - `ACCESS_SECRET`, `REFRESH_SECRET` (required, at least 32 characters, must differ)
/// - `ACCESS_TOKEN_TTL` (seconds, default 60) - access tokens issued by login and refresh
/// - `VERIFY_ACCESS_TOKEN_TTL` (seconds, default 120) - access token issued on email verification
/// - `REFRESH_TOKEN_TTL` (seconds, default 7 days)
#[derive(Clone, Debug)]
pub struct JwtConfig {
    pub access_secret: String,
    pub refresh_secret: String,
    pub access_ttl_secs: i64,
    pub verify_access_ttl_secs: i64,
    pub refresh_ttl_secs: i64,
}

impl JwtConfig {
    pub const DEFAULT_ACCESS_TTL: i64 = 60;
    pub const DEFAULT_VERIFY_ACCESS_TTL: i64 = 120;
    pub const DEFAULT_REFRESH_TTL: i64 = 7 * 24 * 60 * 60;

    /// Secrets with the default lifetimes.
    pub fn new(
        access_secret: impl Into<String>,
        refresh_secret: impl Into<String>,
    ) -> Result<Self, ConfigError> {
        let config = Self {
            access_secret: access_secret.into(),
            refresh_secret: refresh_secret.into(),
            access_ttl_secs: Self::DEFAULT_ACCESS_TTL,
            verify_access_ttl_secs: Self::DEFAULT_VERIFY_ACCESS_TTL,
            refresh_ttl_secs: Self::DEFAULT_REFRESH_TTL,
        };
        config.check()?;
        Ok(config)
    }

    fn check(&self) -> Result<(), ConfigError> {
        check_secret("ACCESS_SECRET", &self.access_secret)?;
        check_secret("REFRESH_SECRET", &self.refresh_secret)?;

        if self.access_secret == self.refresh_secret {
            return Err(ConfigError::Invalid {
                key: "REFRESH_SECRET".to_string(),
                details: "must differ from ACCESS_SECRET".to_string(),
            });
        }

        for (key, ttl) in [
            ("ACCESS_TOKEN_TTL", self.access_ttl_secs),
            ("VERIFY_ACCESS_TOKEN_TTL", self.verify_access_ttl_secs),
            ("REFRESH_TOKEN_TTL", self.refresh_ttl_secs),
        ] {
            if ttl <= 0 {
                return Err(ConfigError::Invalid {
                    key: key.to_string(),
                    details: format!("must be positive (got {ttl})"),
                });
            }
            if ttl > MAX_TTL_SECS {
                return Err(ConfigError::Invalid {
                    key: key.to_string(),
                    details: format!("must be at most {MAX_TTL_SECS} seconds (got {ttl})"),
                });
            }
        }
        Ok(())
    }
}

fn check_secret(key: &str, secret: &str) -> Result<(), ConfigError> {
    if secret.len() < MIN_SECRET_LEN {
        return Err(ConfigError::Invalid {
            key: key.to_string(),
            details: format!(
                "must be at least {MIN_SECRET_LEN} characters (got {}). Generate one with: openssl rand -base64 32",
                secret.len()
            ),
        });
    }
    Ok(())
}

impl FromEnv for JwtConfig {
    fn from_env() -> Result<Self, ConfigError> {
        let config = Self {
            access_secret: env_required("ACCESS_SECRET")?,
            refresh_secret: env_required("REFRESH_SECRET")?,
            access_ttl_secs: env_parse_or("ACCESS_TOKEN_TTL", Self::DEFAULT_ACCESS_TTL)?,
            verify_access_ttl_secs: env_parse_or(
                "VERIFY_ACCESS_TOKEN_TTL",
                Self::DEFAULT_VERIFY_ACCESS_TTL,
            )?,
            refresh_ttl_secs: env_parse_or("REFRESH_TOKEN_TTL", Self::DEFAULT_REFRESH_TTL)?,
        };
        config.check()?;
        Ok(config)
    }
}
