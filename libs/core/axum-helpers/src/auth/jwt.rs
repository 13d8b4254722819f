use super::config::JwtConfig;
use chrono::{Duration, Utc};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize, de::DeserializeOwned};
use uuid::Uuid;

#[derive(Debug, thiserror::Error)]
pub enum TokenError {
    #[error("Failed to sign token: {0}")]
    Sign(#[source] jsonwebtoken::errors::Error),

    /// Bad signature, malformed token or expired
    #[error("Invalid token: {0}")]
    Invalid(#[source] jsonwebtoken::errors::Error),

    #[error("Token lifetime of {0} seconds is out of range")]
    Lifetime(i64),
}

/// Registered claims wrapped around an identity payload.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims<P> {
    #[serde(flatten)]
    pub payload: P,
    pub iat: i64,
    pub exp: i64,
    /// Unique per issue so two tokens minted in the same second differ
    pub jti: String,
}

/// Sign `payload` with HS256, expiring `ttl_secs` from now.
pub fn issue_token<P: Serialize>(payload: &P, secret: &str, ttl_secs: i64) -> Result<String, TokenError> {
    let now = Utc::now();
    let exp = Duration::try_seconds(ttl_secs)
        .and_then(|ttl| now.checked_add_signed(ttl))
        .ok_or(TokenError::Lifetime(ttl_secs))?;
    let claims = Claims {
        payload,
        iat: now.timestamp(),
        exp: exp.timestamp(),
        jti: Uuid::new_v4().to_string(),
    };

    encode(
        &Header::new(Algorithm::HS256),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .map_err(TokenError::Sign)
}

/// Check signature and expiry (no leeway) and return the payload.
pub fn verify_token<P: DeserializeOwned>(token: &str, secret: &str) -> Result<P, TokenError> {
    let mut validation = Validation::new(Algorithm::HS256);
    validation.leeway = 0;

    decode::<Claims<P>>(token, &DecodingKey::from_secret(secret.as_bytes()), &validation)
        .map(|data| data.claims.payload)
        .map_err(TokenError::Invalid)
}

/// Access and refresh tokens handed out together.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenPair {
    pub access_token: String,
    pub refresh_token: String,
}

/// Which access lifetime to use when issuing a pair
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccessLifetime {
    /// Login and refresh
    Session,
    /// Email verification
    Verification,
}

/// Issues and verifies session tokens with the configured secrets.
#[derive(Clone, Debug)]
pub struct TokenService {
    config: JwtConfig,
}

impl TokenService {
    pub fn new(config: JwtConfig) -> Self {
        Self { config }
    }

    pub fn issue_pair<P: Serialize>(
        &self,
        payload: &P,
        lifetime: AccessLifetime,
    ) -> Result<TokenPair, TokenError> {
        let access_ttl = match lifetime {
            AccessLifetime::Session => self.config.access_ttl_secs,
            AccessLifetime::Verification => self.config.verify_access_ttl_secs,
        };

        Ok(TokenPair {
            access_token: issue_token(payload, &self.config.access_secret, access_ttl)?,
            refresh_token: issue_token(
                payload,
                &self.config.refresh_secret,
                self.config.refresh_ttl_secs,
            )?,
        })
    }

    pub fn verify_access<P: DeserializeOwned>(&self, token: &str) -> Result<P, TokenError> {
        verify_token(token, &self.config.access_secret)
    }

    pub fn verify_refresh<P: DeserializeOwned>(&self, token: &str) -> Result<P, TokenError> {
        verify_token(token, &self.config.refresh_secret)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
    struct Identity {
        #[serde(rename = "_id")]
        id: String,
        email: String,
        verify: bool,
    }

    fn identity() -> Identity {
        Identity {
            id: "65f0c1d2e3a4b5c6d7e8f901".into(),
            email: "jane@mail.com".into(),
            verify: true,
        }
    }

    fn service() -> TokenService {
        TokenService::new(
            JwtConfig::new(
                "access-secret-that-is-at-least-32-chars",
                "refresh-secret-that-is-at-least-32-chars",
            )
            .unwrap(),
        )
    }

    #[test]
    fn test_verify_returns_issued_payload() {
        let token = issue_token(&identity(), "secret", 60).unwrap();
        let payload: Identity = verify_token(&token, "secret").unwrap();
        assert_eq!(payload, identity());
    }

    #[test]
    fn test_verify_rejects_expired_token() {
        let token = issue_token(&identity(), "secret", -5).unwrap();
        let result = verify_token::<Identity>(&token, "secret");
        assert!(matches!(result, Err(TokenError::Invalid(_))));
    }

    #[test]
    fn test_issue_rejects_unrepresentable_lifetime() {
        for ttl in [i64::MAX, i64::MIN, 400_000 * 365 * 24 * 60 * 60] {
            let result = issue_token(&identity(), "secret", ttl);
            assert!(matches!(result, Err(TokenError::Lifetime(got)) if got == ttl));
        }
    }

    #[test]
    fn test_verify_rejects_wrong_secret() {
        let token = issue_token(&identity(), "secret", 60).unwrap();
        assert!(verify_token::<Identity>(&token, "other").is_err());
    }

    #[test]
    fn test_tokens_are_unique_per_issue() {
        let first = issue_token(&identity(), "secret", 60).unwrap();
        let second = issue_token(&identity(), "secret", 60).unwrap();
        assert_ne!(first, second);
    }

    #[test]
    fn test_pair_uses_separate_secrets() {
        let tokens = service()
            .issue_pair(&identity(), AccessLifetime::Session)
            .unwrap();

        assert!(service().verify_access::<Identity>(&tokens.access_token).is_ok());
        assert!(service().verify_refresh::<Identity>(&tokens.refresh_token).is_ok());
        assert!(service().verify_access::<Identity>(&tokens.refresh_token).is_err());
        assert!(service().verify_refresh::<Identity>(&tokens.access_token).is_err());
    }

    #[test]
    fn test_verification_lifetime_outlives_session_lifetime() {
        let svc = service();
        let session = svc.issue_pair(&identity(), AccessLifetime::Session).unwrap();
        let verification = svc
            .issue_pair(&identity(), AccessLifetime::Verification)
            .unwrap();

        let lifetime = |token: &str| {
            let data = decode::<Claims<Identity>>(
                token,
                &DecodingKey::from_secret(b"access-secret-that-is-at-least-32-chars"),
                &Validation::new(Algorithm::HS256),
            )
            .unwrap();
            data.claims.exp - data.claims.iat
        };
        assert_eq!(lifetime(&session.access_token), 60);
        assert_eq!(lifetime(&verification.access_token), 120);
    }
}
