use async_trait::async_trait;
use axum_helpers::{AppError, SessionResolver, TokenService, auth::NOT_AUTHORIZED};
use std::sync::Arc;

use crate::models::{Profile, TokenSubject};
use crate::repository::UserRepository;

/// Resolves access tokens to the caller's current profile.
///
/// A token is live only while it is the access token stored on the user,
/// so logging out or logging in elsewhere revokes it before it expires.
pub struct SessionGuard<R> {
    users: Arc<R>,
    tokens: TokenService,
}

impl<R: UserRepository> SessionGuard<R> {
    pub fn new(users: Arc<R>, tokens: TokenService) -> Self {
        Self { users, tokens }
    }
}

fn not_authorized() -> AppError {
    AppError::Unauthorized(NOT_AUTHORIZED.to_string())
}

#[async_trait]
impl<R: UserRepository> SessionResolver for SessionGuard<R> {
    type Principal = Profile;

    async fn resolve(&self, token: &str) -> Result<Profile, AppError> {
        let subject: TokenSubject = self.tokens.verify_access(token).map_err(|e| {
            tracing::debug!(error = %e, "Access token rejected");
            not_authorized()
        })?;

        let Some(user) = self.users.find_by_id(&subject.id).await? else {
            tracing::debug!(user_id = %subject.id, "Session for a missing user");
            return Err(not_authorized());
        };

        if user.access_token.as_deref() != Some(token) {
            tracing::debug!(user_id = %user.id, "Access token is not the one on file");
            return Err(not_authorized());
        }

        Ok(Profile::from(&user))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::UserError;
    use crate::models::{User, fixtures::registration};
    use crate::repository::{InMemoryUserRepository, MockUserRepository};
    use axum::{http::StatusCode, response::IntoResponse};
    use axum_helpers::{AccessLifetime, JwtConfig};

    fn tokens() -> TokenService {
        TokenService::new(
            JwtConfig::new(
                "access-secret-that-is-at-least-32-chars",
                "refresh-secret-that-is-at-least-32-chars",
            )
            .unwrap(),
        )
    }

    async fn signed_in(repo: &InMemoryUserRepository) -> (User, String) {
        let mut user = User::pending(
            "65f0c1d2e3a4b5c6d7e8f900".into(),
            registration(),
            "hash".into(),
            "t".into(),
        );
        user.mark_verified();
        let pair = tokens()
            .issue_pair(&Profile::from(&user), AccessLifetime::Session)
            .unwrap();
        user.start_session(pair.access_token.clone(), pair.refresh_token);
        let user = repo.create(user).await.unwrap();
        (user, pair.access_token)
    }

    fn status(err: AppError) -> StatusCode {
        err.into_response().status()
    }

    #[tokio::test]
    async fn test_live_token_resolves_to_profile() {
        let repo = InMemoryUserRepository::new();
        let (user, token) = signed_in(&repo).await;
        let guard = SessionGuard::new(Arc::new(repo), tokens());

        let profile = guard.resolve(&token).await.unwrap();
        assert_eq!(profile, Profile::from(&user));
    }

    #[tokio::test]
    async fn test_logged_out_token_is_rejected() {
        let repo = InMemoryUserRepository::new();
        let (mut user, token) = signed_in(&repo).await;
        user.end_session();
        repo.update(user).await.unwrap();

        let guard = SessionGuard::new(Arc::new(repo), tokens());
        let err = guard.resolve(&token).await.unwrap_err();
        assert_eq!(status(err), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_superseded_token_is_rejected() {
        let repo = InMemoryUserRepository::new();
        let (mut user, token) = signed_in(&repo).await;
        user.start_session("newer".into(), "newer".into());
        repo.update(user).await.unwrap();

        let guard = SessionGuard::new(Arc::new(repo), tokens());
        assert!(guard.resolve(&token).await.is_err());
    }

    #[tokio::test]
    async fn test_bad_signature_and_missing_user() {
        let repo = InMemoryUserRepository::new();
        let guard = SessionGuard::new(Arc::new(repo), tokens());
        assert!(guard.resolve("garbage").await.is_err());

        let orphan = tokens()
            .issue_pair(
                &serde_json::json!({ "_id": "65f0c1d2e3a4b5c6d7e8f999" }),
                AccessLifetime::Session,
            )
            .unwrap();
        let err = guard.resolve(&orphan.access_token).await.unwrap_err();
        assert_eq!(status(err), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_repository_failure_is_internal() {
        let mut repo = MockUserRepository::new();
        repo.expect_find_by_id()
            .returning(|_| Err(UserError::Database("timeout".into())));

        let token = tokens()
            .issue_pair(&serde_json::json!({ "_id": "u1" }), AccessLifetime::Session)
            .unwrap()
            .access_token;
        let guard = SessionGuard::new(Arc::new(repo), tokens());
        let err = guard.resolve(&token).await.unwrap_err();
        assert_eq!(status(err), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
