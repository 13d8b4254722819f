use axum_helpers::{AccessLifetime, TokenPair, TokenService};
use email::Mailer;
use mongodb::bson::oid::ObjectId;
use std::sync::Arc;
use uuid::Uuid;

use crate::avatar::{AvatarStore, AvatarUpload};
use crate::error::{UserError, UserResult};
use crate::history::OrderHistory;
use crate::models::{
    AvatarUpdated, History, LoggedIn, LoginRequest, Message, Profile, RegisterUser, Registered,
    SessionUser, TokenSubject, User, Verified,
};
use crate::password::{hash_password, verify_password};
use crate::repository::UserRepository;
use crate::session::SessionGuard;

/// Registration, email verification and sessions.
pub struct AuthService<R: UserRepository> {
    repository: Arc<R>,
    tokens: TokenService,
    mailer: Mailer,
    history: Arc<dyn OrderHistory>,
    avatars: Arc<dyn AvatarStore>,
}

impl<R: UserRepository> Clone for AuthService<R> {
    fn clone(&self) -> Self {
        Self {
            repository: Arc::clone(&self.repository),
            tokens: self.tokens.clone(),
            mailer: self.mailer.clone(),
            history: Arc::clone(&self.history),
            avatars: Arc::clone(&self.avatars),
        }
    }
}

impl<R: UserRepository> AuthService<R> {
    pub fn new(
        repository: R,
        tokens: TokenService,
        mailer: Mailer,
        history: impl OrderHistory,
        avatars: impl AvatarStore,
    ) -> Self {
        Self {
            repository: Arc::new(repository),
            tokens,
            mailer,
            history: Arc::new(history),
            avatars: Arc::new(avatars),
        }
    }

    /// Guard that resolves access tokens against the same repository
    pub fn guard(&self) -> Arc<SessionGuard<R>> {
        Arc::new(SessionGuard::new(
            Arc::clone(&self.repository),
            self.tokens.clone(),
        ))
    }

    #[tracing::instrument(skip(self, input), fields(email = %input.email))]
    pub async fn register(&self, input: RegisterUser) -> UserResult<Registered> {
        if self.repository.find_by_email(&input.email).await?.is_some() {
            return Err(UserError::EmailInUse);
        }

        let password_hash = hash_password(input.password.clone()).await?;
        let verification_token = Uuid::new_v4().simple().to_string();
        let user = User::pending(
            ObjectId::new().to_hex(),
            input,
            password_hash,
            verification_token.clone(),
        );

        let user = self.repository.create(user).await?;
        tracing::info!(user_id = %user.id, "User registered");

        self.mailer
            .send_verification(&user.email, &verification_token)
            .await?;

        Ok(Registered {
            name: user.name,
            email: user.email,
        })
    }

    #[tracing::instrument(skip_all)]
    pub async fn verify(&self, verification_token: &str) -> UserResult<Verified> {
        let mut user = self
            .repository
            .find_by_verification_token(verification_token)
            .await?
            .ok_or(UserError::UserNotFound)?;

        user.mark_verified();
        let profile = Profile::from(&user);
        let tokens = self
            .tokens
            .issue_pair(&profile, AccessLifetime::Verification)?;
        user.start_session(tokens.access_token.clone(), tokens.refresh_token.clone());
        self.repository.update(user).await?;

        tracing::info!(user_id = %profile.id, "Email verified");
        Ok(Verified {
            message: "Verification successful".to_string(),
            user: profile,
            access_token: tokens.access_token,
            refresh_token: tokens.refresh_token,
        })
    }

    /// Send the verification email again with the token on file.
    #[tracing::instrument(skip(self))]
    pub async fn resend_verification(&self, email: &str) -> UserResult<Message> {
        let mut user = self
            .repository
            .find_by_email(email)
            .await?
            .ok_or(UserError::EmailNotFound)?;

        if user.verify {
            return Err(UserError::AlreadyVerified);
        }

        let token = match user.verification_token.clone() {
            Some(token) => token,
            None => {
                let token = Uuid::new_v4().simple().to_string();
                user.verification_token = Some(token.clone());
                user = self.repository.update(user).await?;
                token
            }
        };

        self.mailer.send_verification(&user.email, &token).await?;
        Ok(Message::new("Verification email sent"))
    }

    #[tracing::instrument(skip(self, input), fields(email = %input.email))]
    pub async fn login(&self, input: LoginRequest) -> UserResult<LoggedIn> {
        let mut user = self
            .repository
            .find_by_email(&input.email)
            .await?
            .ok_or(UserError::InvalidCredentials)?;

        if !verify_password(input.password, user.password.clone()).await? {
            return Err(UserError::InvalidCredentials);
        }
        if !user.verify {
            return Err(UserError::NotVerified);
        }

        let session_user = SessionUser::from(&user);
        let tokens = self
            .tokens
            .issue_pair(&session_user, AccessLifetime::Session)?;
        user.start_session(tokens.access_token.clone(), tokens.refresh_token.clone());
        self.repository.update(user).await?;

        tracing::info!(user_id = %session_user.id, "User logged in");
        Ok(LoggedIn {
            access_token: tokens.access_token,
            refresh_token: tokens.refresh_token,
            user: session_user,
        })
    }

    /// Trade a live refresh token for a new pair. Every failure is
    /// `Forbidden`.
    #[tracing::instrument(skip_all)]
    pub async fn refresh(&self, refresh_token: &str) -> UserResult<TokenPair> {
        let subject: TokenSubject = self.tokens.verify_refresh(refresh_token).map_err(|e| {
            tracing::debug!(error = %e, "Refresh token rejected");
            UserError::Forbidden
        })?;

        let mut user = self
            .repository
            .find_by_id(&subject.id)
            .await?
            .ok_or(UserError::Forbidden)?;

        if user.refresh_token.as_deref() != Some(refresh_token) {
            tracing::debug!(user_id = %user.id, "Refresh token is not the one on file");
            return Err(UserError::Forbidden);
        }

        let tokens = self
            .tokens
            .issue_pair(&Profile::from(&user), AccessLifetime::Session)?;
        user.start_session(tokens.access_token.clone(), tokens.refresh_token.clone());
        self.repository.update(user).await?;

        Ok(tokens)
    }

    #[tracing::instrument(skip(self))]
    pub async fn logout(&self, user_id: &str) -> UserResult<Message> {
        let mut user = self
            .repository
            .find_by_id(user_id)
            .await?
            .ok_or(UserError::Unauthorized)?;

        user.end_session();
        self.repository.update(user).await?;

        tracing::info!(user_id, "User logged out");
        Ok(Message::new("Successfully logout"))
    }

    pub async fn history(&self, user_id: &str) -> UserResult<History> {
        let orders = self.history.for_client(user_id).await?;
        Ok(History::from_orders(orders))
    }

    #[tracing::instrument(skip(self, upload))]
    pub async fn update_avatar(&self, user_id: &str, upload: AvatarUpload) -> UserResult<AvatarUpdated> {
        upload.extension()?;

        let mut user = self
            .repository
            .find_by_id(user_id)
            .await?
            .ok_or(UserError::Unauthorized)?;

        user.avatar_url = self.avatars.save(user_id, upload).await?;
        user.updated_at = chrono::Utc::now();
        let user = self.repository.update(user).await?;

        Ok(AvatarUpdated {
            avatar_url: user.avatar_url,
            message: "Avatar successfully updated".to_string(),
        })
    }
}
