use axum::response::{IntoResponse, Response};
use axum_helpers::{AppError, auth::TokenError, auth::NOT_AUTHORIZED};
use crud::CrudError;
use email::NotificationError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum UserError {
    #[error("Email in use")]
    EmailInUse,

    #[error("User with these details already exists")]
    Duplicate,

    #[error("User not found")]
    UserNotFound,

    #[error("Email not found")]
    EmailNotFound,

    #[error("Verification has already been passed")]
    AlreadyVerified,

    /// Unknown email or wrong password
    #[error("Email or password is wrong")]
    InvalidCredentials,

    #[error("Email not verified")]
    NotVerified,

    /// Refresh token rejected
    #[error("Invalid token")]
    Forbidden,

    #[error("Not authorized")]
    Unauthorized,

    #[error("{0}")]
    InvalidAvatar(String),

    #[error("Password hashing error: {0}")]
    PasswordHash(String),

    #[error("Token error: {0}")]
    Token(#[from] TokenError),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Verification email failed: {0}")]
    Mail(#[from] NotificationError),

    #[error("Order history failed: {0}")]
    History(#[from] CrudError),

    #[error("Avatar storage failed: {0}")]
    Storage(#[from] std::io::Error),
}

pub type UserResult<T> = Result<T, UserError>;

impl From<mongodb::error::Error> for UserError {
    fn from(err: mongodb::error::Error) -> Self {
        if database::mongodb::is_duplicate_key(&err) {
            UserError::Duplicate
        } else {
            UserError::Database(err.to_string())
        }
    }
}

impl From<bcrypt::BcryptError> for UserError {
    fn from(err: bcrypt::BcryptError) -> Self {
        UserError::PasswordHash(err.to_string())
    }
}

impl From<UserError> for AppError {
    fn from(err: UserError) -> Self {
        let message = err.to_string();
        match err {
            UserError::EmailInUse | UserError::Duplicate => AppError::Conflict(message),
            UserError::UserNotFound | UserError::EmailNotFound => AppError::NotFound(message),
            UserError::AlreadyVerified => AppError::BadRequest(message),
            UserError::InvalidCredentials | UserError::NotVerified => AppError::Unauthorized(message),
            UserError::Unauthorized => AppError::Unauthorized(NOT_AUTHORIZED.to_string()),
            UserError::Forbidden => AppError::Forbidden(message),
            UserError::InvalidAvatar(message) => AppError::Validation {
                message,
                details: None,
            },
            UserError::PasswordHash(_) | UserError::Token(_) => AppError::InternalServerError(message),
            UserError::Database(_) => AppError::InternalServerError(message),
            UserError::Mail(e) => AppError::Mail(e.to_string()),
            UserError::History(e) => e.into(),
            UserError::Storage(e) => AppError::Io(e),
        }
    }
}

impl IntoResponse for UserError {
    fn into_response(self) -> Response {
        AppError::from(self).into_response()
    }
}
