use axum::response::{IntoResponse, Response};
use axum_helpers::AppError;
use thiserror::Error;
use validator::ValidationErrors;

#[derive(Debug, Error)]
pub enum CrudError {
    #[error("{label} with id {id} not found")]
    NotFound { label: &'static str, id: String },

    #[error(transparent)]
    Validation(#[from] ValidationErrors),

    #[error("{0}")]
    Conflict(String),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Serialization error: {0}")]
    Serialization(String),

    /// A side effect that runs after a successful write failed
    #[error("{0}")]
    Internal(String),
}

pub type CrudResult<T> = Result<T, CrudError>;

impl CrudError {
    pub fn not_found(label: &'static str, id: impl Into<String>) -> Self {
        CrudError::NotFound {
            label,
            id: id.into(),
        }
    }
}

impl From<CrudError> for AppError {
    fn from(err: CrudError) -> Self {
        match err {
            e @ CrudError::NotFound { .. } => AppError::NotFound(e.to_string()),
            CrudError::Validation(errors) => AppError::from(errors),
            CrudError::Conflict(msg) => AppError::Conflict(msg),
            CrudError::Database(msg) => AppError::InternalServerError(msg),
            CrudError::Serialization(msg) => AppError::InternalServerError(msg),
            CrudError::Internal(msg) => AppError::InternalServerError(msg),
        }
    }
}

impl IntoResponse for CrudError {
    fn into_response(self) -> Response {
        let app_error: AppError = self.into();
        app_error.into_response()
    }
}

impl From<mongodb::error::Error> for CrudError {
    fn from(err: mongodb::error::Error) -> Self {
        if database::mongodb::is_duplicate_key(&err) {
            CrudError::Conflict("Duplicate key".to_string())
        } else {
            CrudError::Database(err.to_string())
        }
    }
}

impl From<mongodb::bson::de::Error> for CrudError {
    fn from(err: mongodb::bson::de::Error) -> Self {
        CrudError::Serialization(err.to_string())
    }
}

impl From<serde_json::Error> for CrudError {
    fn from(err: serde_json::Error) -> Self {
        CrudError::Serialization(err.to_string())
    }
}
