use axum::response::{IntoResponse, Response};
use axum_helpers::AppError;
use crud::CrudError;
use email::NotificationError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum OrderError {
    #[error(transparent)]
    Crud(#[from] CrudError),

    #[error("Order confirmation failed: {0}")]
    Mail(#[from] NotificationError),
}

pub type OrderResult<T> = Result<T, OrderError>;

impl From<OrderError> for AppError {
    fn from(err: OrderError) -> Self {
        match err {
            OrderError::Crud(e) => e.into(),
            OrderError::Mail(e) => AppError::Mail(e.to_string()),
        }
    }
}

impl IntoResponse for OrderError {
    fn into_response(self) -> Response {
        AppError::from(self).into_response()
    }
}
