//! bcrypt hashing on the blocking pool

use crate::error::{UserError, UserResult};

pub const BCRYPT_COST: u32 = 10;

pub async fn hash_password(password: String) -> UserResult<String> {
    tokio::task::spawn_blocking(move || bcrypt::hash(password, BCRYPT_COST))
        .await
        .map_err(|e| UserError::PasswordHash(e.to_string()))?
        .map_err(Into::into)
}

pub async fn verify_password(password: String, hash: String) -> UserResult<bool> {
    tokio::task::spawn_blocking(move || bcrypt::verify(password, &hash))
        .await
        .map_err(|e| UserError::PasswordHash(e.to_string()))?
        .map_err(Into::into)
}
