use axum_helpers::TokenPair;
use axum_helpers::validation::{validate_email, validate_password, validate_phone};
use chrono::{DateTime, Utc};
use domain_orders::Order;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

/// Avatar assigned at registration
pub const DEFAULT_AVATAR_URL: &str = "https://res.cloudinary.com/dqejymgnk/image/upload/v1684344303/avatar/Group_1000002112_2x_i1bd8a.png";

pub const NO_ORDERS: &str = "No orders in history";

/// Stored user account.
///
/// `access_token` and `refresh_token` hold the live session; both are
/// cleared on logout.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    #[serde(rename = "_id")]
    pub id: String,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub address: String,
    /// bcrypt hash
    pub password: String,
    #[serde(default)]
    pub access_token: Option<String>,
    #[serde(default)]
    pub refresh_token: Option<String>,
    pub avatar_url: String,
    #[serde(default)]
    pub verify: bool,
    #[serde(default)]
    pub verification_token: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// A new account waiting for email verification.
    pub fn pending(
        id: String,
        input: RegisterUser,
        password_hash: String,
        verification_token: String,
    ) -> Self {
        let now = Utc::now();
        Self {
            id,
            name: input.name,
            email: input.email,
            phone: input.phone,
            address: input.address,
            password: password_hash,
            access_token: None,
            refresh_token: None,
            avatar_url: DEFAULT_AVATAR_URL.to_string(),
            verify: false,
            verification_token: Some(verification_token),
            created_at: now,
            updated_at: now,
        }
    }

    pub fn start_session(&mut self, access_token: String, refresh_token: String) {
        self.access_token = Some(access_token);
        self.refresh_token = Some(refresh_token);
        self.updated_at = Utc::now();
    }

    pub fn end_session(&mut self) {
        self.access_token = None;
        self.refresh_token = None;
        self.updated_at = Utc::now();
    }

    pub fn mark_verified(&mut self) {
        self.verify = true;
        self.verification_token = None;
        self.updated_at = Utc::now();
    }
}

/// The identity carried by verification and refresh tokens, attached to
/// authenticated requests and returned by `GET /users/current`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Profile {
    #[serde(rename = "_id")]
    #[schema(example = "65f0c1d2e3a4b5c6d7e8f900")]
    pub id: String,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub address: String,
    pub avatar_url: String,
    pub verify: bool,
}

impl From<&User> for Profile {
    fn from(user: &User) -> Self {
        Self {
            id: user.id.clone(),
            name: user.name.clone(),
            email: user.email.clone(),
            phone: user.phone.clone(),
            address: user.address.clone(),
            avatar_url: user.avatar_url.clone(),
            verify: user.verify,
        }
    }
}

/// Identity returned by login, and the payload of login tokens
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SessionUser {
    #[serde(rename = "_id")]
    pub id: String,
    pub name: String,
    pub email: String,
    pub avatar_url: String,
    pub verify: bool,
}

impl From<&User> for SessionUser {
    fn from(user: &User) -> Self {
        Self {
            id: user.id.clone(),
            name: user.name.clone(),
            email: user.email.clone(),
            avatar_url: user.avatar_url.clone(),
            verify: user.verify,
        }
    }
}

/// The part of a token payload every issuer includes
#[derive(Debug, Clone, Deserialize)]
pub struct TokenSubject {
    #[serde(rename = "_id")]
    pub id: String,
}

/// Body of `POST /users/register`
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct RegisterUser {
    #[validate(length(min = 3, max = 20, message = "\"Name\" must be 3-20 characters"))]
    #[schema(example = "Jane Doe")]
    pub name: String,
    #[validate(custom(function = "validate_email"))]
    #[schema(example = "jane@mail.com")]
    pub email: String,
    #[validate(custom(function = "validate_phone"))]
    #[schema(example = "+380671234567")]
    pub phone: String,
    #[validate(length(min = 8, max = 30, message = "\"Address\" must be 8-30 characters"))]
    #[schema(example = "12 Market Street")]
    pub address: String,
    #[validate(custom(function = "validate_password"))]
    #[schema(example = "Secret123")]
    pub password: String,
}

/// Body of `POST /users/login`
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct LoginRequest {
    #[validate(custom(function = "validate_email"))]
    pub email: String,
    #[validate(custom(function = "validate_password"))]
    pub password: String,
}

/// Body of `POST /users/verify`
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct EmailRequest {
    #[validate(custom(function = "validate_email"))]
    pub email: String,
}

/// Body of `POST /users/refresh`
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RefreshRequest {
    #[validate(length(min = 1, message = "Refresh token cannot be empty"))]
    pub refresh_token: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct Registered {
    pub name: String,
    pub email: String,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Verified {
    pub message: String,
    pub user: Profile,
    pub access_token: String,
    pub refresh_token: String,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LoggedIn {
    pub access_token: String,
    pub refresh_token: String,
    pub user: SessionUser,
}

/// Response of `POST /users/refresh`
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Tokens {
    pub access_token: String,
    pub refresh_token: String,
}

impl From<TokenPair> for Tokens {
    fn from(pair: TokenPair) -> Self {
        Self {
            access_token: pair.access_token,
            refresh_token: pair.refresh_token,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct Message {
    pub message: String,
}

impl Message {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Orders placed by the caller, or a note that there are none
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(untagged)]
pub enum History {
    Orders { history: Vec<Order> },
    Empty(String),
}

impl History {
    pub fn from_orders(orders: Vec<Order>) -> Self {
        if orders.is_empty() {
            History::Empty(NO_ORDERS.to_string())
        } else {
            History::Orders { history: orders }
        }
    }
}

#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AvatarUpdated {
    pub avatar_url: String,
    pub message: String,
}

#[cfg(test)]
pub(crate) mod fixtures {
    use super::*;

    pub const PASSWORD: &str = "Secret123";

    pub fn registration() -> RegisterUser {
        RegisterUser {
            name: "Jane Doe".to_string(),
            email: "jane@mail.com".to_string(),
            phone: "+380671234567".to_string(),
            address: "12 Market Street".to_string(),
            password: PASSWORD.to_string(),
        }
    }
}
