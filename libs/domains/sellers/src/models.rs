use axum_helpers::validation::{validate_email, validate_phone};
use chrono::{DateTime, Utc};
use core_proc_macros::ApiResource;
use crud::{CrudEntity, NoFilter};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

pub const DAYS_PER_WEEK: u64 = 7;

/// Opening hours for one weekday, Monday first.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Hours {
    #[serde(default)]
    pub is_open: bool,
    /// Opening time, `HH:MM`
    #[validate(length(equal = 5, message = "\"From\" must be in HH:MM format"))]
    #[schema(example = "09:00")]
    pub from: String,
    /// Closing time, `HH:MM`
    #[validate(length(equal = 5, message = "\"To\" must be in HH:MM format"))]
    #[schema(example = "18:00")]
    pub to: String,
}

/// Seller entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema, ApiResource)]
#[serde(rename_all = "camelCase")]
pub struct Seller {
    #[serde(rename = "_id")]
    #[schema(example = "65f0c1d2e3a4b5c6d7e8f901")]
    pub id: String,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub address: String,
    /// Open Location Code of the shop
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub plus_code: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub web: Option<String>,
    #[serde(default)]
    pub hours: Vec<Hours>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Body of `POST /sellers` and `PUT /sellers/{id}`
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SellerInput {
    #[validate(length(min = 3, max = 30, message = "\"Name\" must be 3-30 characters"))]
    pub name: String,
    #[validate(custom(function = "validate_email"))]
    pub email: String,
    #[validate(custom(function = "validate_phone"))]
    pub phone: String,
    #[validate(length(min = 8, max = 40, message = "\"Address\" must be 8-40 characters"))]
    pub address: String,
    #[validate(length(max = 40, message = "\"Plus code\" must be at most 40 characters"))]
    pub plus_code: Option<String>,
    #[validate(length(max = 40, message = "\"Web url\" must be at most 40 characters"))]
    pub web: Option<String>,
    /// Exactly seven entries when present
    #[validate(
        length(equal = 7, message = "\"Hours\" must have 7 entries"),
        nested
    )]
    pub hours: Option<Vec<Hours>>,
}

impl CrudEntity for Seller {
    type Create = SellerInput;
    type Update = SellerInput;
    type Filter = NoFilter;

    fn from_create(id: String, input: SellerInput, now: DateTime<Utc>) -> Self {
        Self {
            id,
            name: input.name,
            email: input.email,
            phone: input.phone,
            address: input.address,
            plus_code: input.plus_code,
            web: input.web,
            hours: input.hours.unwrap_or_default(),
            created_at: now,
            updated_at: now,
        }
    }

    fn apply_update(&mut self, input: SellerInput) {
        self.name = input.name;
        self.email = input.email;
        self.phone = input.phone;
        self.address = input.address;
        self.plus_code = input.plus_code;
        self.web = input.web;
        if let Some(hours) = input.hours {
            self.hours = hours;
        }
    }

    fn id(&self) -> &str {
        &self.id
    }

    fn touch(&mut self, now: DateTime<Utc>) {
        self.updated_at = now;
    }
}
