use axum_helpers::validation::{validate_email, validate_object_id, validate_phone};
use chrono::{DateTime, Utc};
use core_proc_macros::ApiResource;
use crud::{CrudEntity, ForeignKey, Join, ListFilter, Predicate, Reference};
use domain_sellers::Seller;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};
use utoipa::ToSchema;
use validator::{Validate, ValidationError};

/// Order status
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    Default,
    ToSchema,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum OrderStatus {
    #[default]
    Received,
    Processing,
    Completed,
}

/// Who placed the order, copied in at order time
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate, ToSchema)]
pub struct Client {
    /// Id of the user account
    #[serde(rename = "_id")]
    #[validate(length(min = 1, max = 30, message = "\"User ID\" must be 1-30 characters"))]
    pub id: String,
    #[validate(length(min = 3, max = 30, message = "\"Name\" must be 3-30 characters"))]
    pub name: String,
    #[validate(custom(function = "validate_email"))]
    pub email: String,
    #[validate(custom(function = "validate_phone"))]
    pub phone: String,
    #[validate(length(min = 8, max = 40, message = "\"Address\" must be 8-40 characters"))]
    pub address: String,
}

/// One order line. Totals are taken as sent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate, ToSchema)]
pub struct OrderItem {
    /// Offer id
    #[validate(custom(function = "validate_object_id", message = "\"Item ID\" must be a valid id"))]
    pub offer: String,
    #[validate(length(min = 1, message = "\"Item name\" cannot be empty"))]
    pub name: String,
    pub price: f64,
    pub count: u32,
    pub total: f64,
}

/// Order entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema, ApiResource)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    #[serde(rename = "_id")]
    #[schema(example = "65f0c1d2e3a4b5c6d7e8f903")]
    pub id: String,
    pub client: Client,
    #[schema(inline)]
    pub seller: Reference<Seller>,
    pub items: Vec<OrderItem>,
    pub total_price: f64,
    #[serde(default)]
    pub status: OrderStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Body of `POST /orders`
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateOrder {
    #[validate(nested)]
    pub client: Client,
    #[validate(custom(function = "validate_object_id", message = "\"Seller\" must be a valid id"))]
    pub seller: String,
    #[validate(length(min = 1, message = "\"Items\" must contain at least 1 item"), nested)]
    pub items: Vec<OrderItem>,
    pub total_price: f64,
    #[serde(default)]
    pub status: OrderStatus,
}

/// Body of `PUT /orders/{id}`
///
/// `items` holds offer ids that replace the stored lines' offer references
/// position by position; names, prices and totals are kept.
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateOrder {
    #[validate(nested)]
    pub client: Client,
    #[validate(
        length(min = 1, message = "\"Items\" must contain at least 1 item"),
        custom(function = "validate_offer_ids")
    )]
    pub items: Vec<String>,
    pub total_price: f64,
}

fn validate_offer_ids(ids: &[String]) -> Result<(), ValidationError> {
    ids.iter().try_for_each(|id| validate_object_id(id)).map_err(|_| {
        ValidationError::new("object_id").with_message("\"Item ID\" must be a valid id".into())
    })
}

/// Body of `PATCH /orders/{id}/status`
#[derive(Debug, Clone, Copy, Deserialize, Validate, ToSchema)]
pub struct StatusUpdate {
    pub status: OrderStatus,
}

/// `GET /orders?status=<status>`
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct OrderFilter {
    pub status: Option<OrderStatus>,
}

impl ListFilter for OrderFilter {
    const PARAMS: &'static [&'static str] = &["status"];

    fn predicates(&self) -> Vec<Predicate> {
        self.status
            .iter()
            .map(|status| Predicate::new("status", status.to_string()))
            .collect()
    }
}

impl CrudEntity for Order {
    type Create = CreateOrder;
    type Update = UpdateOrder;
    type Filter = OrderFilter;

    fn from_create(id: String, input: CreateOrder, now: DateTime<Utc>) -> Self {
        Self {
            id,
            client: input.client,
            seller: Reference::Id(input.seller),
            items: input.items,
            total_price: input.total_price,
            status: input.status,
            created_at: now,
            updated_at: now,
        }
    }

    fn apply_update(&mut self, input: UpdateOrder) {
        self.client = input.client;
        self.total_price = input.total_price;
        for (item, offer) in self.items.iter_mut().zip(input.items) {
            item.offer = offer;
        }
    }

    fn id(&self) -> &str {
        &self.id
    }

    fn touch(&mut self, now: DateTime<Utc>) {
        self.updated_at = now;
    }

    fn joins() -> &'static [Join] {
        const JOINS: &[Join] = &[Join {
            field: "seller",
            from: Seller::COLLECTION,
        }];
        JOINS
    }

    fn references(&self) -> Vec<ForeignKey> {
        vec![ForeignKey {
            collection: Seller::COLLECTION,
            label: Seller::LABEL,
            id: self.seller.id().to_string(),
        }]
    }
}

#[cfg(test)]
pub(crate) mod fixtures {
    use super::*;

    pub const SELLER_ID: &str = "65f0c1d2e3a4b5c6d7e8f901";
    pub const OFFER_ID: &str = "65f0c1d2e3a4b5c6d7e8f902";

    pub fn client() -> Client {
        Client {
            id: "65f0c1d2e3a4b5c6d7e8f900".to_string(),
            name: "Jane Doe".to_string(),
            email: "jane@mail.com".to_string(),
            phone: "+380671234567".to_string(),
            address: "12 Market Street".to_string(),
        }
    }

    pub fn widget() -> OrderItem {
        OrderItem {
            offer: OFFER_ID.to_string(),
            name: "Widget".to_string(),
            price: 10.0,
            count: 2,
            total: 20.0,
        }
    }

    pub fn create_order() -> CreateOrder {
        CreateOrder {
            client: client(),
            seller: SELLER_ID.to_string(),
            items: vec![widget()],
            total_price: 20.0,
            status: OrderStatus::default(),
        }
    }
}
