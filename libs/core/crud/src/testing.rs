//! Small entities shared by the unit tests.

use chrono::{DateTime, Utc};
use core_proc_macros::ApiResource;
use mongodb::bson::oid::ObjectId;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::entity::{CrudEntity, ForeignKey, Join, ListFilter, NoFilter, Predicate, Reference};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, ToSchema, ApiResource)]
#[serde(rename_all = "camelCase")]
pub struct Shop {
    #[serde(rename = "_id")]
    pub id: String,
    pub name: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Clone, Debug, Deserialize, Validate, ToSchema)]
pub struct ShopInput {
    #[validate(length(min = 3, max = 30, message = "name must be between 3 and 30 characters"))]
    pub name: String,
}

impl CrudEntity for Shop {
    type Create = ShopInput;
    type Update = ShopInput;
    type Filter = NoFilter;

    fn from_create(id: String, input: ShopInput, now: DateTime<Utc>) -> Self {
        Self {
            id,
            name: input.name,
            created_at: now,
            updated_at: now,
        }
    }

    fn apply_update(&mut self, input: ShopInput) {
        self.name = input.name;
    }

    fn id(&self) -> &str {
        &self.id
    }

    fn touch(&mut self, now: DateTime<Utc>) {
        self.updated_at = now;
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, ToSchema, ApiResource)]
#[serde(rename_all = "camelCase")]
pub struct Gadget {
    #[serde(rename = "_id")]
    pub id: String,
    pub name: String,
    #[schema(inline)]
    pub shop: Reference<Shop>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Clone, Debug, Deserialize, Validate, ToSchema)]
pub struct GadgetInput {
    #[validate(length(min = 3, max = 30, message = "name must be between 3 and 30 characters"))]
    pub name: String,
    pub shop: String,
}

#[derive(Clone, Debug, Default, Deserialize, Validate)]
pub struct GadgetFilter {
    pub shop: Option<String>,
}

impl ListFilter for GadgetFilter {
    const PARAMS: &'static [&'static str] = &["shop"];

    fn predicates(&self) -> Vec<Predicate> {
        self.shop
            .iter()
            .map(|shop| Predicate::new("shop", shop.clone()))
            .collect()
    }
}

impl CrudEntity for Gadget {
    type Create = GadgetInput;
    type Update = GadgetInput;
    type Filter = GadgetFilter;

    fn from_create(id: String, input: GadgetInput, now: DateTime<Utc>) -> Self {
        Self {
            id,
            name: input.name,
            shop: Reference::Id(input.shop),
            created_at: now,
            updated_at: now,
        }
    }

    fn apply_update(&mut self, input: GadgetInput) {
        self.name = input.name;
        self.shop = Reference::Id(input.shop);
    }

    fn id(&self) -> &str {
        &self.id
    }

    fn touch(&mut self, now: DateTime<Utc>) {
        self.updated_at = now;
    }

    fn joins() -> &'static [Join] {
        &[Join {
            field: "shop",
            from: "shops",
        }]
    }

    fn references(&self) -> Vec<ForeignKey> {
        vec![ForeignKey {
            collection: Shop::COLLECTION,
            label: Shop::LABEL,
            id: self.shop.id().to_string(),
        }]
    }
}

pub fn shop(name: &str) -> Shop {
    let now = Utc::now();
    Shop::from_create(
        ObjectId::new().to_hex(),
        ShopInput {
            name: name.to_string(),
        },
        now,
    )
}

pub fn gadget(name: &str, shop: &str) -> Gadget {
    Gadget::from_create(
        ObjectId::new().to_hex(),
        GadgetInput {
            name: name.to_string(),
            shop: shop.to_string(),
        },
        Utc::now(),
    )
}
