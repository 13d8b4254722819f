use axum_helpers::validation::validate_object_id;
use chrono::{DateTime, Utc};
use core_proc_macros::ApiResource;
use crud::{CrudEntity, ForeignKey, Join, ListFilter, Predicate, Reference};
use domain_sellers::Seller;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

/// Offer entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema, ApiResource)]
#[serde(rename_all = "camelCase")]
pub struct Offer {
    #[serde(rename = "_id")]
    #[schema(example = "65f0c1d2e3a4b5c6d7e8f902")]
    pub id: String,
    pub name: String,
    /// Image URL
    pub image: String,
    pub desc: String,
    pub price: f64,
    /// Seller id as stored; the seller document on read
    #[schema(inline)]
    pub seller: Reference<Seller>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Body of `POST /offers` and `PUT /offers/{id}`
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct OfferInput {
    #[validate(length(min = 3, max = 30, message = "\"Name\" must be 3-30 characters"))]
    pub name: String,
    #[validate(length(min = 1, message = "\"Image url\" cannot be empty"))]
    pub image: String,
    #[validate(length(min = 10, max = 200, message = "\"Description\" must be 10-200 characters"))]
    pub desc: String,
    #[validate(range(min = 0.0, message = "\"Price\" cannot be negative"))]
    pub price: f64,
    #[validate(custom(function = "validate_object_id", message = "\"Seller\" must be a valid id"))]
    #[schema(example = "65f0c1d2e3a4b5c6d7e8f901")]
    pub seller: String,
}

/// `GET /offers?seller=<id>`
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct OfferFilter {
    /// Only offers of this seller
    #[validate(custom(function = "validate_object_id", message = "\"Seller\" must be a valid id"))]
    pub seller: Option<String>,
}

impl ListFilter for OfferFilter {
    const PARAMS: &'static [&'static str] = &["seller"];

    fn predicates(&self) -> Vec<Predicate> {
        self.seller
            .iter()
            .map(|seller| Predicate::new("seller", seller.clone()))
            .collect()
    }
}

impl CrudEntity for Offer {
    type Create = OfferInput;
    type Update = OfferInput;
    type Filter = OfferFilter;

    fn from_create(id: String, input: OfferInput, now: DateTime<Utc>) -> Self {
        Self {
            id,
            name: input.name,
            image: input.image,
            desc: input.desc,
            price: input.price,
            seller: Reference::Id(input.seller),
            created_at: now,
            updated_at: now,
        }
    }

    fn apply_update(&mut self, input: OfferInput) {
        self.name = input.name;
        self.image = input.image;
        self.desc = input.desc;
        self.price = input.price;
        self.seller = Reference::Id(input.seller);
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
mod tests {
    use super::*;
    use axum_helpers::validation::first_message;

    fn input() -> OfferInput {
        OfferInput {
            name: "Espresso".to_string(),
            image: "https://img.example.com/espresso.png".to_string(),
            desc: "Double shot, freshly ground".to_string(),
            price: 2.5,
            seller: "65f0c1d2e3a4b5c6d7e8f901".to_string(),
        }
    }

    #[test]
    fn test_valid_input() {
        assert!(input().validate().is_ok());
    }

    #[test]
    fn test_rules() {
        let errors = OfferInput {
            desc: "short".to_string(),
            ..input()
        }
        .validate()
        .unwrap_err();
        assert_eq!(first_message(&errors), "\"Description\" must be 10-200 characters");

        let errors = OfferInput {
            seller: "42".to_string(),
            ..input()
        }
        .validate()
        .unwrap_err();
        assert_eq!(first_message(&errors), "\"Seller\" must be a valid id");
    }

    #[test]
    fn test_filter_predicates() {
        assert!(OfferFilter::default().predicates().is_empty());

        let filter = OfferFilter {
            seller: Some("65f0c1d2e3a4b5c6d7e8f901".to_string()),
        };
        assert_eq!(
            filter.predicates(),
            vec![Predicate::new("seller", "65f0c1d2e3a4b5c6d7e8f901")]
        );
        assert!(
            OfferFilter {
                seller: Some("nope".to_string())
            }
            .validate()
            .is_err()
        );
    }

    #[test]
    fn test_references_seller() {
        let offer = Offer::from_create("65f0c1d2e3a4b5c6d7e8f902".to_string(), input(), Utc::now());
        let references = offer.references();

        assert_eq!(references.len(), 1);
        assert_eq!(references[0].collection, "sellers");
        assert_eq!(references[0].label, "Seller");
        assert_eq!(references[0].id, "65f0c1d2e3a4b5c6d7e8f901");
    }
}
