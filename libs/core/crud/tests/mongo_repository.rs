//! MongoDB repository against a real server (needs Docker).

use chrono::{DateTime, Utc};
use core_proc_macros::ApiResource;
use crud::{
    CrudEntity, CrudError, CrudService, ForeignKey, Join, MongoRepository, NoFilter, Pagination,
    Reference,
};
use serde::{Deserialize, Serialize};
use test_utils::TestMongo;
use utoipa::ToSchema;
use validator::Validate;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, ToSchema, ApiResource)]
#[serde(rename_all = "camelCase")]
struct Vendor {
    #[serde(rename = "_id")]
    id: String,
    name: String,
    updated_at: DateTime<Utc>,
}

#[derive(Clone, Debug, Deserialize, Validate, ToSchema)]
struct NameInput {
    #[validate(length(min = 3))]
    name: String,
}

impl CrudEntity for Vendor {
    type Create = NameInput;
    type Update = NameInput;
    type Filter = NoFilter;

    fn from_create(id: String, input: NameInput, now: DateTime<Utc>) -> Self {
        Self {
            id,
            name: input.name,
            updated_at: now,
        }
    }

    fn apply_update(&mut self, input: NameInput) {
        self.name = input.name;
    }

    fn id(&self) -> &str {
        &self.id
    }

    fn touch(&mut self, now: DateTime<Utc>) {
        self.updated_at = now;
    }
}

#[derive(Clone, Debug, Serialize, Deserialize, ToSchema, ApiResource)]
#[serde(rename_all = "camelCase")]
struct Listing {
    #[serde(rename = "_id")]
    id: String,
    name: String,
    #[schema(inline)]
    vendor: Reference<Vendor>,
    updated_at: DateTime<Utc>,
}

#[derive(Clone, Debug, Deserialize, Validate, ToSchema)]
struct ListingInput {
    #[validate(length(min = 3))]
    name: String,
    vendor: String,
}

impl CrudEntity for Listing {
    type Create = ListingInput;
    type Update = ListingInput;
    type Filter = NoFilter;

    fn from_create(id: String, input: ListingInput, now: DateTime<Utc>) -> Self {
        Self {
            id,
            name: input.name,
            vendor: Reference::Id(input.vendor),
            updated_at: now,
        }
    }

    fn apply_update(&mut self, input: ListingInput) {
        self.name = input.name;
        self.vendor = Reference::Id(input.vendor);
    }

    fn id(&self) -> &str {
        &self.id
    }

    fn touch(&mut self, now: DateTime<Utc>) {
        self.updated_at = now;
    }

    fn joins() -> &'static [Join] {
        &[Join {
            field: "vendor",
            from: "vendors",
        }]
    }

    fn references(&self) -> Vec<ForeignKey> {
        vec![ForeignKey {
            collection: "vendors",
            label: "Vendor",
            id: self.vendor.id().to_string(),
        }]
    }
}

#[tokio::test]
#[ignore = "requires Docker"]
async fn test_crud_round_trip_with_join() {
    let mongo = TestMongo::new().await;
    let db = mongo.database();
    let vendors = CrudService::new(MongoRepository::<Vendor>::new(&db));
    let listings = CrudService::new(MongoRepository::<Listing>::new(&db));

    let vendor = vendors
        .create(NameInput {
            name: "corner".to_string(),
        })
        .await
        .unwrap();
    let listing = listings
        .create(ListingInput {
            name: "lamp".to_string(),
            vendor: vendor.id.clone(),
        })
        .await
        .unwrap();
    assert_eq!(listing.vendor.resolved().map(|v| v.name.as_str()), Some("corner"));

    let page = listings
        .list(Pagination::default(), &NoFilter::default())
        .await
        .unwrap();
    assert_eq!(page.len(), 1);
    assert_eq!(page[0].vendor.id(), vendor.id);

    let renamed = listings
        .update(
            &listing.id,
            ListingInput {
                name: "desk lamp".to_string(),
                vendor: vendor.id.clone(),
            },
        )
        .await
        .unwrap();
    assert_eq!(renamed.name, "desk lamp");

    assert_eq!(
        listings.remove(&listing.id).await.unwrap(),
        "Listing successfully removed"
    );
    assert!(matches!(
        listings.get(&listing.id).await,
        Err(CrudError::NotFound { .. })
    ));
}

#[tokio::test]
#[ignore = "requires Docker"]
async fn test_newest_first() {
    let mongo = TestMongo::new().await;
    let vendors = CrudService::new(MongoRepository::<Vendor>::new(&mongo.database()));

    for name in ["first", "second", "third"] {
        vendors
            .create(NameInput {
                name: name.to_string(),
            })
            .await
            .unwrap();
    }

    let page = vendors
        .list(Pagination::new(1, 2), &NoFilter::default())
        .await
        .unwrap();
    let names: Vec<_> = page.iter().map(|v| v.name.as_str()).collect();
    assert_eq!(names, ["third", "second"]);
}
