//! MongoDB implementation of UserRepository

use async_trait::async_trait;
use database::mongodb::ensure_unique_index;
use mongodb::{Collection, Database, bson::doc};
use tracing::instrument;

use crate::error::{UserError, UserResult};
use crate::models::User;
use crate::repository::UserRepository;

pub const USERS_COLLECTION: &str = "users";

/// Fields backed by a unique index
pub const UNIQUE_FIELDS: [&str; 3] = ["email", "phone", "address"];

pub struct MongoUserRepository {
    collection: Collection<User>,
}

impl MongoUserRepository {
    pub fn new(db: &Database) -> Self {
        Self {
            collection: db.collection::<User>(USERS_COLLECTION),
        }
    }

    pub fn collection(&self) -> &Collection<User> {
        &self.collection
    }

    /// Create the unique indexes; safe to run on every start.
    pub async fn ensure_indexes(&self) -> UserResult<()> {
        for field in UNIQUE_FIELDS {
            ensure_unique_index(&self.collection, field).await?;
        }
        Ok(())
    }
}

#[async_trait]
impl UserRepository for MongoUserRepository {
    #[instrument(skip(self, user), fields(user_id = %user.id))]
    async fn create(&self, user: User) -> UserResult<User> {
        self.collection.insert_one(&user).await?;
        tracing::info!(user_id = %user.id, "User created");
        Ok(user)
    }

    #[instrument(skip(self))]
    async fn find_by_id(&self, id: &str) -> UserResult<Option<User>> {
        Ok(self.collection.find_one(doc! { "_id": id }).await?)
    }

    #[instrument(skip(self))]
    async fn find_by_email(&self, email: &str) -> UserResult<Option<User>> {
        Ok(self.collection.find_one(doc! { "email": email }).await?)
    }

    #[instrument(skip(self, token))]
    async fn find_by_verification_token(&self, token: &str) -> UserResult<Option<User>> {
        Ok(self
            .collection
            .find_one(doc! { "verificationToken": token })
            .await?)
    }

    #[instrument(skip(self, user), fields(user_id = %user.id))]
    async fn update(&self, user: User) -> UserResult<User> {
        let result = self
            .collection
            .replace_one(doc! { "_id": user.id.as_str() }, &user)
            .await?;

        if result.matched_count == 0 {
            return Err(UserError::UserNotFound);
        }
        Ok(user)
    }
}
