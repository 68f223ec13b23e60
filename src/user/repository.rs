use async_trait::async_trait;
use mongodb::Database;
use mongodb::bson::doc;

use super::Id;
use super::model::{ProfileUpdate, User};
use crate::json::id_filter;

const USERS_COLLECTION: &str = "users";

#[async_trait]
pub trait UserRepository {
    async fn insert(&self, user: &User) -> super::Result<()>;

    async fn find_by_id(&self, id: &Id) -> super::Result<Option<User>>;

    async fn find_by_email(&self, email: &str) -> super::Result<Option<User>>;

    /// Returns `false` when no user has the given id.
    async fn update_profile(&self, id: &Id, update: &ProfileUpdate) -> super::Result<bool>;
}

pub struct MongoUserRepository {
    col: mongodb::Collection<User>,
}

impl MongoUserRepository {
    pub fn new(db: &Database) -> Self {
        Self {
            col: db.collection(USERS_COLLECTION),
        }
    }
}

#[async_trait]
impl UserRepository for MongoUserRepository {
    async fn insert(&self, user: &User) -> super::Result<()> {
        self.col.insert_one(user).await?;
        Ok(())
    }

    async fn find_by_id(&self, id: &Id) -> super::Result<Option<User>> {
        let user = self.col.find_one(doc! { "_id": id_filter(id.as_str()) }).await?;
        Ok(user)
    }

    async fn find_by_email(&self, email: &str) -> super::Result<Option<User>> {
        let user = self.col.find_one(doc! { "email": email }).await?;
        Ok(user)
    }

    async fn update_profile(&self, id: &Id, update: &ProfileUpdate) -> super::Result<bool> {
        let filter = doc! { "_id": id_filter(id.as_str()) };

        if update.is_empty() {
            let count = self.col.count_documents(filter).await?;
            return Ok(count > 0);
        }

        let res = self
            .col
            .update_one(filter, doc! { "$set": update.fields().clone() })
            .await?;

        Ok(res.matched_count > 0)
    }
}
