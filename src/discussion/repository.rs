use async_trait::async_trait;
use futures::TryStreamExt;
use mongodb::Database;
use mongodb::bson::{doc, to_bson};

use super::Id;
use super::model::{Discussion, Message};
use crate::group;
use crate::json::id_filter;

const DISCUSSIONS_COLLECTION: &str = "discussions";

#[async_trait]
pub trait DiscussionRepository {
    async fn insert(&self, discussion: &Discussion) -> super::Result<()>;

    async fn find_by_id(&self, id: &Id) -> super::Result<Option<Discussion>>;

    /// Most recently active first.
    async fn find_by_groups(
        &self,
        groups: &[group::Id],
        limit: i64,
    ) -> super::Result<Vec<Discussion>>;

    /// Appends the message and records its sender as a participant.
    /// Returns `false` when the discussion does not exist.
    async fn append_message(&self, id: &Id, msg: &Message) -> super::Result<bool>;
}

pub struct MongoDiscussionRepository {
    col: mongodb::Collection<Discussion>,
}

impl MongoDiscussionRepository {
    pub fn new(db: &Database) -> Self {
        Self {
            col: db.collection(DISCUSSIONS_COLLECTION),
        }
    }
}

#[async_trait]
impl DiscussionRepository for MongoDiscussionRepository {
    async fn insert(&self, discussion: &Discussion) -> super::Result<()> {
        self.col.insert_one(discussion).await?;
        Ok(())
    }

    async fn find_by_id(&self, id: &Id) -> super::Result<Option<Discussion>> {
        let discussion = self.col.find_one(doc! { "_id": id_filter(id.as_str()) }).await?;
        Ok(discussion)
    }

    async fn find_by_groups(
        &self,
        groups: &[group::Id],
        limit: i64,
    ) -> super::Result<Vec<Discussion>> {
        let ids: Vec<&str> = groups.iter().map(group::Id::as_str).collect();

        let cursor = self
            .col
            .find(doc! { "groupId": { "$in": ids } })
            .sort(doc! { "lastMessageTime": -1 })
            .limit(limit)
            .await?;

        let discussions: Vec<Discussion> = cursor.try_collect().await?;
        Ok(discussions)
    }

    async fn append_message(&self, id: &Id, msg: &Message) -> super::Result<bool> {
        let res = self
            .col
            .update_one(
                doc! { "_id": id_filter(id.as_str()) },
                doc! {
                    "$addToSet": {
                        "messages": to_bson(msg)?,
                        "participants": msg.user_id.as_deref(),
                    },
                    "$set": { "lastMessage": msg.content.as_str() },
                    "$currentDate": { "lastMessageTime": true },
                },
            )
            .await?;

        Ok(res.matched_count > 0)
    }
}
