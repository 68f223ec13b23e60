use async_trait::async_trait;
use futures::TryStreamExt;
use mongodb::Database;
use mongodb::bson::doc;

use super::model::Post;

const POSTS_COLLECTION: &str = "posts";

#[async_trait]
pub trait PostRepository {
    async fn insert(&self, post: &Post) -> super::Result<()>;

    /// Newest first, at most `limit` posts.
    async fn find_latest(&self, limit: i64) -> super::Result<Vec<Post>>;
}

pub struct MongoPostRepository {
    col: mongodb::Collection<Post>,
}

impl MongoPostRepository {
    pub fn new(db: &Database) -> Self {
        Self {
            col: db.collection(POSTS_COLLECTION),
        }
    }
}

#[async_trait]
impl PostRepository for MongoPostRepository {
    async fn insert(&self, post: &Post) -> super::Result<()> {
        self.col.insert_one(post).await?;
        Ok(())
    }

    async fn find_latest(&self, limit: i64) -> super::Result<Vec<Post>> {
        let cursor = self
            .col
            .find(doc! {})
            .sort(doc! { "createdAt": -1 })
            .limit(limit)
            .await?;

        let posts: Vec<Post> = cursor.try_collect().await?;
        Ok(posts)
    }
}
