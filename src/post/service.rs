use async_trait::async_trait;
use log::info;

use super::model::{NewPost, Post, PostDto};
use super::{FEED_LIMIT, Id, Repository};

#[async_trait]
pub trait PostService {
    async fn create(&self, p: NewPost) -> super::Result<Id>;

    async fn find_feed(&self) -> super::Result<Vec<PostDto>>;
}

#[derive(Clone)]
pub struct PostServiceImpl {
    repo: Repository,
}

impl PostServiceImpl {
    pub fn new(repo: Repository) -> Self {
        Self { repo }
    }
}

#[async_trait]
impl PostService for PostServiceImpl {
    async fn create(&self, p: NewPost) -> super::Result<Id> {
        let post = Post::new(p);
        self.repo.insert(&post).await?;

        info!(
            "post created by: {} | id: {}",
            post.user_name.as_deref().unwrap_or_default(),
            post.id
        );
        Ok(post.id)
    }

    async fn find_feed(&self) -> super::Result<Vec<PostDto>> {
        let posts = self.repo.find_latest(FEED_LIMIT).await?;

        info!("retrieved {} posts", posts.len());
        Ok(posts.into_iter().map(PostDto::from).collect())
    }
}
