use mongodb::bson::{Bson, DateTime};
use serde::{Deserialize, Serialize};

use super::Id;
use crate::json;

#[derive(Serialize, Deserialize, Clone, Debug)]
#[serde(rename_all = "camelCase")]
pub struct Post {
    #[serde(rename = "_id", with = "crate::json::object_id")]
    pub id: Id,
    #[serde(default, deserialize_with = "json::lenient")]
    pub user_id: Option<String>,
    #[serde(default)]
    pub user_name: Option<String>,
    #[serde(default)]
    pub user_photo: String,
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub image_url: String,
    // nothing writes to these yet; kept verbatim for clients
    #[serde(default)]
    pub likes: Vec<Bson>,
    #[serde(default)]
    pub comments: Vec<Bson>,
    #[serde(default)]
    pub created_at: Option<DateTime>,
}

impl Post {
    pub fn new(p: NewPost) -> Self {
        Self {
            id: Id::random(),
            user_id: p.user_id,
            user_name: p.user_name,
            user_photo: p.user_photo,
            content: p.content,
            image_url: p.image_url,
            likes: vec![],
            comments: vec![],
            created_at: Some(DateTime::now()),
        }
    }
}

#[derive(Deserialize, Clone, Debug, Default)]
#[serde(rename_all = "camelCase")]
pub struct NewPost {
    #[serde(default, deserialize_with = "json::lenient")]
    pub user_id: Option<String>,
    #[serde(default)]
    pub user_name: Option<String>,
    #[serde(default)]
    pub user_photo: String,
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub image_url: String,
}

#[derive(Serialize, Clone, Debug)]
#[serde(rename_all = "camelCase")]
pub struct PostDto {
    #[serde(rename = "postId")]
    pub id: Id,
    pub user_id: Option<String>,
    pub user_name: Option<String>,
    pub user_photo: String,
    pub content: String,
    pub image_url: String,
    pub likes: Vec<serde_json::Value>,
    pub comments: Vec<serde_json::Value>,
    pub created_at: String,
}

impl From<Post> for PostDto {
    fn from(p: Post) -> Self {
        Self {
            id: p.id,
            user_id: p.user_id,
            user_name: p.user_name,
            user_photo: p.user_photo,
            content: p.content,
            image_url: p.image_url,
            likes: p.likes.into_iter().map(Bson::into_relaxed_extjson).collect(),
            comments: p
                .comments
                .into_iter()
                .map(Bson::into_relaxed_extjson)
                .collect(),
            created_at: json::timestamp(p.created_at),
        }
    }
}
