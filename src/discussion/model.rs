use mongodb::bson::DateTime;
use serde::{Deserialize, Serialize};

use super::Id;
use crate::json;
use crate::{group, user};

#[derive(Serialize, Deserialize, Clone, Debug)]
#[serde(rename_all = "camelCase")]
pub struct Discussion {
    #[serde(rename = "_id", with = "crate::json::object_id")]
    pub id: Id,
    #[serde(default)]
    pub room_name: Option<String>,
    #[serde(default)]
    pub topic: String,
    #[serde(default, deserialize_with = "json::lenient")]
    pub created_by: Option<String>,
    #[serde(default)]
    pub created_by_name: Option<String>,
    #[serde(default, deserialize_with = "json::lenient_list")]
    pub participants: Vec<String>,
    #[serde(default)]
    pub messages: Vec<Message>,
    #[serde(default)]
    pub last_message: String,
    #[serde(default)]
    pub last_message_time: Option<DateTime>,
    #[serde(default, deserialize_with = "json::lenient")]
    pub group_id: Option<String>,
    #[serde(default)]
    pub group_name: String,
    #[serde(default)]
    pub created_at: Option<DateTime>,
}

impl Discussion {
    pub fn new(d: NewDiscussion, group: &group::model::Group) -> Self {
        let now = DateTime::now();

        Self {
            id: Id::random(),
            room_name: Some(d.room_name),
            topic: d.topic,
            created_by: Some(d.creator.0.clone()),
            created_by_name: d.creator_name,
            participants: vec![d.creator.0],
            messages: vec![],
            last_message: String::new(),
            last_message_time: Some(now),
            group_id: Some(group.id.0.clone()),
            group_name: group.project_name.clone().unwrap_or_default(),
            created_at: Some(now),
        }
    }

    pub fn group(&self) -> Option<group::Id> {
        json::present(self.group_id.as_deref()).map(group::Id::from)
    }
}

/// Embedded in [`Discussion::messages`].
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Message {
    #[serde(default)]
    pub message_id: Option<String>,
    #[serde(default, deserialize_with = "json::lenient")]
    pub user_id: Option<String>,
    #[serde(default)]
    pub user_name: Option<String>,
    #[serde(default)]
    pub user_photo: String,
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub timestamp: Option<String>,
}

impl Message {
    pub fn new(discussion: &Id, m: NewMessage) -> Self {
        let now = chrono::Utc::now();

        Self {
            // second resolution: two messages in the same second share an id
            message_id: Some(format!("{discussion}_msg_{}", now.timestamp())),
            user_id: Some(m.sender.0),
            user_name: m.sender_name,
            user_photo: m.sender_photo,
            content: m.content,
            timestamp: Some(now.to_rfc3339()),
        }
    }
}

#[derive(Clone, Debug)]
pub struct NewDiscussion {
    pub room_name: String,
    pub topic: String,
    pub group: group::Id,
    pub creator: user::Id,
    pub creator_name: Option<String>,
}

#[derive(Clone, Debug)]
pub struct NewMessage {
    pub sender: user::Id,
    pub sender_name: Option<String>,
    pub sender_photo: String,
    pub content: String,
}

#[derive(Serialize, Clone, Debug)]
#[serde(rename_all = "camelCase")]
pub struct DiscussionDto {
    #[serde(rename = "discussionId")]
    pub id: Id,
    pub room_name: Option<String>,
    pub topic: String,
    pub participants: Vec<String>,
    pub last_message: String,
    pub last_message_time: String,
    pub created_by: Option<String>,
    pub created_by_name: String,
    pub group_id: Option<String>,
    pub group_name: String,
    pub created_at: String,
}

impl From<Discussion> for DiscussionDto {
    fn from(d: Discussion) -> Self {
        Self {
            id: d.id,
            room_name: d.room_name,
            topic: d.topic,
            participants: d.participants,
            last_message: d.last_message,
            last_message_time: json::timestamp(d.last_message_time),
            created_by: d.created_by,
            created_by_name: d.created_by_name.unwrap_or_default(),
            group_id: d.group_id,
            group_name: d.group_name,
            created_at: json::timestamp(d.created_at),
        }
    }
}

/// Reply of `/getmessages`.
#[derive(Serialize, Clone, Debug)]
#[serde(rename_all = "camelCase")]
pub struct Room {
    pub messages: Vec<Message>,
    pub room_name: Option<String>,
    pub topic: String,
    pub group_name: String,
}

impl From<Discussion> for Room {
    fn from(d: Discussion) -> Self {
        Self {
            messages: d.messages,
            room_name: d.room_name,
            topic: d.topic,
            group_name: d.group_name,
        }
    }
}
