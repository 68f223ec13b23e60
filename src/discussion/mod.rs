use std::fmt::Display;
use std::sync::Arc;

use axum::{
    Router,
    routing::{get, post},
};
use repository::DiscussionRepository;
use serde::{Deserialize, Serialize};
use service::DiscussionService;

use crate::group;
use crate::state::AppState;

mod handler;
pub mod model;
pub mod repository;
pub mod service;

pub type Result<T> = std::result::Result<T, Error>;
pub type Repository = Arc<dyn DiscussionRepository + Send + Sync>;
pub type Service = Arc<dyn DiscussionService + Send + Sync>;

/// Most discussions returned by `/getdiscussions`.
pub const LIST_LIMIT: i64 = 50;

pub fn api<S>(s: AppState) -> Router<S> {
    Router::new()
        .route("/getdiscussions", get(handler::api::find_all))
        .route("/creatediscussion", post(handler::api::create))
        .route("/getmessages/{id}", get(handler::api::find_messages))
        .route("/sendmessage", post(handler::api::send_message))
        .with_state(s)
}

#[derive(Clone, Debug, Deserialize, Serialize, Hash, PartialEq, Eq)]
pub struct Id(pub String);

impl Id {
    pub fn random() -> Self {
        Self(mongodb::bson::oid::ObjectId::new().to_hex())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for Id {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl From<String> for Id {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for Id {
    fn from(s: &str) -> Self {
        Self(s.to_owned())
    }
}

impl Display for Id {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("User ID required")]
    MissingUserId,
    #[error("Room name, group ID, and user ID required")]
    MissingRoomFields,
    #[error("Discussion ID and User ID required")]
    MissingMessageFields,
    #[error("Discussion not found")]
    NotFound(Id),
    #[error("You are not a member of this group")]
    NotGroupMember,
    #[error("Access denied")]
    AccessDenied,
    /// The discussion outlived its group.
    #[error("Group not found")]
    GroupGone(group::Id),

    #[error(transparent)]
    _Group(#[from] group::Error),
    #[error(transparent)]
    _MongoDB(#[from] mongodb::error::Error),
    #[error(transparent)]
    _Bson(#[from] mongodb::bson::ser::Error),
}
