use std::fmt::Display;
use std::sync::Arc;

use axum::{
    Router,
    routing::{get, post},
};
use repository::GroupRepository;
use serde::{Deserialize, Serialize};
use service::GroupService;

use crate::state::AppState;

mod handler;
pub mod model;
pub mod repository;
pub mod service;

pub type Result<T> = std::result::Result<T, Error>;
pub type Repository = Arc<dyn GroupRepository + Send + Sync>;
pub type Service = Arc<dyn GroupService + Send + Sync>;

pub fn api<S>(s: AppState) -> Router<S> {
    Router::new()
        .route(
            "/getavailablegroups",
            get(handler::api::find_all).post(handler::api::find_all_by_body),
        )
        .route("/creategroup", post(handler::api::create))
        .route("/joingroup", post(handler::api::join))
        .route("/leavegroup", post(handler::api::leave))
        .route("/getmygroups", get(handler::api::find_mine))
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
    #[error("Project name required")]
    MissingProjectName,
    #[error("User ID and Group ID required")]
    MissingMembership,
    #[error("User ID required")]
    MissingUserId,
    #[error("Group not found")]
    NotFound(Id),

    #[error(transparent)]
    _MongoDB(#[from] mongodb::error::Error),
}
