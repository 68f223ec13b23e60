use std::fmt::Display;
use std::sync::Arc;

use axum::{
    Router,
    routing::{get, post},
};
use repository::PostRepository;
use serde::{Deserialize, Serialize};
use service::PostService;

use crate::state::AppState;

mod handler;
pub mod model;
pub mod repository;
pub mod service;

pub type Result<T> = std::result::Result<T, Error>;
pub type Repository = Arc<dyn PostRepository + Send + Sync>;
pub type Service = Arc<dyn PostService + Send + Sync>;

/// Size of the feed returned by `/getposts`.
pub const FEED_LIMIT: i64 = 50;

pub fn api<S>(s: AppState) -> Router<S> {
    Router::new()
        .route("/createpost", post(handler::api::create))
        .route("/getposts", get(handler::api::find_feed))
        .with_state(s)
}

#[derive(Clone, Debug, Deserialize, Serialize, Hash, PartialEq, Eq)]
pub struct Id(pub String);

impl Id {
    pub fn random() -> Self {
        Self(mongodb::bson::oid::ObjectId::new().to_hex())
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

impl Display for Id {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error(transparent)]
    _MongoDB(#[from] mongodb::error::Error),
}
