use std::fmt::Display;
use std::sync::Arc;

use axum::{
    Router,
    routing::{get, post},
};
use repository::QuestionRepository;
use serde::{Deserialize, Serialize};
use service::QuestionService;

use crate::state::AppState;

mod handler;
pub mod model;
pub mod repository;
pub mod service;

pub type Result<T> = std::result::Result<T, Error>;
pub type Repository = Arc<dyn QuestionRepository + Send + Sync>;
pub type Service = Arc<dyn QuestionService + Send + Sync>;

pub fn api<S>(s: AppState) -> Router<S> {
    Router::new()
        .route("/createquestion", post(handler::api::create))
        .route("/getquestions", get(handler::api::find_page))
        .route("/addanswer", post(handler::api::add_answer))
        .route("/votequestion", post(handler::api::vote))
        .route("/acceptanswer", post(handler::api::accept_answer))
        .route("/voteanswer", post(handler::api::vote_answer))
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
    #[error("Question title must be at least 10 characters")]
    ShortTitle,
    #[error("Question ID required")]
    MissingId,
    #[error("Answer must be at least 5 characters")]
    ShortAnswer,
    #[error("Question ID and vote type required")]
    MissingVote,
    #[error("Question ID, Answer ID, and User ID required")]
    MissingAcceptance,
    #[error("Question ID, Answer ID, and vote type required")]
    MissingAnswerVote,
    #[error("Vote type must be 'up' or 'down'")]
    InvalidVote(String),
    #[error("Question not found")]
    NotFound(Id),
    #[error("Unauthorized: You can only accept answers for your questions")]
    NotAuthor,

    #[error(transparent)]
    _MongoDB(#[from] mongodb::error::Error),
    #[error(transparent)]
    _Bson(#[from] mongodb::bson::ser::Error),
}
