use std::fmt::Display;
use std::sync::Arc;

use axum::{
    Router,
    routing::{get, post},
};
use repository::UserRepository;
use serde::{Deserialize, Serialize};
use service::UserService;

use crate::state::AppState;

mod handler;
pub mod model;
pub mod password;
pub mod repository;
pub mod service;

pub type Result<T> = std::result::Result<T, Error>;
pub type Repository = Arc<dyn UserRepository + Send + Sync>;
pub type Service = Arc<dyn UserService + Send + Sync>;

pub fn api<S>(s: AppState) -> Router<S> {
    Router::new()
        .route("/signup", post(handler::api::signup))
        .route("/login", post(handler::api::login))
        .route("/updateprofile", post(handler::api::update_profile))
        .route("/getuser/{id}", get(handler::api::find_one))
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
    #[error("All fields except skills are required")]
    MissingSignupFields,
    #[error("Email and password required")]
    MissingCredentials,
    #[error("User ID required")]
    MissingId,
    #[error("User already exists")]
    AlreadyExists,
    #[error("User not found")]
    NotFound,
    #[error("Incorrect password")]
    IncorrectPassword,

    #[error("could not hash password: {0}")]
    _PasswordHash(argon2::password_hash::Error),
    #[error(transparent)]
    _MongoDB(#[from] mongodb::error::Error),
    #[error(transparent)]
    _Bson(#[from] mongodb::bson::ser::Error),
}
