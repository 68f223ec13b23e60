use std::sync::Arc;

use axum::{Router, routing::get};
use service::NotificationService;

use crate::group;
use crate::state::AppState;

mod handler;
pub mod model;
pub mod service;

pub type Result<T> = std::result::Result<T, Error>;
pub type Service = Arc<dyn NotificationService + Send + Sync>;

pub fn api<S>(s: AppState) -> Router<S> {
    Router::new()
        .route("/getnotifications", get(handler::api::find_all))
        .with_state(s)
}

#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("User ID required")]
    MissingUserId,

    #[error(transparent)]
    _Group(#[from] group::Error),
}
