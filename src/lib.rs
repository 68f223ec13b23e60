use std::path::Path;

use axum::{Router, middleware};
use tower_http::cors::CorsLayer;
use tower_http::services::{ServeDir, ServeFile};
use tower_http::trace::TraceLayer;

use crate::integration::Env;
use crate::state::AppState;

pub mod discussion;
mod error;
mod extract;
pub mod group;
mod handler;
pub mod integration;
pub mod json;
pub mod notification;
pub mod post;
pub mod question;
pub mod state;
pub mod user;

pub use error::Error;

pub type Result<T> = std::result::Result<T, Error>;

pub const FRONTPAGE: &str = "frontpage.html";

/// Every API route, with static files from `static_root` behind them.
/// Paths that climb out of `static_root` are rejected by `ServeDir`;
/// dotfiles and credentials inside it are never served.
pub fn app(state: AppState, env: &Env, static_root: &Path) -> Router {
    let statics = Router::new()
        .route_service("/", ServeFile::new(static_root.join(FRONTPAGE)))
        .fallback_service(ServeDir::new(static_root))
        .layer(middleware::from_fn(handler::hide_private));

    Router::new()
        .merge(handler::api(state.clone()))
        .merge(user::api(state.clone()))
        .merge(group::api(state.clone()))
        .merge(post::api(state.clone()))
        .merge(question::api(state.clone()))
        .merge(discussion::api(state.clone()))
        .merge(notification::api(state))
        .merge(statics)
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(env.allow_origin())
                .allow_methods(env.allow_methods())
                .allow_headers(env.allow_headers()),
        )
}
