use std::sync::Arc;

use axum::extract::{Request, State};
use axum::http::StatusCode;
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use axum::{Json, Router, routing::get};
use percent_encoding::percent_decode_str;
use serde_json::{Value, json};

use crate::integration::db::{CREDENTIALS_FILE, Probe};
use crate::json;
use crate::state::AppState;

const COLLECTIONS: [&str; 5] = ["users", "groups", "posts", "questions", "discussions"];

pub fn api<S>(s: AppState) -> Router<S> {
    Router::new()
        .route("/health", get(health))
        .route("/test", get(test))
        .with_state(s)
}

/// Always 200; store trouble is reported in the body only.
async fn health(probe: State<Arc<dyn Probe + Send + Sync>>) -> Json<Value> {
    let database = if probe.is_connected().await {
        "connected"
    } else {
        "disconnected"
    };

    Json(json!({
        "status": "healthy",
        "database": database,
        "timestamp": json::now(),
    }))
}

async fn test() -> Json<Value> {
    Json(json!({
        "message": "The Huddle API is working with MongoDB!",
        "database": "MongoDB",
        "collections": COLLECTIONS,
        "endpoints": {
            "auth": ["/signup [POST]", "/login [POST]"],
            "profile": ["/updateprofile [POST]", "/getuser/<user_id> [GET]"],
            "groups": [
                "/getavailablegroups [GET/POST]",
                "/creategroup [POST]",
                "/joingroup [POST]",
                "/leavegroup [POST]",
                "/getmygroups [GET]",
            ],
            "posts": ["/createpost [POST]", "/getposts [GET]"],
            "qa": [
                "/createquestion [POST]",
                "/getquestions [GET]",
                "/addanswer [POST]",
                "/votequestion [POST]",
                "/acceptanswer [POST]",
                "/voteanswer [POST]",
            ],
            "discussions": [
                "/getdiscussions [GET]",
                "/creatediscussion [POST]",
                "/getmessages/<id> [GET]",
                "/sendmessage [POST]",
            ],
            "notifications": ["/getnotifications [GET]"],
            "utility": ["/health [GET]", "/test [GET]"],
        }
    }))
}

/// Answers 404 for dotfiles (`.env`, `.git/...`) and the database
/// credentials, wherever they sit under the static root.
pub async fn hide_private(req: Request, next: Next) -> Response {
    if is_private(req.uri().path()) {
        return StatusCode::NOT_FOUND.into_response();
    }
    next.run(req).await
}

fn is_private(path: &str) -> bool {
    let decoded = percent_decode_str(path).decode_utf8_lossy();
    decoded
        .split('/')
        .any(|segment| segment.starts_with('.') || segment == CREDENTIALS_FILE)
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn should_hide_dotfiles_and_credentials() {
        assert!(is_private("/.env"));
        assert!(is_private("/%2eenv"));
        assert!(is_private("/.git/config"));
        assert!(is_private("/mongo-credentials.json"));
        assert!(is_private("/assets/mongo%2Dcredentials.json"));
    }

    #[test]
    fn should_let_regular_assets_through() {
        assert!(!is_private("/"));
        assert!(!is_private("/frontpage.html"));
        assert!(!is_private("/css/app.v2.css"));
    }
}
