use axum::Json;
use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum_extra::extract::QueryRejection;
use log::{error, warn};
use serde_json::json;

use crate::{discussion, group, notification, post, question, user};

#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error(transparent)]
    _User(#[from] user::Error),
    #[error(transparent)]
    _Group(#[from] group::Error),
    #[error(transparent)]
    _Post(#[from] post::Error),
    #[error(transparent)]
    _Question(#[from] question::Error),
    #[error(transparent)]
    _Discussion(#[from] discussion::Error),
    #[error(transparent)]
    _Notification(#[from] notification::Error),

    #[error(transparent)]
    _JsonBody(#[from] JsonRejection),
    #[error(transparent)]
    _Query(#[from] QueryRejection),
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let message = self.to_string();

        let status: StatusCode = match self {
            Self::_User(e) => e.into(),
            Self::_Group(e) => e.into(),
            Self::_Post(e) => e.into(),
            Self::_Question(e) => e.into(),
            Self::_Discussion(e) => e.into(),
            Self::_Notification(e) => e.into(),
            Self::_JsonBody(_) | Self::_Query(_) => StatusCode::BAD_REQUEST,
        };

        // 5xx echoes the raw cause in `details`; existing clients read it
        if status.is_server_error() {
            error!("{message}");
            let body = json!({ "error": "Internal server error", "details": message });
            return (status, Json(body)).into_response();
        }

        warn!("{status}: {message}");
        (status, Json(json!({ "error": message }))).into_response()
    }
}
