use axum::http::StatusCode;

impl From<super::Error> for StatusCode {
    fn from(e: super::Error) -> Self {
        match e {
            super::Error::_MongoDB(_) => Self::INTERNAL_SERVER_ERROR,
        }
    }
}

pub(super) mod api {
    use axum::extract::State;
    use serde_json::{Value, json};

    use crate::extract::Json;
    use crate::post::{self, model::NewPost};

    pub async fn create(
        post_service: State<post::Service>,
        Json(params): Json<NewPost>,
    ) -> crate::Result<Json<Value>> {
        let id = post_service.create(params).await?;

        Ok(Json(json!({
            "success": true,
            "message": "Post created successfully!",
            "postId": id,
        })))
    }

    pub async fn find_feed(post_service: State<post::Service>) -> crate::Result<Json<Value>> {
        let posts = post_service.find_feed().await?;

        Ok(Json(json!({ "success": true, "posts": posts })))
    }
}
