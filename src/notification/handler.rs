use axum::http::StatusCode;

impl From<super::Error> for StatusCode {
    fn from(e: super::Error) -> Self {
        match e {
            super::Error::MissingUserId => Self::BAD_REQUEST,
            super::Error::_Group(e) => e.into(),
        }
    }
}

pub(super) mod api {
    use axum::extract::State;
    use serde::Deserialize;
    use serde_json::{Value, json};

    use crate::extract::{Json, Query};
    use crate::json::{lenient, present};
    use crate::{notification, user};

    #[derive(Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct Params {
        #[serde(default, deserialize_with = "lenient")]
        user_id: Option<String>,
    }

    pub async fn find_all(
        notification_service: State<notification::Service>,
        Query(params): Query<Params>,
    ) -> crate::Result<Json<Value>> {
        let user_id = present(params.user_id.as_deref())
            .map(user::Id::from)
            .ok_or(notification::Error::MissingUserId)?;

        let notifications = notification_service.find_all(&user_id).await?;

        Ok(Json(json!({ "success": true, "notifications": notifications })))
    }
}
