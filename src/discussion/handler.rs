use axum::http::StatusCode;

impl From<super::Error> for StatusCode {
    fn from(e: super::Error) -> Self {
        match e {
            super::Error::MissingUserId
            | super::Error::MissingRoomFields
            | super::Error::MissingMessageFields => Self::BAD_REQUEST,
            super::Error::NotFound(_) => Self::NOT_FOUND,
            super::Error::NotGroupMember
            | super::Error::AccessDenied
            | super::Error::GroupGone(_) => Self::FORBIDDEN,
            super::Error::_Group(e) => e.into(),
            super::Error::_MongoDB(_) | super::Error::_Bson(_) => Self::INTERNAL_SERVER_ERROR,
        }
    }
}

pub(super) mod api {
    use axum::extract::{Path, State};
    use serde::Deserialize;
    use serde_json::{Value, json};

    use crate::discussion::{
        self,
        model::{NewDiscussion, NewMessage},
    };
    use crate::extract::{Json, Query};
    use crate::json::{lenient, present};
    use crate::{group, user};

    #[derive(Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct UserParams {
        #[serde(default, deserialize_with = "lenient")]
        user_id: Option<String>,
    }

    impl UserParams {
        fn user(&self) -> Result<user::Id, discussion::Error> {
            present(self.user_id.as_deref())
                .map(user::Id::from)
                .ok_or(discussion::Error::MissingUserId)
        }
    }

    pub async fn find_all(
        discussion_service: State<discussion::Service>,
        Query(params): Query<UserParams>,
    ) -> crate::Result<Json<Value>> {
        let user_id = params.user()?;
        let discussions = discussion_service.find_all(&user_id).await?;

        Ok(Json(json!({ "success": true, "discussions": discussions })))
    }

    #[derive(Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct CreateParams {
        room_name: Option<String>,
        #[serde(default, deserialize_with = "lenient")]
        group_id: Option<String>,
        #[serde(default, deserialize_with = "lenient")]
        user_id: Option<String>,
        user_name: Option<String>,
        #[serde(default)]
        topic: String,
    }

    pub async fn create(
        discussion_service: State<discussion::Service>,
        Json(params): Json<CreateParams>,
    ) -> crate::Result<Json<Value>> {
        let (room_name, group_id, user_id) = match (
            params.room_name.filter(|r| !r.is_empty()),
            present(params.group_id.as_deref()),
            present(params.user_id.as_deref()),
        ) {
            (Some(r), Some(g), Some(u)) => (r, group::Id::from(g), user::Id::from(u)),
            _ => return Err(discussion::Error::MissingRoomFields.into()),
        };

        let id = discussion_service
            .create(NewDiscussion {
                room_name,
                topic: params.topic,
                group: group_id,
                creator: user_id,
                creator_name: params.user_name,
            })
            .await?;

        Ok(Json(json!({
            "success": true,
            "message": "Discussion created!",
            "discussionId": id,
        })))
    }

    pub async fn find_messages(
        discussion_service: State<discussion::Service>,
        Path(id): Path<String>,
        Query(params): Query<UserParams>,
    ) -> crate::Result<Json<Value>> {
        let user_id = params.user()?;
        let room = discussion_service
            .find_room(&discussion::Id::from(id), &user_id)
            .await?;

        Ok(Json(json!({
            "success": true,
            "messages": room.messages,
            "roomName": room.room_name,
            "topic": room.topic,
            "groupName": room.group_name,
        })))
    }

    #[derive(Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct MessageParams {
        #[serde(default, deserialize_with = "lenient")]
        discussion_id: Option<String>,
        #[serde(default, deserialize_with = "lenient")]
        user_id: Option<String>,
        user_name: Option<String>,
        #[serde(default)]
        user_photo: String,
        #[serde(default)]
        content: String,
    }

    pub async fn send_message(
        discussion_service: State<discussion::Service>,
        Json(params): Json<MessageParams>,
    ) -> crate::Result<Json<Value>> {
        let (id, sender) = match (
            present(params.discussion_id.as_deref()),
            present(params.user_id.as_deref()),
        ) {
            (Some(d), Some(u)) => (discussion::Id::from(d), user::Id::from(u)),
            _ => return Err(discussion::Error::MissingMessageFields.into()),
        };

        discussion_service
            .send_message(
                &id,
                NewMessage {
                    sender,
                    sender_name: params.user_name,
                    sender_photo: params.user_photo,
                    content: params.content,
                },
            )
            .await?;

        Ok(Json(json!({ "success": true })))
    }
}
