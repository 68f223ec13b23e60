use axum::http::StatusCode;

impl From<super::Error> for StatusCode {
    fn from(e: super::Error) -> Self {
        match e {
            super::Error::MissingProjectName
            | super::Error::MissingMembership
            | super::Error::MissingUserId => Self::BAD_REQUEST,
            super::Error::NotFound(_) => Self::NOT_FOUND,
            super::Error::_MongoDB(_) => Self::INTERNAL_SERVER_ERROR,
        }
    }
}

pub(super) mod api {
    use axum::extract::State;
    use serde::Deserialize;
    use serde_json::{Value, json};

    use crate::extract::{Json, Query};
    use crate::group::{self, model::NewGroup};
    use crate::json::{lenient, present};
    use crate::user;

    #[derive(Deserialize, Default)]
    #[serde(rename_all = "camelCase")]
    pub struct ViewerParams {
        #[serde(default, deserialize_with = "lenient")]
        user_id: Option<String>,
    }

    impl ViewerParams {
        fn viewer(&self) -> Option<user::Id> {
            present(self.user_id.as_deref()).map(user::Id::from)
        }
    }

    pub async fn find_all(
        group_service: State<group::Service>,
        Query(params): Query<ViewerParams>,
    ) -> crate::Result<Json<Value>> {
        let groups = group_service.find_all(params.viewer().as_ref()).await?;

        Ok(Json(json!({ "success": true, "groups": groups })))
    }

    /// POST variant: the viewer comes from the body, or from the query
    /// string when the body is empty.
    pub async fn find_all_by_body(
        group_service: State<group::Service>,
        Query(query): Query<ViewerParams>,
        body: Option<Json<ViewerParams>>,
    ) -> crate::Result<Json<Value>> {
        let params = body.map(|Json(b)| b).unwrap_or(query);
        let groups = group_service.find_all(params.viewer().as_ref()).await?;

        Ok(Json(json!({ "success": true, "groups": groups })))
    }

    #[derive(Deserialize)]
    pub struct CreateParams {
        #[serde(default, deserialize_with = "lenient")]
        creatoruserid: Option<String>,
        project_name: Option<String>,
        #[serde(default)]
        description_objective: String,
        #[serde(default, deserialize_with = "lenient")]
        preferred_team_size: Option<String>,
        #[serde(default)]
        required_skills: Vec<String>,
        #[serde(default)]
        project_timeline: String,
    }

    pub async fn create(
        group_service: State<group::Service>,
        Json(params): Json<CreateParams>,
    ) -> crate::Result<Json<Value>> {
        let project_name = params
            .project_name
            .filter(|n| !n.is_empty())
            .ok_or(group::Error::MissingProjectName)?;

        let id = group_service
            .create(NewGroup {
                creator: present(params.creatoruserid.as_deref()).map(user::Id::from),
                project_name,
                description_objective: params.description_objective,
                preferred_team_size: params.preferred_team_size,
                required_skills: params.required_skills,
                project_timeline: params.project_timeline,
            })
            .await?;

        Ok(Json(json!({
            "success": true,
            "message": "Group created successfully!",
            "groupId": id,
        })))
    }

    #[derive(Deserialize)]
    pub struct MembershipParams {
        #[serde(default, deserialize_with = "lenient")]
        user_id: Option<String>,
        #[serde(default, deserialize_with = "lenient")]
        group_id: Option<String>,
    }

    impl MembershipParams {
        fn ids(&self) -> Result<(group::Id, user::Id), group::Error> {
            match (
                present(self.group_id.as_deref()),
                present(self.user_id.as_deref()),
            ) {
                (Some(g), Some(u)) => Ok((group::Id::from(g), user::Id::from(u))),
                _ => Err(group::Error::MissingMembership),
            }
        }
    }

    pub async fn join(
        group_service: State<group::Service>,
        Json(params): Json<MembershipParams>,
    ) -> crate::Result<Json<Value>> {
        let (group_id, user_id) = params.ids()?;
        group_service.join(&group_id, &user_id).await?;

        Ok(Json(json!({ "success": true, "message": "Joined successfully!" })))
    }

    pub async fn leave(
        group_service: State<group::Service>,
        Json(params): Json<MembershipParams>,
    ) -> crate::Result<Json<Value>> {
        let (group_id, user_id) = params.ids()?;
        group_service.leave(&group_id, &user_id).await?;

        Ok(Json(json!({ "success": true, "message": "Left group successfully!" })))
    }

    pub async fn find_mine(
        group_service: State<group::Service>,
        Query(params): Query<ViewerParams>,
    ) -> crate::Result<Json<Value>> {
        let user_id = params.viewer().ok_or(group::Error::MissingUserId)?;
        let groups = group_service.find_member_groups(&user_id).await?;

        Ok(Json(json!({ "success": true, "groups": groups })))
    }
}
