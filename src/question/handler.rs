use axum::http::StatusCode;

impl From<super::Error> for StatusCode {
    fn from(e: super::Error) -> Self {
        match e {
            super::Error::ShortTitle
            | super::Error::MissingId
            | super::Error::ShortAnswer
            | super::Error::MissingVote
            | super::Error::MissingAcceptance
            | super::Error::MissingAnswerVote
            | super::Error::InvalidVote(_) => Self::BAD_REQUEST,
            super::Error::NotFound(_) => Self::NOT_FOUND,
            super::Error::NotAuthor => Self::FORBIDDEN,
            super::Error::_MongoDB(_) | super::Error::_Bson(_) => Self::INTERNAL_SERVER_ERROR,
        }
    }
}

pub(super) mod api {
    use axum::extract::State;
    use serde::Deserialize;
    use serde_json::{Value, json};

    use crate::extract::{Json, Query};
    use crate::json::{lenient, present};
    use crate::question::{
        self,
        model::{NewAnswer, NewQuestion, Order, Page, QuestionQuery, Vote, search_tag},
    };
    use crate::user;

    #[derive(Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct CreateParams {
        #[serde(default, deserialize_with = "lenient")]
        user_id: Option<String>,
        user_name: Option<String>,
        #[serde(default)]
        user_photo: String,
        #[serde(default)]
        title: String,
        #[serde(default)]
        content: String,
        #[serde(default)]
        tags: Vec<String>,
    }

    pub async fn create(
        question_service: State<question::Service>,
        Json(params): Json<CreateParams>,
    ) -> crate::Result<Json<Value>> {
        let id = question_service
            .create(NewQuestion {
                user_id: present(params.user_id.as_deref()).map(user::Id::from),
                user_name: params.user_name,
                user_photo: params.user_photo,
                title: params.title,
                content: params.content,
                tags: params.tags,
            })
            .await?;

        Ok(Json(json!({
            "success": true,
            "message": "Question posted successfully!",
            "questionId": id,
        })))
    }

    #[derive(Deserialize)]
    pub struct PageParams {
        filter: Option<String>,
        search: Option<String>,
        page: Option<i64>,
        limit: Option<i64>,
    }

    impl From<PageParams> for QuestionQuery {
        fn from(p: PageParams) -> Self {
            Self {
                order: p.filter.as_deref().map(Order::from).unwrap_or_default(),
                tag: p.search.as_deref().and_then(search_tag),
                page: Page::new(p.page, p.limit),
            }
        }
    }

    pub async fn find_page(
        question_service: State<question::Service>,
        Query(params): Query<PageParams>,
    ) -> crate::Result<Json<Value>> {
        let query = QuestionQuery::from(params);
        let (questions, pagination) = question_service.find_page(&query).await?;

        Ok(Json(json!({
            "success": true,
            "questions": questions,
            "pagination": pagination,
        })))
    }

    #[derive(Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct AnswerParams {
        #[serde(default, deserialize_with = "lenient")]
        question_id: Option<String>,
        #[serde(default, deserialize_with = "lenient")]
        user_id: Option<String>,
        user_name: Option<String>,
        #[serde(default)]
        user_photo: String,
        #[serde(default)]
        content: String,
    }

    pub async fn add_answer(
        question_service: State<question::Service>,
        Json(params): Json<AnswerParams>,
    ) -> crate::Result<Json<Value>> {
        let id = present(params.question_id.as_deref())
            .map(question::Id::from)
            .ok_or(question::Error::MissingId)?;

        question_service
            .add_answer(
                &id,
                NewAnswer {
                    user_id: present(params.user_id.as_deref()).map(user::Id::from),
                    user_name: params.user_name,
                    user_photo: params.user_photo,
                    content: params.content,
                },
            )
            .await?;

        Ok(Json(json!({ "success": true, "message": "Answer posted!" })))
    }

    #[derive(Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct VoteParams {
        #[serde(default, deserialize_with = "lenient")]
        question_id: Option<String>,
        #[serde(default, deserialize_with = "lenient")]
        answer_id: Option<String>,
        #[serde(default, deserialize_with = "lenient")]
        user_id: Option<String>,
        vote_type: Option<String>,
    }

    pub async fn vote(
        question_service: State<question::Service>,
        Json(params): Json<VoteParams>,
    ) -> crate::Result<Json<Value>> {
        let (id, vote) = match (
            present(params.question_id.as_deref()),
            params.vote_type.as_deref().filter(|v| !v.is_empty()),
        ) {
            (Some(id), Some(v)) => (question::Id::from(id), Vote::lenient(v)),
            _ => return Err(question::Error::MissingVote.into()),
        };

        question_service.vote(&id, vote).await?;

        Ok(Json(json!({ "success": true })))
    }

    pub async fn accept_answer(
        question_service: State<question::Service>,
        Json(params): Json<VoteParams>,
    ) -> crate::Result<Json<Value>> {
        let (id, answer_id, requester) = match (
            present(params.question_id.as_deref()),
            present(params.answer_id.as_deref()),
            present(params.user_id.as_deref()),
        ) {
            (Some(q), Some(a), Some(u)) => (question::Id::from(q), a, user::Id::from(u)),
            _ => return Err(question::Error::MissingAcceptance.into()),
        };

        let answers = question_service
            .accept_answer(&id, answer_id, &requester)
            .await?;

        Ok(Json(json!({
            "success": true,
            "message": "Answer accepted!",
            "answers": answers,
        })))
    }

    pub async fn vote_answer(
        question_service: State<question::Service>,
        Json(params): Json<VoteParams>,
    ) -> crate::Result<Json<Value>> {
        let (id, answer_id, vote) = match (
            present(params.question_id.as_deref()),
            present(params.answer_id.as_deref()),
            params.vote_type.as_deref().filter(|v| !v.is_empty()),
        ) {
            (Some(q), Some(a), Some(v)) => (question::Id::from(q), a, Vote::strict(v)?),
            _ => return Err(question::Error::MissingAnswerVote.into()),
        };

        question_service.vote_answer(&id, answer_id, vote).await?;

        Ok(Json(json!({
            "success": true,
            "message": format!("Answer {vote}voted!"),
        })))
    }
}
