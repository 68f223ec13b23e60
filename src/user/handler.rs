use axum::http::StatusCode;

impl From<super::Error> for StatusCode {
    fn from(e: super::Error) -> Self {
        match e {
            super::Error::MissingSignupFields
            | super::Error::MissingCredentials
            | super::Error::MissingId => Self::BAD_REQUEST,
            super::Error::AlreadyExists => Self::CONFLICT,
            super::Error::NotFound => Self::NOT_FOUND,
            super::Error::IncorrectPassword => Self::UNAUTHORIZED,
            super::Error::_PasswordHash(_)
            | super::Error::_MongoDB(_)
            | super::Error::_Bson(_) => Self::INTERNAL_SERVER_ERROR,
        }
    }
}

pub(super) mod api {
    use axum::extract::{Path, State};
    use serde::Deserialize;
    use serde_json::{Map, Value, json};

    use crate::extract::Json;
    use crate::json::{lenient, present};
    use crate::user::{
        self,
        model::{ProfileUpdate, Signup},
    };

    #[derive(Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct SignupParams {
        email: Option<String>,
        password: Option<String>,
        full_name: Option<String>,
        university: Option<String>,
        branch: Option<String>,
        #[serde(default, deserialize_with = "lenient")]
        academic_year: Option<String>,
        #[serde(default)]
        skills: Vec<String>,
    }

    impl TryFrom<SignupParams> for Signup {
        type Error = user::Error;

        fn try_from(p: SignupParams) -> Result<Self, Self::Error> {
            let required = |v: Option<String>| v.filter(|v| !v.is_empty());

            match (
                required(p.email),
                required(p.password),
                required(p.full_name),
                required(p.university),
                required(p.branch),
                required(p.academic_year),
            ) {
                (
                    Some(email),
                    Some(password),
                    Some(full_name),
                    Some(university),
                    Some(branch),
                    Some(academic_year),
                ) => Ok(Signup {
                    email,
                    password,
                    full_name,
                    university,
                    branch,
                    academic_year,
                    skills: p.skills,
                }),
                _ => Err(user::Error::MissingSignupFields),
            }
        }
    }

    pub async fn signup(
        user_service: State<user::Service>,
        Json(params): Json<SignupParams>,
    ) -> crate::Result<Json<Value>> {
        let signup = Signup::try_from(params)?;
        let profile = user_service.signup(signup).await?;

        Ok(Json(json!({
            "success": true,
            "message": "Account created successfully!",
            "user": profile,
        })))
    }

    #[derive(Deserialize)]
    pub struct LoginParams {
        email: Option<String>,
        password: Option<String>,
    }

    pub async fn login(
        user_service: State<user::Service>,
        Json(params): Json<LoginParams>,
    ) -> crate::Result<Json<Value>> {
        let (email, password) = match (params.email, params.password) {
            (Some(e), Some(p)) if !e.is_empty() && !p.is_empty() => (e, p),
            _ => return Err(user::Error::MissingCredentials.into()),
        };

        let profile = user_service.login(&email, &password).await?;

        Ok(Json(json!({ "success": true, "user": profile })))
    }

    #[derive(Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct UpdateParams {
        #[serde(default, deserialize_with = "lenient")]
        user_id: Option<String>,
        #[serde(flatten)]
        fields: Map<String, Value>,
    }

    pub async fn update_profile(
        user_service: State<user::Service>,
        Json(params): Json<UpdateParams>,
    ) -> crate::Result<Json<Value>> {
        let id = present(params.user_id.as_deref())
            .map(user::Id::from)
            .ok_or(user::Error::MissingId)?;

        let update = ProfileUpdate::from_json(params.fields)?;
        user_service.update_profile(&id, &update).await?;

        Ok(Json(json!({ "success": true })))
    }

    pub async fn find_one(
        user_service: State<user::Service>,
        Path(id): Path<String>,
    ) -> crate::Result<Json<Value>> {
        let profile = user_service.find_profile(&user::Id::from(id)).await?;

        Ok(Json(json!({ "success": true, "user": profile })))
    }
}
