use mongodb::bson::{self, Bson, DateTime, Document};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::Id;

pub const DEFAULT_BIO: &str =
    "Passionate student focused on learning and building innovative projects.";

#[derive(Serialize, Deserialize, Clone, Debug)]
#[serde(rename_all = "camelCase")]
pub struct User {
    #[serde(rename = "_id", with = "crate::json::object_id")]
    pub id: Id,
    pub email: String,
    #[serde(default)]
    pub password: String,
    #[serde(default)]
    pub university: String,
    #[serde(default)]
    pub branch: String,
    #[serde(default)]
    pub academic_year: String,
    // editable through /updateprofile, which stores whatever type it is sent
    #[serde(default)]
    pub full_name: Bson,
    #[serde(default)]
    pub skills: Bson,
    #[serde(default)]
    pub profile_photo_url: Bson,
    #[serde(default)]
    pub cover_photo_url: Bson,
    #[serde(default)]
    pub bio: Bson,
    #[serde(default)]
    pub created_at: Option<DateTime>,
}

impl User {
    pub fn new(signup: Signup, password_hash: String) -> Self {
        Self {
            id: Id::random(),
            email: signup.email,
            password: password_hash,
            university: signup.university,
            branch: signup.branch,
            academic_year: signup.academic_year,
            full_name: Bson::String(signup.full_name),
            skills: Bson::from(signup.skills),
            profile_photo_url: Bson::String(String::new()),
            cover_photo_url: Bson::String(String::new()),
            bio: Bson::String(DEFAULT_BIO.to_owned()),
            created_at: Some(DateTime::now()),
        }
    }
}

/// Validated signup input, password still in plain text.
#[derive(Clone, Debug)]
pub struct Signup {
    pub email: String,
    pub password: String,
    pub full_name: String,
    pub university: String,
    pub branch: String,
    pub academic_year: String,
    pub skills: Vec<String>,
}

/// Keys `/updateprofile` may write.
pub const EDITABLE: [&str; 5] = ["fullName", "bio", "profilePhotoUrl", "coverPhotoUrl", "skills"];

/// Whitelisted profile fields, values kept exactly as sent (`null` included).
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ProfileUpdate(Document);

impl ProfileUpdate {
    /// Drops every key outside [`EDITABLE`].
    pub fn from_json(fields: Map<String, Value>) -> super::Result<Self> {
        let mut set = Document::new();
        for (key, value) in fields {
            if EDITABLE.contains(&key.as_str()) {
                set.insert(key, bson::to_bson(&value)?);
            }
        }
        Ok(Self(set))
    }

    pub fn fields(&self) -> &Document {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// What clients get to see of a user: never the password hash.
#[derive(Serialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Profile {
    pub id: Id,
    pub email: String,
    pub full_name: Bson,
    pub university: String,
    pub branch: String,
    pub academic_year: String,
    pub skills: Bson,
    pub profile_photo_url: Bson,
    pub cover_photo_url: Bson,
    pub bio: Bson,
}

impl From<User> for Profile {
    fn from(u: User) -> Self {
        Self {
            id: u.id,
            email: u.email,
            full_name: u.full_name,
            university: u.university,
            branch: u.branch,
            academic_year: u.academic_year,
            skills: u.skills,
            profile_photo_url: u.profile_photo_url,
            cover_photo_url: u.cover_photo_url,
            bio: u.bio,
        }
    }
}
