use mongodb::bson::DateTime;
use serde::{Deserialize, Serialize};

use super::Id;
use crate::json;
use crate::user;

pub const MIN_TITLE_LEN: usize = 10;
pub const MIN_ANSWER_LEN: usize = 5;
pub const ANONYMOUS: &str = "Anonymous";
pub const UNTITLED: &str = "Untitled Question";

#[derive(Serialize, Deserialize, Clone, Debug)]
#[serde(rename_all = "camelCase")]
pub struct Question {
    #[serde(rename = "_id", with = "crate::json::object_id")]
    pub id: Id,
    #[serde(default, deserialize_with = "json::lenient")]
    pub user_id: Option<String>,
    #[serde(default)]
    pub user_name: Option<String>,
    #[serde(default)]
    pub user_photo: String,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub answers: Vec<Answer>,
    #[serde(default)]
    pub votes: i64,
    #[serde(default)]
    pub views: i64,
    #[serde(default)]
    pub created_at: Option<DateTime>,
}

impl Question {
    pub fn new(q: NewQuestion) -> Self {
        Self {
            id: Id::random(),
            user_id: q.user_id.map(|u| u.0),
            user_name: q.user_name,
            user_photo: q.user_photo,
            title: Some(q.title),
            content: q.content,
            tags: q.tags,
            answers: vec![],
            votes: 0,
            views: 0,
            created_at: Some(DateTime::now()),
        }
    }
}

/// Embedded in [`Question::answers`].
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Answer {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub answer_id: Option<String>,
    #[serde(default, deserialize_with = "json::lenient")]
    pub user_id: Option<String>,
    #[serde(default)]
    pub user_name: Option<String>,
    #[serde(default)]
    pub user_photo: String,
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub votes: i64,
    #[serde(default)]
    pub accepted: bool,
    #[serde(default)]
    pub created_at: Option<String>,
}

impl Answer {
    pub fn new(question: &Id, a: NewAnswer) -> Self {
        let now = chrono::Utc::now();

        Self {
            // second resolution: two answers in the same second share an id
            answer_id: Some(format!("{question}_ans_{}", now.timestamp())),
            user_id: a.user_id.map(|u| u.0),
            user_name: Some(a.user_name.unwrap_or_else(|| ANONYMOUS.to_owned())),
            user_photo: a.user_photo,
            content: a.content,
            votes: 0,
            accepted: false,
            created_at: Some(now.to_rfc3339()),
        }
    }
}

/// Validated question input.
#[derive(Clone, Debug)]
pub struct NewQuestion {
    pub user_id: Option<user::Id>,
    pub user_name: Option<String>,
    pub user_photo: String,
    pub title: String,
    pub content: String,
    pub tags: Vec<String>,
}

impl NewQuestion {
    pub fn validate(self) -> super::Result<Self> {
        let title = self.title.trim();
        if title.chars().count() < MIN_TITLE_LEN {
            return Err(super::Error::ShortTitle);
        }

        Ok(Self {
            title: title.to_owned(),
            content: self.content.trim().to_owned(),
            ..self
        })
    }
}

/// Validated answer input.
#[derive(Clone, Debug)]
pub struct NewAnswer {
    pub user_id: Option<user::Id>,
    pub user_name: Option<String>,
    pub user_photo: String,
    pub content: String,
}

impl NewAnswer {
    pub fn validate(self) -> super::Result<Self> {
        let content = self.content.trim();
        if content.chars().count() < MIN_ANSWER_LEN {
            return Err(super::Error::ShortAnswer);
        }

        Ok(Self {
            content: content.to_owned(),
            ..self
        })
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Vote {
    Up,
    Down,
}

impl Vote {
    /// Anything other than `up` counts as a down vote.
    pub fn lenient(raw: &str) -> Self {
        if raw == "up" { Self::Up } else { Self::Down }
    }

    pub fn strict(raw: &str) -> super::Result<Self> {
        match raw {
            "up" => Ok(Self::Up),
            "down" => Ok(Self::Down),
            other => Err(super::Error::InvalidVote(other.to_owned())),
        }
    }

    pub fn delta(self) -> i32 {
        match self {
            Self::Up => 1,
            Self::Down => -1,
        }
    }
}

impl std::fmt::Display for Vote {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Up => write!(f, "up"),
            Self::Down => write!(f, "down"),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum Order {
    MostVoted,
    #[default]
    Recent,
}

impl From<&str> for Order {
    fn from(s: &str) -> Self {
        if s.eq_ignore_ascii_case("most-voted") {
            Self::MostVoted
        } else {
            Self::Recent
        }
    }
}

/// One lowercase tag to look for; `#` characters are dropped.
pub fn search_tag(raw: &str) -> Option<String> {
    let tag = raw.replace('#', "").trim().to_lowercase();
    (!tag.is_empty()).then_some(tag)
}

pub const DEFAULT_LIMIT: u64 = 5;
pub const MAX_LIMIT: u64 = 100;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Page {
    pub number: u64,
    pub limit: u64,
}

impl Page {
    pub fn new(number: Option<i64>, limit: Option<i64>) -> Self {
        Self {
            number: number.unwrap_or(1).max(1) as u64,
            limit: limit
                .unwrap_or(DEFAULT_LIMIT as i64)
                .clamp(1, MAX_LIMIT as i64) as u64,
        }
    }

    /// Capped at `i64::MAX`, the largest skip the store accepts.
    pub fn skip(&self) -> u64 {
        (self.number - 1)
            .saturating_mul(self.limit)
            .min(i64::MAX as u64)
    }
}

#[derive(Clone, Debug)]
pub struct QuestionQuery {
    pub order: Order,
    pub tag: Option<String>,
    pub page: Page,
}

#[derive(Serialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Pagination {
    pub current_page: u64,
    pub total_pages: u64,
    pub total_items: u64,
    pub items_per_page: u64,
}

impl Pagination {
    pub fn new(page: Page, total_items: u64) -> Self {
        Self {
            current_page: page.number,
            total_pages: total_items.div_ceil(page.limit).max(1),
            total_items,
            items_per_page: page.limit,
        }
    }
}

#[derive(Serialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AnswerDto {
    pub answer_id: String,
    pub user_id: String,
    pub user_name: String,
    pub user_photo: String,
    pub content: String,
    pub votes: i64,
    pub accepted: bool,
    pub created_at: String,
}

impl AnswerDto {
    /// `index` stands in for answers stored without an id.
    pub fn new(question: &Id, index: usize, a: Answer) -> Self {
        Self {
            answer_id: a
                .answer_id
                .unwrap_or_else(|| format!("{question}_ans_{index}")),
            user_id: a.user_id.unwrap_or_default(),
            user_name: a.user_name.unwrap_or_else(|| ANONYMOUS.to_owned()),
            user_photo: a.user_photo,
            content: a.content,
            votes: a.votes,
            accepted: a.accepted,
            created_at: a.created_at.unwrap_or_else(json::now),
        }
    }

    pub fn all(question: &Id, answers: Vec<Answer>) -> Vec<Self> {
        answers
            .into_iter()
            .enumerate()
            .map(|(i, a)| Self::new(question, i, a))
            .collect()
    }
}

#[derive(Serialize, Clone, Debug)]
#[serde(rename_all = "camelCase")]
pub struct QuestionDto {
    #[serde(rename = "questionId")]
    pub id: Id,
    pub user_id: String,
    pub user_name: String,
    pub user_photo: String,
    pub title: String,
    pub content: String,
    pub tags: Vec<String>,
    pub answers: Vec<AnswerDto>,
    pub votes: i64,
    pub views: i64,
    pub created_at: String,
}

impl From<Question> for QuestionDto {
    fn from(q: Question) -> Self {
        Self {
            answers: AnswerDto::all(&q.id, q.answers),
            id: q.id,
            user_id: q.user_id.unwrap_or_default(),
            user_name: q.user_name.unwrap_or_else(|| ANONYMOUS.to_owned()),
            user_photo: q.user_photo,
            title: q.title.unwrap_or_else(|| UNTITLED.to_owned()),
            content: q.content,
            tags: q.tags,
            votes: q.votes,
            views: q.views,
            created_at: json::timestamp(q.created_at),
        }
    }
}
