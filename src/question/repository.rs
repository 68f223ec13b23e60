use async_trait::async_trait;
use futures::TryStreamExt;
use mongodb::Database;
use mongodb::bson::{Document, doc, to_bson};
use mongodb::options::ReturnDocument;

use super::Id;
use super::model::{Answer, Order, Question, QuestionQuery};
use crate::json::id_filter;
use crate::user;

const QUESTIONS_COLLECTION: &str = "questions";

#[async_trait]
pub trait QuestionRepository {
    async fn insert(&self, question: &Question) -> super::Result<()>;

    async fn find_by_id(&self, id: &Id) -> super::Result<Option<Question>>;

    /// One page of matching questions plus the number of all matches.
    async fn find_page(&self, query: &QuestionQuery) -> super::Result<(Vec<Question>, u64)>;

    /// Returns `false` when the question does not exist.
    async fn add_answer(&self, id: &Id, answer: &Answer) -> super::Result<bool>;

    /// Returns `false` when the question does not exist.
    async fn vote(&self, id: &Id, delta: i32) -> super::Result<bool>;

    /// Marks one answer accepted and every other one not, in a single write.
    /// Yields the updated question, or `None` when `author` does not own it
    /// or it has no answers array to update.
    async fn accept_answer(
        &self,
        id: &Id,
        answer_id: &str,
        author: &user::Id,
    ) -> super::Result<Option<Question>>;

    /// Returns `false` when no such question/answer pair exists.
    async fn vote_answer(&self, id: &Id, answer_id: &str, delta: i32) -> super::Result<bool>;
}

pub struct MongoQuestionRepository {
    col: mongodb::Collection<Question>,
}

impl MongoQuestionRepository {
    pub fn new(db: &Database) -> Self {
        Self {
            col: db.collection(QUESTIONS_COLLECTION),
        }
    }
}

fn search_filter(query: &QuestionQuery) -> Document {
    match &query.tag {
        Some(tag) => doc! { "tags": tag },
        None => doc! {},
    }
}

fn sort(order: Order) -> Document {
    match order {
        Order::MostVoted => doc! { "votes": -1, "_id": -1 },
        Order::Recent => doc! { "createdAt": -1, "_id": -1 },
    }
}

#[async_trait]
impl QuestionRepository for MongoQuestionRepository {
    async fn insert(&self, question: &Question) -> super::Result<()> {
        self.col.insert_one(question).await?;
        Ok(())
    }

    async fn find_by_id(&self, id: &Id) -> super::Result<Option<Question>> {
        let question = self.col.find_one(doc! { "_id": id_filter(id.as_str()) }).await?;
        Ok(question)
    }

    async fn find_page(&self, query: &QuestionQuery) -> super::Result<(Vec<Question>, u64)> {
        let filter = search_filter(query);
        let total = self.col.count_documents(filter.clone()).await?;

        let cursor = self
            .col
            .find(filter)
            .sort(sort(query.order))
            .skip(query.page.skip())
            .limit(query.page.limit as i64)
            .await?;

        let questions: Vec<Question> = cursor.try_collect().await?;
        Ok((questions, total))
    }

    async fn add_answer(&self, id: &Id, answer: &Answer) -> super::Result<bool> {
        let res = self
            .col
            .update_one(
                doc! { "_id": id_filter(id.as_str()) },
                doc! { "$addToSet": { "answers": to_bson(answer)? } },
            )
            .await?;

        Ok(res.matched_count > 0)
    }

    async fn vote(&self, id: &Id, delta: i32) -> super::Result<bool> {
        let res = self
            .col
            .update_one(
                doc! { "_id": id_filter(id.as_str()) },
                doc! { "$inc": { "votes": delta } },
            )
            .await?;

        Ok(res.matched_count > 0)
    }

    async fn accept_answer(
        &self,
        id: &Id,
        answer_id: &str,
        author: &user::Id,
    ) -> super::Result<Option<Question>> {
        let question = self
            .col
            .find_one_and_update(
                doc! {
                    "_id": id_filter(id.as_str()),
                    "userId": author.as_str(),
                    "answers": { "$type": "array" },
                },
                doc! { "$set": {
                    "answers.$[accepted].accepted": true,
                    "answers.$[other].accepted": false,
                }},
            )
            .array_filters(vec![
                doc! { "accepted.answerId": answer_id },
                doc! { "other.answerId": { "$ne": answer_id } },
            ])
            .return_document(ReturnDocument::After)
            .await?;

        Ok(question)
    }

    async fn vote_answer(&self, id: &Id, answer_id: &str, delta: i32) -> super::Result<bool> {
        let res = self
            .col
            .update_one(
                doc! { "_id": id_filter(id.as_str()), "answers.answerId": answer_id },
                doc! { "$inc": { "answers.$.votes": delta } },
            )
            .await?;

        Ok(res.matched_count > 0)
    }
}
