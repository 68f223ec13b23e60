use async_trait::async_trait;
use log::{debug, info};

use super::model::{
    Answer, AnswerDto, NewAnswer, NewQuestion, Pagination, Question, QuestionDto, QuestionQuery,
    Vote,
};
use super::{Id, Repository};
use crate::user;

#[async_trait]
pub trait QuestionService {
    async fn create(&self, q: NewQuestion) -> super::Result<Id>;

    async fn find_page(
        &self,
        query: &QuestionQuery,
    ) -> super::Result<(Vec<QuestionDto>, Pagination)>;

    async fn add_answer(&self, id: &Id, a: NewAnswer) -> super::Result<()>;

    async fn vote(&self, id: &Id, vote: Vote) -> super::Result<()>;

    /// Returns the question's answers after the change.
    async fn accept_answer(
        &self,
        id: &Id,
        answer_id: &str,
        requester: &user::Id,
    ) -> super::Result<Vec<AnswerDto>>;

    async fn vote_answer(&self, id: &Id, answer_id: &str, vote: Vote) -> super::Result<()>;
}

#[derive(Clone)]
pub struct QuestionServiceImpl {
    repo: Repository,
}

impl QuestionServiceImpl {
    pub fn new(repo: Repository) -> Self {
        Self { repo }
    }

    async fn ensure_exists(&self, id: &Id) -> super::Result<Question> {
        self.repo
            .find_by_id(id)
            .await?
            .ok_or(super::Error::NotFound(id.to_owned()))
    }
}

#[async_trait]
impl QuestionService for QuestionServiceImpl {
    async fn create(&self, q: NewQuestion) -> super::Result<Id> {
        let question = Question::new(q.validate()?);
        self.repo.insert(&question).await?;

        let title = question.title.as_deref().unwrap_or_default();
        info!(
            "question created: {} | id: {}",
            title.chars().take(50).collect::<String>(),
            question.id
        );
        Ok(question.id)
    }

    async fn find_page(
        &self,
        query: &QuestionQuery,
    ) -> super::Result<(Vec<QuestionDto>, Pagination)> {
        debug!("finding questions: {query:?}");

        let (questions, total) = self.repo.find_page(query).await?;
        let pagination = Pagination::new(query.page, total);

        info!(
            "retrieved {} of {total} questions (page {}/{})",
            questions.len(),
            pagination.current_page,
            pagination.total_pages
        );
        Ok((
            questions.into_iter().map(QuestionDto::from).collect(),
            pagination,
        ))
    }

    async fn add_answer(&self, id: &Id, a: NewAnswer) -> super::Result<()> {
        let answer = Answer::new(id, a.validate()?);

        if !self.repo.add_answer(id, &answer).await? {
            return Err(super::Error::NotFound(id.to_owned()));
        }

        info!("answer added to question {id}");
        Ok(())
    }

    async fn vote(&self, id: &Id, vote: Vote) -> super::Result<()> {
        if !self.repo.vote(id, vote.delta()).await? {
            return Err(super::Error::NotFound(id.to_owned()));
        }

        info!("vote recorded for question {id}: {vote}");
        Ok(())
    }

    async fn accept_answer(
        &self,
        id: &Id,
        answer_id: &str,
        requester: &user::Id,
    ) -> super::Result<Vec<AnswerDto>> {
        match self.repo.accept_answer(id, answer_id, requester).await? {
            Some(question) => {
                info!("answer {answer_id} accepted for question {id}");
                Ok(AnswerDto::all(&question.id, question.answers))
            }
            None => {
                let question = self.ensure_exists(id).await?;
                if question.user_id.as_deref() != Some(requester.as_str()) {
                    return Err(super::Error::NotAuthor);
                }

                // stored without an answers array: nothing to accept
                debug!("question {id} has no answers to accept");
                Ok(AnswerDto::all(&question.id, question.answers))
            }
        }
    }

    async fn vote_answer(&self, id: &Id, answer_id: &str, vote: Vote) -> super::Result<()> {
        if self.repo.vote_answer(id, answer_id, vote.delta()).await? {
            info!("answer {answer_id} voted {vote}");
            return Ok(());
        }

        // unknown answer on an existing question is accepted silently
        self.ensure_exists(id).await?;
        debug!("no answer {answer_id} on question {id}");
        Ok(())
    }
}
