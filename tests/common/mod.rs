#![allow(dead_code)]

use std::path::Path;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::Router;
use axum::body::{Body, to_bytes};
use axum::http::{Method, Request, StatusCode, header};
use serde_json::Value;
use tower::ServiceExt;

use huddle::discussion::model::{Discussion, Message};
use huddle::discussion::repository::DiscussionRepository;
use huddle::group::model::Group;
use huddle::group::repository::GroupRepository;
use huddle::integration::{Env, db::Probe};
use huddle::post::model::Post;
use huddle::post::repository::PostRepository;
use huddle::question::model::{Answer, Order, Question, QuestionQuery};
use huddle::question::repository::QuestionRepository;
use huddle::state::{AppState, Repositories};
use huddle::user::model::{ProfileUpdate, User};
use huddle::user::repository::UserRepository;
use huddle::{discussion, group, post, question, user};

pub struct InMemory<T>(Mutex<Vec<T>>);

impl<T: Clone> InMemory<T> {
    pub fn new() -> Self {
        Self(Mutex::new(vec![]))
    }

    pub fn all(&self) -> Vec<T> {
        self.0.lock().unwrap().clone()
    }

    pub fn push(&self, item: T) {
        self.0.lock().unwrap().push(item);
    }

    fn find(&self, pred: impl Fn(&T) -> bool) -> Option<T> {
        self.0.lock().unwrap().iter().find(|t| pred(t)).cloned()
    }

    fn update(&self, pred: impl Fn(&T) -> bool, f: impl FnOnce(&mut T)) -> bool {
        let mut items = self.0.lock().unwrap();
        match items.iter_mut().find(|t| pred(t)) {
            Some(t) => {
                f(t);
                true
            }
            None => false,
        }
    }
}

#[async_trait]
impl UserRepository for InMemory<User> {
    async fn insert(&self, user: &User) -> user::Result<()> {
        self.push(user.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: &user::Id) -> user::Result<Option<User>> {
        Ok(self.find(|u| &u.id == id))
    }

    async fn find_by_email(&self, email: &str) -> user::Result<Option<User>> {
        Ok(self.find(|u| u.email == email))
    }

    async fn update_profile(&self, id: &user::Id, update: &ProfileUpdate) -> user::Result<bool> {
        Ok(self.update(
            |u| &u.id == id,
            |u| {
                for (key, value) in update.fields() {
                    let field = match key.as_str() {
                        "fullName" => &mut u.full_name,
                        "bio" => &mut u.bio,
                        "profilePhotoUrl" => &mut u.profile_photo_url,
                        "coverPhotoUrl" => &mut u.cover_photo_url,
                        "skills" => &mut u.skills,
                        _ => continue,
                    };
                    *field = value.clone();
                }
            },
        ))
    }
}

#[async_trait]
impl GroupRepository for InMemory<Group> {
    async fn insert(&self, group: &Group) -> group::Result<()> {
        self.push(group.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: &group::Id) -> group::Result<Option<Group>> {
        Ok(self.find(|g| &g.id == id))
    }

    async fn find_all(&self) -> group::Result<Vec<Group>> {
        let mut groups = self.all();
        groups.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(groups)
    }

    async fn find_by_member(&self, member: &user::Id) -> group::Result<Vec<Group>> {
        Ok(self.all().into_iter().filter(|g| g.is_member(member)).collect())
    }

    async fn add_member(&self, id: &group::Id, member: &user::Id) -> group::Result<()> {
        self.update(
            |g| &g.id == id,
            |g| {
                if !g.members.contains(member) {
                    g.members.push(member.clone());
                }
            },
        );
        Ok(())
    }

    async fn remove_member(&self, id: &group::Id, member: &user::Id) -> group::Result<()> {
        self.update(|g| &g.id == id, |g| g.members.retain(|m| m != member));
        Ok(())
    }
}

#[async_trait]
impl PostRepository for InMemory<Post> {
    async fn insert(&self, post: &Post) -> post::Result<()> {
        self.push(post.clone());
        Ok(())
    }

    async fn find_latest(&self, limit: i64) -> post::Result<Vec<Post>> {
        let mut posts = self.all();
        posts.reverse();
        posts.truncate(limit as usize);
        Ok(posts)
    }
}

#[async_trait]
impl QuestionRepository for InMemory<Question> {
    async fn insert(&self, question: &Question) -> question::Result<()> {
        self.push(question.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: &question::Id) -> question::Result<Option<Question>> {
        Ok(self.find(|q| &q.id == id))
    }

    async fn find_page(&self, query: &QuestionQuery) -> question::Result<(Vec<Question>, u64)> {
        let mut questions: Vec<Question> = self
            .all()
            .into_iter()
            .filter(|q| query.tag.as_ref().is_none_or(|t| q.tags.contains(t)))
            .collect();

        match query.order {
            Order::MostVoted => questions.sort_by(|a, b| b.votes.cmp(&a.votes)),
            Order::Recent => questions.reverse(),
        }

        let total = questions.len() as u64;
        let page = questions
            .into_iter()
            .skip(query.page.skip() as usize)
            .take(query.page.limit as usize)
            .collect();

        Ok((page, total))
    }

    async fn add_answer(&self, id: &question::Id, answer: &Answer) -> question::Result<bool> {
        Ok(self.update(|q| &q.id == id, |q| q.answers.push(answer.clone())))
    }

    async fn vote(&self, id: &question::Id, delta: i32) -> question::Result<bool> {
        Ok(self.update(|q| &q.id == id, |q| q.votes += delta as i64))
    }

    async fn accept_answer(
        &self,
        id: &question::Id,
        answer_id: &str,
        author: &user::Id,
    ) -> question::Result<Option<Question>> {
        let owned = |q: &Question| &q.id == id && q.user_id.as_deref() == Some(author.as_str());

        self.update(owned, |q| {
            for a in q.answers.iter_mut() {
                a.accepted = a.answer_id.as_deref() == Some(answer_id);
            }
        });

        Ok(self.find(owned))
    }

    async fn vote_answer(
        &self,
        id: &question::Id,
        answer_id: &str,
        delta: i32,
    ) -> question::Result<bool> {
        let has_answer = |q: &Question| {
            &q.id == id
                && q.answers
                    .iter()
                    .any(|a| a.answer_id.as_deref() == Some(answer_id))
        };

        Ok(self.update(has_answer, |q| {
            for a in q.answers.iter_mut() {
                if a.answer_id.as_deref() == Some(answer_id) {
                    a.votes += delta as i64;
                }
            }
        }))
    }
}

#[async_trait]
impl DiscussionRepository for InMemory<Discussion> {
    async fn insert(&self, discussion: &Discussion) -> discussion::Result<()> {
        self.push(discussion.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: &discussion::Id) -> discussion::Result<Option<Discussion>> {
        Ok(self.find(|d| &d.id == id))
    }

    async fn find_by_groups(
        &self,
        groups: &[group::Id],
        limit: i64,
    ) -> discussion::Result<Vec<Discussion>> {
        let mut found: Vec<Discussion> = self
            .all()
            .into_iter()
            .filter(|d| d.group().is_some_and(|g| groups.contains(&g)))
            .collect();
        found.sort_by(|a, b| b.last_message_time.cmp(&a.last_message_time));
        found.truncate(limit as usize);
        Ok(found)
    }

    async fn append_message(&self, id: &discussion::Id, msg: &Message) -> discussion::Result<bool> {
        Ok(self.update(
            |d| &d.id == id,
            |d| {
                if !d.messages.contains(msg) {
                    d.messages.push(msg.clone());
                }
                if let Some(sender) = &msg.user_id {
                    if !d.participants.contains(sender) {
                        d.participants.push(sender.clone());
                    }
                }
                d.last_message = msg.content.clone();
            },
        ))
    }
}

pub struct StubProbe(pub bool);

#[async_trait]
impl Probe for StubProbe {
    async fn is_connected(&self) -> bool {
        self.0
    }
}

pub struct Fakes {
    pub users: Arc<InMemory<User>>,
    pub groups: Arc<InMemory<Group>>,
    pub posts: Arc<InMemory<Post>>,
    pub questions: Arc<InMemory<Question>>,
    pub discussions: Arc<InMemory<Discussion>>,
    pub connected: bool,
}

impl Fakes {
    pub fn new() -> Self {
        Self {
            users: Arc::new(InMemory::new()),
            groups: Arc::new(InMemory::new()),
            posts: Arc::new(InMemory::new()),
            questions: Arc::new(InMemory::new()),
            discussions: Arc::new(InMemory::new()),
            connected: true,
        }
    }

    pub fn app(&self) -> Router {
        let state = AppState::with(Repositories {
            probe: Arc::new(StubProbe(self.connected)),
            user: self.users.clone(),
            group: self.groups.clone(),
            post: self.posts.clone(),
            question: self.questions.clone(),
            discussion: self.discussions.clone(),
        });

        huddle::app(state, &Env::Local, Path::new("tests/static"))
    }
}

pub async fn send(app: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Vec<u8>) {
    let mut req = Request::builder().method(method).uri(uri);
    let body = match body {
        Some(json) => {
            req = req.header(header::CONTENT_TYPE, "application/json");
            Body::from(json.to_string())
        }
        None => Body::empty(),
    };

    let res = app.clone().oneshot(req.body(body).unwrap()).await.unwrap();
    let status = res.status();
    let bytes = to_bytes(res.into_body(), usize::MAX).await.unwrap();

    (status, bytes.to_vec())
}

pub async fn get(app: &Router, uri: &str) -> (StatusCode, Value) {
    let (status, bytes) = send(app, Method::GET, uri, None).await;
    (status, serde_json::from_slice(&bytes).unwrap())
}

pub async fn post(app: &Router, uri: &str, body: Value) -> (StatusCode, Value) {
    let (status, bytes) = send(app, Method::POST, uri, Some(body)).await;
    (status, serde_json::from_slice(&bytes).unwrap())
}
