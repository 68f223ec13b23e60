use std::sync::Arc;

use axum::extract::FromRef;
use mongodb::Database;

use crate::discussion::repository::MongoDiscussionRepository;
use crate::discussion::service::DiscussionServiceImpl;
use crate::group::repository::MongoGroupRepository;
use crate::group::service::GroupServiceImpl;
use crate::integration::db::Probe;
use crate::notification::service::NotificationServiceImpl;
use crate::post::repository::MongoPostRepository;
use crate::post::service::PostServiceImpl;
use crate::question::repository::MongoQuestionRepository;
use crate::question::service::QuestionServiceImpl;
use crate::user::repository::MongoUserRepository;
use crate::user::service::UserServiceImpl;
use crate::{discussion, group, notification, post, question, user};

/// Storage backends the services are built on.
#[derive(Clone)]
pub struct Repositories {
    pub probe: Arc<dyn Probe + Send + Sync>,
    pub user: user::Repository,
    pub group: group::Repository,
    pub post: post::Repository,
    pub question: question::Repository,
    pub discussion: discussion::Repository,
}

impl Repositories {
    pub fn mongo(db: &Database) -> Self {
        Self {
            probe: Arc::new(db.clone()),
            user: Arc::new(MongoUserRepository::new(db)),
            group: Arc::new(MongoGroupRepository::new(db)),
            post: Arc::new(MongoPostRepository::new(db)),
            question: Arc::new(MongoQuestionRepository::new(db)),
            discussion: Arc::new(MongoDiscussionRepository::new(db)),
        }
    }
}

#[derive(Clone)]
pub struct AppState {
    pub probe: Arc<dyn Probe + Send + Sync>,
    pub user_service: user::Service,
    pub group_service: group::Service,
    pub post_service: post::Service,
    pub question_service: question::Service,
    pub discussion_service: discussion::Service,
    pub notification_service: notification::Service,
}

impl AppState {
    pub fn new(db: &Database) -> Self {
        Self::with(Repositories::mongo(db))
    }

    pub fn with(repos: Repositories) -> Self {
        let group_service: group::Service = Arc::new(GroupServiceImpl::new(repos.group));

        Self {
            probe: repos.probe,
            user_service: Arc::new(UserServiceImpl::new(repos.user)),
            post_service: Arc::new(PostServiceImpl::new(repos.post)),
            question_service: Arc::new(QuestionServiceImpl::new(repos.question)),
            discussion_service: Arc::new(DiscussionServiceImpl::new(
                repos.discussion,
                group_service.clone(),
            )),
            notification_service: Arc::new(NotificationServiceImpl::new(group_service.clone())),
            group_service,
        }
    }
}

impl FromRef<AppState> for Arc<dyn Probe + Send + Sync> {
    fn from_ref(s: &AppState) -> Self {
        s.probe.clone()
    }
}

impl FromRef<AppState> for user::Service {
    fn from_ref(s: &AppState) -> Self {
        s.user_service.clone()
    }
}

impl FromRef<AppState> for group::Service {
    fn from_ref(s: &AppState) -> Self {
        s.group_service.clone()
    }
}

impl FromRef<AppState> for post::Service {
    fn from_ref(s: &AppState) -> Self {
        s.post_service.clone()
    }
}

impl FromRef<AppState> for question::Service {
    fn from_ref(s: &AppState) -> Self {
        s.question_service.clone()
    }
}

impl FromRef<AppState> for discussion::Service {
    fn from_ref(s: &AppState) -> Self {
        s.discussion_service.clone()
    }
}

impl FromRef<AppState> for notification::Service {
    fn from_ref(s: &AppState) -> Self {
        s.notification_service.clone()
    }
}
