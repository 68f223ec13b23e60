use async_trait::async_trait;
use log::info;

use super::model::{Notification, synthesize};
use crate::{group, user};

#[async_trait]
pub trait NotificationService {
    async fn find_all(&self, user: &user::Id) -> super::Result<Vec<Notification>>;
}

#[derive(Clone)]
pub struct NotificationServiceImpl {
    group_service: group::Service,
}

impl NotificationServiceImpl {
    pub fn new(group_service: group::Service) -> Self {
        Self { group_service }
    }
}

#[async_trait]
impl NotificationService for NotificationServiceImpl {
    async fn find_all(&self, user: &user::Id) -> super::Result<Vec<Notification>> {
        let groups = self.group_service.find_by_member(user).await?;
        let feed = synthesize(user, groups);

        info!("generated {} notifications for user {user}", feed.len());
        Ok(feed)
    }
}
