use async_trait::async_trait;
use log::{info, warn};

use super::model::{Discussion, DiscussionDto, Message, NewDiscussion, NewMessage, Room};
use super::{Id, LIST_LIMIT, Repository};
use crate::{group, user};

#[async_trait]
pub trait DiscussionService {
    async fn find_all(&self, user: &user::Id) -> super::Result<Vec<DiscussionDto>>;

    async fn create(&self, d: NewDiscussion) -> super::Result<Id>;

    async fn find_room(&self, id: &Id, user: &user::Id) -> super::Result<Room>;

    async fn send_message(&self, id: &Id, m: NewMessage) -> super::Result<()>;
}

#[derive(Clone)]
pub struct DiscussionServiceImpl {
    repo: Repository,
    group_service: group::Service,
}

impl DiscussionServiceImpl {
    pub fn new(repo: Repository, group_service: group::Service) -> Self {
        Self {
            repo,
            group_service,
        }
    }

    /// Loads the discussion and checks `user` against the live member list
    /// of its group. Discussions without a group are open to everyone.
    async fn find_authorized(&self, id: &Id, user: &user::Id) -> super::Result<Discussion> {
        let discussion = self
            .repo
            .find_by_id(id)
            .await?
            .ok_or(super::Error::NotFound(id.to_owned()))?;

        let Some(group_id) = discussion.group() else {
            return Ok(discussion);
        };

        match self.group_service.find_by_id(&group_id).await {
            Ok(g) if g.is_member(user) => Ok(discussion),
            Ok(_) => {
                warn!("user {user} denied access to discussion {id}");
                Err(super::Error::AccessDenied)
            }
            Err(group::Error::NotFound(gid)) => Err(super::Error::GroupGone(gid)),
            Err(e) => Err(e.into()),
        }
    }
}

#[async_trait]
impl DiscussionService for DiscussionServiceImpl {
    async fn find_all(&self, user: &user::Id) -> super::Result<Vec<DiscussionDto>> {
        let group_ids: Vec<group::Id> = self
            .group_service
            .find_by_member(user)
            .await?
            .into_iter()
            .map(|g| g.id)
            .collect();

        if group_ids.is_empty() {
            return Ok(vec![]);
        }

        let discussions = self.repo.find_by_groups(&group_ids, LIST_LIMIT).await?;

        info!("retrieved {} discussions for user {user}", discussions.len());
        Ok(discussions.into_iter().map(DiscussionDto::from).collect())
    }

    async fn create(&self, d: NewDiscussion) -> super::Result<Id> {
        let group = self.group_service.find_by_id(&d.group).await?;

        if !group.is_member(&d.creator) {
            return Err(super::Error::NotGroupMember);
        }

        let discussion = Discussion::new(d, &group);
        self.repo.insert(&discussion).await?;

        info!(
            "discussion created: {} | id: {}",
            discussion.room_name.as_deref().unwrap_or_default(),
            discussion.id
        );
        Ok(discussion.id)
    }

    async fn find_room(&self, id: &Id, user: &user::Id) -> super::Result<Room> {
        let discussion = self.find_authorized(id, user).await?;
        Ok(Room::from(discussion))
    }

    async fn send_message(&self, id: &Id, m: NewMessage) -> super::Result<()> {
        self.find_authorized(id, &m.sender).await?;

        let msg = Message::new(id, m);
        if !self.repo.append_message(id, &msg).await? {
            return Err(super::Error::NotFound(id.to_owned()));
        }

        info!("message sent in discussion {id}");
        Ok(())
    }
}
