use async_trait::async_trait;
use log::info;

use super::model::{Group, GroupDto, MemberGroupDto, NewGroup};
use super::{Id, Repository};
use crate::user;

#[async_trait]
pub trait GroupService {
    async fn create(&self, g: NewGroup) -> super::Result<Id>;

    async fn find_by_id(&self, id: &Id) -> super::Result<Group>;

    async fn find_all(&self, viewer: Option<&user::Id>) -> super::Result<Vec<GroupDto>>;

    async fn find_by_member(&self, member: &user::Id) -> super::Result<Vec<Group>>;

    async fn find_member_groups(&self, member: &user::Id) -> super::Result<Vec<MemberGroupDto>>;

    async fn join(&self, id: &Id, member: &user::Id) -> super::Result<()>;

    async fn leave(&self, id: &Id, member: &user::Id) -> super::Result<()>;
}

#[derive(Clone)]
pub struct GroupServiceImpl {
    repo: Repository,
}

impl GroupServiceImpl {
    pub fn new(repo: Repository) -> Self {
        Self { repo }
    }
}

#[async_trait]
impl GroupService for GroupServiceImpl {
    async fn create(&self, g: NewGroup) -> super::Result<Id> {
        let group = Group::new(g);
        self.repo.insert(&group).await?;

        info!("group created: {} | id: {}", group.display_name(), group.id);
        Ok(group.id)
    }

    async fn find_by_id(&self, id: &Id) -> super::Result<Group> {
        self.repo
            .find_by_id(id)
            .await?
            .ok_or(super::Error::NotFound(id.to_owned()))
    }

    async fn find_all(&self, viewer: Option<&user::Id>) -> super::Result<Vec<GroupDto>> {
        let groups = self.repo.find_all().await?;

        Ok(groups
            .into_iter()
            .map(|g| GroupDto::new(g, viewer))
            .collect())
    }

    async fn find_by_member(&self, member: &user::Id) -> super::Result<Vec<Group>> {
        self.repo.find_by_member(member).await
    }

    async fn find_member_groups(&self, member: &user::Id) -> super::Result<Vec<MemberGroupDto>> {
        let groups = self.repo.find_by_member(member).await?;

        info!("retrieved {} groups for user {member}", groups.len());
        Ok(groups.into_iter().map(MemberGroupDto::from).collect())
    }

    // capacity is advisory: a full group can still be joined
    async fn join(&self, id: &Id, member: &user::Id) -> super::Result<()> {
        self.find_by_id(id).await?;
        self.repo.add_member(id, member).await?;

        info!("user {member} joined group {id}");
        Ok(())
    }

    async fn leave(&self, id: &Id, member: &user::Id) -> super::Result<()> {
        self.find_by_id(id).await?;
        self.repo.remove_member(id, member).await?;

        info!("user {member} left group {id}");
        Ok(())
    }
}
