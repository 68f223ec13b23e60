use async_trait::async_trait;
use futures::TryStreamExt;
use mongodb::Database;
use mongodb::bson::doc;

use super::Id;
use super::model::Group;
use crate::json::id_filter;
use crate::user;

const GROUPS_COLLECTION: &str = "groups";

#[async_trait]
pub trait GroupRepository {
    async fn insert(&self, group: &Group) -> super::Result<()>;

    async fn find_by_id(&self, id: &Id) -> super::Result<Option<Group>>;

    /// Newest first.
    async fn find_all(&self) -> super::Result<Vec<Group>>;

    async fn find_by_member(&self, member: &user::Id) -> super::Result<Vec<Group>>;

    async fn add_member(&self, id: &Id, member: &user::Id) -> super::Result<()>;

    async fn remove_member(&self, id: &Id, member: &user::Id) -> super::Result<()>;
}

pub struct MongoGroupRepository {
    col: mongodb::Collection<Group>,
}

impl MongoGroupRepository {
    pub fn new(db: &Database) -> Self {
        Self {
            col: db.collection(GROUPS_COLLECTION),
        }
    }
}

#[async_trait]
impl GroupRepository for MongoGroupRepository {
    async fn insert(&self, group: &Group) -> super::Result<()> {
        self.col.insert_one(group).await?;
        Ok(())
    }

    async fn find_by_id(&self, id: &Id) -> super::Result<Option<Group>> {
        let group = self.col.find_one(doc! { "_id": id_filter(id.as_str()) }).await?;
        Ok(group)
    }

    async fn find_all(&self) -> super::Result<Vec<Group>> {
        let cursor = self.col.find(doc! {}).sort(doc! { "createdAt": -1 }).await?;
        let groups: Vec<Group> = cursor.try_collect().await?;
        Ok(groups)
    }

    async fn find_by_member(&self, member: &user::Id) -> super::Result<Vec<Group>> {
        let cursor = self.col.find(doc! { "members": member.as_str() }).await?;
        let groups: Vec<Group> = cursor.try_collect().await?;
        Ok(groups)
    }

    async fn add_member(&self, id: &Id, member: &user::Id) -> super::Result<()> {
        self.col
            .update_one(
                doc! { "_id": id_filter(id.as_str()) },
                doc! { "$addToSet": { "members": member.as_str() } },
            )
            .await?;
        Ok(())
    }

    async fn remove_member(&self, id: &Id, member: &user::Id) -> super::Result<()> {
        self.col
            .update_one(
                doc! { "_id": id_filter(id.as_str()) },
                doc! { "$pull": { "members": member.as_str() } },
            )
            .await?;
        Ok(())
    }
}

#[cfg(test)]
mod test {
    use testcontainers_modules::{mongo::Mongo, testcontainers::runners::AsyncRunner};

    use super::*;
    use crate::group::model::NewGroup;
    use crate::integration::db;

    fn group(name: &str, creator: &str) -> Group {
        Group::new(NewGroup {
            creator: Some(user::Id::from(creator)),
            project_name: name.into(),
            description_objective: "objective".into(),
            preferred_team_size: Some("4 members".into()),
            required_skills: vec!["rust".into()],
            project_timeline: "2 weeks".into(),
        })
    }

    #[tokio::test]
    #[ignore = "requires docker"]
    async fn should_add_member_once() {
        let node = Mongo::default().start().await.unwrap();
        let db = db::Config::test(&node).await.connect().unwrap();
        let repo = MongoGroupRepository::new(&db);

        let g = group("huddle", "valera");
        repo.insert(&g).await.unwrap();

        let radu = user::Id::from("radu");
        repo.add_member(&g.id, &radu).await.unwrap();
        repo.add_member(&g.id, &radu).await.unwrap();

        let actual = repo.find_by_id(&g.id).await.unwrap().unwrap();
        assert_eq!(
            actual.members,
            vec![user::Id::from("valera"), user::Id::from("radu")]
        );
        assert_eq!(actual.max_members, Some(4));
    }

    #[tokio::test]
    #[ignore = "requires docker"]
    async fn should_remove_member() {
        let node = Mongo::default().start().await.unwrap();
        let db = db::Config::test(&node).await.connect().unwrap();
        let repo = MongoGroupRepository::new(&db);

        let g = group("huddle", "valera");
        repo.insert(&g).await.unwrap();
        repo.remove_member(&g.id, &user::Id::from("valera"))
            .await
            .unwrap();

        let actual = repo.find_by_id(&g.id).await.unwrap().unwrap();
        assert!(actual.members.is_empty());
    }

    #[tokio::test]
    #[ignore = "requires docker"]
    async fn should_find_by_member_and_sort_newest_first() {
        let node = Mongo::default().start().await.unwrap();
        let db = db::Config::test(&node).await.connect().unwrap();
        let repo = MongoGroupRepository::new(&db);

        let first = group("first", "valera");
        repo.insert(&first).await.unwrap();
        tokio::time::sleep(std::time::Duration::from_millis(5)).await;
        let second = group("second", "igor");
        repo.insert(&second).await.unwrap();

        let all = repo.find_all().await.unwrap();
        assert_eq!(all[0].id, second.id);
        assert_eq!(all[1].id, first.id);

        let mine = repo.find_by_member(&user::Id::from("igor")).await.unwrap();
        assert_eq!(mine.len(), 1);
        assert_eq!(mine[0].id, second.id);
    }
}
