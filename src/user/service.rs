use async_trait::async_trait;
use log::info;

use super::model::{Profile, ProfileUpdate, Signup, User};
use super::{Id, Repository, password};

#[async_trait]
pub trait UserService {
    async fn signup(&self, s: Signup) -> super::Result<Profile>;

    async fn login(&self, email: &str, password: &str) -> super::Result<Profile>;

    async fn update_profile(&self, id: &Id, update: &ProfileUpdate) -> super::Result<()>;

    async fn find_profile(&self, id: &Id) -> super::Result<Profile>;
}

#[derive(Clone)]
pub struct UserServiceImpl {
    repo: Repository,
}

impl UserServiceImpl {
    pub fn new(repo: Repository) -> Self {
        Self { repo }
    }
}

#[async_trait]
impl UserService for UserServiceImpl {
    async fn signup(&self, s: Signup) -> super::Result<Profile> {
        // advisory: two concurrent signups may both pass this check
        if self.repo.find_by_email(&s.email).await?.is_some() {
            return Err(super::Error::AlreadyExists);
        }

        let hash = password::hash(&s.password)?;
        let user = User::new(s, hash);
        self.repo.insert(&user).await?;

        info!("user created: {} | id: {}", user.email, user.id);
        Ok(user.into())
    }

    async fn login(&self, email: &str, plain: &str) -> super::Result<Profile> {
        let user = self
            .repo
            .find_by_email(email)
            .await?
            .ok_or(super::Error::NotFound)?;

        if !password::verify(plain, &user.password) {
            return Err(super::Error::IncorrectPassword);
        }

        info!("user logged in: {email}");
        Ok(user.into())
    }

    async fn update_profile(&self, id: &Id, update: &ProfileUpdate) -> super::Result<()> {
        if !self.repo.update_profile(id, update).await? {
            return Err(super::Error::NotFound);
        }

        info!("profile updated: {id}");
        Ok(())
    }

    async fn find_profile(&self, id: &Id) -> super::Result<Profile> {
        self.repo
            .find_by_id(id)
            .await?
            .map(Profile::from)
            .ok_or(super::Error::NotFound)
    }
}
