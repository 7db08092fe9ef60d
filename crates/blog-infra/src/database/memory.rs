//! In-memory repositories, used when no database is configured.
//!
//! Contents live for the lifetime of the process.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

use blog_core::domain::{Post, User};
use blog_core::error::RepoError;
use blog_core::ports::{BaseRepository, Page, PostRepository, UserRepository};

/// Posts keyed by id; `short_id` is kept unique.
#[derive(Default)]
pub struct InMemoryPostRepository {
    posts: Arc<RwLock<HashMap<Uuid, Post>>>,
}

impl InMemoryPostRepository {
    pub fn new() -> Self {
        Self::default()
    }

    async fn newest_first(&self) -> Vec<Post> {
        let mut posts: Vec<Post> = self.posts.read().await.values().cloned().collect();
        posts.sort_by(|a, b| b.date.cmp(&a.date).then_with(|| a.short_id.cmp(&b.short_id)));
        posts
    }
}

#[async_trait]
impl BaseRepository<Post, Uuid> for InMemoryPostRepository {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Post>, RepoError> {
        Ok(self.posts.read().await.get(&id).cloned())
    }

    async fn save(&self, entity: Post) -> Result<Post, RepoError> {
        let mut posts = self.posts.write().await;

        if posts
            .values()
            .any(|p| p.short_id == entity.short_id && p.id != entity.id)
        {
            return Err(RepoError::Duplicate(format!(
                "short_id '{}' already exists",
                entity.short_id
            )));
        }

        posts.insert(entity.id, entity.clone());
        Ok(entity)
    }

    async fn delete(&self, id: Uuid) -> Result<(), RepoError> {
        match self.posts.write().await.remove(&id) {
            Some(_) => Ok(()),
            None => Err(RepoError::NotFound),
        }
    }
}

#[async_trait]
impl PostRepository for InMemoryPostRepository {
    async fn find_by_short_id(&self, short_id: &str) -> Result<Option<Post>, RepoError> {
        Ok(self
            .posts
            .read()
            .await
            .values()
            .find(|p| p.short_id == short_id)
            .cloned())
    }

    async fn find_recent(&self, page: Page) -> Result<Vec<Post>, RepoError> {
        Ok(self
            .newest_first()
            .await
            .into_iter()
            .skip(page.skip as usize)
            .take(page.limit as usize)
            .collect())
    }

    async fn find_all(&self) -> Result<Vec<Post>, RepoError> {
        Ok(self.newest_first().await)
    }
}

/// Users keyed by id; emails are unique and compared lowercased.
#[derive(Default)]
pub struct InMemoryUserRepository {
    users: Arc<RwLock<HashMap<Uuid, User>>>,
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl BaseRepository<User, Uuid> for InMemoryUserRepository {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, RepoError> {
        Ok(self.users.read().await.get(&id).cloned())
    }

    async fn save(&self, entity: User) -> Result<User, RepoError> {
        let mut users = self.users.write().await;

        if users
            .values()
            .any(|u| u.email == entity.email && u.id != entity.id)
        {
            return Err(RepoError::Duplicate("Email already registered".to_string()));
        }

        users.insert(entity.id, entity.clone());
        Ok(entity)
    }

    async fn delete(&self, id: Uuid) -> Result<(), RepoError> {
        match self.users.write().await.remove(&id) {
            Some(_) => Ok(()),
            None => Err(RepoError::NotFound),
        }
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, RepoError> {
        let email = email.trim().to_lowercase();
        Ok(self
            .users
            .read()
            .await
            .values()
            .find(|u| u.email == email)
            .cloned())
    }
}
