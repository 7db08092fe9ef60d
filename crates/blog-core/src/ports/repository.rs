use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::{Post, User};
use crate::error::RepoError;

/// Generic repository trait defining standard CRUD operations.
#[async_trait]
pub trait BaseRepository<T, ID>: Send + Sync {
    /// Find an entity by its unique ID.
    async fn find_by_id(&self, id: ID) -> Result<Option<T>, RepoError>;

    /// Save an entity (create or update).
    async fn save(&self, entity: T) -> Result<T, RepoError>;

    /// Delete an entity by its ID.
    async fn delete(&self, id: ID) -> Result<(), RepoError>;
}

/// User repository with domain-specific methods.
#[async_trait]
pub trait UserRepository: BaseRepository<User, Uuid> {
    /// Find a user by their email address.
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, RepoError>;
}

/// A window over the newest-first ordering of a collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Page {
    pub skip: u64,
    pub limit: u64,
}

impl Page {
    pub const fn new(skip: u64, limit: u64) -> Self {
        Self { skip, limit }
    }

    /// The first `limit` entries.
    pub const fn first(limit: u64) -> Self {
        Self { skip: 0, limit }
    }
}

/// Post repository. Every listing is ordered by `date`, newest first.
#[async_trait]
pub trait PostRepository: BaseRepository<Post, Uuid> {
    /// Find a post by its short URL token.
    async fn find_by_short_id(&self, short_id: &str) -> Result<Option<Post>, RepoError>;

    /// A window of posts, newest first.
    async fn find_recent(&self, page: Page) -> Result<Vec<Post>, RepoError>;

    /// The whole collection, newest first.
    async fn find_all(&self) -> Result<Vec<Post>, RepoError>;
}
