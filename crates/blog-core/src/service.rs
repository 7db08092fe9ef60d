//! Post service - the single owner of the post collection.
//!
//! Writes go through the access policy, the schema rules and the default
//! generators before they reach the repository; successful writes are
//! published on [`POSTS_CHANNEL`]. Reads back the views with fixed windows.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::Post;
use crate::error::{DomainError, Mutation, RepoError};
use crate::policy::{AccessPolicy, PostAccessPolicy};
use crate::ports::{Page, PostDefaults, PostRepository, PubSub, Subscription, SystemDefaults};
use crate::schema::{PostDraft, PostPatch};

/// Channel carrying [`PostEvent`]s as JSON.
pub const POSTS_CHANNEL: &str = "posts";

/// Desktop listing: the slider shows the newest four, the list continues after them.
pub const DESKTOP_PAGE: Page = Page::new(4, 6);
/// Mobile/home listing.
pub const MOBILE_PAGE: Page = Page::first(10);
/// Slider feed.
pub const SLIDER_PAGE: Page = Page::first(4);

const SHORT_ID_ATTEMPTS: usize = 3;

/// A change to the post collection, as seen by subscribers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "post", rename_all = "lowercase")]
pub enum PostEvent {
    Added(Post),
    Changed(Post),
    Removed(Post),
}

impl PostEvent {
    pub fn kind(&self) -> &'static str {
        match self {
            PostEvent::Added(_) => "added",
            PostEvent::Changed(_) => "changed",
            PostEvent::Removed(_) => "removed",
        }
    }
}

pub struct PostService {
    repo: Arc<dyn PostRepository>,
    pubsub: Arc<dyn PubSub>,
    policy: Arc<dyn AccessPolicy<Post>>,
    defaults: Arc<dyn PostDefaults>,
}

impl PostService {
    /// Service with the standard post policy and system defaults.
    pub fn new(repo: Arc<dyn PostRepository>, pubsub: Arc<dyn PubSub>) -> Self {
        Self {
            repo,
            pubsub,
            policy: Arc::new(PostAccessPolicy),
            defaults: Arc::new(SystemDefaults),
        }
    }

    pub fn with_defaults(mut self, defaults: Arc<dyn PostDefaults>) -> Self {
        self.defaults = defaults;
        self
    }

    pub fn with_policy(mut self, policy: Arc<dyn AccessPolicy<Post>>) -> Self {
        self.policy = policy;
        self
    }

    /// Insert a new post submitted by `caller`.
    pub async fn create(&self, caller: Option<Uuid>, draft: PostDraft) -> Result<Post, DomainError> {
        let candidate = Post::new(
            self.defaults.short_id(),
            self.defaults.now(),
            caller.unwrap_or_else(Uuid::nil),
            draft.title.clone(),
            draft.keywords.clone(),
            draft.body.clone(),
        );
        self.policy.authorize(Mutation::Insert, caller, &candidate)?;

        let draft = draft.validated()?;
        let mut post = Post {
            title: draft.title,
            keywords: draft.keywords,
            body: draft.body,
            ..candidate
        };

        let mut attempt = 1;
        let saved = loop {
            match self.repo.save(post.clone()).await {
                Ok(saved) => break saved,
                Err(RepoError::Duplicate(msg)) if attempt < SHORT_ID_ATTEMPTS => {
                    tracing::warn!(short_id = %post.short_id, error = %msg, "Short id taken, regenerating");
                    post.short_id = self.defaults.short_id();
                    attempt += 1;
                }
                // The only foreign key is the submitter: the session outlived its account.
                Err(RepoError::Constraint(msg)) => {
                    tracing::warn!(submitted_by = %post.submitted_by_id, error = %msg, "Submitter account missing");
                    return Err(DomainError::Unauthorized(Mutation::Insert));
                }
                Err(e) => return Err(e.into()),
            }
        };

        tracing::info!(short_id = %saved.short_id, submitted_by = %saved.submitted_by_id, "Post created");
        self.publish(PostEvent::Added(saved.clone())).await;
        Ok(saved)
    }

    /// Apply a partial update. `shortId`, `date` and the submitter never change.
    pub async fn update(
        &self,
        caller: Option<Uuid>,
        short_id: &str,
        patch: PostPatch,
    ) -> Result<Post, DomainError> {
        let existing = self.require(short_id).await?;
        self.policy.authorize(Mutation::Update, caller, &existing)?;

        let draft = patch.merged_with(&existing).validated()?;
        let post = Post {
            title: draft.title,
            keywords: draft.keywords,
            body: draft.body,
            ..existing
        };

        let saved = self.repo.save(post).await?;
        tracing::info!(short_id = %saved.short_id, "Post updated");
        self.publish(PostEvent::Changed(saved.clone())).await;
        Ok(saved)
    }

    pub async fn delete(&self, caller: Option<Uuid>, short_id: &str) -> Result<(), DomainError> {
        let existing = self.require(short_id).await?;
        self.policy.authorize(Mutation::Delete, caller, &existing)?;

        self.repo.delete(existing.id).await?;
        tracing::info!(short_id = %existing.short_id, "Post deleted");
        self.publish(PostEvent::Removed(existing)).await;
        Ok(())
    }

    /// Posts ranked 5 to 10 by recency.
    pub async fn desktop_posts(&self) -> Result<Vec<Post>, DomainError> {
        Ok(self.repo.find_recent(DESKTOP_PAGE).await?)
    }

    /// The ten most recent posts.
    pub async fn mobile_posts(&self) -> Result<Vec<Post>, DomainError> {
        Ok(self.repo.find_recent(MOBILE_PAGE).await?)
    }

    /// The four most recent posts.
    pub async fn slider_posts(&self) -> Result<Vec<Post>, DomainError> {
        Ok(self.repo.find_recent(SLIDER_PAGE).await?)
    }

    /// The post with `short_id`, as a collection: empty when nothing matches.
    pub async fn post_detail(&self, short_id: &str) -> Result<Vec<Post>, DomainError> {
        Ok(self.repo.find_by_short_id(short_id).await?.into_iter().collect())
    }

    /// The whole collection, newest first.
    pub async fn all_posts(&self) -> Result<Vec<Post>, DomainError> {
        Ok(self.repo.find_all().await?)
    }

    /// Subscribe to changes and take a snapshot of the collection.
    ///
    /// The subscription is opened before the snapshot is read so no write
    /// between the two is lost; a subscriber may see such a write twice.
    pub async fn subscribe(&self) -> Result<(Vec<Post>, Subscription), DomainError> {
        let subscription = self
            .pubsub
            .subscribe(POSTS_CHANNEL)
            .await
            .map_err(|e| DomainError::Internal(e.to_string()))?;
        let snapshot = self.repo.find_all().await?;
        Ok((snapshot, subscription))
    }

    async fn require(&self, short_id: &str) -> Result<Post, DomainError> {
        self.repo
            .find_by_short_id(short_id)
            .await?
            .ok_or_else(|| DomainError::NotFound {
                entity_type: "Post",
                key: short_id.to_string(),
            })
    }

    async fn publish(&self, event: PostEvent) {
        let payload = match serde_json::to_string(&event) {
            Ok(p) => p,
            Err(e) => {
                tracing::error!(error = %e, "Failed to encode post event");
                return;
            }
        };

        if let Err(e) = self.pubsub.publish(POSTS_CHANNEL, &payload).await {
            tracing::warn!(event = event.kind(), error = %e, "Failed to publish post event");
        }
    }
}
