//! Access policy over collection mutations.

use uuid::Uuid;

use crate::domain::Post;
use crate::error::{DomainError, Mutation};

/// Predicates deciding whether a caller may mutate a document.
///
/// `caller` is `None` for anonymous requests.
pub trait AccessPolicy<T>: Send + Sync {
    fn can_insert(&self, caller: Option<Uuid>, doc: &T) -> bool;
    fn can_update(&self, caller: Option<Uuid>, doc: &T) -> bool;
    fn can_delete(&self, caller: Option<Uuid>, doc: &T) -> bool;

    /// Evaluate the predicate for `mutation` and turn a denial into an error.
    fn authorize(&self, mutation: Mutation, caller: Option<Uuid>, doc: &T) -> Result<(), DomainError> {
        let allowed = match mutation {
            Mutation::Insert => self.can_insert(caller, doc),
            Mutation::Update => self.can_update(caller, doc),
            Mutation::Delete => self.can_delete(caller, doc),
        };

        match (allowed, caller) {
            (true, _) => Ok(()),
            (false, None) => Err(DomainError::Unauthorized(mutation)),
            (false, Some(_)) => Err(DomainError::Forbidden(mutation)),
        }
    }
}

/// Rules for the posts collection.
///
/// Any signed-in user may insert or update any post; only the submitter may
/// delete it.
#[derive(Debug, Clone, Copy, Default)]
pub struct PostAccessPolicy;

impl AccessPolicy<Post> for PostAccessPolicy {
    fn can_insert(&self, caller: Option<Uuid>, _doc: &Post) -> bool {
        caller.is_some()
    }

    fn can_update(&self, caller: Option<Uuid>, _doc: &Post) -> bool {
        caller.is_some()
    }

    fn can_delete(&self, caller: Option<Uuid>, doc: &Post) -> bool {
        caller == Some(doc.submitted_by_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn post_by(owner: Uuid) -> Post {
        Post::new(
            "abc".to_string(),
            Utc::now(),
            owner,
            "Title".to_string(),
            "k".to_string(),
            "Body".to_string(),
        )
    }

    #[test]
    fn test_anonymous_cannot_write() {
        let doc = post_by(Uuid::new_v4());
        let policy = PostAccessPolicy;

        assert!(!policy.can_insert(None, &doc));
        assert!(!policy.can_update(None, &doc));
        assert!(!policy.can_delete(None, &doc));
    }

    #[test]
    fn test_any_user_may_insert_and_update() {
        let doc = post_by(Uuid::new_v4());
        let stranger = Some(Uuid::new_v4());
        let policy = PostAccessPolicy;

        assert!(policy.can_insert(stranger, &doc));
        assert!(policy.can_update(stranger, &doc));
    }

    #[test]
    fn test_delete_only_by_submitter() {
        let owner = Uuid::new_v4();
        let doc = post_by(owner);
        let policy = PostAccessPolicy;

        assert!(policy.can_delete(Some(owner), &doc));
        assert!(!policy.can_delete(Some(Uuid::new_v4()), &doc));
    }

    #[test]
    fn test_authorize_maps_denials() {
        let owner = Uuid::new_v4();
        let doc = post_by(owner);
        let policy = PostAccessPolicy;

        assert!(matches!(
            policy.authorize(Mutation::Insert, None, &doc),
            Err(DomainError::Unauthorized(Mutation::Insert))
        ));
        assert!(matches!(
            policy.authorize(Mutation::Delete, Some(Uuid::new_v4()), &doc),
            Err(DomainError::Forbidden(Mutation::Delete))
        ));
        assert!(policy.authorize(Mutation::Delete, Some(owner), &doc).is_ok());
    }
}
