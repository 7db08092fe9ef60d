use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Post entity - a blog entry.
///
/// `short_id` and `date` are assigned once when the post is created and are
/// never regenerated. `date` is the sort key for every listing (newest first).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Post {
    pub id: Uuid,
    pub short_id: String,
    pub title: String,
    pub date: DateTime<Utc>,
    /// Comma separated free text.
    pub keywords: String,
    pub body: String,
    pub submitted_by_id: Uuid,
}

impl Post {
    /// Create a new post with a fresh storage id.
    pub fn new(
        short_id: String,
        date: DateTime<Utc>,
        submitted_by_id: Uuid,
        title: String,
        keywords: String,
        body: String,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            short_id,
            title,
            date,
            keywords,
            body,
            submitted_by_id,
        }
    }

    /// Keywords split on commas, trimmed, empties dropped.
    pub fn keyword_list(&self) -> Vec<&str> {
        self.keywords
            .split(',')
            .map(str::trim)
            .filter(|k| !k.is_empty())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_serializes_camel_case() {
        let post = Post::new(
            "abc123".to_string(),
            Utc::now(),
            Uuid::new_v4(),
            "Title".to_string(),
            "rust".to_string(),
            "Body".to_string(),
        );

        let json = serde_json::to_value(&post).unwrap();
        assert_eq!(json["shortId"], "abc123");
        assert!(json.get("submittedById").is_some());
        assert!(json.get("short_id").is_none());
    }

    #[test]
    fn test_keyword_list() {
        let mut post = Post::new(
            "k".to_string(),
            Utc::now(),
            Uuid::new_v4(),
            "t".to_string(),
            String::new(),
            "b".to_string(),
        );
        post.keywords = " rust, web ,,meteor ".to_string();

        assert_eq!(post.keyword_list(), vec!["rust", "web", "meteor"]);
    }
}
