//! Data Transfer Objects - request/response types for the API.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::format::local_date;

/// Login credentials, from the login form or the JSON API.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Response containing a user's public information.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserResponse {
    pub id: String,
    pub email: String,
}

/// Response containing a session token.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthResponse {
    pub access_token: String,
    pub token_type: String,
    pub expires_in: u64,
}

/// One entry of the slider feed. `date` is already formatted for display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SliderPost {
    pub title: String,
    pub short_id: String,
    pub date: String,
    pub keywords: String,
    pub body: String,
    pub submitted_by_id: String,
}

impl SliderPost {
    pub fn new(
        title: String,
        short_id: String,
        date: &DateTime<Utc>,
        keywords: String,
        body: String,
        submitted_by_id: String,
    ) -> Self {
        Self {
            title,
            short_id,
            date: local_date(date),
            keywords,
            body,
            submitted_by_id,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_slider_post_json() {
        let date = Utc.with_ymd_and_hms(2024, 1, 5, 0, 0, 0).unwrap();
        let post = SliderPost::new(
            "Title".to_string(),
            "abc".to_string(),
            &date,
            "k".to_string(),
            "b".to_string(),
            "user-1".to_string(),
        );

        let json = serde_json::to_value(&post).unwrap();
        assert_eq!(json["date"], "January 05, 2024");
        assert_eq!(json["shortId"], "abc");
        assert_eq!(json["submittedById"], "user-1");
    }
}
