use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: i64,
    pub email: String,
    /// Stored verbatim and never sent back to clients.
    #[serde(skip_serializing, default)]
    pub password: String,
    pub username: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Post {
    pub id: i64,
    pub title: String,
    pub content: String,
    pub user_id: i64,
    /// Author username, joined from `users` on read.
    pub username: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Comment {
    pub id: i64,
    pub post_id: i64,
    pub user_id: i64,
    pub username: String,
    pub content: String,
    pub created_at: DateTime<Utc>,
}

// -- Write models --
//
// Values here are already trimmed/normalized by the service layer.

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewUser {
    pub email: String,
    pub password: String,
    pub username: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewPost {
    pub title: String,
    pub content: String,
    pub user_id: i64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewComment {
    pub post_id: i64,
    pub user_id: i64,
    pub content: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn user_json_omits_password() {
        let user = User {
            id: 1,
            email: "a@b.com".into(),
            password: "secret1".into(),
            username: "alice".into(),
            created_at: DateTime::default(),
        };

        let json = serde_json::to_value(&user).unwrap();
        assert!(json.get("password").is_none());
        assert_eq!(json["email"], "a@b.com");
        assert_eq!(json["username"], "alice");
    }

    #[test]
    fn comment_json_uses_snake_case_keys() {
        let comment = Comment {
            id: 10,
            post_id: 1,
            user_id: 2,
            username: "bob".into(),
            content: "nice".into(),
            created_at: DateTime::default(),
        };

        let json = serde_json::to_value(&comment).unwrap();
        assert_eq!(json["post_id"], 1);
        assert_eq!(json["user_id"], 2);
        assert!(json.get("created_at").is_some());
    }
}
