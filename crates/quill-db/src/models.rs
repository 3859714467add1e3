//! Row types mapping directly to SQLite rows. Kept apart from quill-types so
//! the schema can change without touching the wire models.

use chrono::{DateTime, Utc};

use quill_types::models::{Comment, Post, User};

pub struct UserRow {
    pub id: i64,
    pub email: String,
    pub password: String,
    pub username: String,
    pub created_at: DateTime<Utc>,
}

/// A post joined with its author's username.
pub struct PostRow {
    pub id: i64,
    pub title: String,
    pub content: String,
    pub user_id: i64,
    pub username: String,
    pub created_at: DateTime<Utc>,
}

/// A comment joined with its author's username.
pub struct CommentRow {
    pub id: i64,
    pub post_id: i64,
    pub user_id: i64,
    pub username: String,
    pub content: String,
    pub created_at: DateTime<Utc>,
}

impl From<UserRow> for User {
    fn from(row: UserRow) -> Self {
        Self {
            id: row.id,
            email: row.email,
            password: row.password,
            username: row.username,
            created_at: row.created_at,
        }
    }
}

impl From<PostRow> for Post {
    fn from(row: PostRow) -> Self {
        Self {
            id: row.id,
            title: row.title,
            content: row.content,
            user_id: row.user_id,
            username: row.username,
            created_at: row.created_at,
        }
    }
}

impl From<CommentRow> for Comment {
    fn from(row: CommentRow) -> Self {
        Self {
            id: row.id,
            post_id: row.post_id,
            user_id: row.user_id,
            username: row.username,
            content: row.content,
            created_at: row.created_at,
        }
    }
}
