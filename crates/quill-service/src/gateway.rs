//! Persistence ports consumed by the services.
//!
//! Absence is modelled as `Option::None`; an `Err` always means the storage
//! call itself failed (or, for conditional deletes, matched nothing).

use chrono::{DateTime, Utc};
use thiserror::Error;

use quill_types::models::{Comment, NewComment, NewPost, NewUser, Post, User};

/// Identity and timestamp assigned by storage on insert.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Inserted {
    pub id: i64,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Error)]
pub enum GatewayError {
    /// A conditional delete matched zero rows.
    #[error("row does not exist or is not owned by the requester")]
    NotAuthorizedOrNotFound,

    /// An insert collided with a unique key.
    #[error("a row with the same unique key already exists")]
    Duplicate,

    #[error(transparent)]
    Storage(#[from] anyhow::Error),
}

#[cfg_attr(test, mockall::automock)]
pub trait UserGateway: Send + Sync {
    fn create(&self, user: &NewUser) -> Result<Inserted, GatewayError>;

    /// `email` must already be normalized (trimmed, lowercase).
    fn find_by_email(&self, email: &str) -> Result<Option<User>, GatewayError>;

    fn find_by_id(&self, id: i64) -> Result<Option<User>, GatewayError>;
}

#[cfg_attr(test, mockall::automock)]
pub trait PostGateway: Send + Sync {
    fn create(&self, post: &NewPost) -> Result<Inserted, GatewayError>;

    /// All posts, newest first.
    fn find_all(&self) -> Result<Vec<Post>, GatewayError>;

    fn find_by_id(&self, id: i64) -> Result<Option<Post>, GatewayError>;

    /// Deletes the post only if it is owned by `owner_id`; fails with
    /// [`GatewayError::NotAuthorizedOrNotFound`] when nothing matched.
    fn delete(&self, post_id: i64, owner_id: i64) -> Result<(), GatewayError>;

    fn create_comment(&self, comment: &NewComment) -> Result<Inserted, GatewayError>;

    /// Comments of a post, oldest first.
    fn find_comments_by_post_id(&self, post_id: i64) -> Result<Vec<Comment>, GatewayError>;

    /// Deletes the comment only if `(comment_id, post_id, user_id)` matches a
    /// single row; fails with [`GatewayError::NotAuthorizedOrNotFound`]
    /// otherwise.
    fn delete_comment(&self, post_id: i64, comment_id: i64, user_id: i64)
    -> Result<(), GatewayError>;
}
