use thiserror::Error;

use crate::gateway::GatewayError;

/// Rejected input. The `Display` text is safe to show to end users.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("email is required")]
    EmailRequired,
    #[error("email must be valid")]
    EmailInvalid,
    #[error("password must be at least 6 characters")]
    PasswordTooShort,
    #[error("username is required")]
    UsernameRequired,
    #[error("password is required")]
    PasswordRequired,
    #[error("title is required")]
    TitleRequired,
    #[error("title must be at least 3 characters")]
    TitleTooShort,
    #[error("content is required")]
    ContentRequired,
    #[error("comment content is required")]
    CommentContentRequired,
    #[error("invalid id")]
    InvalidId,
}

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// Same error whether the account is missing or the password is wrong.
    #[error("invalid credentials")]
    InvalidCredentials,

    #[error("email {email} is already registered")]
    EmailAlreadyRegistered { email: String },

    #[error("user {id} not found")]
    UserNotFound { id: i64 },

    #[error("post {id} not found")]
    PostNotFound { id: i64 },

    #[error("you are not allowed to delete post {post_id}")]
    NotPostOwner { post_id: i64, requester_id: i64 },

    /// The owner check passed but the delete matched nothing, so the post
    /// vanished or changed hands in between.
    #[error("post does not exist or you are not allowed to delete it")]
    PostNotDeletable { post_id: i64 },

    /// Deliberately does not say whether the comment exists.
    #[error("comment does not exist or you are not allowed to delete it")]
    CommentNotDeletable { post_id: i64, comment_id: i64 },

    #[error(transparent)]
    Storage(#[from] GatewayError),
}

/// Coarse classification used by callers to pick a response status.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Validation,
    Unauthenticated,
    NotFound,
    Forbidden,
    Conflict,
    Storage,
}

impl ServiceError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Validation(_) => ErrorKind::Validation,
            Self::InvalidCredentials => ErrorKind::Unauthenticated,
            Self::EmailAlreadyRegistered { .. } => ErrorKind::Conflict,
            Self::UserNotFound { .. } | Self::PostNotFound { .. } => ErrorKind::NotFound,
            Self::NotPostOwner { .. }
            | Self::PostNotDeletable { .. }
            | Self::CommentNotDeletable { .. } => ErrorKind::Forbidden,
            Self::Storage(_) => ErrorKind::Storage,
        }
    }
}
