use std::sync::Arc;

use tracing::{debug, info};

use quill_types::models::{Comment, NewComment, NewPost, Post, User};

use crate::error::{ServiceError, ValidationError};
use crate::gateway::{GatewayError, PostGateway, UserGateway};

const MIN_TITLE_LEN: usize = 3;

/// Post and comment lifecycle, including who may delete what.
pub struct ContentService {
    posts: Arc<dyn PostGateway>,
    users: Arc<dyn UserGateway>,
}

impl ContentService {
    pub fn new(posts: Arc<dyn PostGateway>, users: Arc<dyn UserGateway>) -> Self {
        Self { posts, users }
    }

    // -- Posts --

    pub fn create_post(&self, title: &str, content: &str, author_id: i64) -> Result<Post, ServiceError> {
        let title = title.trim();
        let content = content.trim();

        if title.is_empty() {
            return Err(ValidationError::TitleRequired.into());
        }
        if title.chars().count() < MIN_TITLE_LEN {
            return Err(ValidationError::TitleTooShort.into());
        }
        if content.is_empty() {
            return Err(ValidationError::ContentRequired.into());
        }

        let author = self.require_user(author_id)?;

        let new_post = NewPost {
            title: title.to_string(),
            content: content.to_string(),
            user_id: author.id,
        };
        let inserted = self.posts.create(&new_post)?;

        info!("User {} created post {}", author.id, inserted.id);
        Ok(Post {
            id: inserted.id,
            title: new_post.title,
            content: new_post.content,
            user_id: new_post.user_id,
            username: author.username,
            created_at: inserted.created_at,
        })
    }

    pub fn get_all_posts(&self) -> Result<Vec<Post>, ServiceError> {
        Ok(self.posts.find_all()?)
    }

    pub fn get_post_by_id(&self, id: i64) -> Result<Post, ServiceError> {
        if id <= 0 {
            return Err(ValidationError::InvalidId.into());
        }
        self.require_post(id)
    }

    pub fn delete_post(&self, post_id: i64, requester_id: i64) -> Result<(), ServiceError> {
        let post = self.require_post(post_id)?;

        if post.user_id != requester_id {
            debug!("User {} refused delete of post {} owned by {}", requester_id, post_id, post.user_id);
            return Err(ServiceError::NotPostOwner { post_id, requester_id });
        }

        // Ownership is matched again inside the delete statement itself.
        match self.posts.delete(post_id, requester_id) {
            Ok(()) => {
                info!("User {} deleted post {}", requester_id, post_id);
                Ok(())
            }
            Err(GatewayError::NotAuthorizedOrNotFound) => {
                debug!("Delete of post {} by user {} matched no row", post_id, requester_id);
                Err(ServiceError::PostNotDeletable { post_id })
            }
            Err(e) => Err(e.into()),
        }
    }

    // -- Comments --

    pub fn create_comment(&self, post_id: i64, content: &str, author_id: i64) -> Result<Comment, ServiceError> {
        let content = content.trim();
        if content.is_empty() {
            return Err(ValidationError::CommentContentRequired.into());
        }

        let post = self.require_post(post_id)?;
        let author = self.require_user(author_id)?;

        let new_comment = NewComment {
            post_id: post.id,
            user_id: author.id,
            content: content.to_string(),
        };
        let inserted = self.posts.create_comment(&new_comment)?;

        info!("User {} commented {} on post {}", author.id, inserted.id, post.id);
        Ok(Comment {
            id: inserted.id,
            post_id: new_comment.post_id,
            user_id: new_comment.user_id,
            username: author.username,
            content: new_comment.content,
            created_at: inserted.created_at,
        })
    }

    pub fn get_comments_by_post_id(&self, post_id: i64) -> Result<Vec<Comment>, ServiceError> {
        self.require_post(post_id)?;
        Ok(self.posts.find_comments_by_post_id(post_id)?)
    }

    pub fn delete_comment(&self, post_id: i64, comment_id: i64, requester_id: i64) -> Result<(), ServiceError> {
        self.require_post(post_id)?;
        self.require_user(requester_id)?;

        match self.posts.delete_comment(post_id, comment_id, requester_id) {
            Ok(()) => {
                info!("User {} deleted comment {} on post {}", requester_id, comment_id, post_id);
                Ok(())
            }
            Err(GatewayError::NotAuthorizedOrNotFound) => {
                Err(ServiceError::CommentNotDeletable { post_id, comment_id })
            }
            Err(e) => Err(e.into()),
        }
    }

    fn require_post(&self, id: i64) -> Result<Post, ServiceError> {
        self.posts
            .find_by_id(id)?
            .ok_or(ServiceError::PostNotFound { id })
    }

    fn require_user(&self, id: i64) -> Result<User, ServiceError> {
        self.users
            .find_by_id(id)?
            .ok_or(ServiceError::UserNotFound { id })
    }
}
