//! SQLite adapters for the service-layer gateway traits.
//!
//! Each adapter holds a shared handle to the [`Database`] it was built with.

use std::sync::Arc;

use quill_service::gateway::{GatewayError, Inserted, PostGateway, UserGateway};
use quill_types::models::{Comment, NewComment, NewPost, NewUser, Post, User};

use crate::Database;

pub struct SqliteUserGateway {
    db: Arc<Database>,
}

impl SqliteUserGateway {
    pub fn new(db: Arc<Database>) -> Self {
        Self { db }
    }
}

impl UserGateway for SqliteUserGateway {
    fn create(&self, user: &NewUser) -> Result<Inserted, GatewayError> {
        let (id, created_at) = self
            .db
            .insert_user(&user.email, &user.password, &user.username)
            .map_err(unique_violation_as_duplicate)?;
        Ok(Inserted { id, created_at })
    }

    fn find_by_email(&self, email: &str) -> Result<Option<User>, GatewayError> {
        Ok(self.db.get_user_by_email(email)?.map(User::from))
    }

    fn find_by_id(&self, id: i64) -> Result<Option<User>, GatewayError> {
        Ok(self.db.get_user_by_id(id)?.map(User::from))
    }
}

fn unique_violation_as_duplicate(err: anyhow::Error) -> GatewayError {
    match err.downcast_ref::<rusqlite::Error>() {
        Some(rusqlite::Error::SqliteFailure(e, _))
            if e.extended_code == rusqlite::ffi::SQLITE_CONSTRAINT_UNIQUE =>
        {
            GatewayError::Duplicate
        }
        _ => GatewayError::Storage(err),
    }
}

pub struct SqlitePostGateway {
    db: Arc<Database>,
}

impl SqlitePostGateway {
    pub fn new(db: Arc<Database>) -> Self {
        Self { db }
    }
}

impl PostGateway for SqlitePostGateway {
    fn create(&self, post: &NewPost) -> Result<Inserted, GatewayError> {
        let (id, created_at) = self.db.insert_post(&post.title, &post.content, post.user_id)?;
        Ok(Inserted { id, created_at })
    }

    fn find_all(&self) -> Result<Vec<Post>, GatewayError> {
        Ok(self.db.get_posts()?.into_iter().map(Post::from).collect())
    }

    fn find_by_id(&self, id: i64) -> Result<Option<Post>, GatewayError> {
        Ok(self.db.get_post_by_id(id)?.map(Post::from))
    }

    fn delete(&self, post_id: i64, owner_id: i64) -> Result<(), GatewayError> {
        match self.db.delete_post(post_id, owner_id)? {
            0 => Err(GatewayError::NotAuthorizedOrNotFound),
            _ => Ok(()),
        }
    }

    fn create_comment(&self, comment: &NewComment) -> Result<Inserted, GatewayError> {
        let (id, created_at) =
            self.db.insert_comment(comment.post_id, comment.user_id, &comment.content)?;
        Ok(Inserted { id, created_at })
    }

    fn find_comments_by_post_id(&self, post_id: i64) -> Result<Vec<Comment>, GatewayError> {
        Ok(self.db.get_comments(post_id)?.into_iter().map(Comment::from).collect())
    }

    fn delete_comment(&self, post_id: i64, comment_id: i64, user_id: i64) -> Result<(), GatewayError> {
        match self.db.delete_comment(post_id, comment_id, user_id)? {
            0 => Err(GatewayError::NotAuthorizedOrNotFound),
            _ => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Fixture {
        users: SqliteUserGateway,
        posts: SqlitePostGateway,
    }

    fn fixture() -> Fixture {
        let db = Arc::new(Database::open_in_memory().unwrap());
        Fixture {
            users: SqliteUserGateway::new(db.clone()),
            posts: SqlitePostGateway::new(db),
        }
    }

    fn new_user(email: &str, username: &str) -> NewUser {
        NewUser {
            email: email.into(),
            password: "secret1".into(),
            username: username.into(),
        }
    }

    fn new_post(user_id: i64, title: &str) -> NewPost {
        NewPost {
            title: title.into(),
            content: "Body".into(),
            user_id,
        }
    }

    fn new_comment(post_id: i64, user_id: i64, content: &str) -> NewComment {
        NewComment {
            post_id,
            user_id,
            content: content.into(),
        }
    }

    #[test]
    fn user_roundtrip_by_email_and_id() {
        let f = fixture();
        let inserted = f.users.create(&new_user("a@b.com", "alice")).unwrap();
        assert_eq!(inserted.id, 1);

        let by_email = f.users.find_by_email("a@b.com").unwrap().unwrap();
        assert_eq!(by_email.id, 1);
        assert_eq!(by_email.password, "secret1");
        assert_eq!(by_email.created_at, inserted.created_at);

        let by_id = f.users.find_by_id(1).unwrap().unwrap();
        assert_eq!(by_id.username, "alice");

        assert!(f.users.find_by_email("nobody@b.com").unwrap().is_none());
        assert!(f.users.find_by_id(2).unwrap().is_none());
    }

    #[test]
    fn duplicate_email_is_reported_as_duplicate() {
        let f = fixture();
        f.users.create(&new_user("a@b.com", "alice")).unwrap();

        let err = f.users.create(&new_user("a@b.com", "alice2")).unwrap_err();
        assert!(matches!(err, GatewayError::Duplicate), "{err:?}");
        assert!(f.users.find_by_id(2).unwrap().is_none());
    }

    #[test]
    fn posts_join_author_and_list_newest_first() {
        let f = fixture();
        f.users.create(&new_user("a@b.com", "alice")).unwrap();
        let first = f.posts.create(&new_post(1, "First")).unwrap();
        let second = f.posts.create(&new_post(1, "Second")).unwrap();

        let all = f.posts.find_all().unwrap();
        let ids: Vec<i64> = all.iter().map(|p| p.id).collect();
        assert_eq!(ids, vec![second.id, first.id]);
        assert!(all.iter().all(|p| p.username == "alice"));

        let one = f.posts.find_by_id(first.id).unwrap().unwrap();
        assert_eq!(one.title, "First");
        assert!(f.posts.find_by_id(99).unwrap().is_none());
    }

    #[test]
    fn empty_tables_give_empty_vecs() {
        let f = fixture();
        assert!(f.posts.find_all().unwrap().is_empty());
        assert!(f.posts.find_comments_by_post_id(1).unwrap().is_empty());
    }

    #[test]
    fn post_for_missing_user_violates_foreign_key() {
        let f = fixture();
        let err = f.posts.create(&new_post(42, "Orphan")).unwrap_err();
        assert!(matches!(err, GatewayError::Storage(_)));
    }

    #[test]
    fn post_delete_requires_owner_and_cascades() {
        let f = fixture();
        f.users.create(&new_user("a@b.com", "alice")).unwrap();
        f.users.create(&new_user("c@d.com", "bob")).unwrap();
        let post = f.posts.create(&new_post(1, "First")).unwrap();
        f.posts.create_comment(&new_comment(post.id, 2, "nice")).unwrap();

        let err = f.posts.delete(post.id, 2).unwrap_err();
        assert!(matches!(err, GatewayError::NotAuthorizedOrNotFound));
        assert!(f.posts.find_by_id(post.id).unwrap().is_some());

        f.posts.delete(post.id, 1).unwrap();
        assert!(f.posts.find_by_id(post.id).unwrap().is_none());
        assert!(f.posts.find_comments_by_post_id(post.id).unwrap().is_empty());

        let err = f.posts.delete(post.id, 1).unwrap_err();
        assert!(matches!(err, GatewayError::NotAuthorizedOrNotFound));
    }

    #[test]
    fn comments_list_oldest_first_with_author() {
        let f = fixture();
        f.users.create(&new_user("a@b.com", "alice")).unwrap();
        f.users.create(&new_user("c@d.com", "bob")).unwrap();
        let post = f.posts.create(&new_post(1, "First")).unwrap();
        let c1 = f.posts.create_comment(&new_comment(post.id, 2, "one")).unwrap();
        let c2 = f.posts.create_comment(&new_comment(post.id, 1, "two")).unwrap();

        let comments = f.posts.find_comments_by_post_id(post.id).unwrap();
        let ids: Vec<i64> = comments.iter().map(|c| c.id).collect();
        assert_eq!(ids, vec![c1.id, c2.id]);
        assert_eq!(comments[0].username, "bob");
        assert_eq!(comments[1].username, "alice");
    }

    #[test]
    fn comment_delete_needs_exact_triple() {
        let f = fixture();
        f.users.create(&new_user("a@b.com", "alice")).unwrap();
        f.users.create(&new_user("c@d.com", "bob")).unwrap();
        let p1 = f.posts.create(&new_post(1, "First")).unwrap();
        let p2 = f.posts.create(&new_post(1, "Second")).unwrap();
        let comment = f.posts.create_comment(&new_comment(p1.id, 1, "mine")).unwrap();

        // wrong user
        let err = f.posts.delete_comment(p1.id, comment.id, 2).unwrap_err();
        assert!(matches!(err, GatewayError::NotAuthorizedOrNotFound));
        // wrong post
        let err = f.posts.delete_comment(p2.id, comment.id, 1).unwrap_err();
        assert!(matches!(err, GatewayError::NotAuthorizedOrNotFound));
        // missing comment
        let err = f.posts.delete_comment(p1.id, 999, 1).unwrap_err();
        assert!(matches!(err, GatewayError::NotAuthorizedOrNotFound));

        f.posts.delete_comment(p1.id, comment.id, 1).unwrap();
        assert!(f.posts.find_comments_by_post_id(p1.id).unwrap().is_empty());
    }
}
