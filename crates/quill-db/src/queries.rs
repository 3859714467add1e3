use crate::Database;
use crate::models::{CommentRow, PostRow, UserRow};
use anyhow::Result;
use chrono::{DateTime, Utc};
use rusqlite::{Connection, OptionalExtension, Row};

const POST_COLUMNS: &str = "p.id, p.title, p.content, p.user_id, u.username, p.created_at";
const COMMENT_COLUMNS: &str = "c.id, c.post_id, c.user_id, u.username, c.content, c.created_at";

impl Database {
    // -- Users --

    /// Returns the new row's `(id, created_at)`.
    pub fn insert_user(&self, email: &str, password: &str, username: &str) -> Result<(i64, DateTime<Utc>)> {
        self.with_conn(|conn| {
            let stamp = conn.query_row(
                "INSERT INTO users (email, password, username) VALUES (?1, ?2, ?3)
                 RETURNING id, created_at",
                (email, password, username),
                |row| Ok((row.get(0)?, row.get(1)?)),
            )?;
            Ok(stamp)
        })
    }

    pub fn get_user_by_email(&self, email: &str) -> Result<Option<UserRow>> {
        self.with_conn(|conn| query_user(conn, "email", rusqlite::params![email]))
    }

    pub fn get_user_by_id(&self, id: i64) -> Result<Option<UserRow>> {
        self.with_conn(|conn| query_user(conn, "id", rusqlite::params![id]))
    }

    // -- Posts --

    pub fn insert_post(&self, title: &str, content: &str, user_id: i64) -> Result<(i64, DateTime<Utc>)> {
        self.with_conn(|conn| {
            let stamp = conn.query_row(
                "INSERT INTO posts (title, content, user_id) VALUES (?1, ?2, ?3)
                 RETURNING id, created_at",
                rusqlite::params![title, content, user_id],
                |row| Ok((row.get(0)?, row.get(1)?)),
            )?;
            Ok(stamp)
        })
    }

    /// All posts, newest first. `id` breaks ties within the same second.
    pub fn get_posts(&self) -> Result<Vec<PostRow>> {
        self.with_conn(|conn| {
            let mut stmt = conn.prepare(&format!(
                "SELECT {POST_COLUMNS}
                 FROM posts p
                 JOIN users u ON p.user_id = u.id
                 ORDER BY p.created_at DESC, p.id DESC"
            ))?;

            let rows = stmt
                .query_map([], post_row)?
                .collect::<std::result::Result<Vec<_>, _>>()?;

            Ok(rows)
        })
    }

    pub fn get_post_by_id(&self, id: i64) -> Result<Option<PostRow>> {
        self.with_conn(|conn| {
            let row = conn
                .query_row(
                    &format!(
                        "SELECT {POST_COLUMNS}
                         FROM posts p
                         JOIN users u ON p.user_id = u.id
                         WHERE p.id = ?1"
                    ),
                    [id],
                    post_row,
                )
                .optional()?;

            Ok(row)
        })
    }

    /// Deletes a post owned by `user_id`. Returns the number of rows removed;
    /// its comments go with it through the foreign-key cascade.
    pub fn delete_post(&self, id: i64, user_id: i64) -> Result<usize> {
        self.with_conn(|conn| {
            let deleted = conn.execute(
                "DELETE FROM posts WHERE id = ?1 AND user_id = ?2",
                [id, user_id],
            )?;
            Ok(deleted)
        })
    }

    // -- Comments --

    pub fn insert_comment(&self, post_id: i64, user_id: i64, content: &str) -> Result<(i64, DateTime<Utc>)> {
        self.with_conn(|conn| {
            let stamp = conn.query_row(
                "INSERT INTO comments (post_id, user_id, content) VALUES (?1, ?2, ?3)
                 RETURNING id, created_at",
                rusqlite::params![post_id, user_id, content],
                |row| Ok((row.get(0)?, row.get(1)?)),
            )?;
            Ok(stamp)
        })
    }

    /// Comments of a post, oldest first.
    pub fn get_comments(&self, post_id: i64) -> Result<Vec<CommentRow>> {
        self.with_conn(|conn| {
            let mut stmt = conn.prepare(&format!(
                "SELECT {COMMENT_COLUMNS}
                 FROM comments c
                 JOIN users u ON c.user_id = u.id
                 WHERE c.post_id = ?1
                 ORDER BY c.created_at ASC, c.id ASC"
            ))?;

            let rows = stmt
                .query_map([post_id], comment_row)?
                .collect::<std::result::Result<Vec<_>, _>>()?;

            Ok(rows)
        })
    }

    /// Deletes a comment only when id, post and author all match.
    /// Returns the number of rows removed.
    pub fn delete_comment(&self, post_id: i64, comment_id: i64, user_id: i64) -> Result<usize> {
        self.with_conn(|conn| {
            let deleted = conn.execute(
                "DELETE FROM comments WHERE id = ?1 AND post_id = ?2 AND user_id = ?3",
                [comment_id, post_id, user_id],
            )?;
            Ok(deleted)
        })
    }
}

fn query_user(conn: &Connection, column: &str, params: &[&dyn rusqlite::ToSql]) -> Result<Option<UserRow>> {
    let mut stmt = conn.prepare(&format!(
        "SELECT id, email, password, username, created_at FROM users WHERE {column} = ?1"
    ))?;

    let row = stmt
        .query_row(params, |row| {
            Ok(UserRow {
                id: row.get(0)?,
                email: row.get(1)?,
                password: row.get(2)?,
                username: row.get(3)?,
                created_at: row.get(4)?,
            })
        })
        .optional()?;

    Ok(row)
}

fn post_row(row: &Row<'_>) -> rusqlite::Result<PostRow> {
    Ok(PostRow {
        id: row.get(0)?,
        title: row.get(1)?,
        content: row.get(2)?,
        user_id: row.get(3)?,
        username: row.get(4)?,
        created_at: row.get(5)?,
    })
}

fn comment_row(row: &Row<'_>) -> rusqlite::Result<CommentRow> {
    Ok(CommentRow {
        id: row.get(0)?,
        post_id: row.get(1)?,
        user_id: row.get(2)?,
        username: row.get(3)?,
        content: row.get(4)?,
        created_at: row.get(5)?,
    })
}
