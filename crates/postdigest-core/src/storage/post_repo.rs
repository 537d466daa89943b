use chrono::{DateTime, Utc};
use sqlx::FromRow;

use super::Database;
use crate::post::{NewPost, Post};
use crate::{Error, Result};

/// Repository for posts and their meta values
pub struct PostRepository<'a> {
    db: &'a Database,
}

#[derive(FromRow)]
struct PostRow {
    id: i64,
    post_type: String,
    title: String,
    content: String,
    excerpt: Option<String>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<PostRow> for Post {
    fn from(row: PostRow) -> Self {
        Post {
            id: row.id,
            post_type: row.post_type,
            title: row.title,
            content: row.content,
            excerpt: row.excerpt,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

impl<'a> PostRepository<'a> {
    pub fn new(db: &'a Database) -> Self {
        Self { db }
    }

    /// Create a new post
    pub async fn create(&self, new_post: &NewPost) -> Result<Post> {
        let now = Utc::now();

        let result = sqlx::query(
            r#"
            INSERT INTO posts (post_type, title, content, created_at, updated_at)
            VALUES (?, ?, ?, ?, ?)
            "#,
        )
        .bind(&new_post.post_type)
        .bind(&new_post.title)
        .bind(&new_post.content)
        .bind(now)
        .bind(now)
        .execute(self.db.pool())
        .await?;

        let id = result.last_insert_rowid();
        self.find_by_id(id).await?.ok_or(Error::PostNotFound(id))
    }

    /// Find a post by ID
    pub async fn find_by_id(&self, id: i64) -> Result<Option<Post>> {
        let row: Option<PostRow> = sqlx::query_as(
            r#"
            SELECT id, post_type, title, content, excerpt, created_at, updated_at
            FROM posts
            WHERE id = ?
            "#,
        )
        .bind(id)
        .fetch_optional(self.db.pool())
        .await?;

        Ok(row.map(Post::from))
    }

    /// List all posts, newest first
    pub async fn list_all(&self) -> Result<Vec<Post>> {
        let rows: Vec<PostRow> = sqlx::query_as(
            r#"
            SELECT id, post_type, title, content, excerpt, created_at, updated_at
            FROM posts
            ORDER BY created_at DESC, id DESC
            "#,
        )
        .fetch_all(self.db.pool())
        .await?;

        Ok(rows.into_iter().map(Post::from).collect())
    }

    /// Raw body of a post
    pub async fn content(&self, id: i64) -> Result<String> {
        let content: Option<String> = sqlx::query_scalar("SELECT content FROM posts WHERE id = ?")
            .bind(id)
            .fetch_optional(self.db.pool())
            .await?;

        content.ok_or(Error::PostNotFound(id))
    }

    /// Overwrite the post's own excerpt field
    pub async fn update_excerpt(&self, id: i64, excerpt: &str) -> Result<()> {
        let result = sqlx::query("UPDATE posts SET excerpt = ?, updated_at = ? WHERE id = ?")
            .bind(excerpt)
            .bind(Utc::now())
            .bind(id)
            .execute(self.db.pool())
            .await?;

        if result.rows_affected() == 0 {
            return Err(Error::PostNotFound(id));
        }
        Ok(())
    }

    /// Read a meta value
    pub async fn get_meta(&self, post_id: i64, key: &str) -> Result<Option<String>> {
        let value = sqlx::query_scalar(
            "SELECT meta_value FROM post_meta WHERE post_id = ? AND meta_key = ?",
        )
        .bind(post_id)
        .bind(key)
        .fetch_optional(self.db.pool())
        .await?;

        Ok(value)
    }

    /// Insert or replace a meta value
    pub async fn set_meta(&self, post_id: i64, key: &str, value: &str) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO post_meta (post_id, meta_key, meta_value, updated_at)
            VALUES (?, ?, ?, ?)
            ON CONFLICT(post_id, meta_key) DO UPDATE SET
                meta_value = excluded.meta_value,
                updated_at = excluded.updated_at
            "#,
        )
        .bind(post_id)
        .bind(key)
        .bind(value)
        .bind(Utc::now())
        .execute(self.db.pool())
        .await?;

        Ok(())
    }

    /// Remove a meta value, returning whether it existed
    pub async fn delete_meta(&self, post_id: i64, key: &str) -> Result<bool> {
        let result = sqlx::query("DELETE FROM post_meta WHERE post_id = ? AND meta_key = ?")
            .bind(post_id)
            .bind(key)
            .execute(self.db.pool())
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
