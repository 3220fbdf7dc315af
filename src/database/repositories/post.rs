use async_trait::async_trait;
use sqlx::PgPool;

use super::StoreResult;
use crate::database::models::{NewPost, Post};

/// 文章存储
#[async_trait]
pub trait PostStore: Send + Sync {
    async fn insert(&self, post: NewPost) -> StoreResult<Post>;

    /// 文章不存在时返回 `None`
    async fn update(&self, post: &Post) -> StoreResult<Option<Post>>;

    /// 返回是否删除了记录
    async fn delete(&self, id: i64) -> StoreResult<bool>;

    async fn find_by_id(&self, id: i64) -> StoreResult<Option<Post>>;

    /// 公开文章，按创建时间倒序分页
    async fn list_visible(&self, offset: i64, limit: i64) -> StoreResult<Vec<Post>>;

    async fn count_visible(&self) -> StoreResult<i64>;
}

#[derive(Clone)]
pub struct PgPostStore {
    pool: PgPool,
}

impl PgPostStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

const POST_COLUMNS: &str =
    "id, title, image, visibility, content_markdown, content_html, created_at, updated_at";

#[async_trait]
impl PostStore for PgPostStore {
    async fn insert(&self, post: NewPost) -> StoreResult<Post> {
        let post = sqlx::query_as::<_, Post>(&format!(
            r#"
            INSERT INTO posts (title, image, visibility, content_markdown, content_html)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING {POST_COLUMNS}
            "#
        ))
        .bind(&post.title)
        .bind(&post.image)
        .bind(post.visibility)
        .bind(&post.content_markdown)
        .bind(&post.content_html)
        .fetch_one(&self.pool)
        .await?;

        Ok(post)
    }

    async fn update(&self, post: &Post) -> StoreResult<Option<Post>> {
        let post = sqlx::query_as::<_, Post>(&format!(
            r#"
            UPDATE posts
            SET title = $1, image = $2, visibility = $3,
                content_markdown = $4, content_html = $5, updated_at = NOW()
            WHERE id = $6
            RETURNING {POST_COLUMNS}
            "#
        ))
        .bind(&post.title)
        .bind(&post.image)
        .bind(post.visibility)
        .bind(&post.content_markdown)
        .bind(&post.content_html)
        .bind(post.id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(post)
    }

    async fn delete(&self, id: i64) -> StoreResult<bool> {
        let result = sqlx::query("DELETE FROM posts WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn find_by_id(&self, id: i64) -> StoreResult<Option<Post>> {
        let post = sqlx::query_as::<_, Post>(&format!(
            "SELECT {POST_COLUMNS} FROM posts WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(post)
    }

    async fn list_visible(&self, offset: i64, limit: i64) -> StoreResult<Vec<Post>> {
        let posts = sqlx::query_as::<_, Post>(&format!(
            r#"
            SELECT {POST_COLUMNS} FROM posts
            WHERE visibility
            ORDER BY created_at DESC, id DESC
            OFFSET $1 LIMIT $2
            "#
        ))
        .bind(offset)
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;

        Ok(posts)
    }

    async fn count_visible(&self) -> StoreResult<i64> {
        let (total,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM posts WHERE visibility")
            .fetch_one(&self.pool)
            .await?;

        Ok(total)
    }
}
