use async_trait::async_trait;
use sqlx::PgPool;

use super::StoreResult;
use crate::database::models::{Comment, NewComment};

/// 评论存储
#[async_trait]
pub trait CommentStore: Send + Sync {
    async fn insert(&self, comment: NewComment) -> StoreResult<Comment>;

    async fn find_by_id(&self, id: i64) -> StoreResult<Option<Comment>>;

    /// 文章下的全部评论，按 ID 升序
    async fn list_by_post(&self, post_id: i64) -> StoreResult<Vec<Comment>>;

    /// 返回删除的条数
    async fn delete_many(&self, ids: &[i64]) -> StoreResult<u64>;
}

#[derive(Clone)]
pub struct PgCommentStore {
    pool: PgPool,
}

impl PgCommentStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

const COMMENT_COLUMNS: &str = "id, content, user_id, post_id, reply_to_comment_id, created_at";

#[async_trait]
impl CommentStore for PgCommentStore {
    async fn insert(&self, comment: NewComment) -> StoreResult<Comment> {
        let comment = sqlx::query_as::<_, Comment>(&format!(
            r#"
            INSERT INTO comments (content, user_id, post_id, reply_to_comment_id)
            VALUES ($1, $2, $3, $4)
            RETURNING {COMMENT_COLUMNS}
            "#
        ))
        .bind(&comment.content)
        .bind(comment.user_id)
        .bind(comment.post_id)
        .bind(comment.reply_to_comment_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(comment)
    }

    async fn find_by_id(&self, id: i64) -> StoreResult<Option<Comment>> {
        let comment = sqlx::query_as::<_, Comment>(&format!(
            "SELECT {COMMENT_COLUMNS} FROM comments WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(comment)
    }

    async fn list_by_post(&self, post_id: i64) -> StoreResult<Vec<Comment>> {
        let comments = sqlx::query_as::<_, Comment>(&format!(
            "SELECT {COMMENT_COLUMNS} FROM comments WHERE post_id = $1 ORDER BY id"
        ))
        .bind(post_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(comments)
    }

    async fn delete_many(&self, ids: &[i64]) -> StoreResult<u64> {
        let result = sqlx::query("DELETE FROM comments WHERE id = ANY($1)")
            .bind(ids)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected())
    }
}
