use serde::{Deserialize, Serialize};

use crate::database::models::Comment;

#[derive(Debug, Deserialize)]
pub struct CreateCommentRequest {
    pub post_id: i64,
    pub content: String,
    #[serde(default)]
    pub reply_to_comment_id: Option<i64>,
}

/// 嵌套评论视图
#[derive(Debug, Clone, Serialize)]
pub struct CommentsVo {
    pub id: i64,
    pub content: String,
    pub user_id: i64,
    pub post_id: i64,
    pub reply_to_comment_id: Option<i64>,
    pub replies: Vec<CommentsVo>,
}

impl From<Comment> for CommentsVo {
    fn from(comment: Comment) -> Self {
        Self {
            id: comment.id,
            content: comment.content,
            user_id: comment.user_id,
            post_id: comment.post_id,
            reply_to_comment_id: comment.reply_to_comment_id,
            replies: Vec::new(),
        }
    }
}
