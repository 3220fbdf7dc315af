use serde::{Deserialize, Serialize};

pub use crate::services::comment::model::{CommentsVo, CreateCommentRequest};

#[derive(Debug, Deserialize)]
pub struct GetCommentGraphRequest {
    pub post_id: i64,
}

#[derive(Debug, Deserialize)]
pub struct DeleteCommentRequest {
    pub id: i64,
}

#[derive(Debug, Serialize)]
pub struct DeleteCommentResponse {
    pub deleted: u64,
}
