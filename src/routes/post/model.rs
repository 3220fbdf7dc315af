use serde::Deserialize;

pub use crate::services::post::model::{CreatePostRequest, GetAllPostsQuery, UpdatePostRequest};

#[derive(Debug, Deserialize)]
pub struct DeletePostRequest {
    pub id: i64,
}

#[derive(Debug, Deserialize)]
pub struct GetOnePostRequest {
    pub id: i64,
}
