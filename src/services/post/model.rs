use serde::Deserialize;

use crate::error::AppError;

/// 创建文章请求，`content_html` 由 markdown 渲染中间件填充
#[derive(Debug, Deserialize)]
pub struct CreatePostRequest {
    pub title: String,
    #[serde(default)]
    pub image: String,
    #[serde(default = "default_visibility")]
    pub visibility: bool,
    pub content_markdown: String,
    #[serde(default)]
    pub content_html: String,
}

#[derive(Debug, Deserialize)]
pub struct UpdatePostRequest {
    pub id: i64,
    pub title: String,
    #[serde(default)]
    pub image: String,
    #[serde(default = "default_visibility")]
    pub visibility: bool,
    pub content_markdown: String,
    #[serde(default)]
    pub content_html: String,
}

#[derive(Debug, Deserialize)]
pub struct GetAllPostsQuery {
    #[serde(default = "default_page")]
    pub page: i64,
    #[serde(default = "default_page_size")]
    pub page_size: i64,
}

fn default_visibility() -> bool {
    true
}

fn default_page() -> i64 {
    1
}

fn default_page_size() -> i64 {
    10
}

pub fn validate_title(title: &str) -> Result<(), AppError> {
    let len = title.trim().chars().count();
    if !(1..=255).contains(&len) {
        return Err(AppError::Validation(
            "标题长度必须在1到255个字符之间".to_string(),
        ));
    }
    Ok(())
}

impl GetAllPostsQuery {
    pub fn validate(&self) -> Result<(), AppError> {
        if self.page < 1 || !(1..=100).contains(&self.page_size) {
            return Err(AppError::Validation(
                "分页参数无效，页码从1开始，每页1到100条".to_string(),
            ));
        }
        Ok(())
    }
}
