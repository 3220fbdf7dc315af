pub mod model;

use std::sync::Arc;

use self::model::{CreatePostRequest, GetAllPostsQuery, UpdatePostRequest, validate_title};
use crate::common::{PaginatedResponse, Pagination};
use crate::database::models::{NewPost, Post};
use crate::database::repositories::PostStore;
use crate::error::AppError;
use crate::utils::render_markdown;

/// 文章增删改查
pub struct PostService {
    posts: Arc<dyn PostStore>,
}

impl PostService {
    pub fn new(posts: Arc<dyn PostStore>) -> Self {
        Self { posts }
    }

    pub async fn create_post(&self, req: CreatePostRequest) -> Result<Post, AppError> {
        validate_title(&req.title)?;

        let content_html = html_or_render(req.content_html, &req.content_markdown);
        let post = self
            .posts
            .insert(NewPost {
                title: req.title.trim().to_string(),
                image: req.image,
                visibility: req.visibility,
                content_markdown: req.content_markdown,
                content_html,
            })
            .await?;

        tracing::info!(post_id = post.id, "Post created");
        Ok(post)
    }

    pub async fn update_post(&self, req: UpdatePostRequest) -> Result<Post, AppError> {
        validate_title(&req.title)?;

        let mut post = self
            .posts
            .find_by_id(req.id)
            .await?
            .ok_or(AppError::PostNotFound)?;

        post.content_html = html_or_render(req.content_html, &req.content_markdown);
        post.title = req.title.trim().to_string();
        post.image = req.image;
        post.visibility = req.visibility;
        post.content_markdown = req.content_markdown;

        let post = self
            .posts
            .update(&post)
            .await?
            .ok_or(AppError::PostNotFound)?;

        tracing::info!(post_id = post.id, "Post updated");
        Ok(post)
    }

    pub async fn delete_post(&self, id: i64) -> Result<(), AppError> {
        if !self.posts.delete(id).await? {
            return Err(AppError::PostNotFound);
        }

        tracing::info!(post_id = id, "Post deleted");
        Ok(())
    }

    /// 隐藏的文章按不存在处理
    pub async fn get_one_post(&self, id: i64) -> Result<Post, AppError> {
        self.posts
            .find_by_id(id)
            .await?
            .filter(|post| post.visibility)
            .ok_or(AppError::PostNotFound)
    }

    pub async fn get_all_posts(
        &self,
        query: GetAllPostsQuery,
    ) -> Result<PaginatedResponse<Post>, AppError> {
        query.validate()?;

        let offset = (query.page - 1).saturating_mul(query.page_size);
        let items = self.posts.list_visible(offset, query.page_size).await?;
        let total = self.posts.count_visible().await?;

        Ok(PaginatedResponse {
            items,
            pagination: Pagination {
                page: query.page,
                page_size: query.page_size,
                total,
            },
        })
    }
}

// 渲染中间件未填充 HTML 时在此补渲染
fn html_or_render(content_html: String, content_markdown: &str) -> String {
    if content_html.is_empty() && !content_markdown.is_empty() {
        render_markdown(content_markdown)
    } else {
        content_html
    }
}
