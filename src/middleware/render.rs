use axum::{
    body::{Body, to_bytes},
    extract::Request,
    http::header::CONTENT_LENGTH,
    middleware::Next,
    response::Response,
};
use serde_json::Value;

use crate::{error::AppError, utils::render_markdown};

const MAX_POST_BODY: usize = 2 * 1024 * 1024;

/// 把请求体中的 `content_markdown` 渲染为 `content_html` 后再交给文章处理函数
pub async fn markdown_render(req: Request, next: Next) -> Result<Response, AppError> {
    let (mut parts, body) = req.into_parts();

    let bytes = to_bytes(body, MAX_POST_BODY)
        .await
        .map_err(|_| AppError::Validation("请求体过大或读取失败".to_string()))?;
    let mut payload: Value = serde_json::from_slice(&bytes)
        .map_err(|_| AppError::Validation("请求体不是合法的 JSON".to_string()))?;

    if let Some(fields) = payload.as_object_mut() {
        if let Some(markdown) = fields.get("content_markdown").and_then(Value::as_str) {
            let html = render_markdown(markdown);
            fields.insert("content_html".to_string(), Value::String(html));
        }
    }

    let rendered = serde_json::to_vec(&payload)
        .map_err(|_| AppError::Validation("请求体不是合法的 JSON".to_string()))?;
    parts.headers.remove(CONTENT_LENGTH);

    Ok(next.run(Request::from_parts(parts, Body::from(rendered))).await)
}
