use axum::{
    extract::rejection::{JsonRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

use crate::utils::{error_codes, error_to_api_response};

/// 持久层错误
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("unique constraint violated: {0}")]
    UniqueViolation(String),
}

/// 会话缓存错误
#[derive(Debug, Error)]
pub enum CacheError {
    #[error("redis error: {0}")]
    Redis(#[from] redis::RedisError),

    #[error("cache unavailable: {0}")]
    Unavailable(String),
}

/// 对外暴露的业务错误，消息可直接展示给调用方
#[derive(Debug, Error)]
pub enum AppError {
    #[error("邮箱已被注册")]
    DuplicateEmail,

    #[error("密码加密失败")]
    PasswordHash(#[source] bcrypt::BcryptError),

    #[error("用户不存在")]
    UserNotFound,

    #[error("此用户不存在")]
    AccountNotFound,

    #[error("密码错误")]
    IncorrectPassword,

    #[error("两次密码输入不一致")]
    PasswordsDoNotMatch,

    #[error("生成 token 失败")]
    TokenIssue(#[source] jsonwebtoken::errors::Error),

    #[error("无效的刷新令牌")]
    InvalidRefreshToken,

    #[error("未授权访问")]
    Unauthorized,

    #[error("无权操作此资源")]
    Forbidden,

    #[error("文章不存在")]
    PostNotFound,

    #[error("评论不存在")]
    CommentNotFound,

    #[error("{0}")]
    Validation(String),

    #[error("请求过于频繁，请在{0}秒后重试")]
    RateLimited(u64),

    #[error("数据库操作失败")]
    Store(#[from] StoreError),

    #[error("缓存操作失败")]
    Cache(#[from] CacheError),
}

impl AppError {
    pub fn status_and_code(&self) -> (StatusCode, i32) {
        match self {
            AppError::Validation(_) | AppError::PasswordsDoNotMatch => {
                (StatusCode::BAD_REQUEST, error_codes::VALIDATION_ERROR)
            }
            AppError::DuplicateEmail => (StatusCode::CONFLICT, error_codes::USER_EXISTS),
            AppError::IncorrectPassword
            | AppError::InvalidRefreshToken
            | AppError::Unauthorized => (StatusCode::UNAUTHORIZED, error_codes::AUTH_FAILED),
            AppError::Forbidden => (StatusCode::FORBIDDEN, error_codes::PERMISSION_DENIED),
            AppError::UserNotFound
            | AppError::AccountNotFound
            | AppError::PostNotFound
            | AppError::CommentNotFound => (StatusCode::NOT_FOUND, error_codes::NOT_FOUND),
            AppError::RateLimited(_) => (StatusCode::TOO_MANY_REQUESTS, error_codes::RATE_LIMIT),
            AppError::PasswordHash(_)
            | AppError::TokenIssue(_)
            | AppError::Store(_)
            | AppError::Cache(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                error_codes::INTERNAL_ERROR,
            ),
        }
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        tracing::debug!(
            status = %rejection.status(),
            "Rejected request body: {}",
            rejection.body_text()
        );
        AppError::Validation("请求体格式错误".to_string())
    }
}

impl From<QueryRejection> for AppError {
    fn from(rejection: QueryRejection) -> Self {
        tracing::debug!("Rejected query string: {}", rejection.body_text());
        AppError::Validation("查询参数格式错误".to_string())
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code) = self.status_and_code();

        if status.is_server_error() {
            // 内部错误只写日志，不透出给调用方
            match std::error::Error::source(&self) {
                Some(source) => tracing::error!(error = %self, source = %source, "Request failed"),
                None => tracing::error!(error = %self, "Request failed"),
            }
        }

        (status, error_to_api_response::<()>(code, self.to_string())).into_response()
    }
}
