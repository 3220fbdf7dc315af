use axum::{
    extract::{FromRequestParts, Request, State},
    middleware::Next,
    response::Response,
};
use axum_extra::{
    TypedHeader,
    headers::{Authorization, authorization::Bearer},
};

use crate::{AppState, error::AppError, utils::TokenKind};

/// 校验 `Authorization: Bearer <access token>`，
/// 通过后把 [`Claims`](crate::utils::Claims) 放入请求扩展
pub async fn auth_middleware(
    State(state): State<AppState>,
    req: Request,
    next: Next,
) -> Result<Response, AppError> {
    let (mut parts, body) = req.into_parts();

    let TypedHeader(Authorization(bearer)) =
        TypedHeader::<Authorization<Bearer>>::from_request_parts(&mut parts, &state)
            .await
            .map_err(|_| AppError::Unauthorized)?;

    let claims = state
        .tokens
        .verify(bearer.token(), TokenKind::Access)
        .map_err(|e| {
            tracing::debug!(error = %e, "Rejected access token");
            AppError::Unauthorized
        })?;

    parts.extensions.insert(claims);
    Ok(next.run(Request::from_parts(parts, body)).await)
}
