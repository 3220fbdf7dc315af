use axum::{
    Json,
    extract::{Extension, State},
};

use crate::{
    AppState,
    common::{ApiJson, ApiResponse},
    database::models::Comment,
    error::AppError,
    utils::{Claims, success_to_api_response},
};

use super::model::{
    CommentsVo, CreateCommentRequest, DeleteCommentRequest, DeleteCommentResponse,
    GetCommentGraphRequest,
};

type ApiResult<T> = Result<Json<ApiResponse<T>>, AppError>;

#[axum::debug_handler(state = AppState)]
pub async fn create_one_comment(
    Extension(claims): Extension<Claims>,
    State(state): State<AppState>,
    ApiJson(req): ApiJson<CreateCommentRequest>,
) -> ApiResult<Comment> {
    let comment = state.comments.create_comment(claims.sub, req).await?;
    Ok(success_to_api_response(comment))
}

#[axum::debug_handler(state = AppState)]
pub async fn get_comment_graph(
    State(state): State<AppState>,
    ApiJson(req): ApiJson<GetCommentGraphRequest>,
) -> ApiResult<Vec<CommentsVo>> {
    let graph = state.comments.get_comment_graph(req.post_id).await?;
    Ok(success_to_api_response(graph))
}

#[axum::debug_handler(state = AppState)]
pub async fn delete_one_comment(
    Extension(claims): Extension<Claims>,
    State(state): State<AppState>,
    ApiJson(req): ApiJson<DeleteCommentRequest>,
) -> ApiResult<DeleteCommentResponse> {
    let deleted = state.comments.delete_comment(claims.sub, req.id).await?;
    Ok(success_to_api_response(DeleteCommentResponse { deleted }))
}
