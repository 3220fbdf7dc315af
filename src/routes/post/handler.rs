use axum::{Json, extract::State};

use crate::{
    AppState,
    common::{ApiJson, ApiQuery, ApiResponse, EmptyResponse, PaginatedResponse},
    database::models::Post,
    error::AppError,
    utils::success_to_api_response,
};

use super::model::{
    CreatePostRequest, DeletePostRequest, GetAllPostsQuery, GetOnePostRequest, UpdatePostRequest,
};

type ApiResult<T> = Result<Json<ApiResponse<T>>, AppError>;

#[axum::debug_handler(state = AppState)]
pub async fn create_one_post(
    State(state): State<AppState>,
    ApiJson(req): ApiJson<CreatePostRequest>,
) -> ApiResult<Post> {
    let post = state.posts.create_post(req).await?;
    Ok(success_to_api_response(post))
}

#[axum::debug_handler(state = AppState)]
pub async fn update_one_post(
    State(state): State<AppState>,
    ApiJson(req): ApiJson<UpdatePostRequest>,
) -> ApiResult<Post> {
    let post = state.posts.update_post(req).await?;
    Ok(success_to_api_response(post))
}

#[axum::debug_handler(state = AppState)]
pub async fn delete_one_post(
    State(state): State<AppState>,
    ApiJson(req): ApiJson<DeletePostRequest>,
) -> ApiResult<EmptyResponse> {
    state.posts.delete_post(req.id).await?;
    Ok(success_to_api_response(EmptyResponse {}))
}

#[axum::debug_handler(state = AppState)]
pub async fn get_all_posts(
    State(state): State<AppState>,
    ApiQuery(query): ApiQuery<GetAllPostsQuery>,
) -> ApiResult<PaginatedResponse<Post>> {
    let page = state.posts.get_all_posts(query).await?;
    Ok(success_to_api_response(page))
}

#[axum::debug_handler(state = AppState)]
pub async fn get_one_post(
    State(state): State<AppState>,
    ApiJson(req): ApiJson<GetOnePostRequest>,
) -> ApiResult<Post> {
    let post = state.posts.get_one_post(req.id).await?;
    Ok(success_to_api_response(post))
}
