use axum::{
    Json,
    extract::{Extension, State},
};

use crate::{
    AppState,
    common::{ApiJson, ApiResponse, EmptyResponse},
    error::AppError,
    services::account::model::validate_password,
    utils::{Claims, success_to_api_response},
};

use super::model::{
    LoginRequest, LoginResponse, RefreshTokenRequest, RegisterRequest, RegisterResponse,
    ResetPasswordRequest,
};

type ApiResult<T> = Result<Json<ApiResponse<T>>, AppError>;

/// 注册账户
#[axum::debug_handler(state = AppState)]
pub async fn register_account(
    State(state): State<AppState>,
    ApiJson(req): ApiJson<RegisterRequest>,
) -> ApiResult<RegisterResponse> {
    req.validate()?;

    let account = state.accounts.register_user(req).await?;
    Ok(success_to_api_response(RegisterResponse {
        user_id: account.id,
        email: account.email,
        nickname: account.nickname,
        role_code: account.role_code,
    }))
}

/// 登录账户
#[axum::debug_handler(state = AppState)]
pub async fn login_account(
    State(state): State<AppState>,
    ApiJson(req): ApiJson<LoginRequest>,
) -> ApiResult<LoginResponse> {
    let resp = state.accounts.login_user(req).await?;
    Ok(success_to_api_response(resp))
}

/// 登出账户
#[axum::debug_handler(state = AppState)]
pub async fn logout_account(
    Extension(claims): Extension<Claims>,
    State(state): State<AppState>,
) -> ApiResult<EmptyResponse> {
    state.accounts.logout_user(claims.sub).await?;
    Ok(success_to_api_response(EmptyResponse {}))
}

/// 重置当前登录用户的密码
#[axum::debug_handler(state = AppState)]
pub async fn reset_password(
    Extension(claims): Extension<Claims>,
    State(state): State<AppState>,
    ApiJson(req): ApiJson<ResetPasswordRequest>,
) -> ApiResult<EmptyResponse> {
    validate_password(&req.new_password)?;

    state.accounts.reset_password(claims.sub, req).await?;
    Ok(success_to_api_response(EmptyResponse {}))
}

/// 刷新令牌
#[axum::debug_handler(state = AppState)]
pub async fn refresh_token(
    State(state): State<AppState>,
    ApiJson(req): ApiJson<RefreshTokenRequest>,
) -> ApiResult<LoginResponse> {
    let resp = state.accounts.refresh_token(req).await?;
    Ok(success_to_api_response(resp))
}
