use serde::Serialize;

pub use crate::services::account::model::{
    LoginRequest, LoginResponse, RefreshTokenRequest, RegisterRequest, ResetPasswordRequest,
};

#[derive(Debug, Serialize)]
pub struct RegisterResponse {
    pub user_id: i64,
    pub email: String,
    pub nickname: String,
    pub role_code: String,
}
