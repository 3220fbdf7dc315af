use axum::Json;
use bcrypt::{hash, verify};
use serde::Serialize;

use crate::common::ApiResponse;

pub mod background;
pub mod markdown;
pub mod token;

pub use background::BackgroundTasks;
pub use markdown::render_markdown;
pub use token::{Claims, TokenIssuer, TokenKind, TokenPair};

pub fn hash_password(password: &str, cost: u32) -> Result<String, bcrypt::BcryptError> {
    hash(password.as_bytes(), cost)
}

pub fn verify_password(password: &str, hash: &str) -> Result<bool, bcrypt::BcryptError> {
    verify(password.as_bytes(), hash)
}

pub fn success_to_api_response<T: Serialize>(data: T) -> Json<ApiResponse<T>> {
    Json(ApiResponse {
        code: error_codes::SUCCESS,
        msg: "success".into(),
        resp_data: Some(data),
    })
}

pub fn error_to_api_response<T>(code: i32, msg: String) -> Json<ApiResponse<T>> {
    Json(ApiResponse {
        code,
        msg,
        resp_data: None,
    })
}

pub mod error_codes {
    pub const SUCCESS: i32 = 0;
    pub const VALIDATION_ERROR: i32 = 1000;
    pub const USER_EXISTS: i32 = 1001;
    pub const AUTH_FAILED: i32 = 1002;
    pub const PERMISSION_DENIED: i32 = 1003;
    pub const NOT_FOUND: i32 = 1004;
    pub const RATE_LIMIT: i32 = 1005;
    pub const INTERNAL_ERROR: i32 = 5000;
}

#[cfg(test)]
mod tests {
    use super::*;

    const TEST_COST: u32 = 4;

    #[test]
    fn hashed_password_verifies_only_original() {
        let hashed = hash_password("s3cret!", TEST_COST).unwrap();
        assert_ne!(hashed, "s3cret!");
        assert!(verify_password("s3cret!", &hashed).unwrap());
        assert!(!verify_password("S3cret!", &hashed).unwrap());
    }

    #[test]
    fn same_password_hashes_differently() {
        let a = hash_password("pw", TEST_COST).unwrap();
        let b = hash_password("pw", TEST_COST).unwrap();
        assert_ne!(a, b);
    }
}
