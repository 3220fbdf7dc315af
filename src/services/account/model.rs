use serde::{Deserialize, Serialize};

use crate::error::AppError;

#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    pub email: String,
    pub password: String,
    pub nickname: String,
    #[serde(default)]
    pub phone: String,
}

impl RegisterRequest {
    pub fn validate(&self) -> Result<(), AppError> {
        validate_email(&self.email)?;
        validate_password(&self.password)?;
        let nickname_len = self.nickname.chars().count();
        if !(1..=24).contains(&nickname_len) {
            return Err(AppError::Validation(
                "昵称长度必须在1到24个字符之间".to_string(),
            ));
        }
        Ok(())
    }
}

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
    /// 图形验证码，目前只透传不校验
    #[serde(default)]
    pub img_verification_code: String,
}

#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub user_id: i64,
    pub access_token: String,
    pub refresh_token: String,
}

#[derive(Debug, Deserialize)]
pub struct ResetPasswordRequest {
    pub new_password: String,
    pub again_new_password: String,
}

#[derive(Debug, Deserialize)]
pub struct RefreshTokenRequest {
    pub refresh_token: String,
}

pub fn validate_email(email: &str) -> Result<(), AppError> {
    let valid = match email.split_once('@') {
        Some((local, domain)) => !local.is_empty() && domain.contains('.') && !email.contains(' '),
        None => false,
    };
    if !valid {
        return Err(AppError::Validation("邮箱格式无效".to_string()));
    }
    Ok(())
}

pub fn validate_password(password: &str) -> Result<(), AppError> {
    // bcrypt 只使用前 72 字节
    if password.len() < 6 || password.len() > 72 {
        return Err(AppError::Validation(
            "密码长度必须在6到72个字节之间".to_string(),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn register(email: &str, password: &str, nickname: &str) -> RegisterRequest {
        RegisterRequest {
            email: email.into(),
            password: password.into(),
            nickname: nickname.into(),
            phone: String::new(),
        }
    }

    #[test]
    fn register_request_validation() {
        assert!(register("a@b.com", "secret1", "nick").validate().is_ok());
        assert!(register("ab.com", "secret1", "nick").validate().is_err());
        assert!(register("a@bcom", "secret1", "nick").validate().is_err());
        assert!(register("a@b.com", "short", "nick").validate().is_err());
        assert!(register("a@b.com", "secret1", "").validate().is_err());
    }

    #[test]
    fn login_request_defaults_verification_code() {
        let req: LoginRequest =
            serde_json::from_str(r#"{"email":"a@b.com","password":"x"}"#).unwrap();
        assert!(req.img_verification_code.is_empty());
    }
}
