//! 账户生命周期：注册、登录、登出、重置密码与刷新令牌。
//!
//! 注册、登出、重置密码各自持有一把服务实例级别的互斥锁，同一时刻每类操作最多执行一个；
//! 锁随作用域释放，覆盖所有返回路径。登录与刷新令牌不加锁。
//!
//! 登出的缓存删除与成功后的信息日志通过 [`BackgroundTasks`] 尽力而为地派发，
//! 其结果不会反映到调用方的返回值中。

pub mod model;

use std::convert::Infallible;
use std::sync::Arc;

use tokio::sync::Mutex;

use self::model::{
    LoginRequest, LoginResponse, RefreshTokenRequest, RegisterRequest, ResetPasswordRequest,
};
use crate::cache::SessionCache;
use crate::cache::keys::{access_token_key, refresh_token_key};
use crate::database::models::{Account, DEFAULT_ROLE_CODE, NewAccount};
use crate::database::repositories::AccountStore;
use crate::error::{AppError, StoreError};
use crate::utils::{BackgroundTasks, TokenIssuer, TokenKind, hash_password, verify_password};

pub struct AccountService {
    accounts: Arc<dyn AccountStore>,
    sessions: Arc<dyn SessionCache>,
    tokens: Arc<TokenIssuer>,
    background: BackgroundTasks,
    hash_cost: u32,
    register_lock: Mutex<()>,
    logout_lock: Mutex<()>,
    password_reset_lock: Mutex<()>,
}

impl AccountService {
    pub fn new(
        accounts: Arc<dyn AccountStore>,
        sessions: Arc<dyn SessionCache>,
        tokens: Arc<TokenIssuer>,
        background: BackgroundTasks,
        hash_cost: u32,
    ) -> Self {
        Self {
            accounts,
            sessions,
            tokens,
            background,
            hash_cost,
            register_lock: Mutex::new(()),
            logout_lock: Mutex::new(()),
            password_reset_lock: Mutex::new(()),
        }
    }

    /// 用户注册
    pub async fn register_user(&self, req: RegisterRequest) -> Result<Account, AppError> {
        let _guard = self.register_lock.lock().await;

        if self.accounts.find_by_email(&req.email).await?.is_some() {
            tracing::warn!(email = %req.email, "Email already registered");
            return Err(AppError::DuplicateEmail);
        }

        let hashed_password = hash_password(&req.password, self.hash_cost).map_err(|e| {
            tracing::error!(error = %e, "Failed to hash password");
            AppError::PasswordHash(e)
        })?;

        let account = self
            .accounts
            .insert(NewAccount {
                email: req.email,
                password: hashed_password,
                nickname: req.nickname,
                phone: req.phone,
                role_code: DEFAULT_ROLE_CODE.to_string(),
            })
            .await
            .map_err(|e| match e {
                // 其他进程抢先写入同一邮箱
                StoreError::UniqueViolation(_) => AppError::DuplicateEmail,
                other => AppError::Store(other),
            })?;

        let email = account.email.clone();
        let user_id = account.id;
        self.background.spawn("register-log", async move {
            tracing::info!(user_id, email = %email, "User registered");
            Ok::<(), Infallible>(())
        });

        Ok(account)
    }

    /// 用户登录，签发访问令牌与刷新令牌
    pub async fn login_user(&self, req: LoginRequest) -> Result<LoginResponse, AppError> {
        if !req.img_verification_code.is_empty() {
            tracing::debug!("Image verification code supplied but not checked");
        }

        let account = self
            .accounts
            .find_by_email(&req.email)
            .await?
            .ok_or_else(|| {
                tracing::warn!(email = %req.email, "Login for unknown account");
                AppError::UserNotFound
            })?;

        match verify_password(&req.password, &account.password) {
            Ok(true) => {}
            Ok(false) => {
                tracing::warn!(user_id = account.id, "Incorrect password");
                return Err(AppError::IncorrectPassword);
            }
            Err(e) => {
                tracing::error!(
                    user_id = account.id,
                    error = %e,
                    "Stored password hash unreadable"
                );
                return Err(AppError::IncorrectPassword);
            }
        }

        self.issue_login(&account)
    }

    /// 用户登出：删除该用户的令牌缓存标记，删除结果不影响返回值
    pub async fn logout_user(&self, user_id: i64) -> Result<(), AppError> {
        let _guard = self.logout_lock.lock().await;

        for (label, key) in [
            ("logout-delete-access-token", access_token_key(user_id)),
            ("logout-delete-refresh-token", refresh_token_key(user_id)),
        ] {
            let sessions = self.sessions.clone();
            self.background
                .spawn(label, async move { sessions.delete(&key).await });
        }

        tracing::info!(user_id, "User logged out");
        Ok(())
    }

    /// 重置密码
    pub async fn reset_password(
        &self,
        user_id: i64,
        req: ResetPasswordRequest,
    ) -> Result<(), AppError> {
        let _guard = self.password_reset_lock.lock().await;

        if req.new_password != req.again_new_password {
            tracing::warn!(user_id, "New passwords do not match");
            return Err(AppError::PasswordsDoNotMatch);
        }

        let mut account = self
            .accounts
            .find_by_id(user_id)
            .await?
            .ok_or(AppError::AccountNotFound)?;

        account.password = hash_password(&req.new_password, self.hash_cost).map_err(|e| {
            tracing::error!(error = %e, "Failed to hash password");
            AppError::PasswordHash(e)
        })?;

        let account = self.accounts.update(&account).await.map_err(|e| {
            tracing::error!(user_id, error = %e, "Failed to update password");
            AppError::Store(e)
        })?;

        let email = account.email;
        self.background.spawn("reset-password-log", async move {
            tracing::info!(user_id, email = %email, "Password reset");
            Ok::<(), Infallible>(())
        });

        Ok(())
    }

    /// 使用刷新令牌换取新的令牌对
    pub async fn refresh_token(&self, req: RefreshTokenRequest) -> Result<LoginResponse, AppError> {
        let claims = self
            .tokens
            .verify(&req.refresh_token, TokenKind::Refresh)
            .map_err(|e| {
                tracing::debug!(error = %e, "Rejected refresh token");
                AppError::InvalidRefreshToken
            })?;

        let account = self
            .accounts
            .find_by_id(claims.sub)
            .await?
            .ok_or(AppError::UserNotFound)?;

        self.issue_login(&account)
    }

    fn issue_login(&self, account: &Account) -> Result<LoginResponse, AppError> {
        let pair = self
            .tokens
            .issue_pair(account.id, &account.email)
            .map_err(|e| {
                tracing::error!(user_id = account.id, error = %e, "Failed to issue tokens");
                AppError::TokenIssue(e)
            })?;

        Ok(LoginResponse {
            user_id: account.id,
            access_token: pair.access_token,
            refresh_token: pair.refresh_token,
        })
    }
}
