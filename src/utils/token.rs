use std::time::Duration;

use chrono::Utc;
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};

use crate::config::Config;

/// 令牌类型，防止刷新令牌被当作访问令牌使用
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TokenKind {
    Access,
    Refresh,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub sub: i64,         // 用户ID
    pub email: String,    // 用户邮箱
    pub kind: TokenKind,  // 令牌类型
    pub iat: i64,         // 签发时间
    pub exp: i64,         // 过期时间
}

#[derive(Debug, Clone)]
pub struct TokenPair {
    pub access_token: String,
    pub refresh_token: String,
}

/// 签发与校验 HS256 访问/刷新令牌
#[derive(Clone)]
pub struct TokenIssuer {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    access_ttl: Duration,
    refresh_ttl: Duration,
}

impl TokenIssuer {
    pub fn new(secret: &str, access_ttl: Duration, refresh_ttl: Duration) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            access_ttl,
            refresh_ttl,
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(
            &config.jwt_secret,
            config.access_token_expiration(),
            config.refresh_token_expiration(),
        )
    }

    pub fn issue_pair(
        &self,
        user_id: i64,
        email: &str,
    ) -> Result<TokenPair, jsonwebtoken::errors::Error> {
        let access_token = self.issue(user_id, email, TokenKind::Access, self.access_ttl)?;
        let refresh_token = self.issue(user_id, email, TokenKind::Refresh, self.refresh_ttl)?;

        tracing::debug!(user_id, "Issued token pair");
        Ok(TokenPair {
            access_token,
            refresh_token,
        })
    }

    /// 校验签名、过期时间以及令牌类型
    pub fn verify(
        &self,
        token: &str,
        kind: TokenKind,
    ) -> Result<Claims, jsonwebtoken::errors::Error> {
        let token_data = decode::<Claims>(token, &self.decoding_key, &Validation::default())?;

        if token_data.claims.kind != kind {
            return Err(jsonwebtoken::errors::ErrorKind::InvalidToken.into());
        }

        Ok(token_data.claims)
    }

    fn issue(
        &self,
        user_id: i64,
        email: &str,
        kind: TokenKind,
        ttl: Duration,
    ) -> Result<String, jsonwebtoken::errors::Error> {
        let iat = Utc::now().timestamp();
        let claims = Claims {
            sub: user_id,
            email: email.to_string(),
            kind,
            iat,
            exp: iat.saturating_add(ttl.as_secs() as i64),
        };

        encode(&Header::default(), &claims, &self.encoding_key)
    }
}
