use actix_web::cookie::{Cookie, SameSite};
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};

// 会话 Cookie 中的 Claims
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionClaims {
    pub sub: String, // Subject (session ID)
    pub exp: usize,  // Expiration time (时间戳)
    pub iat: usize,  // Issued at (签发时间)
}

pub struct JwtUtils;

impl JwtUtils {
    // 为会话签发 Cookie 令牌
    pub fn issue_session_token(
        session_id: &str,
        secret: &str,
        lifetime: chrono::Duration,
    ) -> Result<String, jsonwebtoken::errors::Error> {
        let now = chrono::Utc::now();
        let expiration = now + lifetime;

        let claims = SessionClaims {
            sub: session_id.to_string(),
            exp: expiration.timestamp() as usize,
            iat: now.timestamp() as usize,
        };

        let encoding_key = EncodingKey::from_secret(secret.as_ref());
        encode(&Header::default(), &claims, &encoding_key)
    }

    // 验证会话令牌并返回 Claims
    pub fn verify_session_token(
        token: &str,
        secret: &str,
    ) -> Result<SessionClaims, jsonwebtoken::errors::Error> {
        let decoding_key = DecodingKey::from_secret(secret.as_ref());
        let validation = Validation::default();

        decode::<SessionClaims>(token, &decoding_key, &validation).map(|token_data| token_data.claims)
    }

    /// 创建会话 Cookie
    pub fn create_session_cookie(name: &str, token: String, secure: bool) -> Cookie<'static> {
        Cookie::build(name.to_string(), token)
            .path("/")
            .same_site(SameSite::Lax)
            .http_only(true)
            .secure(secure)
            .finish()
    }

    /// 创建空的会话 Cookie（用于注销）
    pub fn create_empty_session_cookie(name: &str, secure: bool) -> Cookie<'static> {
        Cookie::build(name.to_string(), "")
            .path("/")
            .max_age(actix_web::cookie::time::Duration::seconds(0))
            .same_site(SameSite::Lax)
            .http_only(true)
            .secure(secure)
            .finish()
    }
}
