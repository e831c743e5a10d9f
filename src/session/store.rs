use actix_web::cookie::Cookie;
use moka::future::Cache;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info};

use super::SessionEntry;
use crate::config::SessionConfig;
use crate::errors::Result;
use crate::models::session::requests::LoginGrant;
use crate::utils::jwt::JwtUtils;

/// 会话存储的运行参数
#[derive(Debug, Clone)]
pub struct SessionSettings {
    pub secret: String,
    pub cookie_name: String,
    pub idle_minutes: u64,
    pub lifetime_hours: i64,
    pub max_capacity: u64,
    pub secure_cookie: bool,
}

impl SessionSettings {
    /// `secret` 单独传入，配置为空时由启动流程生成
    pub fn from_config(config: &SessionConfig, secret: String) -> Self {
        Self {
            secret,
            cookie_name: config.cookie_name.clone(),
            idle_minutes: config.ttl,
            lifetime_hours: config.lifetime,
            max_capacity: config.max_capacity,
            secure_cookie: config.secure_cookie,
        }
    }
}

/// 进程内的会话存储
///
/// 以会话 ID 为键保存 `SessionEntry`，空闲超过 `idle_minutes` 自动失效。
/// 浏览器只持有签名后的会话 ID。
#[derive(Clone)]
pub struct SessionStore {
    inner: Cache<String, Arc<SessionEntry>>,
    settings: Arc<SessionSettings>,
}

impl SessionStore {
    pub fn new(settings: SessionSettings) -> Self {
        let inner = Cache::builder()
            .max_capacity(settings.max_capacity)
            .time_to_idle(Duration::from_secs(settings.idle_minutes * 60))
            .build();

        debug!(
            "SessionStore initialized with max capacity: {}, idle timeout: {} min",
            settings.max_capacity, settings.idle_minutes
        );
        Self {
            inner,
            settings: Arc::new(settings),
        }
    }

    pub fn cookie_name(&self) -> &str {
        &self.settings.cookie_name
    }

    /// 登录成功后建立会话，返回会话与需要写回浏览器的 Cookie
    pub async fn open(&self, grant: LoginGrant) -> Result<(Arc<SessionEntry>, Cookie<'static>)> {
        let entry = Arc::new(SessionEntry::new(grant.user, grant.token));
        let token = JwtUtils::issue_session_token(
            entry.id(),
            &self.settings.secret,
            chrono::Duration::hours(self.settings.lifetime_hours),
        )?;

        self.inner
            .insert(entry.id().to_string(), entry.clone())
            .await;
        info!(
            "Session opened for {} (role: {})",
            entry.session().email,
            entry.session().role
        );

        let cookie = JwtUtils::create_session_cookie(
            &self.settings.cookie_name,
            token,
            self.settings.secure_cookie,
        );
        Ok((entry, cookie))
    }

    /// 由 Cookie 值找回会话，签名无效、过期或已注销时返回 `None`
    pub async fn resolve(&self, cookie_value: &str) -> Option<Arc<SessionEntry>> {
        let claims = match JwtUtils::verify_session_token(cookie_value, &self.settings.secret) {
            Ok(claims) => claims,
            Err(err) => {
                debug!("Session cookie rejected: {}", err);
                return None;
            }
        };
        self.inner.get(&claims.sub).await
    }

    /// 注销会话
    pub async fn close(&self, session_id: &str) {
        self.inner.invalidate(session_id).await;
        info!("Session {} closed", session_id);
    }

    /// 当前保存的会话数（近似值）
    pub fn active_count(&self) -> u64 {
        self.inner.entry_count()
    }

    /// 清除浏览器会话的 Cookie
    pub fn removal_cookie(&self) -> Cookie<'static> {
        JwtUtils::create_empty_session_cookie(&self.settings.cookie_name, self.settings.secure_cookie)
    }
}

#[cfg(test)]
pub(crate) fn test_settings() -> SessionSettings {
    SessionSettings {
        secret: "session-test-secret".into(),
        cookie_name: "portal_session".into(),
        idle_minutes: 30,
        lifetime_hours: 8,
        max_capacity: 100,
        secure_cookie: false,
    }
}
