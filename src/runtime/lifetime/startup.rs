use std::sync::Arc;
use tracing::{debug, warn};

use crate::client::{PortalApi, create_portal_api};
use crate::config::AppConfig;
use crate::errors::Result;
use crate::session::{SessionSettings, SessionStore};

const GENERATED_SECRET_LEN: usize = 48;

pub struct StartupContext {
    pub api: Arc<dyn PortalApi>,
    pub sessions: SessionStore,
}

/// 生成随机的会话签名密钥
fn generate_session_secret(length: usize) -> String {
    use rand::Rng;
    const CHARSET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789";
    let mut rng = rand::rng();
    (0..length)
        .map(|_| {
            let idx = rng.random_range(0..CHARSET.len());
            CHARSET[idx] as char
        })
        .collect()
}

/// 会话签名密钥：未配置时每次启动随机生成，重启后已有会话全部失效
fn session_secret(configured: &str) -> String {
    if !configured.trim().is_empty() {
        return configured.to_string();
    }

    warn!("==========================================================");
    warn!("  SESSION SECRET NOT SET - USING A GENERATED SECRET");
    warn!("  Sessions will not survive a restart");
    warn!("  Set SESSION_SECRET or session.secret to keep them");
    warn!("==========================================================");
    generate_session_secret(GENERATED_SECRET_LEN)
}

/// 准备服务器启动的上下文
/// 包括上游客户端与会话存储
pub async fn prepare_server_startup() -> Result<StartupContext> {
    let config = AppConfig::get();

    let api = create_portal_api(&config.api)?;
    warn!("Upstream API client targeting {}", config.api.base_url);

    let secret = session_secret(&config.session.secret);
    let settings = SessionSettings::from_config(&config.session, secret);
    let sessions = SessionStore::new(settings);
    debug!(
        "Session store ready (cookie: {}, idle timeout: {} min)",
        config.session.cookie_name, config.session.ttl
    );

    Ok(StartupContext { api, sessions })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_configured_secret_is_kept() {
        assert_eq!(session_secret("s3cr3t"), "s3cr3t");
    }

    #[test]
    fn test_missing_secret_is_generated() {
        let first = session_secret("  ");
        let second = session_secret("");
        assert_eq!(first.len(), GENERATED_SECRET_LEN);
        assert!(first.chars().all(|c| c.is_ascii_alphanumeric()));
        assert_ne!(first, second);
    }
}
