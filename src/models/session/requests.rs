use serde::{Deserialize, Serialize};

use super::entities::Session;

/// 登录请求（原样转发给外部认证服务）
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

/// 外部认证服务返回的会话对象
#[derive(Debug, Clone, Deserialize)]
pub struct LoginGrant {
    pub token: String,
    pub user: Session,
}
