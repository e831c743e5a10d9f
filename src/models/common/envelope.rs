//! 上游 REST API 的响应外壳
//!
//! 成功时 `data` 携带负载，失败时 `message` 携带可读的错误信息。

use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct UpstreamEnvelope<T> {
    pub data: Option<T>,
    #[serde(default)]
    pub message: Option<String>,
}

/// 失败响应只关心 `message`
#[derive(Debug, Default, Deserialize)]
pub struct UpstreamFailure {
    #[serde(default)]
    pub message: Option<String>,
}

impl UpstreamFailure {
    /// 从原始响应体中尽量提取 `message`，无法解析时返回空
    pub fn parse(body: &str) -> Self {
        serde_json::from_str(body).unwrap_or_default()
    }

    pub fn message(&self) -> &str {
        self.message.as_deref().unwrap_or_default()
    }
}
