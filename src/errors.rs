//! 统一错误处理模块
//!
//! 使用宏自动生成错误类型，支持错误代码和类型名称。

use std::fmt;

use actix_web::http::StatusCode;

use crate::models::{ApiResponse, ErrorCode};

/// 定义错误类型的宏
///
/// 自动生成：
/// - enum 定义
/// - code() 方法 - 返回错误代码
/// - error_type() 方法 - 返回错误类型名称
/// - message() 方法 - 返回错误详情
/// - 便捷构造函数
macro_rules! define_portal_errors {
    ($(
        $variant:ident($code:literal, $type_name:literal)
    ),* $(,)?) => {
        #[derive(Debug, Clone, PartialEq)]
        pub enum PortalError {
            $($variant(String),)*
        }

        impl PortalError {
            /// 获取错误代码
            pub fn code(&self) -> &'static str {
                match self {
                    $(PortalError::$variant(_) => $code,)*
                }
            }

            /// 获取错误类型名称
            pub fn error_type(&self) -> &'static str {
                match self {
                    $(PortalError::$variant(_) => $type_name,)*
                }
            }

            /// 获取错误详情
            pub fn message(&self) -> &str {
                match self {
                    $(PortalError::$variant(msg) => msg,)*
                }
            }
        }

        // 生成便捷构造函数
        paste::paste! {
            impl PortalError {
                $(
                    pub fn [<$variant:snake>]<T: Into<String>>(msg: T) -> Self {
                        PortalError::$variant(msg.into())
                    }
                )*
            }
        }
    };
}

define_portal_errors! {
    Unauthenticated("E001", "Unauthenticated"),
    Forbidden("E002", "Forbidden"),
    InvalidTransition("E003", "Invalid Status Transition"),
    NotFound("E004", "Resource Not Found"),
    ValidationFailed("E005", "Validation Failed"),
    Upstream("E006", "Upstream API Error"),
    Network("E007", "Network Error"),
    Configuration("E008", "Configuration Error"),
    Serialization("E009", "Serialization Error"),
    Session("E010", "Session Error"),
    SubmissionRejected("E011", "Submission Rejected"),
}

impl PortalError {
    /// 格式化为彩色输出（用于开发环境）
    #[cfg(debug_assertions)]
    pub fn format_colored(&self) -> String {
        format!(
            "\x1b[1;31m[ERROR]\x1b[0m \x1b[33m{}\x1b[0m \x1b[31m{}\x1b[0m\n  {}",
            self.code(),
            self.error_type(),
            self.message()
        )
    }

    /// 格式化为简洁输出
    pub fn format_simple(&self) -> String {
        format!("{}: {}", self.error_type(), self.message())
    }

    /// 面向用户的提示文本
    ///
    /// 上游返回了可读的 `message` 时原样展示，否则使用调用方给出的通用文本。
    /// 网络、序列化等内部错误的细节只写日志，不展示给用户。
    pub fn surface(&self, fallback: &str) -> String {
        match self {
            PortalError::Network(_)
            | PortalError::Serialization(_)
            | PortalError::Configuration(_)
            | PortalError::Session(_) => fallback.to_string(),
            other if other.message().trim().is_empty() => fallback.to_string(),
            other => other.message().to_string(),
        }
    }

    /// 对应的 HTTP 状态码
    pub fn status_code(&self) -> StatusCode {
        match self {
            PortalError::Unauthenticated(_) => StatusCode::UNAUTHORIZED,
            PortalError::Forbidden(_) => StatusCode::FORBIDDEN,
            PortalError::InvalidTransition(_) => StatusCode::CONFLICT,
            PortalError::NotFound(_) => StatusCode::NOT_FOUND,
            PortalError::ValidationFailed(_) | PortalError::SubmissionRejected(_) => {
                StatusCode::UNPROCESSABLE_ENTITY
            }
            PortalError::Upstream(_) | PortalError::Network(_) | PortalError::Serialization(_) => {
                StatusCode::BAD_GATEWAY
            }
            PortalError::Configuration(_) | PortalError::Session(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    /// 上游认为会话已失效，门户需要注销并回到登录页
    pub fn ends_session(&self) -> bool {
        matches!(self, PortalError::Unauthenticated(_))
    }

    /// 上游拒绝访问（非本人的作业等），调用方应回到自己的首页
    pub fn is_forbidden(&self) -> bool {
        matches!(self, PortalError::Forbidden(_))
    }
}

impl actix_web::ResponseError for PortalError {
    fn status_code(&self) -> StatusCode {
        PortalError::status_code(self)
    }

    fn error_response(&self) -> actix_web::HttpResponse {
        actix_web::HttpResponse::build(PortalError::status_code(self)).json(
            ApiResponse::error_empty(ErrorCode::from(self), self.surface("Internal server error")),
        )
    }
}

impl fmt::Display for PortalError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.format_simple())
    }
}

impl std::error::Error for PortalError {}

// 为常见的错误类型实现 From trait
impl From<reqwest::Error> for PortalError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            PortalError::Serialization(err.to_string())
        } else {
            PortalError::Network(err.to_string())
        }
    }
}

impl From<serde_json::Error> for PortalError {
    fn from(err: serde_json::Error) -> Self {
        PortalError::Serialization(err.to_string())
    }
}

impl From<jsonwebtoken::errors::Error> for PortalError {
    fn from(err: jsonwebtoken::errors::Error) -> Self {
        PortalError::Session(err.to_string())
    }
}

impl From<config::ConfigError> for PortalError {
    fn from(err: config::ConfigError) -> Self {
        PortalError::Configuration(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, PortalError>;
