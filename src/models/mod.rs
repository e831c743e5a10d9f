pub mod assignments;
pub mod common;
pub mod session;
pub mod submissions;
pub mod views;

pub use common::response::ApiResponse;

use crate::errors::PortalError;

/// 响应中的业务错误码
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum ErrorCode {
    Success = 0,

    // 通用错误
    BadRequest = 1000,
    Unauthorized = 1001,
    Forbidden = 1003,
    NotFound = 1004,
    ValidationFailed = 1022,

    // 作业相关
    InvalidTransition = 2001,

    // 提交相关
    SubmissionRejected = 3001,

    // 上游与内部错误
    UpstreamFailed = 5002,
    InternalServerError = 5000,
}

impl From<&PortalError> for ErrorCode {
    fn from(err: &PortalError) -> Self {
        match err {
            PortalError::Unauthenticated(_) => ErrorCode::Unauthorized,
            PortalError::Forbidden(_) => ErrorCode::Forbidden,
            PortalError::InvalidTransition(_) => ErrorCode::InvalidTransition,
            PortalError::NotFound(_) => ErrorCode::NotFound,
            PortalError::ValidationFailed(_) => ErrorCode::ValidationFailed,
            PortalError::SubmissionRejected(_) => ErrorCode::SubmissionRejected,
            PortalError::Upstream(_) | PortalError::Network(_) | PortalError::Serialization(_) => {
                ErrorCode::UpstreamFailed
            }
            PortalError::Configuration(_) | PortalError::Session(_) => {
                ErrorCode::InternalServerError
            }
        }
    }
}
