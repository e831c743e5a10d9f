use actix_web::{FromRequest, HttpRequest, HttpResponse, dev::Payload, error::InternalError};
use futures_util::future::{Ready, ready};

use super::validate::validate_resource_id;
use crate::models::{ApiResponse, ErrorCode};

fn invalid_path(message: &'static str) -> actix_web::Error {
    InternalError::from_response(
        message,
        HttpResponse::BadRequest().json(ApiResponse::error_empty(ErrorCode::BadRequest, message)),
    )
    .into()
}

fn extract_path_id(req: &HttpRequest, name: &str) -> Result<String, actix_web::Error> {
    let raw = req
        .match_info()
        .get(name)
        .ok_or_else(|| invalid_path("Missing path parameter"))?;
    validate_resource_id(raw).map_err(invalid_path)?;
    Ok(raw.to_string())
}

/// 定义经过格式校验的路径 ID 提取器
macro_rules! define_safe_id {
    ($($name:ident => $param:literal),* $(,)?) => {
        $(
            #[derive(Debug, Clone)]
            pub struct $name(pub String);

            impl FromRequest for $name {
                type Error = actix_web::Error;
                type Future = Ready<Result<Self, Self::Error>>;

                fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
                    ready(extract_path_id(req, $param).map($name))
                }
            }
        )*
    };
}

define_safe_id! {
    SafeAssignmentId => "id",
    SafeSubmissionId => "submission_id",
}
