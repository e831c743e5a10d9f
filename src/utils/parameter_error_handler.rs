use actix_web::{
    HttpRequest, HttpResponse,
    error::{InternalError, JsonPayloadError, QueryPayloadError, UrlencodedError},
};
use tracing::debug;

use crate::models::{ApiResponse, ErrorCode};

fn bad_request<E>(err: E, req: &HttpRequest) -> actix_web::Error
where
    E: std::fmt::Display + std::fmt::Debug + 'static,
{
    let message = format!("Invalid request parameters: {err}");
    debug!("{} {} rejected: {}", req.method(), req.path(), message);
    let response =
        HttpResponse::BadRequest().json(ApiResponse::error_empty(ErrorCode::BadRequest, &message));
    InternalError::from_response(err, response).into()
}

// JSON 请求体解析错误
pub fn json_error_handler(err: JsonPayloadError, req: &HttpRequest) -> actix_web::Error {
    bad_request(err, req)
}

// 查询参数解析错误
pub fn query_error_handler(err: QueryPayloadError, req: &HttpRequest) -> actix_web::Error {
    bad_request(err, req)
}

// 表单解析错误
pub fn form_error_handler(err: UrlencodedError, req: &HttpRequest) -> actix_web::Error {
    bad_request(err, req)
}
