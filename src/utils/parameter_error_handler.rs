use actix_web::{
    HttpRequest, HttpResponse,
    error::{InternalError, JsonPayloadError, QueryPayloadError},
};
use tracing::debug;

use crate::models::{ApiResponse, ErrorCode};

/// JSON 请求体解析失败时返回统一的错误结构
pub fn json_error_handler(err: JsonPayloadError, req: &HttpRequest) -> actix_web::Error {
    debug!("Invalid JSON payload for {}: {}", req.path(), err);
    let (code, message) = match &err {
        JsonPayloadError::OverflowKnownLength { .. } | JsonPayloadError::Overflow { .. } => {
            (ErrorCode::BadRequest, "Request body too large".to_string())
        }
        JsonPayloadError::ContentType => (
            ErrorCode::BadRequest,
            "Content-Type must be application/json".to_string(),
        ),
        JsonPayloadError::Deserialize(e) => {
            (ErrorCode::ValidationFailed, format!("Invalid request body: {e}"))
        }
        _ => (ErrorCode::BadRequest, format!("Invalid request body: {err}")),
    };
    let response = HttpResponse::BadRequest().json(ApiResponse::error_empty(code, message));
    InternalError::from_response(err, response).into()
}

/// 查询参数解析失败时返回统一的错误结构
pub fn query_error_handler(err: QueryPayloadError, req: &HttpRequest) -> actix_web::Error {
    debug!("Invalid query string for {}: {}", req.path(), err);
    let response = HttpResponse::BadRequest().json(ApiResponse::error_empty(
        ErrorCode::ValidationFailed,
        format!("Invalid query parameters: {err}"),
    ));
    InternalError::from_response(err, response).into()
}
