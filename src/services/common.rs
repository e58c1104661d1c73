//! 各业务服务共用的辅助函数

use std::sync::Arc;

use actix_web::{HttpRequest, HttpResponse, web};
use tracing::error;

use crate::cache::ObjectCache;
use crate::errors::AcademyError;
use crate::middlewares::RequireJWT;
use crate::models::auth::entities::CurrentUser;
use crate::models::users::entities::UserRole;
use crate::models::{ApiResponse, ErrorCode};
use crate::storage::Storage;

/// 从 app_data 中取出存储实例
pub(crate) fn storage_from_request(request: &HttpRequest) -> actix_web::Result<Arc<dyn Storage>> {
    request
        .app_data::<web::Data<Arc<dyn Storage>>>()
        .map(|data| data.get_ref().clone())
        .ok_or_else(|| actix_web::error::ErrorInternalServerError("Storage not configured"))
}

/// 取出 RequireJWT 写入的当前主体
pub(crate) fn current_user(request: &HttpRequest) -> Result<CurrentUser, HttpResponse> {
    RequireJWT::extract_current_user(request).ok_or_else(|| {
        HttpResponse::Unauthorized().json(ApiResponse::error_empty(
            ErrorCode::Unauthorized,
            "Unauthorized: missing user information",
        ))
    })
}

/// 主体状态变化后清除其缓存
pub(crate) async fn forget_principal(request: &HttpRequest, role: UserRole, id: i64) {
    if let Some(cache) = request.app_data::<web::Data<Arc<dyn ObjectCache>>>() {
        RequireJWT::forget_principal(cache.get_ref(), role, id).await;
    }
}

/// 记录日志并返回 500
pub(crate) fn internal_error(context: &str, err: impl std::fmt::Display) -> HttpResponse {
    error!("{}: {}", context, err);
    HttpResponse::InternalServerError().json(ApiResponse::error_empty(
        ErrorCode::InternalServerError,
        format!("{context}: {err}"),
    ))
}

/// 请求参数校验失败
pub(crate) fn validation_error(message: impl Into<String>) -> HttpResponse {
    HttpResponse::BadRequest().json(ApiResponse::error_empty(
        ErrorCode::ValidationFailed,
        message,
    ))
}

pub(crate) fn not_found(code: ErrorCode, message: &str) -> HttpResponse {
    HttpResponse::NotFound().json(ApiResponse::error_empty(code, message))
}

/// 存储层错误转换为 HTTP 响应
///
/// `not_found_code` 用于 NotFound，其他业务错误使用通用错误码。
pub(crate) fn storage_error_response(
    context: &str,
    err: &AcademyError,
    not_found_code: ErrorCode,
) -> HttpResponse {
    match err {
        AcademyError::NotFound(msg) => {
            HttpResponse::NotFound().json(ApiResponse::error_empty(not_found_code, msg.as_str()))
        }
        AcademyError::Validation(msg) => validation_error(msg.as_str()),
        AcademyError::Conflict(msg) => {
            HttpResponse::Conflict().json(ApiResponse::error_empty(ErrorCode::Conflict, msg.as_str()))
        }
        AcademyError::InviteExpired(_) => HttpResponse::BadRequest().json(
            ApiResponse::error_empty(ErrorCode::InviteExpired, "Invite link has expired"),
        ),
        AcademyError::InviteUsed(_) => HttpResponse::BadRequest().json(ApiResponse::error_empty(
            ErrorCode::InviteUsed,
            "Invite link has already been used",
        )),
        AcademyError::Authorization(msg) => {
            HttpResponse::Forbidden().json(ApiResponse::error_empty(ErrorCode::Forbidden, msg.as_str()))
        }
        _ => internal_error(context, err),
    }
}

/// 去重后校验班级均属于当前学院
pub(crate) async fn check_class_ids(
    storage: &Arc<dyn Storage>,
    academy_id: i64,
    class_ids: &mut Vec<i64>,
) -> Result<(), HttpResponse> {
    class_ids.sort_unstable();
    class_ids.dedup();
    if class_ids.is_empty() {
        return Err(validation_error("class_ids must not be empty"));
    }
    match storage.count_academy_classes(academy_id, class_ids).await {
        Ok(count) if count as usize == class_ids.len() => Ok(()),
        Ok(_) => Err(validation_error("Some classes do not exist")),
        Err(e) => Err(internal_error("Failed to verify classes", e)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::http::StatusCode;

    #[test]
    fn test_storage_error_status_mapping() {
        let cases = [
            (AcademyError::not_found("x"), StatusCode::NOT_FOUND),
            (AcademyError::validation("x"), StatusCode::BAD_REQUEST),
            (AcademyError::conflict("x"), StatusCode::CONFLICT),
            (AcademyError::invite_expired("x"), StatusCode::BAD_REQUEST),
            (AcademyError::invite_used("x"), StatusCode::BAD_REQUEST),
            (AcademyError::authorization("x"), StatusCode::FORBIDDEN),
            (AcademyError::database_operation("x"), StatusCode::INTERNAL_SERVER_ERROR),
        ];
        for (err, status) in cases {
            let resp = storage_error_response("Test", &err, ErrorCode::NotFound);
            assert_eq!(resp.status(), status, "{err}");
        }
    }

    #[test]
    fn test_current_user_missing_is_unauthorized() {
        let req = actix_web::test::TestRequest::default().to_http_request();
        let resp = current_user(&req).unwrap_err();
        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    }
}
