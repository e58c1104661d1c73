use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use std::sync::Arc;

use crate::cache::ObjectCache;
use crate::middlewares::RequireJWT;
use crate::models::ApiResponse;
use crate::utils::jwt::JwtUtils;

/// 处理登出
///
/// 设置空的 refresh_token cookie，并清除当前主体的缓存。
pub async fn handle_logout(request: &HttpRequest) -> ActixResult<HttpResponse> {
    let subject = JwtUtils::extract_bearer_token(request)
        .and_then(|token| JwtUtils::verify_access_token(&token).ok())
        .and_then(|claims| claims.subject());
    if let (Some(subject), Some(cache)) = (
        subject,
        request.app_data::<web::Data<Arc<dyn ObjectCache>>>(),
    ) {
        RequireJWT::forget_principal(cache.get_ref(), subject.role, subject.id).await;
    }

    // max_age=0 会让浏览器删除该 cookie
    let empty_cookie = JwtUtils::create_empty_refresh_token_cookie();

    Ok(HttpResponse::Ok()
        .cookie(empty_cookie)
        .json(ApiResponse::<()>::success_empty("Logged out successfully")))
}
