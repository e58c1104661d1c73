use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use crate::models::auth::responses::{CurrentUserResponse, RefreshTokenResponse};
use crate::models::{ApiResponse, ErrorCode};
use crate::services::common::current_user;
use crate::utils::jwt::JwtUtils;

use super::AuthService;

pub async fn handle_refresh_token(
    _service: &AuthService,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    // 从 cookie 中提取 refresh token
    let Some(refresh_token) = JwtUtils::extract_refresh_token_from_cookie(request) else {
        return Ok(HttpResponse::Unauthorized().json(ApiResponse::error_empty(
            ErrorCode::Unauthorized,
            "Unauthorized access, please login",
        )));
    };

    match JwtUtils::refresh_access_token(&refresh_token) {
        Ok((access_token, subject)) => {
            tracing::debug!("Access token refreshed for {} {}", subject.role, subject.id);
            let response = RefreshTokenResponse {
                access_token,
                token_type: "bearer".to_string(),
                expires_in: JwtUtils::access_token_ttl_seconds(),
            };
            Ok(HttpResponse::Ok().json(ApiResponse::success(
                response,
                "Token refreshed successfully",
            )))
        }
        Err(e) => {
            tracing::info!("Refresh token rejected: {}", e);

            // 清除无效的 refresh token cookie
            let empty_cookie = JwtUtils::create_empty_refresh_token_cookie();
            Ok(HttpResponse::Unauthorized().cookie(empty_cookie).json(
                ApiResponse::error_empty(
                    ErrorCode::TokenInvalid,
                    "Login expired or invalid, please login again",
                ),
            ))
        }
    }
}

pub async fn handle_get_current_user(
    _service: &AuthService,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    match current_user(request) {
        Ok(user) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            CurrentUserResponse { user },
            "User information retrieved successfully",
        ))),
        Err(resp) => Ok(resp),
    }
}
