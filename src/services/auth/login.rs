use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use crate::models::{
    ApiResponse, ErrorCode,
    auth::{requests::LoginRequest, responses::LoginResponse},
    users::entities::UserStatus,
};
use crate::services::common::internal_error;
use crate::utils::jwt::{JwtUtils, TokenSubject};
use crate::utils::password::verify_password;

use super::AuthService;

const INVALID_CREDENTIALS: &str = "Email or password is incorrect";

pub async fn handle_login(
    service: &AuthService,
    login_request: LoginRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;
    let config = service.get_config();

    let email = login_request.email.trim().to_lowercase();

    // 1. 根据邮箱获取教职工账号
    let user = match storage.get_user_by_email(&email).await {
        Ok(Some(user)) if user.role.is_staff() => user,
        Ok(_) => {
            return Ok(HttpResponse::Unauthorized().json(ApiResponse::error_empty(
                ErrorCode::AuthFailed,
                INVALID_CREDENTIALS,
            )));
        }
        Err(e) => return Ok(internal_error("Login failed", e)),
    };

    // 2. 验证密码
    if !verify_password(&login_request.password, &user.password_hash) {
        tracing::info!("Failed login attempt for {}", email);
        return Ok(HttpResponse::Unauthorized().json(ApiResponse::error_empty(
            ErrorCode::AuthFailed,
            INVALID_CREDENTIALS,
        )));
    }

    if user.status != UserStatus::Active {
        return Ok(HttpResponse::Forbidden().json(ApiResponse::error_empty(
            ErrorCode::AccountInactive,
            "Account is not active",
        )));
    }

    // 3. 更新最后登录时间
    if let Err(e) = storage.update_last_login(user.id).await {
        tracing::warn!("Failed to update last login for user {}: {}", user.id, e);
    }

    // 4. 生成令牌对
    let subject = TokenSubject {
        id: user.id,
        role: user.role,
        academy_id: user.academy_id,
        user_account_id: None,
    };
    let token_pair = match JwtUtils::generate_token_pair(&subject) {
        Ok(pair) => pair,
        Err(e) => return Ok(internal_error("Login failed, unable to generate token", e)),
    };

    tracing::info!("User {} logged in successfully", user.email);

    let response = LoginResponse {
        access_token: token_pair.access_token,
        token_type: "bearer".to_string(),
        expires_in: config.jwt.access_token_expiry * 60,
        user,
    };

    // 5. 写入 refresh token cookie
    let refresh_cookie = JwtUtils::create_refresh_token_cookie(&token_pair.refresh_token);

    Ok(HttpResponse::Ok()
        .cookie(refresh_cookie)
        .json(ApiResponse::success(response, "Login successful")))
}
