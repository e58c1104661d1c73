use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, http::header};
use std::sync::Arc;

use super::kakao::KAKAO_PROVIDER;
use super::{CALLBACK_EXISTING_PATH, CALLBACK_PATH, OAuthState, StudentAuthService, oauth_state_key};
use crate::cache::{CacheResult, ObjectCache};
use crate::config::AppConfig;
use crate::models::{
    ApiResponse, ErrorCode,
    students::{
        entities::{ProviderProfile, Student, StudentStatus},
        requests::OAuthCallbackQuery,
    },
    users::entities::UserRole,
};
use crate::services::common::{internal_error, storage_error_response};
use crate::utils::jwt::{JwtUtils, TokenSubject};

fn bad_request(code: ErrorCode, message: impl Into<String>) -> HttpResponse {
    HttpResponse::BadRequest().json(ApiResponse::error_empty(code, message))
}

/// 取出并删除 state，随后检查授权结果，返回授权码
async fn consume_state(
    cache: &Arc<dyn ObjectCache>,
    query: &OAuthCallbackQuery,
) -> Result<(OAuthState, String), HttpResponse> {
    let Some(state) = query.state.as_deref().filter(|s| !s.is_empty()) else {
        return Err(bad_request(ErrorCode::OAuthStateInvalid, "Invalid OAuth state"));
    };

    // state 只能使用一次
    let stored = match cache.take_raw(&oauth_state_key(state)).await {
        CacheResult::Found(raw) => serde_json::from_str::<OAuthState>(&raw).ok(),
        _ => None,
    };
    let Some(stored) = stored else {
        return Err(bad_request(ErrorCode::OAuthStateInvalid, "Invalid OAuth state"));
    };

    if let Some(error) = &query.error {
        let detail = query.error_description.as_deref().unwrap_or(error);
        tracing::info!("Kakao authorization was not granted: {}", detail);
        return Err(bad_request(
            ErrorCode::OAuthExchangeFailed,
            format!("Kakao authorization failed: {detail}"),
        ));
    }

    match query.code.as_deref().filter(|c| !c.is_empty()) {
        Some(code) => Ok((stored, code.to_string())),
        None => Err(bad_request(
            ErrorCode::BadRequest,
            "Missing authorization code",
        )),
    }
}

/// 授权码换取 Kakao 用户资料
async fn fetch_kakao_profile(
    service: &StudentAuthService,
    code: &str,
    callback_path: &str,
) -> Result<ProviderProfile, HttpResponse> {
    let config = service.get_config();
    let redirect_uri = config.kakao_redirect_uri(callback_path);

    let access_token = service
        .kakao()
        .exchange_code(&config.kakao, code, &redirect_uri)
        .await
        .map_err(|e| bad_request(ErrorCode::OAuthExchangeFailed, e.message().to_string()))?;

    service
        .kakao()
        .fetch_profile(&config.kakao, &access_token)
        .await
        .map_err(|e| bad_request(ErrorCode::OAuthExchangeFailed, e.message().to_string()))
}

/// 签发学生令牌并跳转到学生端首页
fn student_session_redirect(student: &Student, user_account_id: i64) -> HttpResponse {
    let subject = TokenSubject {
        id: student.id,
        role: UserRole::Student,
        academy_id: student.academy_id,
        user_account_id: Some(user_account_id),
    };
    let token_pair = match JwtUtils::generate_token_pair(&subject) {
        Ok(pair) => pair,
        Err(e) => return internal_error("Failed to generate student token", e),
    };

    let location = format!(
        "{}/student/dashboard?token={}",
        AppConfig::get().frontend_base(),
        token_pair.access_token
    );

    HttpResponse::Found()
        .cookie(JwtUtils::create_refresh_token_cookie(&token_pair.refresh_token))
        .insert_header((header::LOCATION, location))
        .finish()
}

pub async fn kakao_callback(
    service: &StudentAuthService,
    request: &HttpRequest,
    query: OAuthCallbackQuery,
) -> ActixResult<HttpResponse> {
    let (state, code) = match consume_state(&service.get_cache(request)?, &query).await {
        Ok(found) => found,
        Err(resp) => return Ok(resp),
    };
    let Some(invite_token) = state.invite_token else {
        return Ok(bad_request(ErrorCode::OAuthStateInvalid, "Invalid OAuth state"));
    };

    let profile = match fetch_kakao_profile(service, &code, CALLBACK_PATH).await {
        Ok(profile) => profile,
        Err(resp) => return Ok(resp),
    };

    let storage = service.get_storage(request)?;

    let account = match storage.upsert_user_account(profile).await {
        Ok(account) => account,
        Err(e) => return Ok(internal_error("Failed to save user account", e)),
    };

    // 邀请在授权期间可能已被使用或过期，这里重新校验
    let student = match storage.redeem_invite(&invite_token, account.id).await {
        Ok(student) => student,
        Err(e) => {
            return Ok(storage_error_response(
                "Failed to link student account",
                &e,
                ErrorCode::InviteNotFound,
            ));
        }
    };

    tracing::info!(
        "Student {} linked to Kakao account {} (academy {})",
        student.id,
        account.id,
        student.academy_id
    );

    Ok(student_session_redirect(&student, account.id))
}

pub async fn kakao_callback_existing(
    service: &StudentAuthService,
    request: &HttpRequest,
    query: OAuthCallbackQuery,
) -> ActixResult<HttpResponse> {
    let code = match consume_state(&service.get_cache(request)?, &query).await {
        Ok((_, code)) => code,
        Err(resp) => return Ok(resp),
    };

    let profile = match fetch_kakao_profile(service, &code, CALLBACK_EXISTING_PATH).await {
        Ok(profile) => profile,
        Err(resp) => return Ok(resp),
    };

    let storage = service.get_storage(request)?;

    let account = match storage
        .get_user_account(KAKAO_PROVIDER, &profile.provider_user_id)
        .await
    {
        Ok(Some(account)) => account,
        Ok(None) => {
            return Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
                ErrorCode::AccountNotRegistered,
                "Account is not registered, please sign up through an invite link first",
            )));
        }
        Err(e) => return Ok(internal_error("Failed to query user account", e)),
    };

    let student = match storage.find_linked_student(account.id).await {
        Ok(Some(student)) => student,
        Ok(None) => {
            return Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
                ErrorCode::StudentNotLinked,
                "No student is linked to this account",
            )));
        }
        Err(e) => return Ok(internal_error("Failed to query linked student", e)),
    };

    if student.status != StudentStatus::Active {
        return Ok(HttpResponse::Forbidden().json(ApiResponse::error_empty(
            ErrorCode::AccountInactive,
            "Student account is not active",
        )));
    }

    tracing::info!("Student {} logged in with Kakao", student.id);

    Ok(student_session_redirect(&student, account.id))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::object_cache::moka::MokaCacheWrapper;
    use actix_web::http::StatusCode;

    fn callback_query(code: Option<&str>, state: Option<&str>) -> OAuthCallbackQuery {
        OAuthCallbackQuery {
            code: code.map(String::from),
            state: state.map(String::from),
            error: None,
            error_description: None,
        }
    }

    async fn cache_with_state(state: &str) -> Arc<dyn ObjectCache> {
        let cache: Arc<dyn ObjectCache> = Arc::new(MokaCacheWrapper::with_settings(100, 60));
        let value = serde_json::to_string(&OAuthState {
            invite_token: Some("invite-1".to_string()),
        })
        .unwrap();
        cache.insert_raw(oauth_state_key(state), value, 60).await;
        cache
    }

    #[tokio::test]
    async fn test_state_is_single_use() {
        let cache = cache_with_state("s1").await;

        let (state, code) = consume_state(&cache, &callback_query(Some("code-1"), Some("s1")))
            .await
            .unwrap();
        assert_eq!(state.invite_token.as_deref(), Some("invite-1"));
        assert_eq!(code, "code-1");

        let resp = consume_state(&cache, &callback_query(Some("code-1"), Some("s1")))
            .await
            .unwrap_err();
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_denied_authorization_still_consumes_state() {
        let cache = cache_with_state("s2").await;
        let mut query = callback_query(None, Some("s2"));
        query.error = Some("access_denied".to_string());

        let resp = consume_state(&cache, &query).await.unwrap_err();
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        assert!(matches!(
            cache.get_raw(&oauth_state_key("s2")).await,
            CacheResult::NotFound
        ));
    }

    #[tokio::test]
    async fn test_unknown_or_missing_state() {
        let cache = cache_with_state("s3").await;
        for state in [None, Some(""), Some("other")] {
            let resp = consume_state(&cache, &callback_query(Some("c"), state))
                .await
                .unwrap_err();
            assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        }
    }
}
