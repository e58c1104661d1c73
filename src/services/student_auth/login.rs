use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, http::header};

use super::kakao::KakaoClient;
use super::{
    CALLBACK_EXISTING_PATH, CALLBACK_PATH, OAuthState, StudentAuthService, invite, oauth_state_key,
};
use crate::models::students::requests::InviteTokenQuery;
use crate::services::common::internal_error;
use crate::utils::random_code::generate_token;

const STATE_LENGTH: usize = 43;

/// 保存 state 并跳转到 Kakao 授权页
async fn redirect_to_kakao(
    service: &StudentAuthService,
    request: &HttpRequest,
    state: OAuthState,
    callback_path: &str,
) -> ActixResult<HttpResponse> {
    let config = service.get_config();
    let cache = service.get_cache(request)?;

    let state_token = generate_token(STATE_LENGTH);
    let value = match serde_json::to_string(&state) {
        Ok(value) => value,
        Err(e) => return Ok(internal_error("Failed to store OAuth state", e)),
    };
    cache
        .insert_raw(oauth_state_key(&state_token), value, config.kakao.state_ttl)
        .await;

    let redirect_uri = config.kakao_redirect_uri(callback_path);
    match KakaoClient::authorize_url(&config.kakao, &redirect_uri, &state_token) {
        Ok(url) => Ok(HttpResponse::Found()
            .insert_header((header::LOCATION, url))
            .finish()),
        Err(e) => Ok(internal_error("Failed to build Kakao login URL", e)),
    }
}

pub async fn kakao_login(
    service: &StudentAuthService,
    request: &HttpRequest,
    query: InviteTokenQuery,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;
    let token = query.token.trim().to_string();

    // 先确认邀请仍然有效
    if let Err(resp) = invite::load_valid_invite(&storage, &token).await {
        return Ok(resp);
    }

    let state = OAuthState {
        invite_token: Some(token),
    };
    redirect_to_kakao(service, request, state, CALLBACK_PATH).await
}

pub async fn kakao_login_existing(
    service: &StudentAuthService,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let state = OAuthState { invite_token: None };
    redirect_to_kakao(service, request, state, CALLBACK_EXISTING_PATH).await
}
