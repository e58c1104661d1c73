//! 学生端登录
//!
//! 学生通过管理员发放的邀请链接进入，使用 Kakao 账号完成绑定；
//! 之后用同一 Kakao 账号直接登录。OAuth state 存放在对象缓存中，只能使用一次。

pub mod callback;
pub mod invite;
pub mod kakao;
pub mod login;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::cache::ObjectCache;
use crate::config::AppConfig;
use crate::models::students::requests::{InviteTokenQuery, OAuthCallbackQuery};
use crate::storage::Storage;

use super::common::storage_from_request;
use kakao::KakaoClient;

pub(crate) const CALLBACK_PATH: &str = "/api/v1/auth/student/kakao/callback";
pub(crate) const CALLBACK_EXISTING_PATH: &str = "/api/v1/auth/student/kakao/callback-existing";

/// 缓存中的 OAuth state
#[derive(Debug, Clone, Serialize, Deserialize)]
pub(crate) struct OAuthState {
    /// 首次绑定时携带邀请令牌，已绑定学生登录时为空
    pub invite_token: Option<String>,
}

pub(crate) fn oauth_state_key(state: &str) -> String {
    format!("oauth_state:{state}")
}

pub struct StudentAuthService {
    storage: Option<Arc<dyn Storage>>,
    kakao: KakaoClient,
}

impl StudentAuthService {
    pub fn new_lazy() -> Self {
        Self {
            storage: None,
            kakao: KakaoClient::new(),
        }
    }

    pub(crate) fn get_storage(&self, request: &HttpRequest) -> ActixResult<Arc<dyn Storage>> {
        match &self.storage {
            Some(storage) => Ok(storage.clone()),
            None => storage_from_request(request),
        }
    }

    pub(crate) fn get_cache(&self, request: &HttpRequest) -> ActixResult<Arc<dyn ObjectCache>> {
        request
            .app_data::<web::Data<Arc<dyn ObjectCache>>>()
            .map(|data| data.get_ref().clone())
            .ok_or_else(|| actix_web::error::ErrorInternalServerError("Cache not configured"))
    }

    pub(crate) fn get_config(&self) -> &AppConfig {
        AppConfig::get()
    }

    pub(crate) fn kakao(&self) -> &KakaoClient {
        &self.kakao
    }

    // 校验邀请令牌
    pub async fn verify_invite(
        &self,
        request: &HttpRequest,
        query: InviteTokenQuery,
    ) -> ActixResult<HttpResponse> {
        invite::verify_invite(self, request, query).await
    }

    // 邀请绑定：跳转 Kakao 授权页
    pub async fn kakao_login(
        &self,
        request: &HttpRequest,
        query: InviteTokenQuery,
    ) -> ActixResult<HttpResponse> {
        login::kakao_login(self, request, query).await
    }

    // 已绑定学生登录：跳转 Kakao 授权页
    pub async fn kakao_login_existing(&self, request: &HttpRequest) -> ActixResult<HttpResponse> {
        login::kakao_login_existing(self, request).await
    }

    pub async fn kakao_callback(
        &self,
        request: &HttpRequest,
        query: OAuthCallbackQuery,
    ) -> ActixResult<HttpResponse> {
        callback::kakao_callback(self, request, query).await
    }

    pub async fn kakao_callback_existing(
        &self,
        request: &HttpRequest,
        query: OAuthCallbackQuery,
    ) -> ActixResult<HttpResponse> {
        callback::kakao_callback_existing(self, request, query).await
    }
}
