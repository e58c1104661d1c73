//! Kakao OAuth2 客户端
//!
//! 授权码换取 access token，再读取用户资料。

use serde::Deserialize;
use std::time::Duration;

use crate::config::KakaoConfig;
use crate::errors::{AcademyError, Result};
use crate::models::students::entities::ProviderProfile;

pub const KAKAO_PROVIDER: &str = "KAKAO";

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
}

#[derive(Debug, Deserialize)]
struct TokenErrorResponse {
    error: Option<String>,
    error_description: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
struct KakaoProfile {
    nickname: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
struct KakaoAccount {
    email: Option<String>,
    #[serde(default)]
    profile: KakaoProfile,
}

#[derive(Debug, Deserialize)]
pub(crate) struct KakaoUserInfo {
    id: i64,
    #[serde(default)]
    kakao_account: KakaoAccount,
}

impl KakaoUserInfo {
    pub(crate) fn into_profile(self) -> ProviderProfile {
        ProviderProfile {
            provider: KAKAO_PROVIDER.to_string(),
            provider_user_id: self.id.to_string(),
            email: self.kakao_account.email,
            name: self.kakao_account.profile.nickname,
        }
    }
}

pub struct KakaoClient {
    http: reqwest::Client,
}

impl KakaoClient {
    pub fn new() -> Self {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(10))
            .build()
            .unwrap_or_else(|e| {
                tracing::warn!("Failed to build Kakao HTTP client, using defaults: {}", e);
                reqwest::Client::new()
            });
        Self { http }
    }

    /// 授权页地址
    pub fn authorize_url(config: &KakaoConfig, redirect_uri: &str, state: &str) -> Result<String> {
        let url = reqwest::Url::parse_with_params(
            &config.authorize_url,
            &[
                ("client_id", config.client_id.as_str()),
                ("redirect_uri", redirect_uri),
                ("response_type", "code"),
                ("state", state),
            ],
        )
        .map_err(|e| AcademyError::external_service(format!("Invalid Kakao authorize URL: {e}")))?;
        Ok(url.into())
    }

    /// 用授权码换取 Kakao access token
    pub async fn exchange_code(
        &self,
        config: &KakaoConfig,
        code: &str,
        redirect_uri: &str,
    ) -> Result<String> {
        let mut form = vec![
            ("grant_type", "authorization_code"),
            ("client_id", config.client_id.as_str()),
            ("redirect_uri", redirect_uri),
            ("code", code),
        ];
        if !config.client_secret.is_empty() {
            form.push(("client_secret", config.client_secret.as_str()));
        }

        let response = self.http.post(&config.token_url).form(&form).send().await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            let detail = serde_json::from_str::<TokenErrorResponse>(&body)
                .ok()
                .and_then(|e| e.error_description.or(e.error))
                .unwrap_or_else(|| body.chars().take(200).collect());
            tracing::warn!("Kakao token exchange failed ({}): {}", status, detail);
            return Err(AcademyError::external_service(format!(
                "Kakao token exchange failed: {detail}"
            )));
        }

        let token: TokenResponse = response.json().await?;
        Ok(token.access_token)
    }

    /// 读取 Kakao 用户资料
    pub async fn fetch_profile(
        &self,
        config: &KakaoConfig,
        access_token: &str,
    ) -> Result<ProviderProfile> {
        let response = self
            .http
            .get(&config.user_info_url)
            .bearer_auth(access_token)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(AcademyError::external_service(format!(
                "Kakao user info request failed: {}",
                response.status()
            )));
        }

        let info: KakaoUserInfo = response.json().await?;
        Ok(info.into_profile())
    }
}

impl Default for KakaoClient {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_authorize_url_encodes_params() {
        let config = KakaoConfig {
            client_id: "kakao-client".to_string(),
            ..KakaoConfig::default()
        };
        let url = KakaoClient::authorize_url(
            &config,
            "http://localhost:3000/api/v1/auth/student/kakao/callback",
            "abc123",
        )
        .unwrap();

        assert!(url.starts_with("https://kauth.kakao.com/oauth/authorize?"));
        assert!(url.contains("client_id=kakao-client"));
        assert!(url.contains("response_type=code"));
        assert!(url.contains("state=abc123"));
        assert!(url.contains(
            "redirect_uri=http%3A%2F%2Flocalhost%3A3000%2Fapi%2Fv1%2Fauth%2Fstudent%2Fkakao%2Fcallback"
        ));
    }

    #[test]
    fn test_user_info_into_profile() {
        let json = r#"{
            "id": 4242,
            "kakao_account": {
                "email": "student@kakao.test",
                "profile": {"nickname": "하늘"}
            }
        }"#;
        let profile = serde_json::from_str::<KakaoUserInfo>(json)
            .unwrap()
            .into_profile();
        assert_eq!(profile.provider, KAKAO_PROVIDER);
        assert_eq!(profile.provider_user_id, "4242");
        assert_eq!(profile.email.as_deref(), Some("student@kakao.test"));
        assert_eq!(profile.name.as_deref(), Some("하늘"));

        // 用户未同意提供资料时只有 id
        let profile = serde_json::from_str::<KakaoUserInfo>(r#"{"id": 7}"#)
            .unwrap()
            .into_profile();
        assert_eq!(profile.provider_user_id, "7");
        assert!(profile.email.is_none());
    }
}
